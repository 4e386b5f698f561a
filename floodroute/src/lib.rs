//! floodroute: greedy best-first routing on a street grid that can flood.
//!
//! The [`Session`] ties a [`GridModel`](floodroute_map::GridModel) to the
//! search in `floodroute-paths` and to a [`PlaybackController`] that walks a
//! vehicle along the found route. [`RouteModel`] puts a terminal front end
//! on top of a session.

pub mod colors;
pub mod config;
pub mod model;
pub mod playback;
pub mod session;

pub use config::{Args, Config, ConfigError};
pub use model::{PlaybackTickMsg, RouteModel};
pub use playback::{PlaybackController, PlaybackState, PlaybackTick};
pub use session::{Endpoint, SearchOutcome, Session, SessionError};
