//! **floodroute-core**: foundation types for the floodroute workspace.
//!
//! Geometry primitives shared by the map and the search, the styled display
//! grid, input messages, and the Elm-architecture application loop that the
//! terminal front end runs on.

pub mod app;
pub mod cell;
pub mod geom;
pub mod grid;
pub mod messages;
pub mod style;

pub use app::{App, AppConfig, Context, Driver, Effect, Model, cmd};
pub use cell::Cell;
pub use geom::{Point, Range};
pub use grid::Grid;
pub use messages::{Key, MouseAction, Msg};
pub use style::{AttrMask, Color, Style};
