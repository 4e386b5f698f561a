//! Greedy best-first route search on 2D grids.
//!
//! Searches run through [`PathRange`], which owns and reuses its caches so
//! that repeated queries over the same rectangle allocate nothing after
//! warm-up:
//!
//! - **Greedy best-first** ([`PathRange::greedy_path`]): expands the
//!   frontier cell closest to the goal by [`GreedyPather::estimate`],
//!   breaking ties by discovery order. Deterministic, not always shortest.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | neighbor enumeration |
//! | [`GreedyPather`] : [`Pather`] | greedy best-first |

mod distance;
mod error;
mod greedy;
mod pathrange;
mod route;
mod traits;

pub use distance::manhattan;
pub use error::PathError;
pub use pathrange::{PathRange, SearchStats};
pub use route::Route;
pub use traits::{GreedyPather, Pather};
