//! Tile maps for floodroute: the closed [`TileValue`] set, immutable
//! [`TileMap`] layouts, and the [`GridModel`] that switches between the
//! named [`MapVariant`] presets.
//!
//! A [`TileMap`] is also a [`GreedyPather`](floodroute_paths::GreedyPather):
//! only roads are passable and the estimate is the Manhattan distance.

mod error;
mod map;
mod tile;
mod variant;

pub use error::MapError;
pub use map::TileMap;
pub use tile::TileValue;
pub use variant::{COLS, GridModel, MapVariant, ROWS};
