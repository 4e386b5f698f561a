use floodroute_core::{Point, Range};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("cell {cell} is outside the map {bounds}")]
    OutOfBounds { cell: Point, bounds: Range },
    #[error("unknown tile code {0}")]
    UnknownTile(u8),
    #[error("unknown tile glyph {glyph:?} at {at}")]
    UnknownGlyph { glyph: char, at: Point },
    #[error("map layout has no cells")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("variant layouts differ in size: {expected} vs {found}")]
    DimensionMismatch { expected: Point, found: Point },
    #[error("unknown map variant {0:?} (expected \"normal\" or \"flood\")")]
    UnknownVariant(String),
}
