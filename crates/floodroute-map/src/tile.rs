//! The closed set of tile kinds.

use std::fmt;

use crate::error::MapError;

/// What occupies one map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TileValue {
    /// Walkable street.
    #[default]
    Road,
    /// A house or wall.
    Building,
    /// A lake or flooded street.
    Flood,
}

impl TileValue {
    /// Only roads can be driven on.
    #[inline]
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Road)
    }

    /// Numeric code used by the preset layouts: 0 road, 1 building, 2 flood.
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            Self::Road => 0,
            Self::Building => 1,
            Self::Flood => 2,
        }
    }

    /// Glyph used by the text layout format.
    #[inline]
    pub const fn glyph(self) -> char {
        match self {
            Self::Road => '.',
            Self::Building => '#',
            Self::Flood => '~',
        }
    }

    /// Parse a text layout glyph.
    pub fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Road),
            '#' => Some(Self::Building),
            '~' => Some(Self::Flood),
            _ => None,
        }
    }
}

impl TryFrom<u8> for TileValue {
    type Error = MapError;

    fn try_from(code: u8) -> Result<Self, MapError> {
        match code {
            0 => Ok(Self::Road),
            1 => Ok(Self::Building),
            2 => Ok(Self::Flood),
            other => Err(MapError::UnknownTile(other)),
        }
    }
}

impl fmt::Display for TileValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Road => "road",
            Self::Building => "building",
            Self::Flood => "flood",
        })
    }
}
