//! Named preset layouts and the [`GridModel`] that switches between them.

use std::fmt;
use std::str::FromStr;

use floodroute_core::{Point, Range};

use crate::error::MapError;
use crate::map::TileMap;
use crate::tile::TileValue;

/// Columns of the preset layouts.
pub const COLS: i32 = 8;
/// Rows of the preset layouts.
pub const ROWS: i32 = 13;

const R: TileValue = TileValue::Road;
const B: TileValue = TileValue::Building;
const F: TileValue = TileValue::Flood;

const MAP_NORMAL: [[TileValue; COLS as usize]; ROWS as usize] = [
    [R, R, R, R, R, R, R, R],
    [B, B, B, B, R, B, B, R],
    [B, B, B, B, R, B, B, R],
    [R, R, R, R, R, R, R, R],
    [F, R, B, B, R, B, B, R],
    [F, R, B, B, R, B, B, R],
    [F, R, B, B, R, R, R, R],
    [F, R, B, B, R, B, B, R],
    [F, R, B, B, R, B, B, R],
    [R, R, R, R, R, R, R, R],
    [F, R, B, B, B, B, B, B],
    [F, R, B, B, B, B, B, B],
    [F, R, B, B, B, B, B, B],
];

// The western edge under water: column 0 from row 3 down, column 1 on rows 4-8.
const MAP_FLOOD: [[TileValue; COLS as usize]; ROWS as usize] = [
    [R, R, R, R, R, R, R, R],
    [B, B, B, B, R, B, B, R],
    [B, B, B, B, R, B, B, R],
    [F, R, R, R, R, R, R, R],
    [F, F, B, B, R, B, B, R],
    [F, F, B, B, R, B, B, R],
    [F, F, B, B, R, R, R, R],
    [F, F, B, B, R, B, B, R],
    [F, F, B, B, R, B, B, R],
    [F, R, R, R, R, R, R, R],
    [F, R, B, B, B, B, B, B],
    [F, R, B, B, B, B, B, B],
    [F, R, B, B, B, B, B, B],
];

// ---------------------------------------------------------------------------
// MapVariant
// ---------------------------------------------------------------------------

/// A named preset layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MapVariant {
    /// The baseline street layout.
    #[default]
    Normal,
    /// The baseline with the western edge flooded.
    Flood,
}

impl MapVariant {
    pub const ALL: [MapVariant; 2] = [MapVariant::Normal, MapVariant::Flood];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Flood => "flood",
        }
    }

    /// The built-in layout of this variant.
    pub fn layout(self) -> TileMap {
        match self {
            Self::Normal => TileMap::from_tiles(&MAP_NORMAL),
            Self::Flood => TileMap::from_tiles(&MAP_FLOOD),
        }
    }
}

impl fmt::Display for MapVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MapVariant {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, MapError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "baseline" => Ok(Self::Normal),
            "flood" => Ok(Self::Flood),
            _ => Err(MapError::UnknownVariant(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// GridModel
// ---------------------------------------------------------------------------

/// The active tile layout plus the presets it can switch to.
///
/// All presets share one size, checked once at construction. Switching
/// variants swaps the whole layout; cells are never edited in place.
#[derive(Debug, Clone)]
pub struct GridModel {
    variant: MapVariant,
    normal: TileMap,
    flood: TileMap,
}

impl GridModel {
    /// The built-in 8×13 presets, starting on [`MapVariant::Normal`].
    pub fn new() -> Self {
        Self {
            variant: MapVariant::Normal,
            normal: MapVariant::Normal.layout(),
            flood: MapVariant::Flood.layout(),
        }
    }

    /// Custom presets. Both layouts must have the same dimensions.
    pub fn with_presets(normal: TileMap, flood: TileMap) -> Result<Self, MapError> {
        if normal.size() != flood.size() {
            return Err(MapError::DimensionMismatch {
                expected: normal.size(),
                found: flood.size(),
            });
        }
        Ok(Self {
            variant: MapVariant::Normal,
            normal,
            flood,
        })
    }

    /// The same layout for every variant.
    pub fn single(map: TileMap) -> Self {
        Self {
            variant: MapVariant::Normal,
            normal: map.clone(),
            flood: map,
        }
    }

    /// Replace the active layout with the preset named by `variant`.
    pub fn select_variant(&mut self, variant: MapVariant) {
        self.variant = variant;
    }

    #[inline]
    pub fn variant(&self) -> MapVariant {
        self.variant
    }

    /// The active layout.
    #[inline]
    pub fn map(&self) -> &TileMap {
        match self.variant {
            MapVariant::Normal => &self.normal,
            MapVariant::Flood => &self.flood,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.map().bounds()
    }

    /// The tile at `cell` in the active layout.
    #[inline]
    pub fn tile_at(&self, cell: Point) -> Result<TileValue, MapError> {
        self.map().tile_at(cell)
    }

    /// Whether `cell` is an in-bounds road in the active layout.
    #[inline]
    pub fn is_walkable(&self, cell: Point) -> bool {
        self.map().is_walkable(cell)
    }
}

impl Default for GridModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walkable_snapshot(model: &GridModel) -> Vec<bool> {
        Range::new(-1, -1, COLS + 1, ROWS + 1)
            .iter()
            .map(|p| model.is_walkable(p))
            .collect()
    }

    #[test]
    fn presets_share_dimensions() {
        for v in MapVariant::ALL {
            assert_eq!(v.layout().size(), Point::new(COLS, ROWS), "{v}");
        }
    }

    #[test]
    fn flood_covers_column_zero_below_row_three() {
        let flood = MapVariant::Flood.layout();
        for y in 3..ROWS {
            assert_eq!(flood.tile_at(Point::new(0, y)), Ok(TileValue::Flood));
        }
        for y in 4..=8 {
            assert_eq!(flood.tile_at(Point::new(1, y)), Ok(TileValue::Flood));
        }
        assert!(flood.is_walkable(Point::new(0, 0)));
    }

    #[test]
    fn baseline_layout_spot_checks() {
        let normal = MapVariant::Normal.layout();
        assert!(normal.is_walkable(Point::new(0, 0)));
        assert!(normal.is_walkable(Point::new(1, 12)));
        assert_eq!(normal.tile_at(Point::new(7, 12)), Ok(TileValue::Building));
        assert_eq!(normal.tile_at(Point::new(0, 4)), Ok(TileValue::Flood));
    }

    #[test]
    fn switching_back_restores_walkability() {
        let mut model = GridModel::new();
        let before = walkable_snapshot(&model);
        model.select_variant(MapVariant::Flood);
        assert_ne!(walkable_snapshot(&model), before);
        model.select_variant(MapVariant::Normal);
        assert_eq!(walkable_snapshot(&model), before);
    }

    #[test]
    fn variant_names_parse() {
        assert_eq!("flood".parse(), Ok(MapVariant::Flood));
        assert_eq!(" Baseline ".parse(), Ok(MapVariant::Normal));
        assert_eq!(
            "lava".parse::<MapVariant>(),
            Err(MapError::UnknownVariant("lava".into()))
        );
        for v in MapVariant::ALL {
            assert_eq!(v.name().parse(), Ok(v));
        }
    }

    #[test]
    fn custom_presets_must_match_in_size() {
        let a = TileMap::parse("..\n..").unwrap();
        let b = TileMap::parse("...").unwrap();
        assert_eq!(
            GridModel::with_presets(a.clone(), b).unwrap_err(),
            MapError::DimensionMismatch {
                expected: Point::new(2, 2),
                found: Point::new(3, 1)
            }
        );
        let model = GridModel::with_presets(a.clone(), a).unwrap();
        assert_eq!(model.variant(), MapVariant::Normal);
    }
}
