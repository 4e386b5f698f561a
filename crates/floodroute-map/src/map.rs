//! [`TileMap`]: an immutable rectangular layout of [`TileValue`]s.

use std::fmt;

use floodroute_core::{Point, Range};
use floodroute_paths::{GreedyPather, Pather, manhattan};

use crate::error::MapError;
use crate::tile::TileValue;

/// A fixed-size tile layout. Every in-bounds cell holds exactly one tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    tiles: Vec<TileValue>,
    bounds: Range,
}

impl TileMap {
    /// Build a map from a non-empty table of tiles.
    pub(crate) fn from_tiles<const W: usize>(rows: &[[TileValue; W]]) -> Self {
        debug_assert!(W > 0 && !rows.is_empty());
        Self {
            tiles: rows.iter().flatten().copied().collect(),
            bounds: Range::new(0, 0, W as i32, rows.len() as i32),
        }
    }

    /// Build a map from rows of numeric tile codes (0 road, 1 building,
    /// 2 flood). Row `y` holds the cells `(0..width, y)`.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, MapError> {
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if width == 0 {
            return Err(MapError::Empty);
        }
        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, codes) in rows.iter().enumerate() {
            let codes = codes.as_ref();
            if codes.len() != width {
                return Err(MapError::Ragged {
                    row,
                    found: codes.len(),
                    expected: width,
                });
            }
            for &code in codes {
                tiles.push(TileValue::try_from(code)?);
            }
        }
        Ok(Self {
            tiles,
            bounds: Range::new(0, 0, width as i32, rows.len() as i32),
        })
    }

    /// Parse a text layout: one row per non-blank line, `.` road,
    /// `#` building, `~` flood. Surrounding whitespace is ignored.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let width = lines.first().map(|l| l.chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(MapError::Empty);
        }
        let mut tiles = Vec::with_capacity(width * lines.len());
        for (y, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MapError::Ragged {
                    row: y,
                    found,
                    expected: width,
                });
            }
            for (x, glyph) in line.chars().enumerate() {
                let tile = TileValue::from_glyph(glyph).ok_or(MapError::UnknownGlyph {
                    glyph,
                    at: Point::new(x as i32, y as i32),
                })?;
                tiles.push(tile);
            }
        }
        Ok(Self {
            tiles,
            bounds: Range::new(0, 0, width as i32, lines.len() as i32),
        })
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Size as a `Point` (columns, rows).
    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// The tile at `cell`.
    pub fn tile_at(&self, cell: Point) -> Result<TileValue, MapError> {
        if !self.bounds.contains(cell) {
            return Err(MapError::OutOfBounds {
                cell,
                bounds: self.bounds,
            });
        }
        Ok(self.tiles[(cell.y * self.bounds.width() + cell.x) as usize])
    }

    /// Whether `cell` is an in-bounds road. Total over all coordinates.
    #[inline]
    pub fn is_walkable(&self, cell: Point) -> bool {
        self.tile_at(cell).is_ok_and(TileValue::is_walkable)
    }

    /// Row-major iterator over `(cell, tile)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, TileValue)> + '_ {
        self.bounds.iter().zip(self.tiles.iter().copied())
    }
}

impl fmt::Display for TileMap {
    /// Renders the text layout accepted by [`TileMap::parse`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (p, tile) in self.iter() {
            if p.x == 0 && p.y > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", tile.glyph())?;
        }
        Ok(())
    }
}

impl Pather for TileMap {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(p.neighbors_4().into_iter().filter(|&n| self.is_walkable(n)));
    }
}

impl GreedyPather for TileMap {
    fn passable(&self, p: Point) -> bool {
        self.is_walkable(p)
    }

    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_agree() {
        let text = "..#\n~..";
        let map = TileMap::parse(text).unwrap();
        assert_eq!(map.size(), Point::new(3, 2));
        assert_eq!(map.tile_at(Point::new(2, 0)), Ok(TileValue::Building));
        assert_eq!(map.tile_at(Point::new(0, 1)), Ok(TileValue::Flood));
        assert_eq!(map.to_string(), text);
    }

    #[test]
    fn parse_rejects_bad_layouts() {
        assert_eq!(TileMap::parse("  \n"), Err(MapError::Empty));
        assert_eq!(
            TileMap::parse("...\n.."),
            Err(MapError::Ragged {
                row: 1,
                found: 2,
                expected: 3
            })
        );
        assert_eq!(
            TileMap::parse(".x."),
            Err(MapError::UnknownGlyph {
                glyph: 'x',
                at: Point::new(1, 0)
            })
        );
    }

    #[test]
    fn from_rows_uses_numeric_codes() {
        let map = TileMap::from_rows(&[[0u8, 1], [2, 0]]).unwrap();
        assert_eq!(map.to_string(), ".#\n~.");
        assert_eq!(
            TileMap::from_rows(&[vec![0u8, 7]]),
            Err(MapError::UnknownTile(7))
        );
        assert_eq!(TileMap::from_rows::<Vec<u8>>(&[]), Err(MapError::Empty));
    }

    #[test]
    fn tile_at_reports_out_of_bounds() {
        let map = TileMap::parse("..\n..").unwrap();
        assert_eq!(
            map.tile_at(Point::new(2, 0)),
            Err(MapError::OutOfBounds {
                cell: Point::new(2, 0),
                bounds: Range::new(0, 0, 2, 2)
            })
        );
    }

    #[test]
    fn walkability_is_total() {
        let map = TileMap::parse(".#\n~.").unwrap();
        for y in -3..5 {
            for x in -3..5 {
                let p = Point::new(x, y);
                let expected = matches!((x, y), (0, 0) | (1, 1));
                assert_eq!(map.is_walkable(p), expected, "{p}");
            }
        }
    }

    #[test]
    fn neighbors_are_walkable_and_ordered() {
        let map = TileMap::parse("...\n...\n.#.").unwrap();
        let mut buf = Vec::new();
        map.neighbors(Point::new(1, 1), &mut buf);
        assert_eq!(
            buf,
            vec![Point::new(2, 1), Point::new(0, 1), Point::new(1, 0)]
        );
    }
}
