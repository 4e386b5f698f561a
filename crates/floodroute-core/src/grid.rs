//! The display [`Grid`] drawn by a [`Model`](crate::app::Model) each frame,
//! and the [`Frame`] diff sent to a driver.

use crate::cell::Cell;
use crate::geom::{Point, Range};
use crate::style::Style;

/// A screen-sized 2D buffer of display [`Cell`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
}

impl Grid {
    /// Create a grid of the given dimensions, filled with blank cells.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            cells: vec![Cell::default(); bounds.len()],
            bounds,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.y * self.bounds.width() + p.x) as usize)
    }

    /// Read the cell at `p`; blank outside bounds.
    pub fn at(&self, p: Point) -> Cell {
        self.index(p).map(|i| self.cells[i]).unwrap_or_default()
    }

    /// Set the cell at `p`. No-op outside bounds.
    pub fn set(&mut self, p: Point, cell: Cell) {
        if let Some(i) = self.index(p) {
            self.cells[i] = cell;
        }
    }

    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Write `text` left to right starting at `p`, clipped at the right edge.
    /// Returns the position after the last written character.
    pub fn set_text(&mut self, p: Point, text: &str, style: Style) -> Point {
        let mut at = p;
        for ch in text.chars() {
            if at.x >= self.bounds.max.x {
                break;
            }
            self.set(at, Cell::default().with_char(ch).with_style(style));
            at = at.shift(1, 0);
        }
        at
    }

    /// Copy all cells of a same-sized grid.
    pub fn copy_from(&mut self, src: &Grid) {
        if src.bounds == self.bounds {
            self.cells.copy_from_slice(&src.cells);
        } else {
            for p in self.bounds.iter() {
                let c = src.at(p);
                self.set(p, c);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Frame / compute_frame
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub cell: Cell,
    pub pos: Point,
}

/// The set of cell changes between two consecutive draws.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub width: i32,
    pub height: i32,
}

/// Compute the cells of `curr` that differ from `prev`.
pub fn compute_frame(prev: &Grid, curr: &Grid) -> Frame {
    let bounds = curr.bounds();
    let cells = bounds
        .iter()
        .filter_map(|p| {
            let cc = curr.at(p);
            (prev.at(p) != cc).then_some(FrameCell { cell: cc, pos: p })
        })
        .collect();
    Frame {
        cells,
        width: bounds.width(),
        height: bounds.height(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_read_back() {
        let mut g = Grid::new(4, 3);
        g.set(Point::new(2, 1), Cell::default().with_char('X'));
        assert_eq!(g.at(Point::new(2, 1)).ch, 'X');
        assert_eq!(g.at(Point::new(10, 10)), Cell::default());
        g.set(Point::new(-1, 0), Cell::default().with_char('Y'));
        assert_eq!(g.at(Point::new(0, 0)), Cell::default());
    }

    #[test]
    fn set_text_clips_at_right_edge() {
        let mut g = Grid::new(4, 1);
        let end = g.set_text(Point::new(1, 0), "route", Style::default());
        assert_eq!(end, Point::new(4, 0));
        assert_eq!(g.at(Point::new(1, 0)).ch, 'r');
        assert_eq!(g.at(Point::new(3, 0)).ch, 'u');
    }

    #[test]
    fn frame_contains_only_changes() {
        let a = Grid::new(3, 2);
        let mut b = Grid::new(3, 2);
        b.set(Point::new(1, 0), Cell::default().with_char('A'));
        let frame = compute_frame(&a, &b);
        assert_eq!(frame.cells.len(), 1);
        assert_eq!(frame.cells[0].pos, Point::new(1, 0));

        let mut prev = Grid::new(3, 2);
        prev.copy_from(&b);
        assert!(compute_frame(&prev, &b).cells.is_empty());
    }
}
