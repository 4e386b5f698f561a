use std::fmt;

use floodroute_core::Point;

use crate::error::PathError;

/// An ordered, non-empty sequence of orthogonally adjacent cells from a
/// start to an end, inclusive.
///
/// A route is a value: it is replaced wholesale, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Route {
    cells: Vec<Point>,
}

impl Route {
    /// Validate `cells` as a route.
    pub fn new(cells: Vec<Point>) -> Result<Self, PathError> {
        if cells.is_empty() {
            return Err(PathError::EmptyRoute);
        }
        if let Some(w) = cells.windows(2).find(|w| !w[0].is_adjacent_4(w[1])) {
            return Err(PathError::Disconnected(w[0], w[1]));
        }
        Ok(Self { cells })
    }

    /// Wrap cells produced by a search over a connected pather.
    pub(crate) fn from_search(cells: Vec<Point>) -> Self {
        debug_assert!(Self::new(cells.clone()).is_ok());
        Self { cells }
    }

    #[inline]
    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; kept for the `len`/`is_empty` pair.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The start cell.
    #[inline]
    pub fn first(&self) -> Point {
        self.cells[0]
    }

    /// The end cell.
    #[inline]
    pub fn last(&self) -> Point {
        self.cells[self.cells.len() - 1]
    }

    pub fn contains(&self, p: Point) -> bool {
        self.cells.contains(&p)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{p}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_gaps() {
        assert_eq!(Route::new(vec![]), Err(PathError::EmptyRoute));
        let gap = vec![Point::new(0, 0), Point::new(2, 0)];
        assert_eq!(
            Route::new(gap),
            Err(PathError::Disconnected(Point::new(0, 0), Point::new(2, 0)))
        );
        let diagonal = vec![Point::new(0, 0), Point::new(1, 1)];
        assert!(Route::new(diagonal).is_err());
    }

    #[test]
    fn single_cell_route() {
        let r = Route::new(vec![Point::new(3, 3)]).unwrap();
        assert_eq!(r.len(), 1);
        assert_eq!(r.first(), r.last());
        assert_eq!(r.to_string(), "(3, 3)");
    }

    #[test]
    fn display_joins_cells() {
        let r = Route::new(vec![Point::new(0, 0), Point::new(1, 0)]).unwrap();
        assert_eq!(r.to_string(), "(0, 0) -> (1, 0)");
        assert!(r.contains(Point::new(1, 0)));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn route_serializes_as_cell_list() {
        let r = Route::new(vec![Point::new(0, 0), Point::new(0, 1)]).unwrap();
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"cells":[{"x":0,"y":0},{"x":0,"y":1}]}"#);
    }
}
