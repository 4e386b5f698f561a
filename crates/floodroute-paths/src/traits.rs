use floodroute_core::Point;

/// Minimal pathfinding interface: neighbor enumeration.
pub trait Pather {
    /// Append the passable neighbors of `p` into `buf`, in the order the
    /// search should discover them. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather usable by greedy best-first search.
pub trait GreedyPather: Pather {
    /// Whether a route may start, end, or pass through `p`.
    fn passable(&self, p: Point) -> bool;

    /// Heuristic distance from `from` to the goal `to`. Lower is expanded
    /// first; it need not be admissible.
    fn estimate(&self, from: Point, to: Point) -> i32;
}
