use std::collections::BinaryHeap;

use floodroute_core::{Point, Range};

// ---------------------------------------------------------------------------
// Internal node for greedy searches
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
pub(crate) struct Node {
    pub(crate) parent: usize,
    /// Search generation in which this node was last discovered.
    pub(crate) generation: u32,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            parent: usize::MAX,
            generation: 0,
        }
    }
}

/// Frontier entry, ordered so that `BinaryHeap` (a max-heap) pops the
/// smallest heuristic first and, among equal heuristics, the entry that
/// entered the frontier first.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FrontierRef {
    pub(crate) idx: usize,
    pub(crate) h: i32,
    pub(crate) seq: u32,
}

impl Ord for FrontierRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.h.cmp(&self.h).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Counters from the most recent search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Cells removed from the frontier.
    pub expanded: usize,
    /// Cells ever marked visited (start included).
    pub discovered: usize,
}

// ---------------------------------------------------------------------------
// PathRange
// ---------------------------------------------------------------------------

/// Search coordinator for one grid rectangle.
///
/// `PathRange` owns the visited stamps, predecessor links, frontier heap and
/// neighbor buffer, so repeated searches over the same rectangle allocate
/// nothing after the first one.
pub struct PathRange {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) frontier: BinaryHeap<FrontierRef>,
    pub(crate) nbuf: Vec<Point>,
    pub(crate) stats: SearchStats,
}

impl PathRange {
    /// Create a new `PathRange` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            width: rng.width().max(0) as usize,
            nodes: vec![Node::default(); rng.len()],
            generation: 0,
            frontier: BinaryHeap::new(),
            nbuf: Vec::with_capacity(4),
            stats: SearchStats::default(),
        }
    }

    /// Counters from the most recent search.
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Start a new search generation, invalidating every visited stamp.
    pub(crate) fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Stamps from 2^32 searches ago would look fresh again.
            self.nodes.fill(Node::default());
            self.generation = 1;
        }
        self.generation
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }
}
