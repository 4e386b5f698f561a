use floodroute_core::Point;

use crate::PathRange;
use crate::error::PathError;
use crate::pathrange::{FrontierRef, SearchStats};
use crate::route::Route;
use crate::traits::GreedyPather;

impl PathRange {
    /// Find a route from `from` to `to` by greedy best-first search.
    ///
    /// The frontier member with the lowest [`estimate`] is expanded next;
    /// among equal estimates the one discovered first wins. Neighbors are
    /// discovered in the order the pather yields them and a cell, once
    /// discovered, keeps its first predecessor. The result is deterministic
    /// but not necessarily the shortest route.
    ///
    /// Returns `Ok(None)` when no passable route exists, and an error when
    /// an endpoint is impassable or outside the range.
    ///
    /// [`estimate`]: GreedyPather::estimate
    pub fn greedy_path<P: GreedyPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Result<Option<Route>, PathError> {
        let start_idx = self.idx(from).ok_or(PathError::OutOfRange(from))?;
        let goal_idx = self.idx(to).ok_or(PathError::OutOfRange(to))?;
        if !pather.passable(from) {
            return Err(PathError::BlockedStart(from));
        }
        if !pather.passable(to) {
            return Err(PathError::BlockedEnd(to));
        }

        let cur_gen = self.next_generation();
        self.nodes[start_idx] = crate::pathrange::Node {
            parent: usize::MAX,
            generation: cur_gen,
        };

        self.frontier.clear();
        let mut seq: u32 = 0;
        self.frontier.push(FrontierRef {
            idx: start_idx,
            h: pather.estimate(from, to),
            seq,
        });
        let mut stats = SearchStats {
            expanded: 0,
            discovered: 1,
        };

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = loop {
            let Some(current) = self.frontier.pop() else {
                break false;
            };
            stats.expanded += 1;
            let ci = current.idx;
            if ci == goal_idx {
                break true;
            }

            let cp = self.point(ci);
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if !pather.passable(np) || self.nodes[ni].generation == cur_gen {
                    continue;
                }
                self.nodes[ni] = crate::pathrange::Node {
                    parent: ci,
                    generation: cur_gen,
                };
                seq += 1;
                self.frontier.push(FrontierRef {
                    idx: ni,
                    h: pather.estimate(np, to),
                    seq,
                });
                stats.discovered += 1;
            }
        };

        self.nbuf = nbuf;
        self.frontier.clear();
        self.stats = stats;

        if !found {
            log::debug!(
                "greedy search {from} -> {to}: unreachable after {} expansions",
                stats.expanded
            );
            return Ok(None);
        }

        let mut cells = Vec::new();
        let mut ci = goal_idx;
        while ci != usize::MAX {
            cells.push(self.point(ci));
            ci = self.nodes[ci].parent;
        }
        cells.reverse();
        log::debug!(
            "greedy search {from} -> {to}: {} cells, {} expansions",
            cells.len(),
            stats.expanded
        );
        Ok(Some(Route::from_search(cells)))
    }
}
