//! The [`Session`]: grid, endpoints, route and playback kept consistent.
//!
//! Every mutation goes through a `Session` method. Rejected requests return
//! an error and leave the session exactly as it was.

use std::fmt;
use std::time::Duration;

use floodroute_core::Point;
use floodroute_map::{GridModel, MapVariant, TileValue};
use floodroute_paths::{PathError, PathRange, Route};

use crate::playback::{PlaybackController, PlaybackState, PlaybackTick};

/// Which endpoint a request concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::End => "end",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("start is not set")]
    StartUnset,
    #[error("end is not set")]
    EndUnset,
    #[error("{role} {cell} is on a {tile}, not a road")]
    NotWalkable {
        role: Endpoint,
        cell: Point,
        tile: TileValue,
    },
    #[error("{role} {cell} is outside the map")]
    OutOfBounds { role: Endpoint, cell: Point },
    #[error("search failed")]
    Search(#[from] PathError),
}

/// Result of a successful [`Session::request_search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A route was stored and playback started; deliver `tick` to animate.
    Found { tick: Option<PlaybackTick> },
    /// No road connects start and end.
    Unreachable,
}

pub struct Session {
    grid: GridModel,
    paths: PathRange,
    start: Option<Point>,
    end: Option<Point>,
    route: Option<Route>,
    playback: PlaybackController,
}

impl Session {
    pub fn new(grid: GridModel, tick_interval: Duration) -> Self {
        Self {
            paths: PathRange::new(grid.bounds()),
            grid,
            start: None,
            end: None,
            route: None,
            playback: PlaybackController::new(tick_interval),
        }
    }

    // -------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------

    /// Place the start marker. Only road cells are accepted.
    pub fn set_start(&mut self, cell: Point) -> Result<(), SessionError> {
        self.check_endpoint(Endpoint::Start, cell)?;
        self.start = Some(cell);
        log::info!("start set to {cell}");
        Ok(())
    }

    /// Place the end marker. Only road cells are accepted.
    pub fn set_end(&mut self, cell: Point) -> Result<(), SessionError> {
        self.check_endpoint(Endpoint::End, cell)?;
        self.end = Some(cell);
        log::info!("end set to {cell}");
        Ok(())
    }

    /// Switch the tile layout. The route is dropped and playback stops;
    /// endpoints are kept and re-checked by the next search.
    pub fn select_variant(&mut self, variant: MapVariant) {
        self.grid.select_variant(variant);
        self.route = None;
        self.playback.clear();
        log::info!("map variant switched to {variant}");
    }

    /// Search from start to end on the active layout.
    ///
    /// On success the route replaces the previous one and playback restarts
    /// from its first cell. An unreachable end clears the route and stops
    /// playback but keeps both endpoints.
    pub fn request_search(&mut self) -> Result<SearchOutcome, SessionError> {
        let start = self.start.ok_or(SessionError::StartUnset)?;
        let end = self.end.ok_or(SessionError::EndUnset)?;
        self.check_endpoint(Endpoint::Start, start)?;
        self.check_endpoint(Endpoint::End, end)?;

        let found = self.paths.greedy_path(self.grid.map(), start, end)?;
        let stats = self.paths.stats();
        match found {
            Some(route) => {
                log::info!(
                    "route {start} -> {end}: {} cells ({} expanded)",
                    route.len(),
                    stats.expanded
                );
                let tick = self.playback.start(route.cells());
                self.route = Some(route);
                Ok(SearchOutcome::Found { tick })
            }
            None => {
                log::warn!(
                    "no route {start} -> {end} on {} map ({} expanded)",
                    self.grid.variant(),
                    stats.expanded
                );
                self.route = None;
                self.playback.clear();
                Ok(SearchOutcome::Unreachable)
            }
        }
    }

    /// Back to the normal layout with no endpoints, route or playback.
    pub fn reset(&mut self) {
        self.grid.select_variant(MapVariant::Normal);
        self.start = None;
        self.end = None;
        self.route = None;
        self.playback.clear();
        log::info!("session reset");
    }

    pub fn cancel_playback(&mut self) {
        self.playback.cancel();
    }

    /// Deliver a playback token; see [`PlaybackController::tick`].
    pub fn playback_tick(
        &mut self,
        token: PlaybackTick,
        on_tick: impl FnMut(Point),
    ) -> Option<PlaybackTick> {
        self.playback.tick(token, on_tick)
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    #[inline]
    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// The tile at `cell` in the active layout, `None` outside the map.
    pub fn current_tile(&self, cell: Point) -> Option<TileValue> {
        self.grid.tile_at(cell).ok()
    }

    #[inline]
    pub fn is_walkable(&self, cell: Point) -> bool {
        self.grid.is_walkable(cell)
    }

    #[inline]
    pub fn variant(&self) -> MapVariant {
        self.grid.variant()
    }

    #[inline]
    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    /// Position of the vehicle during and after playback.
    #[inline]
    pub fn marker(&self) -> Option<Point> {
        self.playback.marker()
    }

    #[inline]
    pub fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    fn check_endpoint(&self, role: Endpoint, cell: Point) -> Result<(), SessionError> {
        let Ok(tile) = self.grid.tile_at(cell) else {
            log::warn!("rejected {role} {cell}: outside the map");
            return Err(SessionError::OutOfBounds { role, cell });
        };
        if !tile.is_walkable() {
            log::warn!("rejected {role} {cell}: {tile}");
            return Err(SessionError::NotWalkable { role, cell, tile });
        }
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GridModel::new(), Duration::from_millis(250))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_endpoint_leaves_state_unchanged() {
        let mut s = Session::default();
        s.set_start(Point::new(0, 0)).unwrap();
        let err = s.set_start(Point::new(0, 1)).unwrap_err();
        assert_eq!(
            err,
            SessionError::NotWalkable {
                role: Endpoint::Start,
                cell: Point::new(0, 1),
                tile: TileValue::Building
            }
        );
        assert_eq!(s.start(), Some(Point::new(0, 0)));
        assert_eq!(
            s.set_end(Point::new(8, 0)),
            Err(SessionError::OutOfBounds {
                role: Endpoint::End,
                cell: Point::new(8, 0)
            })
        );
        assert_eq!(s.end(), None);
    }

    #[test]
    fn error_messages_name_the_endpoint() {
        let err = SessionError::NotWalkable {
            role: Endpoint::End,
            cell: Point::new(7, 12),
            tile: TileValue::Building,
        };
        assert_eq!(err.to_string(), "end (7, 12) is on a building, not a road");
        assert_eq!(SessionError::StartUnset.to_string(), "start is not set");
    }

    #[test]
    fn current_tile_is_none_outside() {
        let s = Session::default();
        assert_eq!(s.current_tile(Point::new(0, 4)), Some(TileValue::Flood));
        assert_eq!(s.current_tile(Point::new(-1, 0)), None);
    }
}
