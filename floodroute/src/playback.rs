//! Step-by-step playback of a route as a token-driven state machine.
//!
//! The controller never sleeps or spawns anything itself. Each step hands
//! back a [`PlaybackTick`] that the caller delivers after
//! [`PlaybackTick::delay`]; a token issued before the last `start` or
//! `cancel` is stale and emits nothing.

use std::time::Duration;

use floodroute_core::Point;

/// Token for the next playback step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackTick {
    generation: u64,
    step: usize,
    /// How long to wait before delivering this token.
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    /// The next tick emits `route[cursor]`.
    Playing { cursor: usize },
    /// Every cell has been emitted; the marker rests on the last one.
    Done,
}

#[derive(Debug, Clone)]
pub struct PlaybackController {
    route: Vec<Point>,
    state: PlaybackState,
    generation: u64,
    interval: Duration,
    marker: Option<Point>,
}

impl PlaybackController {
    pub fn new(interval: Duration) -> Self {
        Self {
            route: Vec::new(),
            state: PlaybackState::Idle,
            generation: 0,
            interval,
            marker: None,
        }
    }

    /// Begin playing `route` from its first cell, discarding any earlier
    /// playback. Returns the first token, due immediately, or `None` for an
    /// empty route.
    pub fn start(&mut self, route: &[Point]) -> Option<PlaybackTick> {
        self.clear();
        if route.is_empty() {
            return None;
        }
        self.route.extend_from_slice(route);
        self.state = PlaybackState::Playing { cursor: 0 };
        log::debug!("playback {} started over {} cells", self.generation, route.len());
        Some(self.token(0, Duration::ZERO))
    }

    /// Deliver `token`: emit the current cell through `on_tick` and return
    /// the token for the following step, if any.
    pub fn tick(
        &mut self,
        token: PlaybackTick,
        mut on_tick: impl FnMut(Point),
    ) -> Option<PlaybackTick> {
        let PlaybackState::Playing { cursor } = self.state else {
            return None;
        };
        if token.generation != self.generation || token.step != cursor {
            log::trace!("dropping stale playback tick {token:?}");
            return None;
        }
        let cell = self.route[cursor];
        self.marker = Some(cell);
        on_tick(cell);

        let next = cursor + 1;
        if next == self.route.len() {
            self.state = PlaybackState::Done;
            log::debug!("playback {} done", self.generation);
            None
        } else {
            self.state = PlaybackState::Playing { cursor: next };
            Some(self.token(next, self.interval))
        }
    }

    /// Stop a running playback and clear the marker. Outstanding tokens
    /// become stale. Does nothing from `Idle` or `Done`.
    pub fn cancel(&mut self) {
        if matches!(self.state, PlaybackState::Playing { .. }) {
            log::debug!("playback {} cancelled", self.generation);
            self.clear();
        }
    }

    /// Drop the route and marker from any state, back to `Idle`.
    pub fn clear(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.state = PlaybackState::Idle;
        self.route.clear();
        self.marker = None;
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// The vehicle position: the last emitted cell.
    #[inline]
    pub fn marker(&self) -> Option<Point> {
        self.marker
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    fn token(&self, step: usize, delay: Duration) -> PlaybackTick {
        PlaybackTick {
            generation: self.generation,
            step,
            delay,
        }
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}
