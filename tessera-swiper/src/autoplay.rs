//! Repeating autoplay timer.
//!
//! The timer is polled from the frame loop rather than owning a thread: the
//! host calls [`Autoplay::poll`] with the frame timestamp and the timer says
//! whether a tick is due.

use std::time::{Duration, Instant};

use tracing::trace;

/// Default interval between autoplay ticks.
pub const DEFAULT_AUTOPLAY_TIMEOUT: Duration = Duration::from_millis(3000);

/// Timer phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoplayState {
    /// No tick scheduled.
    #[default]
    Idle,
    /// A tick fires at `next_tick`.
    Armed {
        /// When the next tick is due.
        next_tick: Instant,
    },
}

/// Repeating timer that advances the swiper one page per interval.
#[derive(Debug, Clone)]
pub struct Autoplay {
    interval: Duration,
    state: AutoplayState,
}

impl Autoplay {
    /// Creates an idle timer with the given interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: AutoplayState::Idle,
        }
    }

    /// Current phase.
    pub fn state(&self) -> AutoplayState {
        self.state
    }

    /// Whether a tick is scheduled.
    pub fn is_armed(&self) -> bool {
        matches!(self.state, AutoplayState::Armed { .. })
    }

    /// When the next tick is due, if armed.
    pub fn next_tick(&self) -> Option<Instant> {
        match self.state {
            AutoplayState::Idle => None,
            AutoplayState::Armed { next_tick } => Some(next_tick),
        }
    }

    /// Arms the timer unless it already is. An armed timer keeps its phase.
    ///
    /// Returns `true` when the timer was idle and is now armed.
    pub fn ensure_armed(&mut self, now: Instant) -> bool {
        if self.is_armed() {
            return false;
        }
        self.state = AutoplayState::Armed {
            next_tick: now + self.interval,
        };
        trace!(interval_ms = self.interval.as_millis() as u64, "autoplay armed");
        true
    }

    /// Clears any scheduled tick.
    ///
    /// Returns `true` when a tick was scheduled.
    pub fn disarm(&mut self) -> bool {
        let was_armed = self.is_armed();
        self.state = AutoplayState::Idle;
        if was_armed {
            trace!("autoplay disarmed");
        }
        was_armed
    }

    /// Returns `true` when a tick is due at `now` and schedules the next one.
    ///
    /// Ticks stay on the interval grid; intervals skipped by a long frame are
    /// dropped rather than fired in a burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        let AutoplayState::Armed { next_tick } = self.state else {
            return false;
        };
        if now < next_tick {
            return false;
        }
        let mut next = next_tick + self.interval;
        if next <= now {
            next = now + self.interval;
        }
        self.state = AutoplayState::Armed { next_tick: next };
        true
    }
}
