//! Horizontal drag interpretation.
//!
//! The swiper consumes [`GestureEvent`]s carrying the cumulative horizontal
//! displacement since the gesture started. Hosts that only see absolute
//! pointer positions feed them through a [`DragTracker`] first.
//!
//! ```
//! use std::time::{Duration, Instant};
//! use tessera_swiper::gesture::{DragTracker, GestureEvent, PointerInput};
//!
//! let t0 = Instant::now();
//! let mut drag = DragTracker::default();
//! drag.feed(PointerInput::Pressed { x: 200.0, timestamp: t0 });
//! let event = drag.feed(PointerInput::Moved { x: 150.0 });
//! assert_eq!(event, Some(GestureEvent::Move { dx: -50.0 }));
//! ```

use std::time::{Duration, Instant};

use tracing::trace;

/// Releases shorter than this commit to the next page whatever the distance.
pub const FLICK_DURATION: Duration = Duration::from_millis(300);

/// A gesture sample delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// The finger touched down on the swiper.
    Start {
        /// Touch-down time.
        timestamp: Instant,
    },
    /// The finger moved.
    Move {
        /// Horizontal displacement since the gesture started.
        dx: f32,
    },
    /// The finger lifted.
    End {
        /// Horizontal displacement since the gesture started.
        dx: f32,
        /// Lift-off time.
        timestamp: Instant,
    },
    /// The host took the gesture away, e.g. for a system back-swipe.
    Terminate,
}

/// Direction a drag is pulling the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Rightward drag, revealing the previous page.
    Backward,
    /// Leftward drag, revealing the next page.
    Forward,
}

impl SwipeDirection {
    /// Direction of a displacement; `None` when there is none.
    pub fn from_dx(dx: f32) -> Option<Self> {
        if dx > 0.0 {
            Some(Self::Backward)
        } else if dx < 0.0 {
            Some(Self::Forward)
        } else {
            None
        }
    }
}

/// Whether a release should move to the neighbouring page.
///
/// A drag commits when it travelled more than half a page, or when it was a
/// fast flick regardless of distance.
pub fn should_commit(dx: f32, duration: Duration, page_width: f32) -> bool {
    dx.abs() > page_width / 2.0 || duration < FLICK_DURATION
}

/// Outcome of a finished drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    /// Final displacement.
    pub dx: f32,
    /// Time between touch-down and lift-off.
    pub duration: Duration,
    /// Direction of the final displacement.
    pub direction: Option<SwipeDirection>,
    /// Whether the drag moves to the neighbouring page.
    pub commit: bool,
}

impl Release {
    /// Direction to move in, when the release commits.
    pub fn committed_direction(&self) -> Option<SwipeDirection> {
        if self.commit { self.direction } else { None }
    }
}

/// Remembers the touch-down time of the current drag.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    started_at: Option<Instant>,
}

impl GestureTracker {
    /// Records the start of a drag.
    pub fn begin(&mut self, timestamp: Instant) {
        self.started_at = Some(timestamp);
    }

    /// Whether a drag is in progress.
    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    /// Finishes the drag and decides whether it commits.
    ///
    /// A release without a recorded start is treated as starting at
    /// `timestamp`, i.e. as an instant flick.
    pub fn release(&mut self, dx: f32, timestamp: Instant, page_width: f32) -> Release {
        let started_at = self.started_at.take().unwrap_or(timestamp);
        let duration = timestamp.saturating_duration_since(started_at);
        let release = Release {
            dx,
            duration,
            direction: SwipeDirection::from_dx(dx),
            commit: should_commit(dx, duration, page_width),
        };
        trace!(
            dx,
            duration_ms = duration.as_millis() as u64,
            commit = release.commit,
            "drag released"
        );
        release
    }

    /// Forgets the drag without deciding anything.
    pub fn cancel(&mut self) {
        self.started_at = None;
    }
}

/// Raw pointer input in the swiper's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    /// Primary pointer pressed.
    Pressed {
        /// Pointer x position.
        x: f32,
        /// Press time.
        timestamp: Instant,
    },
    /// Pointer moved.
    Moved {
        /// Pointer x position.
        x: f32,
    },
    /// Primary pointer released.
    Released {
        /// Pointer x position.
        x: f32,
        /// Release time.
        timestamp: Instant,
    },
    /// The platform cancelled the touch sequence.
    Cancelled,
}

/// Turns absolute pointer positions into cumulative-displacement gestures.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    origin_x: Option<f32>,
}

impl DragTracker {
    /// Whether the pointer is down.
    pub fn is_pressed(&self) -> bool {
        self.origin_x.is_some()
    }

    /// Converts one pointer input into a gesture sample.
    ///
    /// Moves and releases without a preceding press are ignored.
    pub fn feed(&mut self, input: PointerInput) -> Option<GestureEvent> {
        match input {
            PointerInput::Pressed { x, timestamp } => {
                self.origin_x = Some(x);
                Some(GestureEvent::Start { timestamp })
            }
            PointerInput::Moved { x } => {
                let origin = self.origin_x?;
                Some(GestureEvent::Move { dx: x - origin })
            }
            PointerInput::Released { x, timestamp } => {
                let origin = self.origin_x.take()?;
                Some(GestureEvent::End {
                    dx: x - origin,
                    timestamp,
                })
            }
            PointerInput::Cancelled => {
                self.origin_x.take()?;
                Some(GestureEvent::Terminate)
            }
        }
    }
}
