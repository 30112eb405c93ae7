//! Tween driver for the strip offset.
//!
//! A single offset is animated at a time. Each call to
//! [`AnimationDriver::animate_to`] bumps a generation counter; completions
//! carry the generation they were issued for so the owner can drop effects
//! from animations that have since been superseded.

use std::time::{Duration, Instant};

use tracing::trace;

/// Cubic ease-in-out mapping.
/// Input: linear progress in [0.0, 1.0].
/// Output: eased progress in [0.0, 1.0].
pub(crate) fn easing(progress: f32) -> f32 {
    let t = progress.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// What an animation was started for, which decides what happens when it
/// lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    /// Settle after a gesture or autoplay tick in loop mode; lands with
    /// wraparound reconciliation.
    Settle,
    /// Return to the current page after the host took the gesture away.
    Restore,
    /// Settle in non-loop mode; the landing page becomes the displayed page.
    Clamp,
}

/// Completion notification of a single animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationEnd {
    /// Generation the animation was started with.
    pub generation: u64,
    /// Why the animation was started.
    pub kind: AnimationKind,
    /// Virtual page the animation was heading to.
    pub target_page: i64,
    /// `false` when the animation was superseded or cancelled before landing.
    pub finished: bool,
}

/// Offset sampled for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSample {
    /// Interpolated offset.
    pub offset: f32,
    /// Set on the frame the animation lands.
    pub end: Option<AnimationEnd>,
}

#[derive(Debug, Clone, Copy)]
struct Tween {
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
    kind: AnimationKind,
    target_page: i64,
    generation: u64,
}

impl Tween {
    fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    fn sample(&self, now: Instant) -> f32 {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * easing(progress)
    }

    fn end(&self, finished: bool) -> AnimationEnd {
        AnimationEnd {
            generation: self.generation,
            kind: self.kind,
            target_page: self.target_page,
            finished,
        }
    }
}

/// Drives at most one offset tween.
#[derive(Debug, Default)]
pub struct AnimationDriver {
    active: Option<Tween>,
    generation: u64,
}

impl AnimationDriver {
    /// Creates an idle driver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation of the most recently started animation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether an animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Kind of the in-flight animation, if any.
    pub fn active_kind(&self) -> Option<AnimationKind> {
        self.active.map(|tween| tween.kind)
    }

    /// Starts animating from `from` to `to` over `duration`.
    ///
    /// Returns the completion of the animation this one supersedes, reported
    /// as not finished.
    pub fn animate_to(
        &mut self,
        from: f32,
        to: f32,
        target_page: i64,
        duration: Duration,
        now: Instant,
        kind: AnimationKind,
    ) -> Option<AnimationEnd> {
        let superseded = self.cancel();
        self.generation = self.generation.wrapping_add(1);
        trace!(
            generation = self.generation,
            ?kind,
            from,
            to,
            target_page,
            duration_ms = duration.as_millis() as u64,
            "animation started"
        );
        self.active = Some(Tween {
            from,
            to,
            start: now,
            duration,
            kind,
            target_page,
            generation: self.generation,
        });
        superseded
    }

    /// Stops the in-flight animation, reporting it as not finished.
    pub fn cancel(&mut self) -> Option<AnimationEnd> {
        self.active.take().map(|tween| tween.end(false))
    }

    /// Samples the in-flight animation at `now`.
    pub fn tick(&mut self, now: Instant) -> Option<AnimationSample> {
        let tween = self.active?;
        let offset = tween.sample(now);
        if tween.progress(now) >= 1.0 {
            self.active = None;
            return Some(AnimationSample {
                offset,
                end: Some(tween.end(true)),
            });
        }
        Some(AnimationSample { offset, end: None })
    }

    /// Scales the in-flight tween's endpoints, used when the page width
    /// changes mid-animation.
    pub fn rescale(&mut self, factor: f32) {
        if let Some(tween) = self.active.as_mut() {
            tween.from *= factor;
            tween.to *= factor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn easing_is_monotonic_and_bounded() {
        let mut last = easing(0.0);
        assert_eq!(last, 0.0);
        for step in 1..=100 {
            let value = easing(step as f32 / 100.0);
            assert!(value >= last);
            last = value;
        }
        assert_eq!(easing(1.0), 1.0);
        assert_eq!(easing(2.0), 1.0);
        assert_eq!(easing(-1.0), 0.0);
    }

    #[test]
    fn tick_lands_exactly_once() {
        let t0 = Instant::now();
        let mut driver = AnimationDriver::new();
        assert!(
            driver
                .animate_to(0.0, -100.0, 1, ms(200), t0, AnimationKind::Settle)
                .is_none()
        );

        let mid = driver.tick(t0 + ms(100)).expect("animating");
        assert!(mid.end.is_none());
        assert!(mid.offset < 0.0 && mid.offset > -100.0);

        let last = driver.tick(t0 + ms(250)).expect("landing frame");
        assert_eq!(last.offset, -100.0);
        let end = last.end.expect("completion");
        assert!(end.finished);
        assert_eq!(end.generation, driver.generation());
        assert_eq!(end.target_page, 1);

        assert!(driver.tick(t0 + ms(300)).is_none());
        assert!(!driver.is_animating());
    }

    #[test]
    fn superseded_animation_reports_unfinished_with_old_generation() {
        let t0 = Instant::now();
        let mut driver = AnimationDriver::new();
        driver.animate_to(0.0, -100.0, 1, ms(200), t0, AnimationKind::Settle);
        let first_generation = driver.generation();

        let superseded = driver
            .animate_to(-50.0, 0.0, 0, ms(200), t0 + ms(50), AnimationKind::Restore)
            .expect("prior animation");
        assert!(!superseded.finished);
        assert_eq!(superseded.generation, first_generation);
        assert_ne!(driver.generation(), first_generation);
        assert_eq!(driver.active_kind(), Some(AnimationKind::Restore));
    }

    #[test]
    fn zero_duration_lands_on_next_tick() {
        let t0 = Instant::now();
        let mut driver = AnimationDriver::new();
        driver.animate_to(10.0, -30.0, 2, Duration::ZERO, t0, AnimationKind::Clamp);
        let sample = driver.tick(t0).expect("landing frame");
        assert_eq!(sample.offset, -30.0);
        assert!(sample.end.is_some_and(|end| end.finished));
    }

    #[test]
    fn rescale_moves_endpoints() {
        let t0 = Instant::now();
        let mut driver = AnimationDriver::new();
        driver.animate_to(-100.0, -200.0, 2, ms(100), t0, AnimationKind::Settle);
        driver.rescale(1.5);
        let sample = driver.tick(t0 + ms(100)).expect("landing frame");
        assert_eq!(sample.offset, -300.0);
        assert_eq!(sample.end.map(|end| end.target_page), Some(2));
    }
}
