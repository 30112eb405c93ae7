//! Page state machine of the swiper.
//!
//! [`SwiperController`] owns the virtual page, the displayed page and the
//! strip offset, and routes gestures, autoplay ticks and animation
//! completions between them.
//!
//! In loop mode the strip is padded with a clone on each side: virtual page
//! `0` duplicates the last real page and virtual page `N + 1` duplicates the
//! first, while virtual pages `1..=N` are the real pages `0..N`. Swiping past
//! an edge animates into the clone and, once the animation lands, the
//! controller snaps the strip to the real page the clone duplicates. The two
//! look identical, so the jump is invisible.
//!
//! ```
//! use std::time::{Duration, Instant};
//! use tessera_swiper::{args::SwiperArgs, controller::SwiperController, px::Px};
//!
//! let t0 = Instant::now();
//! let mut controller = SwiperController::new(SwiperArgs::default().page_count(3), Px(400))?;
//! controller.start(t0);
//!
//! // A quick leftward flick.
//! controller.on_gesture_start(t0);
//! controller.on_gesture_move(-30.0);
//! controller.on_gesture_end(-30.0, t0 + Duration::from_millis(90));
//!
//! controller.tick(t0 + Duration::from_millis(400));
//! assert_eq!(controller.current_page(), 1);
//! # Ok::<(), tessera_swiper::error::SwiperError>(())
//! ```

use std::{
    fmt,
    time::{Duration, Instant},
};

use tracing::{debug, trace};

use crate::{
    animation::{AnimationDriver, AnimationEnd, AnimationKind},
    args::{PageChangeCallback, SwiperArgs},
    autoplay::{Autoplay, AutoplayState},
    error::{Result, SwiperError},
    gesture::{GestureEvent, GestureTracker, SwipeDirection},
    indicator::DotStyle,
    px::Px,
};

/// Settle duration after a drag in loop mode.
pub const LOOP_SETTLE_DURATION: Duration = Duration::from_millis(130);
/// Settle duration after a drag in non-loop mode and after autoplay ticks.
pub const SETTLE_DURATION: Duration = Duration::from_millis(200);
/// Duration of the return to the current page when a gesture is taken away.
pub const RESTORE_DURATION: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Running,
    Stopped,
}

/// Controller for swiper components.
///
/// `D` is the indicator dot visual carried in [`SwiperArgs`]; the controller
/// never looks at it.
pub struct SwiperController<D = DotStyle> {
    args: SwiperArgs<D>,
    page_count: usize,
    page: i64,
    current_page: usize,
    offset: f32,
    page_width: Px,
    gesture: GestureTracker,
    driver: AnimationDriver,
    autoplay: Autoplay,
    lifecycle: Lifecycle,
    page_changes: Vec<usize>,
    defer_page_changes: bool,
}

impl<D> SwiperController<D> {
    /// Creates a controller showing `args.initial_page`.
    pub fn new(args: SwiperArgs<D>, page_width: Px) -> Result<Self> {
        args.validate()?;
        let page_count = args.page_count;
        let current_page = args.initial_page;
        let autoplay = Autoplay::new(args.autoplay_timeout);
        let mut controller = Self {
            page_count,
            page: 0,
            current_page,
            offset: 0.0,
            page_width: Px::ZERO,
            gesture: GestureTracker::default(),
            driver: AnimationDriver::new(),
            autoplay,
            lifecycle: Lifecycle::Created,
            page_changes: Vec::new(),
            defer_page_changes: false,
            args,
        };
        controller.page = controller.virtual_page_for(current_page);
        controller.page_width = page_width.max(Px::ZERO);
        controller.offset = controller.page_offset(controller.page);
        Ok(controller)
    }

    /// Arguments the controller was created with.
    pub fn args(&self) -> &SwiperArgs<D> {
        &self.args
    }

    /// Number of real pages.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Whether the strip wraps around.
    pub fn is_looping(&self) -> bool {
        self.args.looping
    }

    /// Page shown by the indicator, always in `0..page_count`.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Index into the strip, including the padding clones in loop mode.
    pub fn virtual_page(&self) -> i64 {
        self.page
    }

    /// Horizontal offset of the strip in pixels.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Horizontal offset of the strip, rounded to whole pixels.
    pub fn offset_px(&self) -> Px {
        Px::saturating_from_f32(self.offset)
    }

    /// Width of a single page.
    pub fn page_width(&self) -> Px {
        self.page_width
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_active()
    }

    /// Whether a settle animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.driver.is_animating()
    }

    /// Current autoplay timer phase.
    pub fn autoplay_state(&self) -> AutoplayState {
        self.autoplay.state()
    }

    /// Whether [`Self::stop`] has been called.
    pub fn is_stopped(&self) -> bool {
        self.lifecycle == Lifecycle::Stopped
    }

    /// Earliest time the controller needs another [`Self::tick`], or `None`
    /// when it is idle until the next gesture.
    ///
    /// Hosts that render on demand schedule their next frame from this.
    pub fn next_wakeup(&self, now: Instant) -> Option<Instant> {
        if self.is_stopped() {
            return None;
        }
        if self.driver.is_animating() {
            return Some(now);
        }
        self.autoplay.next_tick()
    }

    /// Starts the controller, arming autoplay when it is enabled.
    pub fn start(&mut self, now: Instant) {
        match self.lifecycle {
            Lifecycle::Created => {
                self.lifecycle = Lifecycle::Running;
                debug!(
                    page_count = self.page_count,
                    looping = self.args.looping,
                    autoplay = self.args.autoplay_enabled(),
                    "swiper started"
                );
                self.ensure_autoplay(now);
            }
            Lifecycle::Running => {}
            Lifecycle::Stopped => trace!("start ignored: swiper already stopped"),
        }
    }

    /// Tears the controller down. The timer is released and every later call
    /// is a no-op.
    pub fn stop(&mut self) {
        if self.is_stopped() {
            return;
        }
        self.autoplay.disarm();
        if let Some(end) = self.driver.cancel() {
            trace!(generation = end.generation, "animation dropped on stop");
        }
        self.gesture.cancel();
        self.lifecycle = Lifecycle::Stopped;
        debug!("swiper stopped");
    }

    /// Dispatches a gesture sample.
    pub fn handle_gesture(&mut self, event: GestureEvent, now: Instant) {
        match event {
            GestureEvent::Start { timestamp } => self.on_gesture_start(timestamp),
            GestureEvent::Move { dx } => self.on_gesture_move(dx),
            GestureEvent::End { dx, timestamp } => self.on_gesture_end(dx, timestamp),
            GestureEvent::Terminate => self.on_gesture_terminate(now),
        }
    }

    /// A finger touched down.
    pub fn on_gesture_start(&mut self, timestamp: Instant) {
        if self.ignore("gesture start") {
            return;
        }
        self.autoplay.disarm();
        self.interrupt();
        self.gesture.begin(timestamp);
    }

    /// The finger moved; `dx` is the displacement since touch-down.
    pub fn on_gesture_move(&mut self, dx: f32) {
        if self.ignore("gesture move") {
            return;
        }
        if !self.gesture.is_active() {
            self.autoplay.disarm();
            self.interrupt();
        }
        let follows = match SwipeDirection::from_dx(dx) {
            Some(direction) => self.can_move(direction),
            None => true,
        };
        if follows {
            self.offset = dx + self.page_offset(self.page);
        }
        trace!(dx, follows, offset = self.offset, "drag moved");
    }

    /// The finger lifted after travelling `dx`.
    pub fn on_gesture_end(&mut self, dx: f32, timestamp: Instant) {
        if self.ignore("gesture end") {
            return;
        }
        if !self.gesture.is_active() {
            self.autoplay.disarm();
            self.interrupt();
        }
        let release = self
            .gesture
            .release(dx, timestamp, self.page_width.to_f32());
        if let Some(direction) = release.committed_direction() {
            if self.can_move(direction) {
                self.page += match direction {
                    SwipeDirection::Backward => -1,
                    SwipeDirection::Forward => 1,
                };
                debug!(?direction, target = self.page, "drag committed");
            } else {
                debug!(?direction, page = self.page, "drag clamped at edge");
            }
        }

        if self.args.looping {
            self.settle(LOOP_SETTLE_DURATION, timestamp, AnimationKind::Settle);
        } else {
            self.settle(SETTLE_DURATION, timestamp, AnimationKind::Clamp);
        }
        self.ensure_autoplay(timestamp);
    }

    /// The host took the gesture away; return to the current page.
    pub fn on_gesture_terminate(&mut self, now: Instant) {
        if self.ignore("gesture terminate") {
            return;
        }
        self.gesture.cancel();
        self.settle(RESTORE_DURATION, now, AnimationKind::Restore);
    }

    /// Advances animation and autoplay to `now`.
    ///
    /// Returns `true` when the strip offset changed and needs a redraw.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.is_stopped() {
            return false;
        }
        let mut changed = false;
        if let Some(sample) = self.driver.tick(now) {
            self.offset = sample.offset;
            changed = true;
            if let Some(end) = sample.end {
                self.on_animation_end(end, Some(now));
            }
        }
        if self.args.autoplay_enabled() && !self.gesture.is_active() && self.autoplay.poll(now) {
            self.interrupt();
            self.page += 1;
            debug!(target = self.page, "autoplay tick");
            self.settle(SETTLE_DURATION, now, AnimationKind::Settle);
            changed = true;
        }
        self.notify_page_changes();
        changed
    }

    /// Updates the page width, keeping the strip aligned to the same page.
    pub fn set_page_width(&mut self, page_width: Px) {
        let page_width = page_width.max(Px::ZERO);
        if page_width == self.page_width {
            return;
        }
        let old = self.page_width;
        self.page_width = page_width;
        if old > Px::ZERO && page_width > Px::ZERO {
            let factor = page_width.to_f32() / old.to_f32();
            self.offset *= factor;
            self.driver.rescale(factor);
        } else {
            self.offset = self.page_offset(self.page);
        }
        trace!(width = page_width.raw(), "page width changed");
    }

    /// Animates to a real page.
    pub fn scroll_to_page(&mut self, page: usize, now: Instant) -> Result<()> {
        self.navigate(page, SETTLE_DURATION, now)
    }

    /// Moves to a real page without animating. The new page is displayed
    /// from the next [`Self::tick`].
    pub fn jump_to_page(&mut self, page: usize, now: Instant) -> Result<()> {
        self.navigate(page, Duration::ZERO, now)
    }

    fn navigate(&mut self, page: usize, duration: Duration, now: Instant) -> Result<()> {
        if self.ignore("navigation") {
            return Ok(());
        }
        if page >= self.page_count {
            return Err(SwiperError::PageOutOfRange {
                page,
                page_count: self.page_count,
            });
        }
        self.interrupt();
        self.page = self.virtual_page_for(page);
        let kind = if self.args.looping {
            AnimationKind::Settle
        } else {
            AnimationKind::Clamp
        };
        self.settle(duration, now, kind);
        Ok(())
    }

    fn ignore(&self, what: &str) -> bool {
        if self.is_stopped() {
            trace!("{what} ignored: swiper stopped");
            return true;
        }
        false
    }

    fn can_move(&self, direction: SwipeDirection) -> bool {
        if self.args.looping {
            return true;
        }
        match direction {
            SwipeDirection::Backward => self.page != 0,
            SwipeDirection::Forward => self.page != self.page_count as i64 - 1,
        }
    }

    fn page_offset(&self, page: i64) -> f32 {
        -(page as f32) * self.page_width.to_f32()
    }

    fn virtual_page_for(&self, displayed: usize) -> i64 {
        if self.args.looping {
            displayed as i64 + 1
        } else {
            displayed as i64
        }
    }

    fn displayed_for(&self, page: i64) -> usize {
        let count = self.page_count as i64;
        let displayed = if self.args.looping {
            (page - 1).rem_euclid(count)
        } else {
            page.clamp(0, count - 1)
        };
        displayed as usize
    }

    /// Cancels the in-flight animation and, in loop mode, moves the virtual
    /// page out of a padding clone onto the real page it duplicates.
    fn interrupt(&mut self) {
        if let Some(end) = self.driver.cancel() {
            self.on_animation_end(end, None);
        }
        if !self.args.looping {
            return;
        }
        let count = self.page_count as i64;
        let shift = if self.page <= 0 {
            count
        } else if self.page > count {
            -count
        } else {
            return;
        };
        self.page += shift;
        self.offset -= shift as f32 * self.page_width.to_f32();
        trace!(page = self.page, offset = self.offset, "left padding clone");
    }

    fn settle(&mut self, duration: Duration, now: Instant, kind: AnimationKind) {
        let target = self.page_offset(self.page);
        if let Some(end) = self
            .driver
            .animate_to(self.offset, target, self.page, duration, now, kind)
        {
            self.on_animation_end(end, Some(now));
        }
    }

    fn on_animation_end(&mut self, end: AnimationEnd, now: Option<Instant>) {
        if !end.finished {
            trace!(generation = end.generation, "animation superseded");
            return;
        }
        if end.generation != self.driver.generation() {
            trace!(
                generation = end.generation,
                current = self.driver.generation(),
                "stale animation completion ignored"
            );
            return;
        }

        match end.kind {
            AnimationKind::Settle => self.reconcile(end.target_page),
            AnimationKind::Restore if self.args.looping => self.reconcile(end.target_page),
            AnimationKind::Clamp | AnimationKind::Restore => {
                let displayed = self.displayed_for(self.page);
                self.set_current_page(displayed);
            }
        }
        self.offset = self.page_offset(self.page);

        if let Some(now) = now {
            self.ensure_autoplay(now);
        }
    }

    fn reconcile(&mut self, target: i64) {
        let count = self.page_count as i64;
        if target <= 0 {
            self.page = count;
            debug!(page = self.page, "wrapped to last page");
            self.set_current_page(self.page_count - 1);
        } else if target >= count + 1 {
            self.page = 1;
            debug!(page = self.page, "wrapped to first page");
            self.set_current_page(0);
        } else {
            self.page = target;
            self.set_current_page((target - 1) as usize);
        }
    }

    fn set_current_page(&mut self, page: usize) {
        if page == self.current_page {
            return;
        }
        debug!(from = self.current_page, to = page, "page changed");
        self.current_page = page;
        self.page_changes.push(page);
    }

    fn notify_page_changes(&mut self) {
        if self.defer_page_changes {
            return;
        }
        for page in self.page_changes.drain(..) {
            (self.args.on_page_change)(page);
        }
    }

    /// Holds page change notifications back until
    /// [`Self::take_page_changes`], so the owner can run the callback after
    /// releasing a lock around the controller.
    pub(crate) fn defer_page_changes(&mut self) {
        self.defer_page_changes = true;
    }

    /// Ends deferral and hands out the callback with the held-back pages.
    pub(crate) fn take_page_changes(&mut self) -> (PageChangeCallback, Vec<usize>) {
        self.defer_page_changes = false;
        (
            self.args.on_page_change.clone(),
            std::mem::take(&mut self.page_changes),
        )
    }

    fn ensure_autoplay(&mut self, now: Instant) {
        if self.lifecycle != Lifecycle::Running || !self.args.autoplay_enabled() {
            return;
        }
        self.autoplay.ensure_armed(now);
    }
}

impl<D> fmt::Debug for SwiperController<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwiperController")
            .field("page_count", &self.page_count)
            .field("page", &self.page)
            .field("current_page", &self.current_page)
            .field("offset", &self.offset)
            .field("page_width", &self.page_width)
            .field("autoplay", &self.autoplay.state())
            .field("animating", &self.driver.is_animating())
            .field("lifecycle", &self.lifecycle)
            .finish()
    }
}
