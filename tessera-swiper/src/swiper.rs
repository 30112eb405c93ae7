//! The swiper component.
//!
//! [`Swiper`] bundles the page panels with a [`SwiperController`] and turns
//! controller state into a [`SwiperFrame`]: which panels to draw where, and
//! where the indicator dots go. Panels are opaque to the swiper; hosts
//! render them however they like.
//!
//! ```
//! use std::time::{Duration, Instant};
//! use tessera_swiper::{
//!     args::SwiperArgs,
//!     gesture::PointerInput,
//!     px::Px,
//!     swiper::Swiper,
//! };
//!
//! let t0 = Instant::now();
//! let mut swiper = Swiper::new(SwiperArgs::default(), vec!["a", "b", "c"], Px(400))?;
//! swiper.start(t0);
//!
//! swiper.handle_pointer(PointerInput::Pressed { x: 300.0, timestamp: t0 }, t0);
//! swiper.handle_pointer(PointerInput::Moved { x: 40.0 }, t0);
//! let up = t0 + Duration::from_millis(500);
//! swiper.handle_pointer(PointerInput::Released { x: 40.0, timestamp: up }, up);
//! swiper.tick(up + Duration::from_millis(200));
//!
//! let frame = swiper.frame(Px(300));
//! assert_eq!(frame.pages.len(), 1);
//! assert_eq!(*frame.pages[0].panel, "b");
//! # Ok::<(), tessera_swiper::error::SwiperError>(())
//! ```

use std::{sync::Arc, time::Instant};

use parking_lot::RwLock;

use crate::{
    args::SwiperArgs,
    controller::SwiperController,
    error::Result,
    gesture::{DragTracker, GestureEvent, PointerInput},
    indicator::{DotStyle, DotVisual, indicator_dots},
    layout::{indicator_dot_rects, strip_layout},
    px::{Px, PxRect, PxSize},
};

/// A panel placed in the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedPage<'a, P> {
    /// The panel to draw.
    pub panel: &'a P,
    /// Real page index of the panel.
    pub page: usize,
    /// Left edge relative to the viewport.
    pub x: Px,
}

/// An indicator dot placed in the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedDot<'a, D = DotStyle> {
    /// Visual of the dot.
    pub style: &'a D,
    /// Where to draw it.
    pub rect: PxRect,
    /// Whether the dot stands for the displayed page.
    pub active: bool,
}

/// Everything a host needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SwiperFrame<'a, P, D = DotStyle> {
    /// Content width of the page strip.
    pub strip_width: Px,
    /// Panels intersecting the viewport, left to right.
    pub pages: Vec<PlacedPage<'a, P>>,
    /// Indicator bar.
    pub indicator: PxRect,
    /// One dot per page.
    pub dots: Vec<PlacedDot<'a, D>>,
}

/// A horizontally swipeable set of panels.
///
/// `D` is the indicator dot visual, see [`SwiperArgs::dots`].
#[derive(Debug)]
pub struct Swiper<P, D = DotStyle> {
    panels: Vec<P>,
    controller: SwiperController<D>,
    drag: DragTracker,
}

impl<P, D> Swiper<P, D> {
    /// Creates a swiper over `panels`. The page count is taken from the
    /// panels, whatever `args.page_count` says.
    pub fn new(args: SwiperArgs<D>, panels: Vec<P>, page_width: Px) -> Result<Self> {
        let args = args.page_count(panels.len());
        let controller = SwiperController::new(args, page_width)?;
        Ok(Self {
            panels,
            controller,
            drag: DragTracker::default(),
        })
    }

    /// The panels, in page order.
    pub fn panels(&self) -> &[P] {
        &self.panels
    }

    /// The underlying controller.
    pub fn controller(&self) -> &SwiperController<D> {
        &self.controller
    }

    /// Mutable access to the underlying controller, e.g. for programmatic
    /// navigation.
    pub fn controller_mut(&mut self) -> &mut SwiperController<D> {
        &mut self.controller
    }

    /// Page shown by the indicator.
    pub fn current_page(&self) -> usize {
        self.controller.current_page()
    }

    /// See [`SwiperController::start`].
    pub fn start(&mut self, now: Instant) {
        self.controller.start(now);
    }

    /// See [`SwiperController::stop`].
    pub fn stop(&mut self) {
        self.drag = DragTracker::default();
        self.controller.stop();
    }

    /// Forwards a gesture sample to the controller.
    pub fn handle_gesture(&mut self, event: GestureEvent, now: Instant) {
        self.controller.handle_gesture(event, now);
    }

    /// Feeds raw pointer input. Returns `true` when it produced a gesture.
    pub fn handle_pointer(&mut self, input: PointerInput, now: Instant) -> bool {
        match self.drag.feed(input) {
            Some(event) => {
                self.controller.handle_gesture(event, now);
                true
            }
            None => false,
        }
    }

    /// See [`SwiperController::tick`].
    pub fn tick(&mut self, now: Instant) -> bool {
        self.controller.tick(now)
    }

    /// Updates the viewport width, which is also the page width.
    pub fn resize(&mut self, width: Px) {
        self.controller.set_page_width(width);
    }
}

impl<P, D: DotVisual> Swiper<P, D> {
    /// Lays out the current state for a viewport `height` tall and one page
    /// wide.
    pub fn frame(&self, height: Px) -> SwiperFrame<'_, P, D> {
        let args = self.controller.args();
        let viewport = PxSize::new(self.controller.page_width(), height);
        let layout = strip_layout(
            viewport,
            self.panels.len(),
            self.controller.is_looping(),
            self.controller.offset(),
            args.indicator_height.to_px(),
        );

        let pages = layout
            .slots
            .iter()
            .filter_map(|slot| {
                self.panels.get(slot.page).map(|panel| PlacedPage {
                    panel,
                    page: slot.page,
                    x: slot.x,
                })
            })
            .collect();

        let current = self.controller.current_page();
        let styles = indicator_dots(self.panels.len(), current, &args.active_dot, &args.dot);
        let rects = indicator_dot_rects(layout.indicator, &styles);
        let dots = styles
            .into_iter()
            .zip(rects)
            .enumerate()
            .map(|(index, (style, rect))| PlacedDot {
                style,
                rect,
                active: index == current,
            })
            .collect();

        SwiperFrame {
            strip_width: layout.strip_width,
            pages,
            indicator: layout.indicator,
            dots,
        }
    }
}

/// A [`Swiper`] shared between the input handler and the render loop.
///
/// Page change callbacks triggered inside [`Self::with_mut`] run once the
/// write lock is released.
pub struct SharedSwiper<P, D = DotStyle> {
    inner: Arc<RwLock<Swiper<P, D>>>,
}

impl<P, D> Clone for SharedSwiper<P, D> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<P, D> SharedSwiper<P, D> {
    /// Wraps a swiper.
    pub fn new(swiper: Swiper<P, D>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(swiper)),
        }
    }

    /// Execute a closure with a shared reference to the swiper.
    pub fn with<R>(&self, f: impl FnOnce(&Swiper<P, D>) -> R) -> R {
        f(&self.inner.read())
    }

    /// Execute a closure with a mutable reference to the swiper.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Swiper<P, D>) -> R) -> R {
        let (result, on_page_change, pages) = {
            let mut guard = self.inner.write();
            guard.controller.defer_page_changes();
            let result = f(&mut guard);
            let (on_page_change, pages) = guard.controller.take_page_changes();
            (result, on_page_change, pages)
        };
        for page in pages {
            on_page_change(page);
        }
        result
    }
}

impl<P, D> From<Swiper<P, D>> for SharedSwiper<P, D> {
    fn from(swiper: Swiper<P, D>) -> Self {
        Self::new(swiper)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use parking_lot::Mutex;

    use super::*;
    use crate::{color::Color, dp::Dp, error::SwiperError};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn swiper(panels: Vec<&'static str>) -> Swiper<&'static str> {
        Swiper::new(SwiperArgs::default(), panels, Px(400)).expect("valid swiper")
    }

    #[test]
    fn page_count_comes_from_panels() {
        let s = Swiper::new(SwiperArgs::default().page_count(9), vec![1, 2], Px(400))
            .expect("valid swiper");
        assert_eq!(s.controller().page_count(), 2);
        assert_eq!(s.panels(), &[1, 2]);
    }

    #[test]
    fn empty_panels_rejected() {
        let err = Swiper::<u8>::new(SwiperArgs::default(), Vec::new(), Px(400)).err();
        assert_eq!(err, Some(SwiperError::NoPages));
    }

    #[test]
    fn pointer_drag_moves_strip() {
        let t0 = Instant::now();
        let mut s = swiper(vec!["a", "b", "c"]);
        assert!(!s.handle_pointer(PointerInput::Moved { x: 10.0 }, t0));

        assert!(s.handle_pointer(PointerInput::Pressed { x: 200.0, timestamp: t0 }, t0));
        assert!(s.handle_pointer(PointerInput::Moved { x: 100.0 }, t0));
        let frame = s.frame(Px(300));
        let shown: Vec<(&str, Px)> = frame.pages.iter().map(|p| (*p.panel, p.x)).collect();
        assert_eq!(shown, vec![("a", Px(-100)), ("b", Px(300))]);

        let up = t0 + ms(100);
        s.handle_pointer(PointerInput::Released { x: 100.0, timestamp: up }, up);
        s.tick(up + ms(300));
        assert_eq!(s.current_page(), 1);
    }

    #[test]
    fn wrap_animation_shows_clone_of_first_page() {
        let t0 = Instant::now();
        let mut s = Swiper::new(
            SwiperArgs::default().initial_page(2),
            vec!["a", "b", "c"],
            Px(400),
        )
        .expect("valid swiper");
        s.handle_gesture(GestureEvent::Start { timestamp: t0 }, t0);
        s.handle_gesture(
            GestureEvent::End {
                dx: -300.0,
                timestamp: t0 + ms(50),
            },
            t0 + ms(50),
        );
        s.tick(t0 + ms(120));
        let frame = s.frame(Px(300));
        let panels: Vec<&str> = frame.pages.iter().map(|p| *p.panel).collect();
        assert_eq!(panels, vec!["c", "a"]);
        assert_eq!(frame.pages[1].page, 0);

        s.tick(t0 + ms(400));
        let frame = s.frame(Px(300));
        assert_eq!(frame.pages.len(), 1);
        assert_eq!(*frame.pages[0].panel, "a");
        assert_eq!(frame.strip_width, Px(1600));
    }

    #[test]
    fn frame_highlights_current_dot() {
        let t0 = Instant::now();
        let mut s = swiper(vec!["a", "b", "c", "d"]);
        s.controller_mut()
            .jump_to_page(2, t0)
            .expect("page exists");
        s.tick(t0);

        let frame = s.frame(Px(300));
        assert_eq!(frame.dots.len(), 4);
        let active: Vec<bool> = frame.dots.iter().map(|dot| dot.active).collect();
        assert_eq!(active, vec![false, false, true, false]);
        assert_eq!(frame.dots[2].style.color, Color::WHITE);
        assert_eq!(frame.dots[0].style.color, Color::GREY);
        assert_eq!(frame.indicator, PxRect::new(Px(0), Px(260), Px(400), Px(40)));
    }

    #[test]
    fn resize_rescales_frame() {
        let mut s = swiper(vec!["a", "b"]);
        s.resize(Px(800));
        let frame = s.frame(Px(300));
        assert_eq!(frame.pages[0].x, Px(0));
        assert_eq!(frame.indicator.width, Px(800));
        assert_eq!(frame.strip_width, Px(2400));
    }

    #[test]
    fn shared_handles_see_same_state() {
        let t0 = Instant::now();
        let shared = SharedSwiper::from(swiper(vec!["a", "b", "c"]));
        let input = shared.clone();
        input.with_mut(|s| {
            s.handle_gesture(GestureEvent::Start { timestamp: t0 }, t0);
            s.handle_gesture(
                GestureEvent::End {
                    dx: 300.0,
                    timestamp: t0 + ms(50),
                },
                t0 + ms(50),
            );
        });
        shared.with_mut(|s| s.tick(t0 + ms(400)));
        assert_eq!(shared.with(|s| s.current_page()), 2);
    }

    #[test]
    fn page_change_callback_can_read_shared_swiper() {
        let t0 = Instant::now();
        let handle: Arc<Mutex<Option<SharedSwiper<&'static str>>>> = Arc::new(Mutex::new(None));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let callback_handle = handle.clone();
        let callback_seen = seen.clone();
        let args = SwiperArgs::default().on_page_change(move |page| {
            if let Some(shared) = callback_handle.lock().as_ref() {
                let read = shared.inner.try_read().map(|s| s.current_page());
                callback_seen.lock().push((page, read));
            }
        });
        let shared = SharedSwiper::new(
            Swiper::new(args, vec!["a", "b", "c"], Px(400)).expect("valid swiper"),
        );
        *handle.lock() = Some(shared.clone());

        shared.with_mut(|s| {
            s.handle_gesture(GestureEvent::Start { timestamp: t0 }, t0);
            s.handle_gesture(
                GestureEvent::End {
                    dx: -300.0,
                    timestamp: t0 + ms(50),
                },
                t0 + ms(50),
            );
            s.tick(t0 + ms(400));
        });

        assert_eq!(*seen.lock(), vec![(1, Some(1))]);
        handle.lock().take();
    }

    #[test]
    fn page_change_callback_can_drive_shared_swiper() {
        let t0 = Instant::now();
        let handle: Arc<Mutex<Option<SharedSwiper<&'static str>>>> = Arc::new(Mutex::new(None));
        let callback_handle = handle.clone();
        let args = SwiperArgs::default().on_page_change(move |page| {
            if page == 1
                && let Some(shared) = callback_handle.lock().as_ref()
            {
                shared.with_mut(|s| s.controller_mut().jump_to_page(0, t0).expect("page exists"));
            }
        });
        let shared = SharedSwiper::new(
            Swiper::new(args, vec!["a", "b", "c"], Px(400)).expect("valid swiper"),
        );
        *handle.lock() = Some(shared.clone());

        shared.with_mut(|s| {
            s.controller_mut()
                .jump_to_page(1, t0)
                .expect("page exists");
            s.tick(t0);
        });
        assert_eq!(shared.with(|s| s.current_page()), 1);
        assert!(shared.with(|s| s.controller().is_animating()));

        shared.with_mut(|s| s.tick(t0));
        assert_eq!(shared.with(|s| s.current_page()), 0);
        handle.lock().take();
    }

    #[test]
    fn custom_dot_visuals_are_laid_out() {
        #[derive(Debug, PartialEq)]
        struct Glyph(char);

        impl DotVisual for Glyph {
            fn size(&self) -> (Dp, Dp) {
                (Dp(10.0), Dp(10.0))
            }
        }

        let args = SwiperArgs::default().dots(Glyph('o'), Glyph('x'));
        let s = Swiper::new(args, vec!["a", "b"], Px(400)).expect("valid swiper");
        let frame = s.frame(Px(300));
        let glyphs: Vec<char> = frame.dots.iter().map(|dot| dot.style.0).collect();
        assert_eq!(glyphs, vec!['x', 'o']);
        assert_eq!(
            frame.dots.iter().map(|dot| dot.rect).collect::<Vec<_>>(),
            vec![
                PxRect::new(Px(190), Px(275), Px(10), Px(10)),
                PxRect::new(Px(200), Px(275), Px(10), Px(10)),
            ]
        );
    }

    #[test]
    fn stop_resets_pointer_tracking() {
        let t0 = Instant::now();
        let mut s = swiper(vec!["a", "b"]);
        s.start(t0);
        s.handle_pointer(PointerInput::Pressed { x: 0.0, timestamp: t0 }, t0);
        s.stop();
        assert!(!s.handle_pointer(PointerInput::Moved { x: 50.0 }, t0));
        assert!(s.controller().is_stopped());
    }
}
