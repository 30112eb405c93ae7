//! Swiper configuration.

use std::{fmt, sync::Arc, time::Duration};

use derive_setters::Setters;

use crate::{
    autoplay::DEFAULT_AUTOPLAY_TIMEOUT,
    dp::Dp,
    error::{Result, SwiperError},
    indicator::DotStyle,
};

/// Callback invoked with the newly displayed page.
pub type PageChangeCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// Arguments for a swiper.
///
/// `D` is the indicator dot visual, [`DotStyle`] unless replaced through
/// [`SwiperArgs::dots`].
///
/// ```
/// use std::time::Duration;
/// use tessera_swiper::args::SwiperArgs;
///
/// let args = SwiperArgs::default()
///     .page_count(3)
///     .autoplay(true)
///     .autoplay_timeout(Duration::from_secs(5))
///     .on_page_change(|page| println!("now showing {page}"));
/// assert!(args.validate().is_ok());
/// ```
#[derive(Clone, Setters)]
pub struct SwiperArgs<D = DotStyle> {
    /// Number of pages. [`crate::swiper::Swiper`] fills this in from its
    /// panels.
    pub page_count: usize,
    /// Page shown first.
    pub initial_page: usize,
    /// Advance one page every [`Self::autoplay_timeout`]. Only takes effect
    /// when [`Self::looping`] is enabled.
    pub autoplay: bool,
    /// Interval between autoplay ticks.
    pub autoplay_timeout: Duration,
    /// Wrap from the last page to the first and back.
    pub looping: bool,
    /// Visual of inactive indicator dots.
    pub dot: D,
    /// Visual of the indicator dot for the displayed page.
    pub active_dot: D,
    /// Height of the indicator bar docked to the bottom of the swiper.
    pub indicator_height: Dp,
    /// Called whenever the displayed page changes.
    #[setters(skip)]
    pub on_page_change: PageChangeCallback,
}

impl<D> SwiperArgs<D> {
    /// Sets the page change handler.
    ///
    /// When the swiper is driven through a
    /// [`SharedSwiper`](crate::swiper::SharedSwiper), the handler runs after
    /// the lock is released and may read or drive the swiper through the
    /// same handle.
    pub fn on_page_change<F>(mut self, on_page_change: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.on_page_change = Arc::new(on_page_change);
        self
    }

    /// Sets the page change handler using a shared callback.
    pub fn on_page_change_shared(mut self, on_page_change: PageChangeCallback) -> Self {
        self.on_page_change = on_page_change;
        self
    }

    /// Replaces both indicator visuals, possibly with a different type.
    pub fn dots<V>(self, dot: V, active_dot: V) -> SwiperArgs<V> {
        SwiperArgs {
            page_count: self.page_count,
            initial_page: self.initial_page,
            autoplay: self.autoplay,
            autoplay_timeout: self.autoplay_timeout,
            looping: self.looping,
            dot,
            active_dot,
            indicator_height: self.indicator_height,
            on_page_change: self.on_page_change,
        }
    }

    /// Whether the autoplay timer can ever run with these arguments.
    pub fn autoplay_enabled(&self) -> bool {
        self.autoplay && self.looping
    }

    /// Checks the arguments for values the swiper cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.page_count == 0 {
            return Err(SwiperError::NoPages);
        }
        if self.initial_page >= self.page_count {
            return Err(SwiperError::PageOutOfRange {
                page: self.initial_page,
                page_count: self.page_count,
            });
        }
        if self.autoplay && self.autoplay_timeout.is_zero() {
            return Err(SwiperError::ZeroAutoplayInterval);
        }
        Ok(())
    }
}

impl Default for SwiperArgs {
    fn default() -> Self {
        Self {
            page_count: 0,
            initial_page: 0,
            autoplay: false,
            autoplay_timeout: DEFAULT_AUTOPLAY_TIMEOUT,
            looping: true,
            dot: DotStyle::inactive(),
            active_dot: DotStyle::active(),
            indicator_height: Dp(40.0),
            on_page_change: Arc::new(|_| {}),
        }
    }
}

impl<D: fmt::Debug> fmt::Debug for SwiperArgs<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwiperArgs")
            .field("page_count", &self.page_count)
            .field("initial_page", &self.initial_page)
            .field("autoplay", &self.autoplay)
            .field("autoplay_timeout", &self.autoplay_timeout)
            .field("looping", &self.looping)
            .field("dot", &self.dot)
            .field("active_dot", &self.active_dot)
            .field("indicator_height", &self.indicator_height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_options() {
        let args = SwiperArgs::default();
        assert!(args.looping);
        assert!(!args.autoplay);
        assert_eq!(args.autoplay_timeout, Duration::from_millis(3000));
        assert_eq!(args.indicator_height, Dp(40.0));
        assert!(!args.autoplay_enabled());
    }

    #[test]
    fn zero_pages_rejected() {
        assert_eq!(SwiperArgs::default().validate(), Err(SwiperError::NoPages));
    }

    #[test]
    fn initial_page_must_exist() {
        let args = SwiperArgs::default().page_count(2).initial_page(2);
        assert_eq!(
            args.validate(),
            Err(SwiperError::PageOutOfRange {
                page: 2,
                page_count: 2
            })
        );
    }

    #[test]
    fn zero_interval_rejected_only_with_autoplay() {
        let args = SwiperArgs::default()
            .page_count(2)
            .autoplay_timeout(Duration::ZERO);
        assert!(args.validate().is_ok());
        assert_eq!(
            args.autoplay(true).validate(),
            Err(SwiperError::ZeroAutoplayInterval)
        );
    }

    #[test]
    fn dots_swap_visual_type_and_keep_behavior() {
        let args = SwiperArgs::default()
            .page_count(3)
            .looping(false)
            .dots('-', '*');
        assert_eq!(args.dot, '-');
        assert_eq!(args.active_dot, '*');
        assert_eq!(args.page_count, 3);
        assert!(!args.looping);
    }

    #[test]
    fn autoplay_requires_looping() {
        let args = SwiperArgs::default().autoplay(true).looping(false);
        assert!(!args.autoplay_enabled());
    }
}
