//! A horizontally swipeable carousel with looping, autoplay and a page
//! indicator.
//!
//! The crate is host-agnostic: it owns no window, thread or renderer. The
//! host feeds gestures and frame timestamps in and draws the
//! [`swiper::SwiperFrame`] it gets back.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use tessera_swiper::{Px, Swiper, SwiperArgs};
//!
//! let t0 = Instant::now();
//! let args = SwiperArgs::default()
//!     .autoplay(true)
//!     .autoplay_timeout(Duration::from_millis(1000))
//!     .on_page_change(|page| println!("page {page}"));
//! let mut swiper = Swiper::new(args, vec!["red", "green", "blue"], Px(360))?;
//! swiper.start(t0);
//!
//! // Drive frames at 60 fps for a little over one interval.
//! let mut now = t0;
//! while now < t0 + Duration::from_millis(1300) {
//!     now += Duration::from_millis(16);
//!     swiper.tick(now);
//! }
//! assert_eq!(swiper.current_page(), 1);
//!
//! let frame = swiper.frame(Px(240));
//! assert_eq!(*frame.pages[0].panel, "green");
//! assert!(frame.dots[1].active);
//! # Ok::<(), tessera_swiper::SwiperError>(())
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod animation;
pub mod args;
pub mod autoplay;
pub mod color;
pub mod controller;
pub mod dp;
pub mod error;
pub mod gesture;
pub mod indicator;
pub mod layout;
pub mod px;
pub mod swiper;

pub use crate::{
    args::SwiperArgs,
    controller::SwiperController,
    dp::Dp,
    error::SwiperError,
    gesture::{GestureEvent, PointerInput},
    indicator::{DotStyle, DotVisual},
    px::Px,
    swiper::{SharedSwiper, Swiper, SwiperFrame},
};
