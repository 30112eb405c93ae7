//! Errors reported by the swiper.

use thiserror::Error;

/// Configuration and navigation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwiperError {
    /// A swiper needs at least one page to show.
    #[error("swiper requires at least one page")]
    NoPages,
    /// Autoplay would tick continuously.
    #[error("autoplay interval must be greater than zero")]
    ZeroAutoplayInterval,
    /// Programmatic navigation targeted a page that does not exist.
    #[error("page {page} is out of range for a swiper with {page_count} pages")]
    PageOutOfRange {
        /// Requested page.
        page: usize,
        /// Number of real pages.
        page_count: usize,
    },
}

/// Result alias for swiper operations.
pub type Result<T, E = SwiperError> = std::result::Result<T, E>;
