//! # Density-Independent Pixels (Dp)
//!
//! Indicator dots and the indicator bar are sized in [`Dp`] so they keep the
//! same physical size across screen densities. Conversion goes through the
//! process-wide [`SCALE_FACTOR`], which a host sets once it knows the
//! window's DPI via [`set_scale_factor`].
//!
//! ```
//! use tessera_swiper::dp::Dp;
//!
//! let bar = Dp(12.0);
//! assert!(bar.to_pixels_f32() >= 12.0);
//! ```

use std::sync::OnceLock;

use parking_lot::RwLock;

use crate::px::Px;

/// Global scale factor between [`Dp`] and physical pixels.
///
/// Unset means a scale factor of `1.0`.
pub static SCALE_FACTOR: OnceLock<RwLock<f64>> = OnceLock::new();

/// Sets the global scale factor used by every [`Dp`] conversion.
pub fn set_scale_factor(scale_factor: f64) {
    let lock = SCALE_FACTOR.get_or_init(|| RwLock::new(1.0));
    *lock.write() = scale_factor;
}

fn scale_factor() -> f64 {
    SCALE_FACTOR.get().map(|lock| *lock.read()).unwrap_or(1.0)
}

/// Density-independent pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dp(pub f64);

impl Dp {
    /// Converts to physical pixels as f32.
    pub fn to_pixels_f32(&self) -> f32 {
        (self.0 * scale_factor()) as f32
    }

    /// Converts to whole physical pixels.
    pub fn to_px(&self) -> Px {
        Px::saturating_from_f32(self.to_pixels_f32())
    }
}
