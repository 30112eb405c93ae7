//! Physical pixel units used by the swiper.
//!
//! Page widths, slot placements and the indicator bar are measured in whole
//! [`Px`]. The strip offset itself stays an `f32` while it animates and is
//! only rounded when a frame is laid out.
//!
//! ```
//! use tessera_swiper::px::{Px, PxRect};
//!
//! let page = Px(360);
//! assert_eq!(page.saturating_mul_count(3), Px(1080));
//!
//! let bar = PxRect::new(Px(0), Px(200), page, Px(40));
//! assert_eq!(bar.y + bar.height, Px(240));
//! ```

use std::ops::{Add, AddAssign, Div, Sub};

/// A length or coordinate in physical pixels.
///
/// Slot positions go negative once the strip is shifted past the viewport's
/// left edge.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Px(pub i32);

impl Px {
    /// Zero pixels.
    pub const ZERO: Self = Self(0);

    /// Largest representable length.
    pub const MAX: Self = Self(i32::MAX);

    /// The wrapped pixel count.
    pub fn raw(self) -> i32 {
        self.0
    }

    /// The pixel count as `f32`.
    pub fn to_f32(self) -> f32 {
        self.0 as f32
    }

    /// Rounds an animated offset toward zero. Out-of-range values clamp to
    /// the `i32` bounds and NaN maps to zero.
    ///
    /// ```
    /// use tessera_swiper::px::Px;
    ///
    /// assert_eq!(Px::saturating_from_f32(-431.8), Px(-431));
    /// assert_eq!(Px::saturating_from_f32(1e12), Px::MAX);
    /// ```
    pub fn saturating_from_f32(value: f32) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(i32::MIN as f32, i32::MAX as f32) as i32)
    }

    /// Adds without overflowing.
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Width of `pages` consecutive pages of this width, clamped to the
    /// `i32` range.
    pub fn saturating_mul_count(self, pages: usize) -> Self {
        let total = i64::from(self.0).saturating_mul(i64::try_from(pages).unwrap_or(i64::MAX));
        Self(total.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
    }
}

/// Width and height in physical pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PxSize {
    /// Horizontal extent.
    pub width: Px,
    /// Vertical extent.
    pub height: Px,
}

impl PxSize {
    /// Creates a size.
    pub const fn new(width: Px, height: Px) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle relative to the swiper's viewport.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PxRect {
    /// Left edge.
    pub x: Px,
    /// Top edge.
    pub y: Px,
    /// Horizontal extent.
    pub width: Px,
    /// Vertical extent.
    pub height: Px,
}

impl PxRect {
    /// Creates a rectangle.
    pub const fn new(x: Px, y: Px, width: Px, height: Px) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl Add for Px {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Px {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Div<i32> for Px {
    type Output = Self;

    fn div(self, rhs: i32) -> Self {
        Self(self.0 / rhs)
    }
}

impl AddAssign for Px {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}
