//! Page indicator dots.
//!
//! The indicator is a pure mapping from the displayed page to one visual per
//! page. The swiper never draws dots itself; hosts draw whatever visual type
//! they configured, [`DotStyle`] by default. Any type implementing
//! [`DotVisual`] can stand in for it; the trait only reports the footprint
//! the layout reserves in the indicator bar.

use derive_setters::Setters;

use crate::{color::Color, dp::Dp};

/// Default visual of an indicator dot: a small rounded bar.
#[derive(Debug, Clone, Copy, PartialEq, Setters)]
pub struct DotStyle {
    /// Bar width.
    pub width: Dp,
    /// Bar height.
    pub height: Dp,
    /// Margin on every side of the bar.
    pub margin: Dp,
    /// Corner radius.
    pub corner_radius: Dp,
    /// Fill color.
    pub color: Color,
}

impl DotStyle {
    /// The inactive dot: a grey bar.
    pub fn inactive() -> Self {
        Self {
            width: Dp(12.0),
            height: Dp(2.0),
            margin: Dp(2.0),
            corner_radius: Dp(2.0),
            color: Color::GREY,
        }
    }

    /// The active dot: same bar, highlighted white.
    pub fn active() -> Self {
        Self::inactive().color(Color::WHITE)
    }
}

/// Footprint of an indicator dot visual.
pub trait DotVisual {
    /// Drawn width and height.
    fn size(&self) -> (Dp, Dp);

    /// Gap kept on each side of the dot.
    fn spacing(&self) -> Dp {
        Dp(0.0)
    }

    /// Width taken by the dot including the gap on both sides.
    fn outer_width(&self) -> Dp {
        let (width, _) = self.size();
        Dp(width.0 + self.spacing().0 * 2.0)
    }
}

impl DotVisual for DotStyle {
    fn size(&self) -> (Dp, Dp) {
        (self.width, self.height)
    }

    fn spacing(&self) -> Dp {
        self.margin
    }
}

impl Default for DotStyle {
    fn default() -> Self {
        Self::inactive()
    }
}

/// Maps the displayed page to one visual per page.
///
/// The entry at `current_page` borrows `active`, every other entry borrows
/// `dot`. An out-of-range `current_page` highlights nothing.
///
/// ```
/// use tessera_swiper::indicator::indicator_dots;
///
/// let dots = indicator_dots(4, 2, &"*", &"-");
/// assert_eq!(dots, vec![&"-", &"-", &"*", &"-"]);
/// ```
pub fn indicator_dots<'a, V>(
    page_count: usize,
    current_page: usize,
    active: &'a V,
    dot: &'a V,
) -> Vec<&'a V> {
    (0..page_count)
        .map(|index| if index == current_page { active } else { dot })
        .collect()
}
