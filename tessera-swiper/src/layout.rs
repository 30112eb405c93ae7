//! Placement of the page strip and indicator bar.
//!
//! The strip is a horizontal row of slots, one page wide each. In loop mode
//! slot `0` holds a copy of the last page and slot `N + 1` a copy of the
//! first; the real pages sit in slots `1..=N`. The strip is translated by the
//! controller's offset and only slots intersecting the viewport are placed.

use std::ops::Range;

use crate::{
    indicator::DotVisual,
    px::{Px, PxRect, PxSize},
};

/// Number of slots in the strip, padding clones included.
pub fn slot_count(page_count: usize, looping: bool) -> usize {
    if looping && page_count > 0 {
        page_count + 2
    } else {
        page_count
    }
}

/// Real page rendered in `slot`.
pub fn slot_page(slot: usize, page_count: usize, looping: bool) -> usize {
    if page_count == 0 {
        return 0;
    }
    if !looping {
        return slot.min(page_count - 1);
    }
    match slot {
        0 => page_count - 1,
        s if s > page_count => 0,
        s => s - 1,
    }
}

/// Content width of the strip.
///
/// In loop mode this is `(N + 1)` page widths: the trailing clone is placed
/// past the content edge and is only reached while a wrap animation is in
/// flight.
pub fn strip_width(page_width: Px, page_count: usize, looping: bool) -> Px {
    let pages = if looping && page_count > 0 {
        page_count + 1
    } else {
        page_count
    };
    page_width.saturating_mul_count(pages)
}

/// Slots that intersect a viewport one page wide, for a strip translated by
/// `offset`.
fn visible_slots(offset: f32, page_width: f32, slot_count: usize) -> Range<usize> {
    if slot_count == 0 || page_width <= 0.0 {
        return 0..0;
    }
    let left = -offset / page_width;
    let first = left.floor().max(0.0) as usize;
    let last = ((left + 1.0).ceil().max(0.0) as usize).min(slot_count);
    first.min(last)..last
}

/// A slot placed in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripSlot {
    /// Slot index in the strip.
    pub slot: usize,
    /// Real page rendered in the slot.
    pub page: usize,
    /// Left edge relative to the viewport.
    pub x: Px,
}

/// Result of laying out the strip for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripLayout {
    /// Content width of the strip.
    pub strip_width: Px,
    /// Slots intersecting the viewport, left to right.
    pub slots: Vec<StripSlot>,
    /// Indicator bar docked to the bottom of the viewport.
    pub indicator: PxRect,
}

/// Lays out the strip for a viewport one page wide.
pub fn strip_layout(
    viewport: PxSize,
    page_count: usize,
    looping: bool,
    offset: f32,
    indicator_height: Px,
) -> StripLayout {
    let page_width = viewport.width.max(Px::ZERO);
    let slots = visible_slots(offset, page_width.to_f32(), slot_count(page_count, looping))
        .map(|slot| {
            let x = page_width.saturating_mul_count(slot).to_f32() + offset;
            StripSlot {
                slot,
                page: slot_page(slot, page_count, looping),
                x: Px::saturating_from_f32(x),
            }
        })
        .collect();

    let bar_height = indicator_height.max(Px::ZERO).min(viewport.height.max(Px::ZERO));
    let indicator = PxRect::new(
        Px::ZERO,
        viewport.height.max(Px::ZERO) - bar_height,
        page_width,
        bar_height,
    );

    StripLayout {
        strip_width: strip_width(page_width, page_count, looping),
        slots,
        indicator,
    }
}

/// Places one dot per visual in a row centered in `bar`.
///
/// Each dot takes its width plus a margin on both sides; dots are
/// vertically centered.
pub fn indicator_dot_rects<V: DotVisual>(bar: PxRect, dots: &[&V]) -> Vec<PxRect> {
    let total = dots
        .iter()
        .fold(Px::ZERO, |acc, dot| acc.saturating_add(dot.outer_width().to_px()));
    let mut x = bar.x + (bar.width - total) / 2;
    dots.iter()
        .map(|dot| {
            let (width, height) = dot.size();
            let (width, height) = (width.to_px(), height.to_px());
            let margin = dot.spacing().to_px();
            let rect = PxRect::new(
                x + margin,
                bar.y + (bar.height - height) / 2,
                width,
                height,
            );
            x += dot.outer_width().to_px();
            rect
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::DotStyle;

    fn viewport() -> PxSize {
        PxSize::new(Px(400), Px(300))
    }

    #[test]
    fn loop_strip_has_clone_on_each_side() {
        assert_eq!(slot_count(3, true), 5);
        assert_eq!(slot_count(3, false), 3);
        let pages: Vec<usize> = (0..5).map(|slot| slot_page(slot, 3, true)).collect();
        assert_eq!(pages, vec![2, 0, 1, 2, 0]);
    }

    #[test]
    fn strip_width_covers_trailing_clone_edge() {
        assert_eq!(strip_width(Px(400), 3, true), Px(1600));
        assert_eq!(strip_width(Px(400), 3, false), Px(1200));
        assert_eq!(strip_width(Px(400), 0, true), Px::ZERO);
    }

    #[test]
    fn resting_strip_places_single_slot() {
        let layout = strip_layout(viewport(), 3, true, -400.0, Px(40));
        assert_eq!(
            layout.slots,
            vec![StripSlot {
                slot: 1,
                page: 0,
                x: Px(0)
            }]
        );
    }

    #[test]
    fn dragged_strip_places_both_neighbours() {
        let layout = strip_layout(viewport(), 3, true, -500.0, Px(40));
        assert_eq!(
            layout.slots,
            vec![
                StripSlot {
                    slot: 1,
                    page: 0,
                    x: Px(-100)
                },
                StripSlot {
                    slot: 2,
                    page: 1,
                    x: Px(300)
                },
            ]
        );

        let layout = strip_layout(viewport(), 3, true, -300.0, Px(40));
        let pages: Vec<usize> = layout.slots.iter().map(|slot| slot.page).collect();
        assert_eq!(pages, vec![2, 0]);
    }

    #[test]
    fn non_loop_overscroll_places_nothing_outside_strip() {
        let layout = strip_layout(viewport(), 2, false, 50.0, Px(40));
        assert_eq!(layout.slots.len(), 1);
        assert_eq!(layout.slots[0].x, Px(50));

        let layout = strip_layout(viewport(), 2, false, -900.0, Px(40));
        assert!(layout.slots.is_empty());
    }

    #[test]
    fn indicator_bar_docks_to_bottom() {
        let layout = strip_layout(viewport(), 3, true, -400.0, Px(40));
        assert_eq!(layout.indicator, PxRect::new(Px(0), Px(260), Px(400), Px(40)));

        let short = strip_layout(PxSize::new(Px(400), Px(20)), 3, true, -400.0, Px(40));
        assert_eq!(short.indicator, PxRect::new(Px(0), Px(0), Px(400), Px(20)));
    }

    #[test]
    fn dots_are_centered_in_bar() {
        let dot = DotStyle::inactive();
        let bar = PxRect::new(Px(0), Px(260), Px(400), Px(40));
        let rects = indicator_dot_rects(bar, &[&dot, &dot, &dot]);
        // Three dots of 12 + 2 * 2 take 48 px, leaving 176 px on each side.
        assert_eq!(
            rects,
            vec![
                PxRect::new(Px(178), Px(279), Px(12), Px(2)),
                PxRect::new(Px(194), Px(279), Px(12), Px(2)),
                PxRect::new(Px(210), Px(279), Px(12), Px(2)),
            ]
        );
    }
}
