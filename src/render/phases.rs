//! Z-order resolution: the phased draw order for a directive list.
//!
//! Directives that change pixel state (boxes, borders) must land before the
//! text contrast rule reads pixel state, so rendering runs in three phases:
//! all boxes, then all borders, then the complete list in original order.
//! The first two phases establish the backdrop; the final full pass draws
//! everything where later directives may legitimately overdraw earlier ones.
//! Boxes and borders are intentionally drawn twice.

use crate::epl::Directive;

/// Resolve the effective draw order for a directive list.
///
/// A stable partition by borrowing: nothing is dropped, duplicated in source,
/// or mutated, and relative order within each phase matches source order.
pub fn phase_order(directives: &[Directive]) -> Vec<&Directive> {
    let boxes = directives
        .iter()
        .filter(|d| matches!(d, Directive::Box { .. }));
    let borders = directives
        .iter()
        .filter(|d| matches!(d, Directive::Border { .. }));

    boxes.chain(borders).chain(directives.iter()).collect()
}
