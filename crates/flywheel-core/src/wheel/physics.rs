//! Pixel-to-index stepping and snap arithmetic.
//!
//! The wheel's position is a committed index plus a sub-item pixel
//! remainder. [`apply_delta`] folds an incoming pixel delta into those
//! two pieces; [`snap_delta`] computes the pixel travel that settles
//! the remainder back onto an item boundary.

use super::position::PositionModel;

/// Sub-item scroll state. `offset` is the drag/fling remainder not yet
/// resolved into a full index step; it stays below one item height
/// whenever the wheel is settled.
#[derive(Debug, Clone)]
pub(crate) struct ScrollState {
    pub offset: i32,
    pub item_height: i32,
}

/// What one [`apply_delta`] call did to the wheel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StepOutcome {
    /// `(old, new)` when the committed index changed.
    pub committed: Option<(usize, usize)>,
    /// Whether offset or index moved at all.
    pub moved: bool,
}

impl StepOutcome {
    fn unmoved() -> Self {
        Self {
            committed: None,
            moved: false,
        }
    }
}

/// Fold a pixel delta into the committed index and carried remainder.
///
/// A positive delta scrolls toward earlier items. Whole items crossed
/// by the accumulated offset become index steps; the remainder is
/// carried. Boundary policy on non-cyclic wheels depends on the caller:
/// during animation a step past the edge is clamped and the consumed
/// step count recomputed from the clamped index so the remainder stays
/// consistent, while a plain drag just clamps and lets the surplus
/// pixels slip. Ignores input until the wheel has a positive item
/// height and at least one item.
pub(crate) fn apply_delta(
    scroll: &mut ScrollState,
    position: &mut PositionModel,
    delta: i64,
    animating: bool,
) -> StepOutcome {
    let h = scroll.item_height as i64;
    let count = position.count() as i64;
    if h <= 0 || count == 0 || delta == 0 {
        return StepOutcome::unmoved();
    }

    let mut offset = scroll.offset as i64 + delta;
    let mut steps = offset / h;
    let current = position.selected() as i64;
    let mut candidate = current - steps;

    if position.is_cyclic() {
        candidate = candidate.rem_euclid(count);
    } else if animating {
        let clamped = candidate.clamp(0, count - 1);
        if clamped != candidate {
            steps = current - clamped;
            candidate = clamped;
        }
    } else {
        candidate = candidate.clamp(0, count - 1);
    }

    let committed = if candidate != current {
        position.commit(candidate as usize);
        Some((current as usize, candidate as usize))
    } else {
        None
    };

    offset -= steps * h;
    let extent = count * h;
    if offset.abs() > extent {
        offset %= extent;
    }
    scroll.offset = offset as i32;

    StepOutcome {
        committed,
        moved: true,
    }
}

/// Pixel travel that settles the current remainder onto an item
/// boundary.
///
/// Past half an item height the snap continues into the adjacent item
/// (when the wheel is cyclic or that item exists); at or below half it
/// pulls straight back. The result never exceeds half an item height
/// in magnitude. Zero when already settled.
pub(crate) fn snap_delta(scroll: &ScrollState, position: &PositionModel) -> i64 {
    let h = scroll.item_height as i64;
    let offset = scroll.offset as i64;
    if h <= 0 || offset == 0 {
        return 0;
    }

    if offset.abs() * 2 > h {
        let next = position.selected() as i64 - offset.signum();
        let in_range = (0..position.count() as i64).contains(&next);
        if position.is_cyclic() || in_range {
            return if offset > 0 { h - offset } else { -h - offset };
        }
    }
    -offset
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel(count: usize, cyclic: bool, height: i32) -> (ScrollState, PositionModel) {
        (
            ScrollState {
                offset: 0,
                item_height: height,
            },
            PositionModel::new(count, cyclic),
        )
    }

    #[test]
    fn test_small_delta_accumulates_without_commit() {
        let (mut scroll, mut position) = wheel(12, false, 100);
        position.commit(5);

        let outcome = apply_delta(&mut scroll, &mut position, 30, false);
        assert_eq!(outcome.committed, None);
        assert!(outcome.moved);
        assert_eq!(scroll.offset, 30);
        assert_eq!(position.selected(), 5);
    }

    #[test]
    fn test_full_item_commits_and_carries_remainder() {
        let (mut scroll, mut position) = wheel(12, false, 100);
        position.commit(5);

        let outcome = apply_delta(&mut scroll, &mut position, 130, false);
        assert_eq!(outcome.committed, Some((5, 4)));
        assert_eq!(scroll.offset, 30);
    }

    #[test]
    fn test_negative_delta_moves_forward() {
        let (mut scroll, mut position) = wheel(12, false, 100);
        position.commit(5);

        let outcome = apply_delta(&mut scroll, &mut position, -250, false);
        assert_eq!(outcome.committed, Some((5, 7)));
        assert_eq!(scroll.offset, -50);
    }

    #[test]
    fn test_conservation_across_split_deltas() {
        // Many partial deltas must land exactly where one big delta does
        let (mut scroll, mut position) = wheel(100, false, 48);
        position.commit(50);
        for _ in 0..37 {
            apply_delta(&mut scroll, &mut position, 13, false);
        }

        let (mut scroll2, mut position2) = wheel(100, false, 48);
        position2.commit(50);
        apply_delta(&mut scroll2, &mut position2, 37 * 13, false);

        assert_eq!(scroll.offset, scroll2.offset);
        assert_eq!(position.selected(), position2.selected());
        // index steps * height + remainder == total delta
        let steps = 50 - position.selected() as i64;
        assert_eq!(steps * 48 + scroll.offset as i64, 37 * 13);
    }

    #[test]
    fn test_cyclic_wraps_through_zero() {
        let (mut scroll, mut position) = wheel(12, true, 100);
        position.commit(0);

        let outcome = apply_delta(&mut scroll, &mut position, 150, false);
        assert_eq!(outcome.committed, Some((0, 11)));
        assert_eq!(scroll.offset, 50);
    }

    #[test]
    fn test_non_cyclic_drag_clamps_at_edge_without_commit() {
        let (mut scroll, mut position) = wheel(12, false, 100);
        position.commit(0);

        // Two items past the first: index pins at 0, no changed event
        let outcome = apply_delta(&mut scroll, &mut position, 250, false);
        assert_eq!(outcome.committed, None);
        assert_eq!(position.selected(), 0);
        // Full steps still fold out of the remainder
        assert_eq!(scroll.offset, 50);
    }

    #[test]
    fn test_animating_clamp_recomputes_consumed_steps() {
        let (mut scroll, mut position) = wheel(12, false, 100);
        position.commit(10);

        // A fling step that would cross past the last item
        let outcome = apply_delta(&mut scroll, &mut position, -350, true);
        assert_eq!(outcome.committed, Some((10, 11)));
        // One step consumed; the other 250px stay in the remainder
        assert_eq!(scroll.offset, -250);
    }

    #[test]
    fn test_drift_guard_folds_runaway_remainder() {
        let (mut scroll, mut position) = wheel(4, false, 100);
        position.commit(3);

        apply_delta(&mut scroll, &mut position, -950, true);
        assert_eq!(position.selected(), 3);
        assert!(
            scroll.offset.unsigned_abs() <= 400,
            "offset {} exceeds scrollable extent",
            scroll.offset
        );
    }

    #[test]
    fn test_zero_height_ignores_input() {
        let (mut scroll, mut position) = wheel(12, false, 0);
        let outcome = apply_delta(&mut scroll, &mut position, 500, false);
        assert!(!outcome.moved);
        assert_eq!(scroll.offset, 0);
    }

    #[test]
    fn test_empty_wheel_ignores_input() {
        let (mut scroll, mut position) = wheel(0, true, 100);
        let outcome = apply_delta(&mut scroll, &mut position, 500, false);
        assert!(!outcome.moved);
    }

    #[test]
    fn test_snap_below_half_pulls_back() {
        let (mut scroll, position) = wheel(12, true, 100);
        scroll.offset = 40;
        assert_eq!(snap_delta(&scroll, &position), -40);
        scroll.offset = -50;
        // Exactly half still pulls back
        assert_eq!(snap_delta(&scroll, &position), 50);
    }

    #[test]
    fn test_snap_past_half_advances() {
        let (mut scroll, mut position) = wheel(12, true, 100);
        position.commit(5);
        scroll.offset = 60;
        assert_eq!(snap_delta(&scroll, &position), 40);
        scroll.offset = -60;
        assert_eq!(snap_delta(&scroll, &position), -40);
    }

    #[test]
    fn test_snap_never_exceeds_half_item() {
        let (mut scroll, position) = wheel(12, true, 100);
        for offset in -99..=99 {
            scroll.offset = offset;
            assert!(
                snap_delta(&scroll, &position).abs() <= 50,
                "snap too far at offset {}",
                offset
            );
        }
    }

    #[test]
    fn test_snap_blocked_at_boundary_pulls_back() {
        let (mut scroll, mut position) = wheel(12, false, 100);
        position.commit(0);
        // Past half toward the item before the first: advance is blocked
        scroll.offset = 60;
        assert_eq!(snap_delta(&scroll, &position), -60);
        // Toward item 1 it advances normally
        scroll.offset = -60;
        assert_eq!(snap_delta(&scroll, &position), -40);
    }

    #[test]
    fn test_snap_settled_is_zero() {
        let (scroll, position) = wheel(12, true, 100);
        assert_eq!(snap_delta(&scroll, &position), 0);
    }
}
