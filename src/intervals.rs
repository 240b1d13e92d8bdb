//! Interval arithmetic over ordered window lists.
//!
//! These three primitives are the only way free time is consumed or
//! searched during a run:
//!
//! - [`subtract`]: cut a booked span out of a free list
//! - [`intersect`]: pairwise overlap of two window lists
//! - [`first_fit`]: first window long enough for a duration
//!
//! # Ordering
//! Output lists are never sorted or coalesced. Fragments keep the position
//! of the window they came from, and [`first_fit`] scans in list order, so
//! the emission order here decides where tasks land.

use crate::models::TimeWindow;

/// Removes `booked` from every window in `free`.
///
/// For each window `[a, b)`:
/// - emits `[a, booked.start)` if `a < booked.start < b`
/// - emits `[booked.end, b)` if `a < booked.end < b`
/// - emits `[a, b)` unchanged if it does not overlap `booked`
///
/// A window fully covered by `booked` emits nothing.
pub fn subtract(free: &[TimeWindow], booked: TimeWindow) -> Vec<TimeWindow> {
    let (start, end) = (booked.start(), booked.end());
    let mut updated = Vec::with_capacity(free.len() + 1);

    for window in free {
        let (a, b) = (window.start(), window.end());

        if a < start && start < b {
            updated.push(TimeWindow::new(a, start));
        }
        if a < end && end < b {
            updated.push(TimeWindow::new(end, b));
        }
        if start >= b || end <= a {
            updated.push(*window);
        }
    }

    updated
}

/// Pairwise overlaps of `wanted` against `available`.
///
/// Order is `wanted`-major: every overlap of `wanted[0]` (in `available`
/// order), then `wanted[1]`, and so on. Empty overlaps are dropped;
/// adjacent or overlapping results are not merged.
pub fn intersect(wanted: &[TimeWindow], available: &[TimeWindow]) -> Vec<TimeWindow> {
    wanted
        .iter()
        .flat_map(|w| available.iter().filter_map(move |a| w.intersection(a)))
        .collect()
}

/// First window (in list order) at least `duration_min` long.
///
/// Returns the window's full bounds, not trimmed to the duration.
/// A later, tighter window is never preferred over an earlier one.
pub fn first_fit(windows: &[TimeWindow], duration_min: u32) -> Option<TimeWindow> {
    windows.iter().copied().find(|w| w.fits(duration_min))
}
