//! Single-task placement routines.
//!
//! Every routine takes the run's [`WeekSchedule`] by `&mut` and either books
//! exactly one span and returns where, or returns `None` and leaves the
//! week untouched. Days not present in the week are skipped silently.

use tracing::{trace, warn};

use crate::intervals;
use crate::models::{PlacedTask, Slot, Task, TimeWindow, WeekSchedule, Weekday};

/// Reserves every fixed task's slot, in input order.
///
/// No conflict check: overlapping fixed tasks are all booked and free time
/// is trimmed once per task. Flexible tasks and tasks naming a day outside
/// the week are skipped.
pub fn place_fixed<'a, I>(week: &mut WeekSchedule, tasks: I) -> Vec<(&'a Task, Slot)>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut placed = Vec::new();

    for task in tasks {
        let Some(fixed) = task.fixed_slot() else {
            continue;
        };
        let slot = Slot {
            day: fixed.day,
            window: fixed.window,
        };
        if week.book(task, slot) {
            placed.push((task, slot));
        } else {
            warn!(task = %task.id, day = %fixed.day, "fixed task names a day outside the week");
        }
    }

    placed
}

/// Places `task` in the first of `windows` that is free long enough.
///
/// For each day in order: intersect `windows` with the day's free time,
/// take the first-fit window, and book `[spot.start, spot.start + duration)`.
/// Stops at the first day that yields a spot.
///
/// # Panics
/// If `duration_min` is zero (an empty span cannot be booked).
pub fn schedule_task(
    week: &mut WeekSchedule,
    task: &Task,
    days: &[Weekday],
    windows: &[TimeWindow],
    duration_min: u32,
) -> Option<Slot> {
    for &day in days {
        let Some(schedule) = week.day_mut(day) else {
            trace!(task = %task.id, %day, "day not in week");
            continue;
        };

        let candidates = intervals::intersect(windows, &schedule.free);
        if let Some(spot) = intervals::first_fit(&candidates, duration_min) {
            let window = spot.leading(duration_min);
            schedule.book(PlacedTask::new(task, window));
            return Some(Slot { day, window });
        }
        trace!(task = %task.id, %day, candidates = candidates.len(), "no exact fit");
    }

    None
}

/// Places `task` inside its tolerance windows, preferring overlap with
/// `preferred`.
///
/// For each day, the tolerance windows are intersected with free time.
/// For each resulting window `m` and each preferred window `p`, in order:
/// 1. if `p ∩ m` is non-empty and long enough, book at its start;
/// 2. else if `p ∩ m` is non-empty and `m` itself is long enough, book at
///    `m`'s start, even though that runs past the preferred window.
///
/// A tolerance window that touches no preferred window is never used here.
///
/// # Panics
/// If `duration_min` is zero.
pub fn schedule_task_partial(
    week: &mut WeekSchedule,
    task: &Task,
    days: &[Weekday],
    preferred: &[TimeWindow],
    tolerance: &[TimeWindow],
    duration_min: u32,
) -> Option<Slot> {
    for &day in days {
        let Some(schedule) = week.day_mut(day) else {
            trace!(task = %task.id, %day, "day not in week");
            continue;
        };

        let tolerated = intervals::intersect(tolerance, &schedule.free);
        let spot = tolerated.iter().find_map(|m| {
            preferred.iter().find_map(|p| {
                let overlap = p.intersection(m)?;
                if overlap.fits(duration_min) {
                    Some(overlap)
                } else if m.fits(duration_min) {
                    Some(*m)
                } else {
                    None
                }
            })
        });

        if let Some(spot) = spot {
            let window = spot.leading(duration_min);
            schedule.book(PlacedTask::new(task, window));
            return Some(Slot { day, window });
        }
        trace!(task = %task.id, %day, tolerated = tolerated.len(), "no relaxed fit");
    }

    None
}
