//! Week schedule (run state and result) model.
//!
//! A [`WeekSchedule`] is created fresh for every run, mutated by every
//! placement, and handed back at the end. Each [`DaySchedule`] keeps the
//! tasks placed on it (in placement order, not time order) and the list of
//! still-free windows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Task, TimeWindow, Weekday};
use crate::intervals;

/// A task booked into a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedTask {
    /// Placed task ID.
    pub task_id: String,
    /// Task name (denormalized for display).
    pub name: String,
    /// Occupied span.
    pub window: TimeWindow,
    /// Whether this came from a fixed task.
    pub fixed: bool,
}

impl PlacedTask {
    /// Creates a booking record for `task` at `window`.
    pub fn new(task: &Task, window: TimeWindow) -> Self {
        Self {
            task_id: task.id.clone(),
            name: task.name.clone(),
            window,
            fixed: task.is_fixed(),
        }
    }
}

/// A day and window where something was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub day: Weekday,
    pub window: TimeWindow,
}

/// Per-day placement state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    /// Placed tasks in placement order.
    pub tasks: Vec<PlacedTask>,
    /// Currently unbooked windows, in fragment emission order.
    pub free: Vec<TimeWindow>,
}

impl DaySchedule {
    /// Creates a day with nothing booked and `available` free.
    pub fn new(available: TimeWindow) -> Self {
        Self {
            tasks: Vec::new(),
            free: vec![available],
        }
    }

    /// Records `entry` and removes its span from the free list.
    ///
    /// No conflict check: overlapping bookings are all recorded.
    pub fn book(&mut self, entry: PlacedTask) {
        self.free = intervals::subtract(&self.free, entry.window);
        self.tasks.push(entry);
    }

    /// Total booked minutes (overlapping bookings counted twice).
    pub fn booked_min(&self) -> u32 {
        self.tasks.iter().map(|t| t.window.duration_min()).sum()
    }

    /// Total free minutes left.
    pub fn free_min(&self) -> u32 {
        self.free.iter().map(|w| w.duration_min()).sum()
    }
}

/// The seven (or configured) days of one scheduling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSchedule {
    day_window: TimeWindow,
    days: BTreeMap<Weekday, DaySchedule>,
}

impl WeekSchedule {
    /// Creates a week over `days`, each fully available within `day_window`.
    pub fn new(days: &[Weekday], day_window: TimeWindow) -> Self {
        Self {
            day_window,
            days: days
                .iter()
                .map(|&day| (day, DaySchedule::new(day_window)))
                .collect(),
        }
    }

    /// All seven days, each free `00:00-23:59`.
    pub fn full_week() -> Self {
        Self::new(&Weekday::ALL, TimeWindow::full_day())
    }

    /// Window each day started out with.
    pub fn day_window(&self) -> TimeWindow {
        self.day_window
    }

    /// Whether `day` is part of this week.
    pub fn contains(&self, day: Weekday) -> bool {
        self.days.contains_key(&day)
    }

    /// Day state, if `day` is part of this week.
    pub fn day(&self, day: Weekday) -> Option<&DaySchedule> {
        self.days.get(&day)
    }

    /// Mutable day state, if `day` is part of this week.
    pub fn day_mut(&mut self, day: Weekday) -> Option<&mut DaySchedule> {
        self.days.get_mut(&day)
    }

    /// Days in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DaySchedule)> {
        self.days.iter().map(|(&day, schedule)| (day, schedule))
    }

    /// Books `task` at `slot`. Returns `false` if the day is not in this week.
    pub fn book(&mut self, task: &Task, slot: Slot) -> bool {
        match self.days.get_mut(&slot.day) {
            Some(day) => {
                day.book(PlacedTask::new(task, slot.window));
                true
            }
            None => false,
        }
    }

    /// Every placement of `task_id`, with its day.
    pub fn placements_of(&self, task_id: &str) -> Vec<(Weekday, &PlacedTask)> {
        self.iter()
            .flat_map(|(day, schedule)| {
                schedule
                    .tasks
                    .iter()
                    .filter(move |t| t.task_id == task_id)
                    .map(move |t| (day, t))
            })
            .collect()
    }

    /// Number of placed-task records across all days.
    pub fn placed_count(&self) -> usize {
        self.days.values().map(|d| d.tasks.len()).sum()
    }
}
