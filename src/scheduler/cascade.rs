//! Four-tier placement cascade for flexible tasks.
//!
//! | Tier | Days | Routine | Windows |
//! |------|------|---------|---------|
//! | `PreferredExact` | preferred | exact | preferred |
//! | `PreferredDaysRelaxed` | preferred | relaxed | preferred within tolerance |
//! | `AllDaysRelaxed` | all | relaxed | preferred within tolerance |
//! | `AllDaysTolerance` | all | exact | tolerance |
//!
//! Tiers run in this order and stop at the first success. A tier whose
//! inputs were not declared is skipped.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::placement::{schedule_task, schedule_task_partial};
use crate::models::{FlexiblePrefs, Slot, Task, WeekSchedule};

/// One step of the placement cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Preferred days, preferred windows, exact fit.
    PreferredExact,
    /// Preferred days, tolerance windows, preferring overlap with preferred windows.
    PreferredDaysRelaxed,
    /// All days, tolerance windows, preferring overlap with preferred windows.
    AllDaysRelaxed,
    /// All days, tolerance windows, exact fit.
    AllDaysTolerance,
}

impl Tier {
    /// Cascade order.
    pub const CASCADE: [Tier; 4] = [
        Tier::PreferredExact,
        Tier::PreferredDaysRelaxed,
        Tier::AllDaysRelaxed,
        Tier::AllDaysTolerance,
    ];

    /// Short name for logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::PreferredExact => "preferred_exact",
            Tier::PreferredDaysRelaxed => "preferred_days_relaxed",
            Tier::AllDaysRelaxed => "all_days_relaxed",
            Tier::AllDaysTolerance => "all_days_tolerance",
        }
    }

    /// Whether the task declared everything this tier needs.
    pub fn applies(&self, prefs: &FlexiblePrefs) -> bool {
        match self {
            Tier::PreferredExact => {
                !prefs.preferred_days.is_empty() && !prefs.preferred_intervals.is_empty()
            }
            Tier::PreferredDaysRelaxed => {
                !prefs.preferred_days.is_empty() && !prefs.max_intervals.is_empty()
            }
            Tier::AllDaysRelaxed | Tier::AllDaysTolerance => {
                !prefs.all_days.is_empty() && !prefs.max_intervals.is_empty()
            }
        }
    }

    /// Runs this tier once against the week.
    pub fn attempt(
        &self,
        week: &mut WeekSchedule,
        task: &Task,
        prefs: &FlexiblePrefs,
    ) -> Option<Slot> {
        let duration = task.duration_min;
        match self {
            Tier::PreferredExact => schedule_task(
                week,
                task,
                &prefs.preferred_days,
                &prefs.preferred_intervals,
                duration,
            ),
            Tier::PreferredDaysRelaxed => schedule_task_partial(
                week,
                task,
                &prefs.preferred_days,
                &prefs.preferred_intervals,
                &prefs.max_intervals,
                duration,
            ),
            Tier::AllDaysRelaxed => schedule_task_partial(
                week,
                task,
                &prefs.all_days,
                &prefs.preferred_intervals,
                &prefs.max_intervals,
                duration,
            ),
            Tier::AllDaysTolerance => {
                schedule_task(week, task, &prefs.all_days, &prefs.max_intervals, duration)
            }
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs the applicable tiers in order until one places `task`.
///
/// Returns `None` for fixed tasks and for tasks no tier could place; the
/// week is unchanged in that case.
pub fn run_cascade(week: &mut WeekSchedule, task: &Task) -> Option<(Tier, Slot)> {
    let prefs = task.prefs()?;
    Tier::CASCADE
        .into_iter()
        .filter(|tier| tier.applies(prefs))
        .find_map(|tier| tier.attempt(week, task, prefs).map(|slot| (tier, slot)))
}
