//! Weekly placement and KPI evaluation.
//!
//! # Algorithm
//!
//! `WeekScheduler` is a greedy, priority-driven, first-fit heuristic. Fixed
//! tasks are booked first, then flexible tasks are taken in rule-engine
//! order and pushed through a four-tier cascade that widens the allowed
//! days and windows step by step. A placement is never revisited, so the
//! result is not optimal, but it is deterministic and fast.
//!
//! # Building blocks
//!
//! - `place_fixed`, `schedule_task`, `schedule_task_partial`: single-task
//!   placement routines over a `WeekSchedule`
//! - `Tier`, `run_cascade`: the tier sequence for one flexible task
//! - `ScheduleKpi`: placement rate, utilization, and tier mix of a run

mod cascade;
mod kpi;
mod placement;
mod week;

pub use cascade::{run_cascade, Tier};
pub use kpi::ScheduleKpi;
pub use placement::{place_fixed, schedule_task, schedule_task_partial};
pub use week::{Placement, ScheduleOutcome, WeekScheduler};
