//! Weekly task slotting.
//!
//! Places a set of tasks into a seven-day week of minute-resolution free
//! time. Fixed tasks are booked at their declared slot; flexible tasks are
//! ordered by priority and placed greedily through a four-tier cascade that
//! widens from preferred days and windows out to the tolerance envelope.
//! Tasks no tier can seat are reported, not treated as errors.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TimeWindow`, `Weekday`, `Task`,
//!   `DaySchedule`, `WeekSchedule`
//! - **`intervals`**: Interval arithmetic: subtract, intersect, first fit
//! - **`dispatching`**: Priority rules and the rule engine that orders
//!   flexible tasks
//! - **`scheduler`**: Fixed placement, the tier cascade, `WeekScheduler`,
//!   and KPIs
//! - **`validation`**: Input integrity checks and record conversion
//! - **`wire`**: Boundary DTOs (task records, schedule response)
//! - **`store`**: Task source and unschedulable sink traits
//! - **`config`**: `SchedulerConfig`
//! - **`error`**: `ScheduleError`
//!
//! # Example
//!
//! ```
//! use u_weekplan::models::{Task, TimeWindow, Weekday};
//! use u_weekplan::scheduler::{Tier, WeekScheduler};
//!
//! let w = |s: &str| s.parse::<TimeWindow>().unwrap();
//! let tasks = vec![
//!     Task::fixed("lecture", Weekday::Tuesday, w("10:00-12:00")),
//!     Task::flexible("lab report", 90)
//!         .with_priority(3, 2)
//!         .with_preferred_days([Weekday::Tuesday])
//!         .with_preferred_intervals([w("11:00-13:00")])
//!         .with_max_intervals([w("09:00-17:00")]),
//! ];
//!
//! let outcome = WeekScheduler::new().schedule(&tasks);
//! let report = outcome.placement_of("lab report").unwrap();
//! // 11:00-12:00 is taken, so the report runs past its preferred window
//! assert_eq!(report.tier, Some(Tier::PreferredDaysRelaxed));
//! assert_eq!(report.slot.window, w("12:00-13:30"));
//! ```
//!
//! # Logging
//!
//! Placement decisions are emitted through `tracing` at `debug` and
//! `trace` level. The crate installs no subscriber.

pub mod config;
pub mod dispatching;
pub mod error;
pub mod intervals;
pub mod models;
pub mod scheduler;
pub mod store;
pub mod validation;
pub mod wire;

pub use config::SchedulerConfig;
pub use error::{Result, ScheduleError};
pub use scheduler::{ScheduleOutcome, WeekScheduler};
