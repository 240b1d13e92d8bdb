//! Week planning domain models.
//!
//! Provides the core data types for describing tasks and the week they
//! are placed into.
//!
//! | Type | Role |
//! |------|------|
//! | `TimeWindow` | `[start, end)` minutes since midnight |
//! | `Weekday` | Monday..Sunday |
//! | `Task` | Fixed slot or flexible preferences (input) |
//! | `DaySchedule` | Placed tasks + free windows for one day |
//! | `WeekSchedule` | Day → `DaySchedule` (run state and result) |

mod schedule;
mod task;
mod weekday;
mod window;

pub use schedule::{DaySchedule, PlacedTask, Slot, WeekSchedule};
pub use task::{FixedSlot, FlexiblePrefs, Task, TaskKind};
pub use weekday::{UnknownDay, Weekday};
pub use window::{format_clock, parse_clock, TimeParseError, TimeWindow, LAST_MINUTE};
