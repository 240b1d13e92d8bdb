//! Boundary data shapes.
//!
//! [`TaskRecord`] is the flat, loosely typed task row that arrives from
//! storage or a request body; [`validation::task_from_record`] turns it into
//! a [`Task`]. [`ScheduleResponse`] is the outbound view of a finished run:
//!
//! ```json
//! {
//!   "schedule": {
//!     "Monday": {
//!       "tasks": [{"task_id": "1", "taskname": "Gym", "start_time": "07:00",
//!                  "end_time": "08:00", "fixed": true}],
//!       "intervals": ["00:00-07:00", "08:00-23:59"]
//!     }
//!   },
//!   "unschedulable": ["4"]
//! }
//! ```
//!
//! [`validation::task_from_record`]: crate::validation::task_from_record

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::models::{format_clock, PlacedTask, Task, TimeParseError, TimeWindow, Weekday};
use crate::scheduler::ScheduleOutcome;
use crate::validation::{self, ValidationError};

/// A raw task row.
///
/// Fields of the other kind may be present and are ignored on conversion.
/// `id` accepts a JSON number or string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub taskname: String,
    pub fixed: bool,
    pub duration: Option<u32>,
    #[serde(deserialize_with = "nullable_list")]
    pub preferred_intervals: Vec<String>,
    #[serde(deserialize_with = "nullable_list")]
    pub preferred_days: Vec<String>,
    #[serde(deserialize_with = "nullable_list")]
    pub max_intervals: Vec<String>,
    #[serde(deserialize_with = "nullable_list")]
    pub all_days: Vec<String>,
    pub difficulty: Option<i32>,
    pub importance: Option<i32>,
    pub fixed_day: Option<String>,
    pub fixed_start_time: Option<String>,
    pub fixed_end_time: Option<String>,
}

impl TaskRecord {
    /// Rewrites `preferred_intervals` and `max_intervals` from 12-hour
    /// (`"9:00AM-10:30PM"`) to 24-hour (`"09:00-22:30"`) form.
    pub fn with_24_hour_intervals(mut self) -> std::result::Result<Self, TimeParseError> {
        self.preferred_intervals = convert_all(&self.preferred_intervals)?;
        self.max_intervals = convert_all(&self.max_intervals)?;
        Ok(self)
    }

    /// Converts into a typed task. See [`validation::task_from_record`].
    pub fn into_task(self) -> std::result::Result<Task, Vec<ValidationError>> {
        validation::task_from_record(&self)
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = Vec<ValidationError>;

    fn try_from(record: TaskRecord) -> std::result::Result<Self, Self::Error> {
        record.into_task()
    }
}

fn convert_all(windows: &[String]) -> std::result::Result<Vec<String>, TimeParseError> {
    windows
        .iter()
        .map(|w| to_24_hour_window(w).map(|w| w.to_string()))
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

fn nullable_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parses a 12-hour window such as `"9:00AM-10:30PM"`.
///
/// `12:xxAM` is just after midnight and `12:xxPM` just after noon. The
/// meridiem is case-insensitive and may be separated by a space.
///
/// ```
/// use u_weekplan::wire::to_24_hour_window;
///
/// let window = to_24_hour_window("9:00AM-10:30PM").unwrap();
/// assert_eq!(window.to_string(), "09:00-22:30");
/// ```
pub fn to_24_hour_window(s: &str) -> std::result::Result<TimeWindow, TimeParseError> {
    let (start, end) = s
        .split_once('-')
        .ok_or_else(|| TimeParseError::InvalidWindow(s.to_string()))?;
    TimeWindow::try_new(parse_12_hour(start.trim())?, parse_12_hour(end.trim())?)
}

fn parse_12_hour(s: &str) -> std::result::Result<u32, TimeParseError> {
    let invalid = || TimeParseError::InvalidClock(s.to_string());
    if s.len() < 3 || !s.is_char_boundary(s.len() - 2) {
        return Err(invalid());
    }
    let (clock, meridiem) = s.split_at(s.len() - 2);
    let pm = match meridiem.to_ascii_uppercase().as_str() {
        "AM" => false,
        "PM" => true,
        _ => return Err(invalid()),
    };

    let (hours, minutes) = clock.trim_end().split_once(':').ok_or_else(invalid)?;
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !digits(hours) || hours.len() > 2 || !digits(minutes) || minutes.len() != 2 {
        return Err(invalid());
    }
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&hours) || minutes > 59 {
        return Err(invalid());
    }

    let hours = match (hours, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };
    Ok(hours * 60 + minutes)
}

/// One placed task in the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedTaskView {
    pub task_id: String,
    pub taskname: String,
    pub start_time: String,
    pub end_time: String,
    pub fixed: bool,
}

impl From<&PlacedTask> for PlacedTaskView {
    fn from(placed: &PlacedTask) -> Self {
        Self {
            task_id: placed.task_id.clone(),
            taskname: placed.name.clone(),
            start_time: format_clock(placed.window.start()),
            end_time: format_clock(placed.window.end()),
            fixed: placed.fixed,
        }
    }
}

/// One day in the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayView {
    /// Placed tasks in placement order.
    pub tasks: Vec<PlacedTaskView>,
    /// Remaining free windows.
    pub intervals: Vec<TimeWindow>,
}

/// Outbound view of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub schedule: BTreeMap<Weekday, DayView>,
    pub unschedulable: Vec<String>,
}

impl ScheduleResponse {
    /// Builds the response for `outcome`.
    pub fn from_outcome(outcome: &ScheduleOutcome) -> Self {
        let schedule = outcome
            .week
            .iter()
            .map(|(day, schedule)| {
                let view = DayView {
                    tasks: schedule.tasks.iter().map(PlacedTaskView::from).collect(),
                    intervals: schedule.free.clone(),
                };
                (day, view)
            })
            .collect();

        Self {
            schedule,
            unschedulable: outcome.unschedulable.clone(),
        }
    }

    /// Serializes to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
