//! Configuration for a scheduling run.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::models::{TimeWindow, WeekSchedule, Weekday};

/// Which days exist in the week and how much of each day is bookable.
///
/// Tasks naming a day outside `days` are skipped for that day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Days of the week to build, in any order.
    pub days: Vec<Weekday>,
    /// Initial free window of every day.
    pub day_window: TimeWindow,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            days: Weekday::ALL.to_vec(),
            day_window: TimeWindow::full_day(),
        }
    }
}

impl SchedulerConfig {
    /// Creates the default configuration (seven full days).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the days of the week.
    pub fn with_days(mut self, days: impl Into<Vec<Weekday>>) -> Self {
        self.days = days.into();
        self
    }

    /// Sets the bookable window of every day.
    pub fn with_day_window(mut self, window: TimeWindow) -> Self {
        self.day_window = window;
        self
    }

    /// Reads a configuration from JSON. Missing fields take defaults.
    ///
    /// ```
    /// use u_weekplan::config::SchedulerConfig;
    ///
    /// let config = SchedulerConfig::from_json_str(r#"{"day_window": "07:00-22:00"}"#).unwrap();
    /// assert_eq!(config.days.len(), 7);
    /// assert_eq!(config.day_window.to_string(), "07:00-22:00");
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects a configuration with no days.
    pub fn validate(&self) -> Result<()> {
        if self.days.is_empty() {
            return Err(ScheduleError::Config("at least one day is required".into()));
        }
        Ok(())
    }

    /// A fresh week with every configured day fully available.
    pub fn new_week(&self) -> WeekSchedule {
        WeekSchedule::new(&self.days, self.day_window)
    }
}
