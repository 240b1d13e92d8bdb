//! Time-of-day windows.
//!
//! A window is a half-open span `[start, end)` of minutes since midnight
//! inside a single calendar day. Windows never wrap past 23:59.
//!
//! # Wire form
//! Windows cross the crate boundary as `"HH:MM-HH:MM"` strings in 24-hour
//! form. They are parsed once on the way in and formatted on the way out;
//! everything in between works on integer minutes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Last representable minute of a day (23:59).
pub const LAST_MINUTE: u32 = 23 * 60 + 59;

/// Failure to read a clock time or window from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    /// Not an `HH:MM` time in 24-hour form.
    #[error("invalid clock time '{0}': expected HH:MM in 24-hour form")]
    InvalidClock(String),
    /// Not an `HH:MM-HH:MM` pair.
    #[error("invalid time window '{0}': expected HH:MM-HH:MM")]
    InvalidWindow(String),
    /// Start does not precede end.
    #[error("empty time window {start}-{end}: start must precede end")]
    Empty {
        /// Formatted start.
        start: String,
        /// Formatted end.
        end: String,
    },
}

/// A time interval `[start, end)` in minutes since midnight.
///
/// Half-open interval: includes start, excludes end. Always non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeWindow {
    start: u32,
    end: u32,
}

impl TimeWindow {
    /// Creates a window from minute offsets.
    ///
    /// # Panics
    /// If `start >= end`. Input from outside the crate goes through
    /// [`TimeWindow::try_new`] or [`str::parse`] instead.
    pub fn new(start: u32, end: u32) -> Self {
        assert!(
            start < end,
            "time window start ({start}) must precede end ({end})"
        );
        Self { start, end }
    }

    /// Creates a window, rejecting empty or out-of-day spans.
    pub fn try_new(start: u32, end: u32) -> Result<Self, TimeParseError> {
        if start >= end || end > LAST_MINUTE {
            return Err(TimeParseError::Empty {
                start: format_clock(start),
                end: format_clock(end),
            });
        }
        Ok(Self { start, end })
    }

    /// The whole day, `00:00-23:59`.
    pub fn full_day() -> Self {
        Self::new(0, LAST_MINUTE)
    }

    /// Start minute (inclusive).
    #[inline]
    pub fn start(&self) -> u32 {
        self.start
    }

    /// End minute (exclusive).
    #[inline]
    pub fn end(&self) -> u32 {
        self.end
    }

    /// Length in minutes.
    #[inline]
    pub fn duration_min(&self) -> u32 {
        self.end - self.start
    }

    /// Whether a task of `duration_min` minutes fits inside this window.
    #[inline]
    pub fn fits(&self, duration_min: u32) -> bool {
        self.duration_min() >= duration_min
    }

    /// The first `duration_min` minutes of this window.
    pub fn leading(&self, duration_min: u32) -> Self {
        Self::new(self.start, self.start + duration_min)
    }

    /// Whether two windows share at least one minute.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The common part of two windows, if any.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start < end {
            Some(Self { start, end })
        } else {
            None
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", format_clock(self.start), format_clock(self.end))
    }
}

impl FromStr for TimeWindow {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| TimeParseError::InvalidWindow(s.to_string()))?;
        let start = parse_clock(start.trim())?;
        let end = parse_clock(end.trim())?;
        Self::try_new(start, end)
    }
}

impl TryFrom<String> for TimeWindow {
    type Error = TimeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeWindow> for String {
    fn from(window: TimeWindow) -> Self {
        window.to_string()
    }
}

/// Parses `H:MM` or `HH:MM` (24-hour) into minutes since midnight.
pub fn parse_clock(s: &str) -> Result<u32, TimeParseError> {
    let invalid = || TimeParseError::InvalidClock(s.to_string());
    let (hours, minutes) = s.split_once(':').ok_or_else(invalid)?;

    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !digits(hours) || hours.len() > 2 || !digits(minutes) || minutes.len() != 2 {
        return Err(invalid());
    }

    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

/// Formats minutes since midnight as zero-padded `HH:MM`.
pub fn format_clock(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
