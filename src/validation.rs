//! Input validation for weekly scheduling.
//!
//! Checks task input before it reaches the scheduler. Detects:
//! - Duplicate IDs
//! - Unknown day names
//! - Malformed or empty time windows
//! - Fixed tasks missing their day or times
//! - Flexible tasks without a positive duration
//!
//! All problems are collected; nothing stops at the first one.
//!
//! [`detect_fixed_conflicts`] is a separate, optional pre-pass. The
//! scheduler itself books overlapping fixed tasks without complaint.

use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

use crate::models::{Task, TimeWindow, Weekday};
use crate::wire::TaskRecord;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two tasks share the same ID.
    DuplicateId,
    /// A day name is not one of Monday..Sunday.
    InvalidDay,
    /// A window is malformed, empty, or runs past 23:59.
    InvalidInterval,
    /// A required field is absent.
    MissingField,
    /// A flexible task has zero duration.
    InvalidDuration,
    /// Two fixed tasks overlap on the same day.
    FixedConflict,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates typed tasks.
///
/// Checks:
/// 1. No duplicate task IDs
/// 2. Every flexible task has a positive duration
pub fn validate_tasks(tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for task in tasks {
        if !ids.insert(task.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id),
            ));
        }
        if !task.is_fixed() && task.duration_min == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!("Task '{}' must have a positive duration", task.id),
            ));
        }
    }

    into_result(errors)
}

/// Converts one raw record into a typed task.
///
/// A record with `fixed: true` needs `fixed_day`, `fixed_start_time` and
/// `fixed_end_time`; its flexible fields are ignored and its duration is
/// the window length. Any other record is flexible: it needs a positive
/// `duration`, and its fixed fields are ignored. Absent day and interval
/// lists mean "not declared".
pub fn task_from_record(record: &TaskRecord) -> Result<Task, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let id = record.id.as_str();

    let task = if record.fixed {
        let day = match record.fixed_day.as_deref() {
            Some(name) => parse_day(id, "fixed_day", name, &mut errors),
            None => {
                errors.push(missing(id, "fixed_day"));
                None
            }
        };
        let window = match (&record.fixed_start_time, &record.fixed_end_time) {
            (Some(start), Some(end)) => {
                parse_window(id, "fixed time", &format!("{start}-{end}"), &mut errors)
            }
            (start, _) => {
                let field = if start.is_none() {
                    "fixed_start_time"
                } else {
                    "fixed_end_time"
                };
                errors.push(missing(id, field));
                None
            }
        };
        match (day, window) {
            (Some(day), Some(window)) => Some(Task::fixed(id, day, window)),
            _ => None,
        }
    } else {
        let duration = match record.duration {
            Some(0) => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidDuration,
                    format!("Task '{id}': duration must be positive"),
                ));
                None
            }
            Some(d) => Some(d),
            None => {
                errors.push(missing(id, "duration"));
                None
            }
        };
        let preferred_days = parse_days(id, "preferred_days", &record.preferred_days, &mut errors);
        let all_days = parse_days(id, "all_days", &record.all_days, &mut errors);
        let preferred_intervals =
            parse_windows(id, "preferred_intervals", &record.preferred_intervals, &mut errors);
        let max_intervals = parse_windows(id, "max_intervals", &record.max_intervals, &mut errors);

        duration.map(|d| {
            Task::flexible(id, d)
                .with_preferred_days(preferred_days)
                .with_all_days(all_days)
                .with_preferred_intervals(preferred_intervals)
                .with_max_intervals(max_intervals)
                .with_priority(
                    record.importance.unwrap_or(0),
                    record.difficulty.unwrap_or(0),
                )
        })
    };

    match task {
        Some(task) if errors.is_empty() => Ok(task.with_name(record.taskname.clone())),
        _ => Err(errors),
    }
}

/// Converts a batch of records, reporting every problem across all of them.
///
/// ```
/// use u_weekplan::validation::{validate_records, ValidationErrorKind};
/// use u_weekplan::wire::TaskRecord;
///
/// let records: Vec<TaskRecord> = serde_json::from_str(r#"[
///     {"id": 1, "taskname": "Gym", "fixed": true, "fixed_day": "Monday",
///      "fixed_start_time": "07:00", "fixed_end_time": "08:00"},
///     {"id": 2, "taskname": "Read", "duration": 30, "preferred_days": ["Someday"]}
/// ]"#).unwrap();
///
/// let errors = validate_records(&records).unwrap_err();
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].kind, ValidationErrorKind::InvalidDay);
/// ```
pub fn validate_records(records: &[TaskRecord]) -> Result<Vec<Task>, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut tasks = Vec::with_capacity(records.len());

    for record in records {
        match task_from_record(record) {
            Ok(task) => tasks.push(task),
            Err(mut problems) => errors.append(&mut problems),
        }
    }

    let mut ids = HashSet::new();
    for record in records {
        if !ids.insert(record.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", record.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(tasks)
    } else {
        Err(errors)
    }
}

/// Reports every pair of fixed tasks whose windows overlap on the same day.
///
/// Pairs are reported in input order, earlier task first.
pub fn detect_fixed_conflicts(tasks: &[Task]) -> ValidationResult {
    let mut by_day: BTreeMap<Weekday, Vec<(&str, TimeWindow)>> = BTreeMap::new();
    for task in tasks {
        if let Some(slot) = task.fixed_slot() {
            by_day
                .entry(slot.day)
                .or_default()
                .push((task.id.as_str(), slot.window));
        }
    }

    let mut errors = Vec::new();
    for (day, booked) in &by_day {
        for (i, (a_id, a)) in booked.iter().enumerate() {
            for (b_id, b) in &booked[i + 1..] {
                if a.overlaps(b) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::FixedConflict,
                        format!("Fixed tasks '{a_id}' ({a}) and '{b_id}' ({b}) overlap on {day}"),
                    ));
                }
            }
        }
    }

    into_result(errors)
}

fn into_result(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn missing(id: &str, field: &str) -> ValidationError {
    ValidationError::new(
        ValidationErrorKind::MissingField,
        format!("Task '{id}': {field} must be provided"),
    )
}

fn parse_day(
    id: &str,
    field: &str,
    name: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<Weekday> {
    match name.parse() {
        Ok(day) => Some(day),
        Err(_) => {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDay,
                format!("Task '{id}': {field} has invalid day '{name}'"),
            ));
            None
        }
    }
}

fn parse_days(
    id: &str,
    field: &str,
    names: &[String],
    errors: &mut Vec<ValidationError>,
) -> Vec<Weekday> {
    names
        .iter()
        .filter_map(|name| parse_day(id, field, name, errors))
        .collect()
}

fn parse_window(
    id: &str,
    field: &str,
    text: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<TimeWindow> {
    match text.parse() {
        Ok(window) => Some(window),
        Err(e) => {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidInterval,
                format!("Task '{id}': {field}: {e}"),
            ));
            None
        }
    }
}

fn parse_windows(
    id: &str,
    field: &str,
    texts: &[String],
    errors: &mut Vec<ValidationError>,
) -> Vec<TimeWindow> {
    texts
        .iter()
        .filter_map(|text| parse_window(id, field, text, errors))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(s: &str) -> TimeWindow {
        s.parse().unwrap()
    }

    fn flexible_record(id: &str) -> TaskRecord {
        TaskRecord {
            id: id.into(),
            taskname: format!("Task {id}"),
            duration: Some(60),
            preferred_days: vec!["Monday".into()],
            preferred_intervals: vec!["09:00-11:00".into()],
            ..Default::default()
        }
    }

    fn fixed_record(id: &str, day: &str, start: &str, end: &str) -> TaskRecord {
        TaskRecord {
            id: id.into(),
            taskname: format!("Fixed {id}"),
            fixed: true,
            fixed_day: Some(day.into()),
            fixed_start_time: Some(start.into()),
            fixed_end_time: Some(end.into()),
            ..Default::default()
        }
    }

    // ===== Typed tasks =====

    #[test]
    fn test_valid_tasks() {
        let tasks = vec![
            Task::fixed("F1", Weekday::Monday, w("09:00-10:00")),
            Task::flexible("T1", 30),
        ];
        assert!(validate_tasks(&tasks).is_ok());
    }

    #[test]
    fn test_duplicate_task_id() {
        let tasks = vec![Task::flexible("T1", 30), Task::flexible("T1", 45)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_zero_duration() {
        let errors = validate_tasks(&[Task::flexible("T1", 0)]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidDuration);
    }

    // ===== Records =====

    #[test]
    fn test_flexible_record() {
        let mut record = flexible_record("7");
        record.importance = Some(4);
        record.difficulty = Some(2);
        record.max_intervals = vec!["08:00-18:00".into()];
        record.all_days = vec!["Tuesday".into(), "Friday".into()];

        let task = task_from_record(&record).unwrap();
        assert_eq!(task.id, "7");
        assert_eq!(task.name, "Task 7");
        assert_eq!(task.duration_min, 60);

        let prefs = task.prefs().unwrap();
        assert_eq!(prefs.preferred_days, vec![Weekday::Monday]);
        assert_eq!(prefs.all_days, vec![Weekday::Tuesday, Weekday::Friday]);
        assert_eq!(prefs.preferred_intervals, vec![w("09:00-11:00")]);
        assert_eq!(prefs.max_intervals, vec![w("08:00-18:00")]);
        assert_eq!((prefs.importance, prefs.difficulty), (4, 2));
    }

    #[test]
    fn test_fixed_record_ignores_flexible_fields() {
        let mut record = fixed_record("1", "Monday", "09:00", "10:30");
        record.preferred_days = vec!["Friday".into()];
        record.duration = Some(5);

        let task = task_from_record(&record).unwrap();
        assert!(task.is_fixed());
        assert!(task.prefs().is_none());
        assert_eq!(task.duration_min, 90);
        let slot = task.fixed_slot().unwrap();
        assert_eq!(slot.day, Weekday::Monday);
        assert_eq!(slot.window, w("09:00-10:30"));
    }

    #[test]
    fn test_flexible_record_ignores_fixed_fields() {
        let mut record = flexible_record("2");
        record.fixed_day = Some("Funday".into());
        record.fixed_start_time = Some("nonsense".into());

        let task = task_from_record(&record).unwrap();
        assert!(!task.is_fixed());
    }

    #[test]
    fn test_fixed_record_missing_fields() {
        let mut record = fixed_record("1", "Monday", "09:00", "10:00");
        record.fixed_day = None;
        record.fixed_end_time = None;

        let errors = task_from_record(&record).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.kind == ValidationErrorKind::MissingField));
        assert!(errors[1].message.contains("fixed_end_time"));
    }

    #[test]
    fn test_fixed_record_bad_values() {
        let errors = task_from_record(&fixed_record("1", "Mon", "10:00", "09:00")).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidDay);
        assert_eq!(errors[1].kind, ValidationErrorKind::InvalidInterval);
    }

    #[test]
    fn test_flexible_record_bad_values() {
        let mut record = flexible_record("3");
        record.duration = Some(0);
        record.all_days = vec!["monday".into()];
        record.preferred_intervals = vec!["9am-10am".into()];
        record.max_intervals = vec!["08:00-24:00".into()];

        let errors = task_from_record(&record).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ValidationErrorKind::InvalidDuration,
                ValidationErrorKind::InvalidDay,
                ValidationErrorKind::InvalidInterval,
                ValidationErrorKind::InvalidInterval,
            ]
        );
    }

    #[test]
    fn test_flexible_record_missing_duration() {
        let mut record = flexible_record("4");
        record.duration = None;
        let errors = task_from_record(&record).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::MissingField);
    }

    #[test]
    fn test_validate_records_collects_everything() {
        let mut bad = flexible_record("2");
        bad.preferred_days = vec!["Caturday".into()];
        let records = vec![flexible_record("1"), bad, flexible_record("1")];

        let errors = validate_records(&records).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidDay);
        assert_eq!(errors[1].kind, ValidationErrorKind::DuplicateId);
    }

    #[test]
    fn test_validate_records_ok() {
        let records = vec![
            fixed_record("1", "Monday", "09:00", "10:00"),
            flexible_record("2"),
        ];
        let tasks = validate_records(&records).unwrap();
        assert_eq!(tasks.len(), 2);
        assert!(tasks[0].is_fixed());
    }

    // ===== Fixed conflicts =====

    #[test]
    fn test_fixed_conflicts() {
        let tasks = vec![
            Task::fixed("a", Weekday::Monday, w("09:00-11:00")),
            Task::fixed("b", Weekday::Monday, w("10:00-12:00")),
            Task::fixed("c", Weekday::Monday, w("12:00-13:00")),
            Task::fixed("d", Weekday::Tuesday, w("09:00-11:00")),
            Task::flexible("e", 60),
        ];

        let errors = detect_fixed_conflicts(&tasks).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::FixedConflict);
        assert!(errors[0].message.contains("'a'"));
        assert!(errors[0].message.contains("'b'"));
        assert!(errors[0].message.contains("Monday"));
    }

    #[test]
    fn test_no_fixed_conflicts() {
        let tasks = vec![
            Task::fixed("a", Weekday::Monday, w("09:00-10:00")),
            Task::fixed("b", Weekday::Monday, w("10:00-11:00")),
        ];
        assert!(detect_fixed_conflicts(&tasks).is_ok());
    }
}
