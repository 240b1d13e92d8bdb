//! Crate-level error type.
//!
//! An unplaceable task is not an error: it is reported through
//! [`ScheduleOutcome::unschedulable`](crate::scheduler::ScheduleOutcome).

use thiserror::Error;

use crate::validation::ValidationError;

/// Result alias for fallible crate operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Errors raised at the crate boundary.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Task input failed boundary validation.
    #[error("invalid task input ({} problem(s)): {}", .0.len(), summarize(.0))]
    Validation(Vec<ValidationError>),

    /// The task source could not supply tasks.
    #[error("task source failed: {0}")]
    Source(String),

    /// The unschedulable sink rejected a record.
    #[error("unschedulable sink failed: {0}")]
    Sink(String),

    /// Configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// JSON (de)serialization failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<Vec<ValidationError>> for ScheduleError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ScheduleError::Validation(errors)
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
