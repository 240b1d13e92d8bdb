//! Dispatching rules and rule engine for ordering flexible tasks.
//!
//! The order in which flexible tasks enter the placement cascade is the
//! only fairness mechanism in a run: earlier tasks get first claim on
//! free time. The default order is importance descending, then difficulty
//! descending, with ties left in input order.
//!
//! # Usage
//!
//! ```
//! use u_weekplan::dispatching::{rules, RuleEngine};
//! use u_weekplan::models::Task;
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::Importance)
//!     .with_tie_breaker(rules::Difficulty);
//!
//! let tasks = vec![
//!     Task::flexible("a", 30).with_priority(1, 9),
//!     Task::flexible("b", 30).with_priority(3, 0),
//! ];
//! let order = engine.sort(&tasks);
//! assert_eq!(order[0].id, "b");
//! ```

mod engine;
pub mod rules;

pub use engine::RuleEngine;

use crate::models::Task;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (placed first).
pub type RuleScore = i64;

/// A dispatching rule that evaluates task priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules should return smaller values
/// for tasks that should be placed first.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "IMPORTANCE").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a task.
    ///
    /// Returns a score where lower = higher priority.
    fn evaluate(&self, task: &Task) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
