//! Rule engine for multi-criteria ordering.
//!
//! Applies rules in sequence, consulting the next rule only on ties.
//! Tasks that tie on every rule keep their input order (stable sort).

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, DispatchingRule, RuleScore};
use crate::models::Task;

/// A composable rule engine for task prioritization.
///
/// # Example
/// ```
/// use u_weekplan::dispatching::{rules, RuleEngine};
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::Importance)
///     .with_tie_breaker(rules::Difficulty);
/// assert_eq!(engine.rule_names(), vec!["IMPORTANCE", "DIFFICULTY"]);
/// ```
#[derive(Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
}

impl RuleEngine {
    /// Creates an empty rule engine (keeps input order).
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Importance descending, then difficulty descending.
    pub fn by_priority() -> Self {
        Self::new()
            .with_rule(rules::Importance)
            .with_tie_breaker(rules::Difficulty)
    }

    /// Adds a primary rule.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a tie-breaking rule, consulted only when earlier rules tie.
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Sorts tasks by priority (highest priority first).
    ///
    /// Stable: tasks tied on every rule keep their relative input order.
    pub fn sort<'a, I>(&self, tasks: I) -> Vec<&'a Task>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let mut ordered: Vec<&'a Task> = tasks.into_iter().collect();
        ordered.sort_by(|a, b| self.compare(a, b));
        ordered
    }

    /// Returns the highest-priority task.
    pub fn select_best<'a, I>(&self, tasks: I) -> Option<&'a Task>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        self.sort(tasks).into_iter().next()
    }

    /// Evaluates a single task and returns scores from each rule.
    pub fn evaluate(&self, task: &Task) -> Vec<RuleScore> {
        self.rules.iter().map(|r| r.evaluate(task)).collect()
    }

    /// Sequential comparison: first rule that separates `a` and `b` decides.
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        self.rules
            .iter()
            .map(|r| r.evaluate(a).cmp(&r.evaluate(b)))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}
