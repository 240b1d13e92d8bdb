//! Built-in dispatching rules.
//!
//! # Score Convention
//! All rules return lower scores for higher priority tasks. Fixed tasks
//! carry no importance or difficulty and score 0.

use super::{DispatchingRule, RuleScore};
use crate::models::Task;

/// Importance, higher first.
#[derive(Debug, Clone, Copy)]
pub struct Importance;

impl DispatchingRule for Importance {
    fn name(&self) -> &'static str {
        "IMPORTANCE"
    }

    fn evaluate(&self, task: &Task) -> RuleScore {
        -task.prefs().map_or(0, |p| RuleScore::from(p.importance))
    }

    fn description(&self) -> &'static str {
        "Highest Importance First"
    }
}

/// Difficulty, higher first. Used as the importance tie-breaker.
#[derive(Debug, Clone, Copy)]
pub struct Difficulty;

impl DispatchingRule for Difficulty {
    fn name(&self) -> &'static str {
        "DIFFICULTY"
    }

    fn evaluate(&self, task: &Task) -> RuleScore {
        -task.prefs().map_or(0, |p| RuleScore::from(p.difficulty))
    }

    fn description(&self) -> &'static str {
        "Highest Difficulty First"
    }
}
