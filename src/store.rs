//! Collaborators at the edge of a scheduling run.
//!
//! A run reads every task from a [`TaskSource`] and reports the IDs it
//! could not place to an [`UnschedulableSink`]. Storage, retention and
//! transport stay on the other side of these traits.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Task;

/// Supplies the full, already-validated task set for one run.
pub trait TaskSource {
    /// Loads all tasks, fixed and flexible.
    fn load_tasks(&self) -> Result<Vec<Task>>;
}

/// Receives the IDs of tasks that failed every placement tier.
pub trait UnschedulableSink {
    /// Records one run's unschedulable task IDs (possibly empty).
    fn record_unschedulable(&mut self, task_ids: &[String]) -> Result<()>;
}

impl TaskSource for Vec<Task> {
    fn load_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.clone())
    }
}

impl UnschedulableSink for Vec<String> {
    fn record_unschedulable(&mut self, task_ids: &[String]) -> Result<()> {
        self.extend_from_slice(task_ids);
        Ok(())
    }
}

/// An unschedulable audit row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnschedulableRecord {
    /// Task that could not be placed.
    pub task_id: String,
    /// Sequence number of the run that reported it (1-based).
    pub run: u64,
}

/// In-memory task store and unschedulable log.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tasks: Vec<Task>,
    unschedulable: Vec<UnschedulableRecord>,
    runs: u64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `tasks`.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            ..Self::default()
        }
    }

    /// Adds a task.
    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Removes a task by ID. Returns whether it existed.
    pub fn remove_task(&mut self, task_id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != task_id);
        self.tasks.len() != before
    }

    /// Stored tasks.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Every unschedulable record so far, oldest first.
    pub fn unschedulable(&self) -> &[UnschedulableRecord] {
        &self.unschedulable
    }

    /// Unschedulable task IDs reported by the most recent run.
    pub fn last_unschedulable(&self) -> Vec<&str> {
        self.unschedulable
            .iter()
            .filter(|r| r.run == self.runs)
            .map(|r| r.task_id.as_str())
            .collect()
    }

    /// Number of runs recorded.
    pub fn run_count(&self) -> u64 {
        self.runs
    }
}

impl TaskSource for MemoryStore {
    fn load_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.clone())
    }
}

impl UnschedulableSink for MemoryStore {
    fn record_unschedulable(&mut self, task_ids: &[String]) -> Result<()> {
        self.runs += 1;
        let run = self.runs;
        self.unschedulable
            .extend(task_ids.iter().map(|id| UnschedulableRecord {
                task_id: id.clone(),
                run,
            }));
        Ok(())
    }
}
