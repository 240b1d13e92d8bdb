//! Task model.
//!
//! A task is either **fixed** (an immovable day and window) or **flexible**
//! (placed automatically from preferred and tolerated days and windows).
//! The two kinds are mutually exclusive, so the kind-specific fields live
//! in [`TaskKind`] rather than side by side on [`Task`].

use serde::{Deserialize, Serialize};

use super::{TimeWindow, Weekday};

/// A task to be placed in the week.
///
/// # Time Representation
/// Durations are whole minutes. Windows are minutes since midnight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Required length in minutes. Unused for fixed placement.
    pub duration_min: u32,
    /// Fixed slot or flexible preferences.
    pub kind: TaskKind,
}

/// Fixed or flexible placement data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskKind {
    /// Reserved unconditionally at `slot`.
    Fixed(FixedSlot),
    /// Placed by the tiered cascade.
    Flexible(FlexiblePrefs),
}

/// An immovable day and window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedSlot {
    pub day: Weekday,
    pub window: TimeWindow,
}

/// Placement preferences of a flexible task.
///
/// An empty list counts as "not declared": cascade tiers that need it
/// are skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlexiblePrefs {
    /// First-choice days, tried in order.
    #[serde(default)]
    pub preferred_days: Vec<Weekday>,
    /// Fallback day pool, tried in order.
    #[serde(default)]
    pub all_days: Vec<Weekday>,
    /// First-choice windows, tried in order.
    #[serde(default)]
    pub preferred_intervals: Vec<TimeWindow>,
    /// Tolerance envelope, tried in order.
    #[serde(default)]
    pub max_intervals: Vec<TimeWindow>,
    /// Higher = placed earlier.
    #[serde(default)]
    pub importance: i32,
    /// Tie-break on equal importance; higher = placed earlier.
    #[serde(default)]
    pub difficulty: i32,
}

impl Task {
    /// Creates a fixed task occupying `window` on `day`.
    ///
    /// Duration defaults to the window length.
    pub fn fixed(id: impl Into<String>, day: Weekday, window: TimeWindow) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            duration_min: window.duration_min(),
            kind: TaskKind::Fixed(FixedSlot { day, window }),
        }
    }

    /// Creates a flexible task with no preferences declared yet.
    pub fn flexible(id: impl Into<String>, duration_min: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            duration_min,
            kind: TaskKind::Flexible(FlexiblePrefs::default()),
        }
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the duration in minutes.
    pub fn with_duration(mut self, duration_min: u32) -> Self {
        self.duration_min = duration_min;
        self
    }

    /// Sets preferred days. No-op on fixed tasks.
    pub fn with_preferred_days(mut self, days: impl Into<Vec<Weekday>>) -> Self {
        if let Some(prefs) = self.prefs_mut() {
            prefs.preferred_days = days.into();
        }
        self
    }

    /// Sets the fallback day pool. No-op on fixed tasks.
    pub fn with_all_days(mut self, days: impl Into<Vec<Weekday>>) -> Self {
        if let Some(prefs) = self.prefs_mut() {
            prefs.all_days = days.into();
        }
        self
    }

    /// Sets preferred windows. No-op on fixed tasks.
    pub fn with_preferred_intervals(mut self, windows: impl Into<Vec<TimeWindow>>) -> Self {
        if let Some(prefs) = self.prefs_mut() {
            prefs.preferred_intervals = windows.into();
        }
        self
    }

    /// Sets tolerance windows. No-op on fixed tasks.
    pub fn with_max_intervals(mut self, windows: impl Into<Vec<TimeWindow>>) -> Self {
        if let Some(prefs) = self.prefs_mut() {
            prefs.max_intervals = windows.into();
        }
        self
    }

    /// Sets importance and difficulty. No-op on fixed tasks.
    pub fn with_priority(mut self, importance: i32, difficulty: i32) -> Self {
        if let Some(prefs) = self.prefs_mut() {
            prefs.importance = importance;
            prefs.difficulty = difficulty;
        }
        self
    }

    /// Whether this task has an immovable slot.
    pub fn is_fixed(&self) -> bool {
        matches!(self.kind, TaskKind::Fixed(_))
    }

    /// Fixed slot, if fixed.
    pub fn fixed_slot(&self) -> Option<&FixedSlot> {
        match &self.kind {
            TaskKind::Fixed(slot) => Some(slot),
            TaskKind::Flexible(_) => None,
        }
    }

    /// Flexible preferences, if flexible.
    pub fn prefs(&self) -> Option<&FlexiblePrefs> {
        match &self.kind {
            TaskKind::Flexible(prefs) => Some(prefs),
            TaskKind::Fixed(_) => None,
        }
    }

    fn prefs_mut(&mut self) -> Option<&mut FlexiblePrefs> {
        match &mut self.kind {
            TaskKind::Flexible(prefs) => Some(prefs),
            TaskKind::Fixed(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(s: &str) -> TimeWindow {
        s.parse().unwrap()
    }

    #[test]
    fn test_flexible_builder() {
        let task = Task::flexible("T1", 60)
            .with_name("Study")
            .with_preferred_days([Weekday::Monday, Weekday::Wednesday])
            .with_all_days(Weekday::ALL)
            .with_preferred_intervals([w("09:00-11:00")])
            .with_max_intervals([w("08:00-18:00")])
            .with_priority(5, 3);

        assert_eq!(task.id, "T1");
        assert_eq!(task.name, "Study");
        assert_eq!(task.duration_min, 60);
        assert!(!task.is_fixed());

        let prefs = task.prefs().unwrap();
        assert_eq!(prefs.preferred_days, vec![Weekday::Monday, Weekday::Wednesday]);
        assert_eq!(prefs.all_days.len(), 7);
        assert_eq!(prefs.importance, 5);
        assert_eq!(prefs.difficulty, 3);
    }

    #[test]
    fn test_fixed_ignores_flexible_setters() {
        let task = Task::fixed("F1", Weekday::Tuesday, w("10:00-12:00"))
            .with_preferred_days([Weekday::Monday])
            .with_priority(9, 9);

        assert!(task.is_fixed());
        assert!(task.prefs().is_none());
        assert_eq!(task.duration_min, 120);
        let slot = task.fixed_slot().unwrap();
        assert_eq!(slot.day, Weekday::Tuesday);
        assert_eq!(slot.window, w("10:00-12:00"));
    }

    #[test]
    fn test_serde_kind_tag() {
        let task = Task::fixed("F1", Weekday::Monday, w("09:00-10:00")).with_name("Standup");
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["kind"]["type"], "fixed");
        assert_eq!(json["kind"]["window"], "09:00-10:00");

        let back: Task = serde_json::from_value(json).unwrap();
        assert_eq!(back, task);
    }
}
