//! Weekly orchestrator.
//!
//! # Algorithm
//!
//! 1. Build a fresh [`WeekSchedule`] from the configuration.
//! 2. Book every fixed task at its declared slot, in input order.
//! 3. Order flexible tasks with the rule engine (stable).
//! 4. Run the tier cascade for each flexible task in that order; tasks no
//!    tier can seat are collected as unschedulable.
//!
//! Every run is independent: nothing carries over between calls.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cascade::{run_cascade, Tier};
use super::placement::place_fixed;
use crate::config::SchedulerConfig;
use crate::dispatching::RuleEngine;
use crate::error::Result;
use crate::models::{Slot, Task, WeekSchedule};
use crate::store::{TaskSource, UnschedulableSink};

/// Where a task was placed, and by which tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Placed task ID.
    pub task_id: String,
    /// Booked day and window.
    pub slot: Slot,
    /// Cascade tier that seated the task. `None` for fixed tasks.
    pub tier: Option<Tier>,
}

/// Result of one scheduling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    /// The week after every placement.
    pub week: WeekSchedule,
    /// Placements in the order they were made (fixed first).
    pub placements: Vec<Placement>,
    /// Flexible task IDs no tier could place, in processing order.
    pub unschedulable: Vec<String>,
}

impl ScheduleOutcome {
    /// Placement record for `task_id`, if it was placed.
    pub fn placement_of(&self, task_id: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.task_id == task_id)
    }

    /// Whether `task_id` ended up unschedulable.
    pub fn is_unschedulable(&self, task_id: &str) -> bool {
        self.unschedulable.iter().any(|id| id == task_id)
    }
}

/// Places fixed and flexible tasks into a week.
///
/// # Example
///
/// ```
/// use u_weekplan::models::{Task, TimeWindow, Weekday};
/// use u_weekplan::scheduler::WeekScheduler;
///
/// let w = |s: &str| s.parse::<TimeWindow>().unwrap();
/// let tasks = vec![
///     Task::fixed("standup", Weekday::Monday, w("09:00-09:30")),
///     Task::flexible("review", 60)
///         .with_preferred_days([Weekday::Monday])
///         .with_preferred_intervals([w("09:00-11:00")]),
/// ];
///
/// let outcome = WeekScheduler::new().schedule(&tasks);
/// let review = outcome.placement_of("review").unwrap();
/// assert_eq!(review.slot.window, w("09:30-10:30"));
/// assert!(outcome.unschedulable.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct WeekScheduler {
    config: SchedulerConfig,
    rule_engine: RuleEngine,
}

impl Default for WeekScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl WeekScheduler {
    /// Creates a scheduler over seven full days, ordering flexible tasks
    /// by importance then difficulty.
    pub fn new() -> Self {
        Self {
            config: SchedulerConfig::default(),
            rule_engine: RuleEngine::by_priority(),
        }
    }

    /// Sets the week configuration.
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the rule engine that orders flexible tasks.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.rule_engine = engine;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Schedules `tasks` into a fresh week.
    ///
    /// Fixed tasks are booked unconditionally and never appear in
    /// `unschedulable`. Each flexible task is placed at most once.
    pub fn schedule(&self, tasks: &[Task]) -> ScheduleOutcome {
        let mut week = self.config.new_week();
        let mut placements = Vec::with_capacity(tasks.len());
        let mut unschedulable = Vec::new();

        for (task, slot) in place_fixed(&mut week, tasks) {
            debug!(task = %task.id, day = %slot.day, window = %slot.window, "fixed task booked");
            placements.push(Placement {
                task_id: task.id.clone(),
                slot,
                tier: None,
            });
        }

        let ordered = self.rule_engine.sort(tasks.iter().filter(|t| !t.is_fixed()));
        for task in ordered {
            match run_cascade(&mut week, task) {
                Some((tier, slot)) => {
                    debug!(
                        task = %task.id,
                        %tier,
                        day = %slot.day,
                        window = %slot.window,
                        "flexible task placed"
                    );
                    placements.push(Placement {
                        task_id: task.id.clone(),
                        slot,
                        tier: Some(tier),
                    });
                }
                None => {
                    debug!(task = %task.id, "no tier could place task");
                    unschedulable.push(task.id.clone());
                }
            }
        }

        debug!(
            placed = placements.len(),
            unschedulable = unschedulable.len(),
            "schedule run finished"
        );

        ScheduleOutcome {
            week,
            placements,
            unschedulable,
        }
    }

    /// Loads tasks from `source`, schedules them, and reports the
    /// unschedulable IDs to `sink`.
    pub fn run<S, K>(&self, source: &S, sink: &mut K) -> Result<ScheduleOutcome>
    where
        S: TaskSource + ?Sized,
        K: UnschedulableSink + ?Sized,
    {
        let tasks = source.load_tasks()?;
        let outcome = self.schedule(&tasks);
        sink.record_unschedulable(&outcome.unschedulable)?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::rules::Difficulty;
    use crate::error::ScheduleError;
    use crate::models::{TimeWindow, Weekday};
    use crate::store::MemoryStore;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn w(s: &str) -> TimeWindow {
        s.parse().unwrap()
    }

    // ===== Orchestration =====

    #[test]
    fn test_fixed_and_flexible_week() {
        let tasks = vec![
            Task::fixed("1", Weekday::Monday, w("09:00-10:00")).with_name("Fixed Task 1"),
            Task::fixed("2", Weekday::Tuesday, w("10:00-12:00")).with_name("Fixed Task 2"),
            Task::flexible("3", 90)
                .with_name("Non-Fixed Task 1")
                .with_priority(5, 3)
                .with_preferred_days([Weekday::Wednesday])
                .with_preferred_intervals([w("09:00-11:00")]),
            Task::flexible("4", 60)
                .with_name("Non-Fixed Task 2")
                .with_priority(3, 2)
                .with_preferred_days([Weekday::Thursday])
                .with_preferred_intervals([w("14:00-15:00")])
                .with_max_intervals([w("12:00-18:00")]),
        ];

        let outcome = WeekScheduler::new().schedule(&tasks);
        let week = &outcome.week;

        let monday = &week.day(Weekday::Monday).unwrap().tasks;
        assert_eq!(monday.len(), 1);
        assert_eq!(monday[0].name, "Fixed Task 1");
        assert_eq!(monday[0].window, w("09:00-10:00"));
        assert!(monday[0].fixed);

        let tuesday = &week.day(Weekday::Tuesday).unwrap().tasks;
        assert_eq!(tuesday.len(), 1);
        assert_eq!(tuesday[0].window, w("10:00-12:00"));

        let wednesday = &week.day(Weekday::Wednesday).unwrap().tasks;
        assert_eq!(wednesday.len(), 1);
        assert_eq!(wednesday[0].name, "Non-Fixed Task 1");
        assert_eq!(wednesday[0].window, w("09:00-10:30"));

        let thursday = &week.day(Weekday::Thursday).unwrap().tasks;
        assert_eq!(thursday.len(), 1);
        assert_eq!(thursday[0].name, "Non-Fixed Task 2");
        assert_eq!(thursday[0].window, w("14:00-15:00"));

        assert!(outcome.unschedulable.is_empty());
        assert_eq!(outcome.placements.len(), 4);
        assert_eq!(outcome.placement_of("1").unwrap().tier, None);
        assert_eq!(outcome.placement_of("3").unwrap().tier, Some(Tier::PreferredExact));
    }

    #[test]
    fn test_task_too_long_for_any_tier() {
        let tasks = vec![Task::flexible("U", 300)
            .with_priority(4, 3)
            .with_preferred_days([Weekday::Monday])
            .with_preferred_intervals([w("08:00-08:30")])];

        let outcome = WeekScheduler::new().schedule(&tasks);
        assert_eq!(outcome.unschedulable, vec!["U".to_string()]);
        assert!(outcome.is_unschedulable("U"));
        assert!(outcome.week.placements_of("U").is_empty());
        assert_eq!(outcome.week, WeekSchedule::full_week());
    }

    #[test]
    fn test_higher_priority_takes_contested_window() {
        // Both want Friday 10:00-11:00 and nothing else; only one fits
        let make = |id: &str, importance: i32| {
            Task::flexible(id, 60)
                .with_priority(importance, 1)
                .with_preferred_days([Weekday::Friday])
                .with_preferred_intervals([w("10:00-11:00")])
        };
        let tasks = vec![make("low", 1), make("high", 5)];

        let outcome = WeekScheduler::new().schedule(&tasks);
        assert_eq!(
            outcome.placement_of("high").unwrap().slot.window,
            w("10:00-11:00")
        );
        assert_eq!(outcome.unschedulable, vec!["low".to_string()]);
    }

    #[test]
    fn test_falls_through_to_later_tiers() {
        let tasks = vec![
            Task::fixed("busy", Weekday::Monday, w("00:00-23:59")),
            Task::flexible("f", 60)
                .with_preferred_days([Weekday::Monday])
                .with_all_days([Weekday::Monday, Weekday::Tuesday])
                .with_preferred_intervals([w("09:00-10:00")])
                .with_max_intervals([w("08:00-12:00")]),
        ];

        let outcome = WeekScheduler::new().schedule(&tasks);
        let placement = outcome.placement_of("f").unwrap();
        assert_eq!(placement.tier, Some(Tier::AllDaysRelaxed));
        assert_eq!(placement.slot.day, Weekday::Tuesday);
        assert_eq!(placement.slot.window, w("09:00-10:00"));
    }

    #[test]
    fn test_overlapping_fixed_tasks_both_booked() {
        let tasks = vec![
            Task::fixed("a", Weekday::Monday, w("09:00-11:00")),
            Task::fixed("b", Weekday::Monday, w("10:00-12:00")),
        ];

        let outcome = WeekScheduler::new().schedule(&tasks);
        let monday = outcome.week.day(Weekday::Monday).unwrap();
        assert_eq!(monday.tasks.len(), 2);
        assert_eq!(monday.free, vec![w("00:00-09:00"), w("12:00-23:59")]);
        assert!(outcome.unschedulable.is_empty());
    }

    #[test]
    fn test_restricted_week_skips_unknown_days() {
        let config = SchedulerConfig::new().with_days([Weekday::Monday]);
        let tasks = vec![
            Task::fixed("fx", Weekday::Sunday, w("09:00-10:00")),
            Task::flexible("fl", 30)
                .with_preferred_days([Weekday::Sunday, Weekday::Monday])
                .with_preferred_intervals([w("09:00-10:00")]),
        ];

        let outcome = WeekScheduler::new().with_config(config).schedule(&tasks);
        assert!(outcome.placement_of("fx").is_none());
        assert!(!outcome.is_unschedulable("fx"));
        assert_eq!(outcome.placement_of("fl").unwrap().slot.day, Weekday::Monday);
    }

    #[test]
    fn test_custom_rule_engine() {
        let engine = RuleEngine::new().with_rule(Difficulty);
        let make = |id: &str, difficulty: i32| {
            Task::flexible(id, 60)
                .with_priority(0, difficulty)
                .with_preferred_days([Weekday::Friday])
                .with_preferred_intervals([w("10:00-11:00")])
        };
        let tasks = vec![make("easy", 1), make("hard", 9)];

        let outcome = WeekScheduler::new()
            .with_rule_engine(engine)
            .schedule(&tasks);
        assert!(outcome.placement_of("hard").is_some());
        assert_eq!(outcome.unschedulable, vec!["easy".to_string()]);
    }

    #[test]
    fn test_empty_input() {
        let outcome = WeekScheduler::new().schedule(&[]);
        assert!(outcome.placements.is_empty());
        assert!(outcome.unschedulable.is_empty());
        assert_eq!(outcome.week, WeekSchedule::full_week());
    }

    // ===== Collaborators =====

    #[test]
    fn test_run_records_unschedulable() {
        let mut store = MemoryStore::with_tasks(vec![
            Task::flexible("ok", 30)
                .with_preferred_days([Weekday::Monday])
                .with_preferred_intervals([w("09:00-10:00")]),
            Task::flexible("nope", 30),
        ]);

        let scheduler = WeekScheduler::new();
        let source = store.clone();
        let outcome = scheduler.run(&source, &mut store).unwrap();

        assert!(outcome.placement_of("ok").is_some());
        assert_eq!(store.last_unschedulable(), vec!["nope"]);
    }

    struct FailingSink;

    impl UnschedulableSink for FailingSink {
        fn record_unschedulable(&mut self, _task_ids: &[String]) -> Result<()> {
            Err(ScheduleError::Sink("disk full".into()))
        }
    }

    #[test]
    fn test_run_propagates_sink_error() {
        let tasks: Vec<Task> = vec![Task::flexible("x", 30)];
        let err = WeekScheduler::new().run(&tasks, &mut FailingSink).unwrap_err();
        assert!(matches!(err, ScheduleError::Sink(_)));
    }

    // ===== Properties over generated inputs =====

    fn random_window(rng: &mut StdRng) -> TimeWindow {
        let start = rng.random_range(0..1380u32);
        let len = rng.random_range(15..=240u32);
        TimeWindow::new(start, (start + len).min(1439))
    }

    fn random_days(rng: &mut StdRng) -> Vec<Weekday> {
        Weekday::ALL
            .into_iter()
            .filter(|_| rng.random_bool(0.3))
            .collect()
    }

    fn random_tasks(seed: u64, count: usize) -> Vec<Task> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|i| {
                let id = format!("T{i}");
                if rng.random_bool(0.2) {
                    let day = Weekday::ALL[rng.random_range(0..7)];
                    return Task::fixed(id, day, random_window(&mut rng));
                }
                let preferred: Vec<TimeWindow> =
                    (0..rng.random_range(0..3)).map(|_| random_window(&mut rng)).collect();
                let tolerance: Vec<TimeWindow> =
                    (0..rng.random_range(0..3)).map(|_| random_window(&mut rng)).collect();
                Task::flexible(id, rng.random_range(15..=180))
                    .with_priority(rng.random_range(0..5), rng.random_range(0..5))
                    .with_preferred_days(random_days(&mut rng))
                    .with_all_days(random_days(&mut rng))
                    .with_preferred_intervals(preferred)
                    .with_max_intervals(tolerance)
            })
            .collect()
    }

    #[test]
    fn test_deterministic_across_runs() {
        let scheduler = WeekScheduler::new();
        for seed in 0..20 {
            let tasks = random_tasks(seed, 40);
            assert_eq!(scheduler.schedule(&tasks), scheduler.schedule(&tasks));
        }
    }

    #[test]
    fn test_every_flexible_task_accounted_once() {
        let scheduler = WeekScheduler::new();
        for seed in 100..120 {
            let tasks = random_tasks(seed, 40);
            let outcome = scheduler.schedule(&tasks);

            for task in tasks.iter().filter(|t| !t.is_fixed()) {
                let booked = outcome.week.placements_of(&task.id).len();
                let missing = outcome.is_unschedulable(&task.id);
                assert!(
                    (booked == 1 && !missing) || (booked == 0 && missing),
                    "task {} booked {} times, unschedulable = {}",
                    task.id,
                    booked,
                    missing
                );
                if booked == 1 {
                    let placed = outcome.week.placements_of(&task.id)[0].1.window;
                    assert_eq!(placed.duration_min(), task.duration_min);
                }
            }
        }
    }

    #[test]
    fn test_flexible_placements_never_overlap() {
        let scheduler = WeekScheduler::new();
        for seed in 200..220 {
            let tasks = random_tasks(seed, 40);
            let outcome = scheduler.schedule(&tasks);

            for (_, day) in outcome.week.iter() {
                let flexible: Vec<TimeWindow> = day
                    .tasks
                    .iter()
                    .filter(|t| !t.fixed)
                    .map(|t| t.window)
                    .collect();
                for (i, a) in flexible.iter().enumerate() {
                    for b in &flexible[i + 1..] {
                        assert!(!a.overlaps(b), "{a} overlaps {b}");
                    }
                    for fixed in day.tasks.iter().filter(|t| t.fixed) {
                        assert!(!a.overlaps(&fixed.window));
                    }
                    for free in &day.free {
                        assert!(!a.overlaps(free));
                    }
                }
            }
        }
    }
}
