//! Schedule quality metrics (KPIs).
//!
//! Computes summary indicators from a finished run and its input tasks.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Placement rate | Placed flexible tasks / flexible tasks |
//! | Booked minutes | Sum of placed window lengths per day |
//! | Utilization | Booked minutes / day window length, per day |
//! | Avg utilization | Mean of per-day utilization |
//! | Tier mix | Flexible placements per cascade tier |
//!
//! Overlapping fixed tasks are counted in full, so utilization can exceed
//! 1.0 on a day with conflicting fixed bookings.

use std::collections::BTreeMap;

use super::cascade::Tier;
use super::week::ScheduleOutcome;
use crate::models::{Task, Weekday};

/// Schedule performance indicators.
///
/// All durations are in minutes.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleKpi {
    /// Placements of any kind.
    pub placed_count: usize,
    /// Placements that came from fixed tasks.
    pub fixed_count: usize,
    /// Flexible tasks no tier could place.
    pub unschedulable_count: usize,
    /// Fraction of flexible tasks placed (0.0..=1.0). 1.0 with no flexible tasks.
    pub placement_rate: f64,
    /// Booked minutes per day.
    pub booked_min_by_day: BTreeMap<Weekday, u32>,
    /// Booked fraction of each day's window.
    pub utilization_by_day: BTreeMap<Weekday, f64>,
    /// Mean of `utilization_by_day`.
    pub avg_utilization: f64,
    /// Flexible placements per tier.
    pub placements_by_tier: BTreeMap<Tier, usize>,
}

impl ScheduleKpi {
    /// Computes KPIs from an outcome and the tasks it was produced from.
    pub fn calculate(outcome: &ScheduleOutcome, tasks: &[Task]) -> Self {
        let flexible_total = tasks.iter().filter(|t| !t.is_fixed()).count();
        let fixed_count = outcome.placements.iter().filter(|p| p.tier.is_none()).count();
        let flexible_placed = outcome.placements.len() - fixed_count;

        let mut placements_by_tier = BTreeMap::new();
        for tier in outcome.placements.iter().filter_map(|p| p.tier) {
            *placements_by_tier.entry(tier).or_insert(0) += 1;
        }

        let capacity = outcome.week.day_window().duration_min() as f64;
        let mut booked_min_by_day = BTreeMap::new();
        let mut utilization_by_day = BTreeMap::new();
        for (day, schedule) in outcome.week.iter() {
            let booked = schedule.booked_min();
            booked_min_by_day.insert(day, booked);
            utilization_by_day.insert(day, booked as f64 / capacity);
        }

        let avg_utilization = if utilization_by_day.is_empty() {
            0.0
        } else {
            let sum: f64 = utilization_by_day.values().sum();
            sum / utilization_by_day.len() as f64
        };

        let placement_rate = if flexible_total == 0 {
            1.0
        } else {
            flexible_placed as f64 / flexible_total as f64
        };

        Self {
            placed_count: outcome.placements.len(),
            fixed_count,
            unschedulable_count: outcome.unschedulable.len(),
            placement_rate,
            booked_min_by_day,
            utilization_by_day,
            avg_utilization,
            placements_by_tier,
        }
    }

    /// Total booked minutes across the week.
    pub fn total_booked_min(&self) -> u32 {
        self.booked_min_by_day.values().sum()
    }

    /// Whether the run meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_placement_rate: f64, max_unschedulable: usize) -> bool {
        self.placement_rate >= min_placement_rate && self.unschedulable_count <= max_unschedulable
    }
}
