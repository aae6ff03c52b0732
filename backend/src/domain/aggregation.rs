//! Aggregation engine.
//!
//! Rolls an organization's activity and energy records up into dashboard
//! statistics. Everything here is a pure function of the record slices passed
//! in; nothing is cached between calls.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use super::activity::ActivityRecord;
use super::emission_factors::EmissionCategory;
use super::energy::EnergyRecord;
use super::policy::{EmissionPolicy, ScoreFormula};
use super::round_to;

/// Score reported when no record falls inside the scoring window.
pub const PERFECT_SCORE: f64 = 100.0;

/// One dated emission contribution, regardless of record kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionSample {
    /// Day the emission is attributed to.
    pub date: NaiveDate,
    /// Source category.
    pub category: EmissionCategory,
    /// Emission in kg CO2e.
    pub emission_kg: f64,
}

/// Flatten activity and energy records into samples.
pub fn samples<'a>(
    activities: &'a [ActivityRecord],
    energy: &'a [EnergyRecord],
) -> impl Iterator<Item = EmissionSample> + 'a {
    let activity_samples = activities.iter().map(|record| EmissionSample {
        date: record.date(),
        category: record.category(),
        emission_kg: record.emission_kg(),
    });
    let energy_samples = energy.iter().map(|record| EmissionSample {
        date: record.date(),
        category: EmissionCategory::Energy,
        emission_kg: record.emission_kg(),
    });
    activity_samples.chain(energy_samples)
}

/// Half-open date window `(start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start_exclusive: NaiveDate,
    end_inclusive: NaiveDate,
}

impl DateWindow {
    /// The `days` days ending on `end`, inclusive.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use ecopulse::domain::DateWindow;
    ///
    /// let end = NaiveDate::from_ymd_opt(2024, 3, 31).expect("date");
    /// let window = DateWindow::trailing(end, 30);
    /// assert!(window.contains(NaiveDate::from_ymd_opt(2024, 3, 2).expect("date")));
    /// assert!(!window.contains(NaiveDate::from_ymd_opt(2024, 3, 1).expect("date")));
    /// ```
    pub fn trailing(end_inclusive: NaiveDate, days: u32) -> Self {
        let start_exclusive = end_inclusive
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self {
            start_exclusive,
            end_inclusive,
        }
    }

    /// The window of equal length immediately before this one.
    pub fn preceding(&self) -> Self {
        let length = (self.end_inclusive - self.start_exclusive).num_days();
        let days = u32::try_from(length).unwrap_or(u32::MAX);
        Self::trailing(self.start_exclusive, days)
    }

    /// Whether `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date > self.start_exclusive && date <= self.end_inclusive
    }

    /// Day before the first day of the window.
    pub fn start_exclusive(&self) -> NaiveDate {
        self.start_exclusive
    }

    /// Last day of the window.
    pub fn end_inclusive(&self) -> NaiveDate {
        self.end_inclusive
    }
}

/// Sum of emissions dated inside `window`.
pub fn window_total(samples: impl IntoIterator<Item = EmissionSample>, window: DateWindow) -> f64 {
    samples
        .into_iter()
        .filter(|sample| window.contains(sample.date))
        .map(|sample| sample.emission_kg)
        .sum()
}

/// Emission total for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyEmission {
    /// `YYYY-MM`.
    pub month: String,
    /// Total for the month in kg CO2e.
    pub emission_kg: f64,
}

/// Goal counts included in dashboard statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalCounts {
    /// Goals still in progress.
    pub active: usize,
    /// Goals that reached their target.
    pub completed: usize,
}

/// Dashboard statistics for one organization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Activity and energy emissions combined.
    pub total_emissions_kg: f64,
    /// Activities recorded.
    pub total_activities: usize,
    /// Energy readings recorded.
    pub total_energy_records: usize,
    /// Totals keyed by category, energy included.
    pub emissions_by_category: BTreeMap<EmissionCategory, f64>,
    /// Monthly totals, oldest first.
    pub monthly_trend: Vec<MonthlyEmission>,
    /// Trees needed for a year to absorb the total.
    pub trees_saved_equivalent: f64,
    /// Score from 0 to 100; higher is better.
    pub sustainability_score: f64,
    /// Goals still in progress.
    pub active_goals: usize,
    /// Goals that reached their target.
    pub completed_goals: usize,
}

/// Compute dashboard statistics from an organization's full record set.
pub fn dashboard_stats(
    activities: &[ActivityRecord],
    energy: &[EnergyRecord],
    goals: GoalCounts,
    policy: &EmissionPolicy,
) -> DashboardStats {
    let all: Vec<EmissionSample> = samples(activities, energy).collect();

    let mut by_category: BTreeMap<EmissionCategory, f64> = BTreeMap::new();
    let mut by_month: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for sample in &all {
        *by_category.entry(sample.category).or_default() += sample.emission_kg;
        *by_month
            .entry((sample.date.year(), sample.date.month()))
            .or_default() += sample.emission_kg;
    }

    let total: f64 = all.iter().map(|sample| sample.emission_kg).sum();
    let monthly_trend = by_month
        .into_iter()
        .map(|((year, month), emission_kg)| MonthlyEmission {
            month: format!("{year:04}-{month:02}"),
            emission_kg: round_to(emission_kg, 2),
        })
        .collect();

    DashboardStats {
        total_emissions_kg: round_to(total, 2),
        total_activities: activities.len(),
        total_energy_records: energy.len(),
        emissions_by_category: by_category
            .into_iter()
            .map(|(category, value)| (category, round_to(value, 2)))
            .collect(),
        monthly_trend,
        trees_saved_equivalent: trees_equivalent(total, policy.tree_absorption_kg_per_year),
        sustainability_score: sustainability_score(&all, &policy.score),
        active_goals: goals.active,
        completed_goals: goals.completed,
    }
}

/// Trees needed to absorb `total_kg` in a year.
pub fn trees_equivalent(total_kg: f64, absorption_kg_per_year: f64) -> f64 {
    if absorption_kg_per_year <= 0.0 {
        return 0.0;
    }
    round_to(total_kg / absorption_kg_per_year, 2)
}

/// Bounded `[0, 100]` score; lower recent average emissions score higher.
///
/// # Examples
/// ```
/// use ecopulse::domain::{sustainability_score, ScoreFormula};
///
/// assert_eq!(sustainability_score(&[], &ScoreFormula::default()), 100.0);
/// ```
pub fn sustainability_score(samples: &[EmissionSample], formula: &ScoreFormula) -> f64 {
    match formula {
        ScoreFormula::HyperbolicV1 {
            reference_kg,
            window_days,
        } => {
            let Some(latest) = samples.iter().map(|sample| sample.date).max() else {
                return PERFECT_SCORE;
            };
            let window = DateWindow::trailing(latest, *window_days);
            let (sum, count) = samples
                .iter()
                .filter(|sample| window.contains(sample.date))
                .fold((0.0, 0usize), |(sum, count), sample| {
                    (sum + sample.emission_kg, count + 1)
                });
            if count == 0 {
                return PERFECT_SCORE;
            }
            let average = sum / count as f64;
            let score = PERFECT_SCORE * reference_kg / (reference_kg + average.max(0.0));
            round_to(score.clamp(0.0, PERFECT_SCORE), 1)
        }
    }
}

#[cfg(test)]
#[path = "aggregation_tests.rs"]
mod tests;
