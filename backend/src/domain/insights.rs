//! Footprint insights: risk, cost efficiency and recommendations.

use std::collections::BTreeMap;

use serde::Serialize;

use super::activity::ActivityRecord;
use super::aggregation::{EmissionSample, GoalCounts, samples, sustainability_score, trees_equivalent};
use super::emission_factors::EmissionCategory;
use super::energy::EnergyRecord;
use super::policy::EmissionPolicy;
use super::round_to;

/// Total footprint at or above which the risk level is high.
pub const HIGH_RISK_KG: f64 = 10_000.0;
/// Total footprint at or above which the risk level is medium.
pub const MEDIUM_RISK_KG: f64 = 5_000.0;
/// Share of the total above which one source is called out as a risk.
pub const CONCENTRATION_SHARE: f64 = 0.5;
/// Total above which the larger savings estimate applies.
pub const LARGE_FOOTPRINT_KG: f64 = 1_000.0;

/// Coarse rating of an organization's footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Below [`MEDIUM_RISK_KG`] with no concentrated source.
    Low,
    /// At or above [`MEDIUM_RISK_KG`], or one dominant source.
    Medium,
    /// At or above [`HIGH_RISK_KG`].
    High,
}

/// Risk level with the reasons that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// Overall rating.
    pub level: RiskLevel,
    /// Human-readable reasons, empty for a low rating.
    pub factors: Vec<String>,
}

/// Category contributing the most emissions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopSource {
    /// Category name.
    pub category: EmissionCategory,
    /// Emissions attributed to the category in kg CO2e.
    pub emission_kg: f64,
    /// Share of the total footprint, 0 to 100.
    pub share_percent: f64,
}

/// Spend tracked against emissions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiMetrics {
    /// Sum of the costs recorded on activities.
    pub total_cost_tracked: f64,
    /// Zero when nothing has been emitted yet.
    pub cost_per_kg_co2: f64,
    /// Estimated achievable reduction in percent.
    pub potential_savings_percent: f64,
}

/// Counts of the records behind a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSummary {
    /// Activities considered.
    pub total_activities: usize,
    /// Energy readings considered.
    pub energy_data_points: usize,
    /// Goals still in progress.
    pub active_goals: usize,
    /// Goals that reached their target.
    pub completed_goals: usize,
}

/// Insight report served by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
    /// Activity and energy emissions combined.
    pub total_emissions_kg: f64,
    /// Emissions from activities alone.
    pub activity_emissions_kg: f64,
    /// Emissions from energy readings alone.
    pub energy_emissions_kg: f64,
    /// Totals keyed by category, energy included.
    pub emissions_by_category: BTreeMap<EmissionCategory, f64>,
    /// Largest category, absent when nothing was recorded.
    pub top_source: Option<TopSource>,
    /// Trees needed for a year to absorb the total.
    pub trees_saved_equivalent: f64,
    /// Score from 0 to 100; higher is better.
    pub sustainability_score: f64,
    /// Risk rating and reasons.
    pub risk_assessment: RiskAssessment,
    /// Cost efficiency figures.
    pub roi_metrics: RoiMetrics,
    /// Rule-based suggestions, most relevant first.
    pub recommendations: Vec<String>,
    /// Record counts behind the report.
    pub data_summary: DataSummary,
}

/// Build an insight report from an organization's full record set.
pub fn insights(
    activities: &[ActivityRecord],
    energy: &[EnergyRecord],
    goals: GoalCounts,
    policy: &EmissionPolicy,
) -> InsightReport {
    let all: Vec<EmissionSample> = samples(activities, energy).collect();
    let activity_total: f64 = activities.iter().map(ActivityRecord::emission_kg).sum();
    let energy_total: f64 = energy.iter().map(EnergyRecord::emission_kg).sum();
    let total = activity_total + energy_total;

    let mut by_category: BTreeMap<EmissionCategory, f64> = BTreeMap::new();
    for sample in &all {
        *by_category.entry(sample.category).or_default() += sample.emission_kg;
    }
    let top_source = by_category
        .iter()
        .max_by(|left, right| left.1.total_cmp(right.1))
        .filter(|(_, emission)| **emission > 0.0)
        .map(|(category, emission)| TopSource {
            category: *category,
            emission_kg: round_to(*emission, 2),
            share_percent: round_to(emission / total * 100.0, 1),
        });

    let risk_assessment = assess_risk(total, top_source.as_ref());
    let total_cost: f64 = activities.iter().filter_map(ActivityRecord::cost).sum();
    let roi_metrics = RoiMetrics {
        total_cost_tracked: round_to(total_cost, 2),
        cost_per_kg_co2: if total > 0.0 { round_to(total_cost / total, 2) } else { 0.0 },
        potential_savings_percent: if total > LARGE_FOOTPRINT_KG { 15.0 } else { 5.0 },
    };
    let recommendations = recommendations(
        activities.is_empty(),
        energy.is_empty(),
        goals,
        top_source.as_ref(),
        risk_assessment.level,
    );

    InsightReport {
        total_emissions_kg: round_to(total, 2),
        activity_emissions_kg: round_to(activity_total, 2),
        energy_emissions_kg: round_to(energy_total, 2),
        emissions_by_category: by_category
            .into_iter()
            .map(|(category, value)| (category, round_to(value, 2)))
            .collect(),
        top_source,
        trees_saved_equivalent: trees_equivalent(total, policy.tree_absorption_kg_per_year),
        sustainability_score: sustainability_score(&all, &policy.score),
        risk_assessment,
        roi_metrics,
        recommendations,
        data_summary: DataSummary {
            total_activities: activities.len(),
            energy_data_points: energy.len(),
            active_goals: goals.active,
            completed_goals: goals.completed,
        },
    }
}

fn assess_risk(total: f64, top_source: Option<&TopSource>) -> RiskAssessment {
    let mut factors = Vec::new();
    let level = if total > HIGH_RISK_KG {
        factors.push("High total emissions".to_owned());
        RiskLevel::High
    } else if total > MEDIUM_RISK_KG {
        factors.push("Moderate emissions level".to_owned());
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };
    if let Some(top) = top_source.filter(|top| top.share_percent > CONCENTRATION_SHARE * 100.0) {
        factors.push(format!("Heavy reliance on {} emissions", top.category));
    }
    RiskAssessment { level, factors }
}

fn source_advice(category: EmissionCategory) -> &'static str {
    match category {
        EmissionCategory::Travel => {
            "Travel is the largest source: prefer rail, bus or virtual meetings for frequent trips."
        }
        EmissionCategory::Events => {
            "Events are the largest source: offer virtual attendance and lower-impact catering."
        }
        EmissionCategory::Infrastructure => {
            "Infrastructure is the largest source: power down equipment out of hours and consider solar."
        }
        EmissionCategory::Marketing => {
            "Marketing is the largest source: move printed material and video to lighter digital formats."
        }
        EmissionCategory::Office => {
            "Office operations are the largest source: batch courier shipments and go paperless."
        }
        EmissionCategory::StaffWelfare => {
            "Staff welfare is the largest source: favour local outings and digital gifts."
        }
        EmissionCategory::Energy => {
            "Electricity is the largest source: monitor consumption and raise cooling setpoints."
        }
    }
}

fn recommendations(
    no_activities: bool,
    no_energy: bool,
    goals: GoalCounts,
    top_source: Option<&TopSource>,
    risk: RiskLevel,
) -> Vec<String> {
    let mut out = Vec::new();
    if no_activities {
        out.push("Start tracking activities to get personalized recommendations.".to_owned());
    }
    if let Some(top) = top_source {
        out.push(source_advice(top.category).to_owned());
    }
    if no_energy {
        out.push("Add energy consumption data for a comprehensive analysis.".to_owned());
    }
    if risk != RiskLevel::Low {
        out.push("Set monthly reduction targets for each programme to bring the total down.".to_owned());
    }
    if goals.active == 0 {
        out.push("Set an emission reduction goal to track progress over time.".to_owned());
    }
    out.push("Review and report emissions monthly to keep the team aware of trends.".to_owned());
    out
}
