//! Heuristic energy forecaster.
//!
//! Treats each record as one daily reading: the monthly forecast is the mean
//! daily kWh scaled to a month. Recommendations are regenerated from the
//! sample on every call.

use serde::Serialize;

use super::energy::EnergyRecord;
use super::policy::{EnergyLoadPolicy, ForecastPolicy};
use super::round_to;

/// AC hours per person per day above which cooling is flagged.
const AC_HOURS_PER_PERSON_LIMIT: f64 = 0.5;
/// Mean outdoor deviation from the comfort baseline that marks weather-driven load.
const TEMPERATURE_DEVIATION_LIMIT: f64 = 6.0;
const SYSTEMS_PER_PERSON_LIMIT: f64 = 1.5;
const KWH_PER_PERSON_LIMIT: f64 = 10.0;

/// Confidence band derived from the sample size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastConfidence {
    /// Fewer readings than the medium threshold.
    Low,
    /// Enough readings for a rough trend.
    Medium,
    /// A month or more of readings.
    High,
}

/// Mean context values across the sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastFactors {
    /// Mean people on site.
    pub avg_people: f64,
    /// Mean systems in use.
    pub avg_systems: f64,
    /// Mean daily air conditioning hours.
    pub avg_ac_hours: f64,
    /// Mean outdoor temperature.
    pub avg_temp_celsius: f64,
}

/// Projected consumption for the next month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyForecast {
    /// Mean daily kWh scaled to a month.
    pub monthly_forecast_kwh: f64,
    /// Confidence band of the projection.
    pub confidence: ForecastConfidence,
    /// Suggestions drawn from the sample.
    pub recommendations: Vec<String>,
}

/// Forecaster outcome. Too few samples is a normal result, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastResult {
    /// Not enough readings to forecast.
    Insufficient {
        /// Explanation naming the readings still needed.
        message: String,
        /// Readings available.
        data_points: usize,
    },
    /// A forecast was produced.
    Sufficient {
        /// The projection.
        forecast: EnergyForecast,
        /// Sample means behind it.
        factors: ForecastFactors,
        /// Readings used.
        data_points: usize,
    },
}

impl ForecastResult {
    /// Whether a forecast was produced.
    pub fn sufficient_data(&self) -> bool {
        matches!(self, Self::Sufficient { .. })
    }

    /// Readings considered.
    pub fn data_points(&self) -> usize {
        match self {
            Self::Insufficient { data_points, .. } | Self::Sufficient { data_points, .. } => {
                *data_points
            }
        }
    }
}

/// Forecast next month's consumption from an organization's energy history.
pub fn forecast(
    records: &[EnergyRecord],
    policy: &ForecastPolicy,
    load: &EnergyLoadPolicy,
) -> ForecastResult {
    let data_points = records.len();
    if data_points < policy.min_samples {
        return ForecastResult::Insufficient {
            message: format!(
                "At least {} energy records are needed for a forecast; {} recorded so far.",
                policy.min_samples, data_points
            ),
            data_points,
        };
    }

    let count = data_points as f64;
    let mean = |value: fn(&EnergyRecord) -> f64| records.iter().map(value).sum::<f64>() / count;
    let avg_kwh = mean(|record| record.reading().electricity_kwh);
    let factors = ForecastFactors {
        avg_people: mean(|record| f64::from(record.reading().num_people)),
        avg_systems: mean(|record| f64::from(record.reading().num_systems)),
        avg_ac_hours: mean(|record| record.reading().ac_hours),
        avg_temp_celsius: mean(|record| record.reading().outdoor_temp_celsius),
    };
    let confidence = confidence_for(data_points, policy);
    let recommendations = recommendations(avg_kwh, &factors, confidence, data_points, load);

    ForecastResult::Sufficient {
        forecast: EnergyForecast {
            monthly_forecast_kwh: round_to(avg_kwh * f64::from(policy.days_per_month), 2),
            confidence,
            recommendations,
        },
        factors: ForecastFactors {
            avg_people: round_to(factors.avg_people, 1),
            avg_systems: round_to(factors.avg_systems, 1),
            avg_ac_hours: round_to(factors.avg_ac_hours, 1),
            avg_temp_celsius: round_to(factors.avg_temp_celsius, 1),
        },
        data_points,
    }
}

/// Ordinal confidence keyed to sample count.
pub fn confidence_for(data_points: usize, policy: &ForecastPolicy) -> ForecastConfidence {
    if data_points >= policy.high_confidence_samples {
        ForecastConfidence::High
    } else if data_points >= policy.medium_confidence_samples {
        ForecastConfidence::Medium
    } else {
        ForecastConfidence::Low
    }
}

fn recommendations(
    avg_kwh: f64,
    factors: &ForecastFactors,
    confidence: ForecastConfidence,
    data_points: usize,
    load: &EnergyLoadPolicy,
) -> Vec<String> {
    let mut out = Vec::new();
    let people = factors.avg_people;

    if people > 0.0 {
        let ac_per_person = factors.avg_ac_hours / people;
        if ac_per_person > AC_HOURS_PER_PERSON_LIMIT {
            out.push(format!(
                "Air conditioning runs {ac_per_person:.1} hours per person each day; \
                 align cooling schedules with actual occupancy."
            ));
        }
        let systems_per_person = factors.avg_systems / people;
        if systems_per_person > SYSTEMS_PER_PERSON_LIMIT {
            out.push(format!(
                "There are {systems_per_person:.1} powered systems per person; \
                 switch off or consolidate idle equipment."
            ));
        }
        let kwh_per_person = avg_kwh / people;
        if kwh_per_person > KWH_PER_PERSON_LIMIT {
            out.push(format!(
                "Daily use is {kwh_per_person:.1} kWh per person; \
                 an energy audit should find the largest loads."
            ));
        }
    }

    let deviation = (factors.avg_temp_celsius - load.comfort_baseline_celsius).abs();
    if deviation > TEMPERATURE_DEVIATION_LIMIT {
        out.push(format!(
            "Outdoor temperatures average {:.1} °C, {deviation:.1} °C from the {:.0} °C comfort \
             baseline; insulation and shading will reduce weather-driven load.",
            factors.avg_temp_celsius, load.comfort_baseline_celsius
        ));
    }

    if out.is_empty() {
        out.push(
            "Consumption is in line with occupancy and weather; keep logging daily readings \
             to spot changes early."
                .to_owned(),
        );
    }

    if confidence == ForecastConfidence::Low {
        out.push(format!(
            "This forecast uses only {data_points} readings; confidence improves as more days \
             are recorded."
        ));
    }
    out
}
