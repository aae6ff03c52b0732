//! Tunable policy constants.
//!
//! [`EmissionPolicy`] groups every constant the calculator, aggregation, goal
//! tracker, leaderboard and forecaster consult. It is built once at start-up
//! and shared read-only behind an `Arc`.

use serde::Serialize;

/// Percentage surcharges applied on top of the base event formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSurcharges {
    /// Added when the event serves food.
    pub catering_percent: f64,
    /// Added when attendees travel to the event.
    pub travel_percent: f64,
}

impl Default for EventSurcharges {
    fn default() -> Self {
        Self {
            catering_percent: 25.0,
            travel_percent: 50.0,
        }
    }
}

impl EventSurcharges {
    /// Multiplier applied to the base event emission.
    ///
    /// # Examples
    /// ```
    /// use ecopulse::domain::EventSurcharges;
    ///
    /// let surcharges = EventSurcharges::default();
    /// assert_eq!(surcharges.multiplier(true, true), 1.75);
    /// assert_eq!(surcharges.multiplier(false, false), 1.0);
    /// ```
    pub fn multiplier(&self, has_catering: bool, has_travel: bool) -> f64 {
        let mut multiplier = 1.0;
        if has_catering {
            multiplier += self.catering_percent / 100.0;
        }
        if has_travel {
            multiplier += self.travel_percent / 100.0;
        }
        multiplier
    }
}

/// Incremental terms of the energy formula. The grid factor itself lives in
/// the factor registry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyLoadPolicy {
    /// kg CO2e per hour of air conditioning.
    pub ac_kg_per_hour: f64,
    /// kg CO2e per degree above the comfort baseline.
    pub temperature_kg_per_degree: f64,
    /// Outdoor temperature below which no cooling load is added.
    pub comfort_baseline_celsius: f64,
}

impl Default for EnergyLoadPolicy {
    fn default() -> Self {
        Self {
            ac_kg_per_hour: 0.15,
            temperature_kg_per_degree: 0.05,
            comfort_baseline_celsius: 22.0,
        }
    }
}

/// Versioned sustainability score formulas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "formula", rename_all = "snake_case")]
pub enum ScoreFormula {
    /// `100 × reference / (reference + avg)` over records within `window_days`
    /// of the most recent record.
    HyperbolicV1 {
        /// Average daily emission that scores exactly 50.
        reference_kg: f64,
        /// Days of history averaged, counted back from the latest record.
        window_days: u32,
    },
}

impl Default for ScoreFormula {
    fn default() -> Self {
        Self::HyperbolicV1 {
            reference_kg: 50.0,
            window_days: 30,
        }
    }
}

/// Goal tracking windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPolicy {
    /// Trailing window for auto baselines and live current emissions.
    pub baseline_window_days: u32,
}

impl Default for GoalPolicy {
    fn default() -> Self {
        Self {
            baseline_window_days: 30,
        }
    }
}

/// Sample thresholds and horizon of the energy forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPolicy {
    /// Readings needed before any forecast is made.
    pub min_samples: usize,
    /// Readings needed for medium confidence.
    pub medium_confidence_samples: usize,
    /// Readings needed for high confidence.
    pub high_confidence_samples: usize,
    /// Days the average daily use is extrapolated over.
    pub days_per_month: u32,
}

impl Default for ForecastPolicy {
    fn default() -> Self {
        Self {
            min_samples: 3,
            medium_confidence_samples: 7,
            high_confidence_samples: 30,
            days_per_month: 30,
        }
    }
}

/// Leaderboard comparison period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardPolicy {
    /// Length of the current and previous periods in days.
    pub period_days: u32,
}

impl Default for LeaderboardPolicy {
    fn default() -> Self {
        Self { period_days: 30 }
    }
}

/// Every tunable constant, grouped by consumer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionPolicy {
    /// Event catering and travel surcharges.
    pub event_surcharges: EventSurcharges,
    /// Cooling terms of the energy formula.
    pub energy_load: EnergyLoadPolicy,
    /// Sustainability score formula.
    pub score: ScoreFormula,
    /// kg CO2e one tree absorbs per year.
    pub tree_absorption_kg_per_year: f64,
    /// Goal tracking windows.
    pub goals: GoalPolicy,
    /// Energy forecast thresholds.
    pub forecast: ForecastPolicy,
    /// Leaderboard period.
    pub leaderboard: LeaderboardPolicy,
}

impl Default for EmissionPolicy {
    fn default() -> Self {
        Self {
            event_surcharges: EventSurcharges::default(),
            energy_load: EnergyLoadPolicy::default(),
            score: ScoreFormula::default(),
            tree_absorption_kg_per_year: 22.0,
            goals: GoalPolicy::default(),
            forecast: ForecastPolicy::default(),
            leaderboard: LeaderboardPolicy::default(),
        }
    }
}

impl EmissionPolicy {
    /// Default policy with the published constants.
    pub fn standard() -> Self {
        Self::default()
    }
}

/// Policy values that cannot produce meaningful results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyValidationError {
    /// A rate or percentage is negative or not finite.
    #[error("{name} must be finite and non-negative")]
    Negative {
        /// Setting name.
        name: &'static str,
    },
    /// A quantity or window that must be positive is not.
    #[error("{name} must be positive")]
    NotPositive {
        /// Setting name.
        name: &'static str,
    },
    /// Forecast thresholds are not ascending.
    #[error("forecast confidence thresholds must satisfy min <= medium <= high")]
    UnorderedConfidence,
}

impl EmissionPolicy {
    /// Check the constants before sharing the policy.
    pub fn validate(&self) -> Result<(), PolicyValidationError> {
        let non_negative = [
            ("catering_surcharge_percent", self.event_surcharges.catering_percent),
            ("travel_surcharge_percent", self.event_surcharges.travel_percent),
            ("ac_kg_per_hour", self.energy_load.ac_kg_per_hour),
            ("temperature_kg_per_degree", self.energy_load.temperature_kg_per_degree),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(PolicyValidationError::Negative { name });
            }
        }
        if !self.energy_load.comfort_baseline_celsius.is_finite() {
            return Err(PolicyValidationError::Negative {
                name: "comfort_baseline_celsius",
            });
        }
        let positive = [
            ("tree_absorption_kg_per_year", self.tree_absorption_kg_per_year),
            ("score_reference_kg", self.score.reference_kg()),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PolicyValidationError::NotPositive { name });
            }
        }
        let positive_counts = [
            ("score_window_days", self.score.window_days() as usize),
            ("baseline_window_days", self.goals.baseline_window_days as usize),
            ("forecast_min_samples", self.forecast.min_samples),
            ("forecast_days_per_month", self.forecast.days_per_month as usize),
            ("leaderboard_period_days", self.leaderboard.period_days as usize),
        ];
        for (name, value) in positive_counts {
            if value == 0 {
                return Err(PolicyValidationError::NotPositive { name });
            }
        }
        let ForecastPolicy {
            min_samples,
            medium_confidence_samples,
            high_confidence_samples,
            ..
        } = self.forecast;
        if min_samples > medium_confidence_samples || medium_confidence_samples > high_confidence_samples {
            return Err(PolicyValidationError::UnorderedConfidence);
        }
        Ok(())
    }
}

impl ScoreFormula {
    /// Reference average of the active formula.
    pub fn reference_kg(&self) -> f64 {
        match self {
            Self::HyperbolicV1 { reference_kg, .. } => *reference_kg,
        }
    }

    /// Averaging window of the active formula.
    pub fn window_days(&self) -> u32 {
        match self {
            Self::HyperbolicV1 { window_days, .. } => *window_days,
        }
    }
}
