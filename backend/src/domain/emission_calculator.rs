//! Activity and energy emission calculator.
//!
//! Pure functions from raw measured quantities to kg CO2e. The registry entry
//! for `(category, type)` selects the [`FormulaKind`]; the caller supplies only
//! quantities. Results are rounded to two decimals, the precision frozen on
//! stored records.

use super::activity::{ActivityDetails, ActivityValidationError};
use super::emission_factors::{
    EmissionCategory, EmissionFactorEntry, EmissionFactorRegistry, FormulaKind, GRID_ELECTRICITY,
    RegistryError,
};
use super::energy::{EnergyReading, EnergyValidationError};
use super::policy::EmissionPolicy;
use super::round_to;

/// Decimal places kept on stored emission values.
pub const EMISSION_DECIMALS: i32 = 2;

/// Calculator bound to a registry and a policy.
///
/// # Examples
/// ```
/// use ecopulse::domain::{
///     ActivityDetails, EmissionCalculator, EmissionFactorRegistry, EmissionPolicy,
/// };
///
/// let calculator =
///     EmissionCalculator::new(EmissionFactorRegistry::standard(), EmissionPolicy::standard())
///         .expect("standard registry has a grid factor");
/// let trip = ActivityDetails::Travel {
///     vehicle_type: "petrol_car".into(),
///     distance_km: 100.0,
///     passengers: 1,
/// };
/// assert_eq!(calculator.activity_emission(&trip), Ok(21.0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EmissionCalculator {
    registry: &'static EmissionFactorRegistry,
    policy: EmissionPolicy,
    grid_factor: f64,
}

impl EmissionCalculator {
    /// Bind a calculator, resolving the grid electricity factor up front.
    pub fn new(
        registry: &'static EmissionFactorRegistry,
        policy: EmissionPolicy,
    ) -> Result<Self, RegistryError> {
        let grid_factor = registry
            .lookup(EmissionCategory::Energy, GRID_ELECTRICITY)
            .map(|entry| entry.factor)
            .ok_or(RegistryError::MissingEntry {
                category: EmissionCategory::Energy,
                kind: GRID_ELECTRICITY,
            })?;
        Ok(Self {
            registry,
            policy,
            grid_factor,
        })
    }

    /// Factor table used for pricing.
    pub fn registry(&self) -> &'static EmissionFactorRegistry {
        self.registry
    }

    /// Policy constants used for pricing.
    pub fn policy(&self) -> &EmissionPolicy {
        &self.policy
    }

    /// Emission of one activity in kg CO2e.
    pub fn activity_emission(&self, details: &ActivityDetails) -> Result<f64, ActivityValidationError> {
        let entry = self.resolve(details)?;
        let raw = match (entry.formula, details) {
            (
                FormulaKind::Distance,
                ActivityDetails::Travel {
                    distance_km,
                    passengers,
                    ..
                },
            ) => {
                positive("distanceKm", *distance_km)?;
                at_least_one("passengers", *passengers)?;
                entry.factor * distance_km
            }
            (
                FormulaKind::AttendeeHours,
                ActivityDetails::Events {
                    attendees,
                    duration_hours,
                    has_catering,
                    has_travel,
                    ..
                },
            ) => {
                at_least_one("attendees", *attendees)?;
                positive("durationHours", *duration_hours)?;
                let base = entry.factor * f64::from(*attendees) * duration_hours;
                base * self
                    .policy
                    .event_surcharges
                    .multiplier(*has_catering, *has_travel)
            }
            (
                FormulaKind::EquipmentLoad,
                ActivityDetails::Infrastructure {
                    usage_hours,
                    power_rating_kw,
                    quantity,
                    ..
                },
            ) => {
                positive("usageHours", *usage_hours)?;
                positive("powerRatingKw", *power_rating_kw)?;
                at_least_one("quantity", *quantity)?;
                entry.factor * usage_hours * power_rating_kw * f64::from(*quantity)
            }
            (
                kind @ (FormulaKind::PerUnit | FormulaKind::PerUnitPerDay),
                ActivityDetails::Marketing {
                    quantity,
                    duration_days,
                    ..
                },
            ) => {
                positive("quantity", *quantity)?;
                let days = match kind {
                    FormulaKind::PerUnitPerDay => {
                        at_least_one("durationDays", *duration_days)?;
                        f64::from(*duration_days)
                    }
                    _ => 1.0,
                };
                entry.factor * quantity * days
            }
            (FormulaKind::PerUnit, ActivityDetails::Office { quantity, .. }) => {
                positive("quantity", *quantity)?;
                entry.factor * quantity
            }
            (
                FormulaKind::PerBeneficiary,
                ActivityDetails::StaffWelfare { beneficiaries, .. },
            ) => {
                at_least_one("beneficiaries", *beneficiaries)?;
                entry.factor * f64::from(*beneficiaries)
            }
            // An entry whose formula cannot consume this category's fields
            // cannot price the submission.
            _ => return Err(self.unknown_type(details)),
        };
        Ok(round_to(raw.max(0.0), EMISSION_DECIMALS))
    }

    /// Emission of one energy reading in kg CO2e.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use ecopulse::domain::{
    ///     EmissionCalculator, EmissionFactorRegistry, EmissionPolicy, EnergyReading,
    /// };
    ///
    /// let calculator =
    ///     EmissionCalculator::new(EmissionFactorRegistry::standard(), EmissionPolicy::standard())
    ///         .expect("grid factor");
    /// let reading = EnergyReading {
    ///     date: NaiveDate::from_ymd_opt(2024, 6, 1).expect("date"),
    ///     electricity_kwh: 40.0,
    ///     num_people: 10,
    ///     num_systems: 12,
    ///     ac_hours: 6.0,
    ///     outdoor_temp_celsius: 32.0,
    ///     notes: None,
    /// };
    /// // 40 × 0.5 + 6 × 0.15 + |32 − 22| × 0.05
    /// assert_eq!(calculator.energy_emission(&reading), Ok(21.4));
    /// ```
    pub fn energy_emission(&self, reading: &EnergyReading) -> Result<f64, EnergyValidationError> {
        reading.validate()?;
        let load = &self.policy.energy_load;
        let base = reading.electricity_kwh * self.grid_factor;
        let cooling = reading.ac_hours * load.ac_kg_per_hour;
        let deviation = (reading.outdoor_temp_celsius - load.comfort_baseline_celsius).abs();
        let temperature = deviation * load.temperature_kg_per_degree;
        Ok(round_to(
            (base + cooling + temperature).max(0.0),
            EMISSION_DECIMALS,
        ))
    }

    fn resolve(&self, details: &ActivityDetails) -> Result<&EmissionFactorEntry, ActivityValidationError> {
        let entry = self
            .registry
            .lookup(details.category(), details.kind())
            .ok_or_else(|| self.unknown_type(details))?;
        let ActivityDetails::StaffWelfare {
            welfare_type,
            welfare_category,
            ..
        } = details
        else {
            return Ok(entry);
        };
        match entry.group {
            Some(expected) if expected != *welfare_category => {
                Err(ActivityValidationError::WelfareCategoryMismatch {
                    welfare_type: welfare_type.clone(),
                    expected,
                    actual: *welfare_category,
                })
            }
            _ => Ok(entry),
        }
    }

    fn unknown_type(&self, details: &ActivityDetails) -> ActivityValidationError {
        let category = details.category();
        ActivityValidationError::UnknownType {
            field: details.kind_field(),
            category,
            value: details.kind().to_owned(),
            known: self.registry.known_types(category).join(", "),
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ActivityValidationError> {
    if !value.is_finite() {
        return Err(ActivityValidationError::NotFinite { field });
    }
    if value <= 0.0 {
        return Err(ActivityValidationError::NotPositive { field });
    }
    Ok(())
}

fn at_least_one(field: &'static str, value: u32) -> Result<(), ActivityValidationError> {
    if value == 0 {
        return Err(ActivityValidationError::NotPositive { field });
    }
    Ok(())
}

#[cfg(test)]
#[path = "emission_calculator_tests.rs"]
mod tests;
