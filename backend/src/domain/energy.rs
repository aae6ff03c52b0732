//! Daily energy readings.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::record_id::define_record_id;
use super::{Error, OrganizationId};

/// Maximum accepted length of energy record notes.
pub const ENERGY_NOTES_MAX: usize = 500;
/// Plausible outdoor temperature range in degrees Celsius.
pub const OUTDOOR_TEMP_RANGE: (f64, f64) = (-60.0, 60.0);

define_record_id!(
    /// Identifier of a stored energy record.
    EnergyRecordId,
    "energy record id"
);

/// Reasons an energy reading is rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EnergyValidationError {
    /// A quantity is negative or not finite.
    #[error("{field} must be a finite, non-negative number")]
    Negative {
        /// Offending request field.
        field: &'static str,
    },
    /// Air conditioning hours are outside 0 to 24.
    #[error("acHours must be between 0 and 24")]
    AcHoursOutOfRange,
    /// Outdoor temperature is outside [`OUTDOOR_TEMP_RANGE`].
    #[error("outdoorTempCelsius must be between {min} and {max}")]
    TemperatureOutOfRange {
        /// Lowest accepted temperature.
        min: f64,
        /// Highest accepted temperature.
        max: f64,
    },
    /// Notes exceed [`ENERGY_NOTES_MAX`].
    #[error("notes must be at most {max} characters")]
    NotesTooLong {
        /// Longest accepted notes, in characters.
        max: usize,
    },
}

impl EnergyValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Negative { field } => field,
            Self::AcHoursOutOfRange => "acHours",
            Self::TemperatureOutOfRange { .. } => "outdoorTempCelsius",
            Self::NotesTooLong { .. } => "notes",
        }
    }

    /// Machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Negative { .. } => "must_be_non_negative",
            Self::AcHoursOutOfRange | Self::TemperatureOutOfRange { .. } => "out_of_range",
            Self::NotesTooLong { .. } => "too_long",
        }
    }
}

impl From<EnergyValidationError> for Error {
    fn from(value: EnergyValidationError) -> Self {
        Error::validation(value.field(), value.code(), value.to_string())
    }
}

/// One day of metered consumption with its context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyReading {
    /// Day the meter reading covers.
    pub date: NaiveDate,
    /// Electricity consumed in kWh.
    pub electricity_kwh: f64,
    /// People working on site that day.
    pub num_people: u32,
    /// Computers and similar systems in use.
    pub num_systems: u32,
    /// Hours of air conditioning, 0 to 24.
    pub ac_hours: f64,
    /// Average outdoor temperature.
    pub outdoor_temp_celsius: f64,
    /// Optional free text.
    pub notes: Option<String>,
}

impl EnergyReading {
    /// Check ranges before the reading is priced.
    pub fn validate(&self) -> Result<(), EnergyValidationError> {
        if !self.electricity_kwh.is_finite() || self.electricity_kwh < 0.0 {
            return Err(EnergyValidationError::Negative {
                field: "electricityKwh",
            });
        }
        if !self.ac_hours.is_finite() || !(0.0..=24.0).contains(&self.ac_hours) {
            return Err(EnergyValidationError::AcHoursOutOfRange);
        }
        let (min, max) = OUTDOOR_TEMP_RANGE;
        if !self.outdoor_temp_celsius.is_finite() || !(min..=max).contains(&self.outdoor_temp_celsius) {
            return Err(EnergyValidationError::TemperatureOutOfRange { min, max });
        }
        if self
            .notes
            .as_ref()
            .is_some_and(|notes| notes.chars().count() > ENERGY_NOTES_MAX)
        {
            return Err(EnergyValidationError::NotesTooLong {
                max: ENERGY_NOTES_MAX,
            });
        }
        Ok(())
    }
}

/// A stored energy reading with its frozen emission value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyRecord {
    id: EnergyRecordId,
    organization_id: OrganizationId,
    #[serde(flatten)]
    reading: EnergyReading,
    emission_kg: f64,
    created_at: DateTime<Utc>,
}

impl EnergyRecord {
    /// Assemble a priced reading.
    pub fn new(
        id: EnergyRecordId,
        organization_id: OrganizationId,
        reading: EnergyReading,
        emission_kg: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            organization_id,
            reading,
            emission_kg: if emission_kg.is_finite() { emission_kg.max(0.0) } else { 0.0 },
            created_at,
        }
    }

    /// Record identifier.
    pub fn id(&self) -> EnergyRecordId {
        self.id
    }

    /// Owning organization.
    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    /// The reading as submitted.
    pub fn reading(&self) -> &EnergyReading {
        &self.reading
    }

    /// Day the reading covers.
    pub fn date(&self) -> NaiveDate {
        self.reading.date
    }

    /// Priced emission in kg CO2e.
    pub fn emission_kg(&self) -> f64 {
        self.emission_kg
    }

    /// Instant the record was stored.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
