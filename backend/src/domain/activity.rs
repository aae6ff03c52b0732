//! Activity records and their category-specific measurements.
//!
//! [`ActivityDetails`] is a tagged union: each category carries exactly the
//! fields its formula needs, so a travel record can never hold attendee counts
//! and an event can never lack a duration.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::emission_factors::{EmissionCategory, WelfareGroup};
use super::record_id::define_record_id;
use super::{Error, OrganizationId};

/// Maximum accepted length of a free-text activity description.
pub const ACTIVITY_DESCRIPTION_MAX: usize = 500;

define_record_id!(
    /// Identifier of a stored activity record.
    ActivityId,
    "activity id"
);

/// Category-specific measured quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ActivityDetails {
    /// Distance travelled in one vehicle.
    Travel {
        /// Vehicle type, e.g. `petrol_car`.
        vehicle_type: String,
        /// Distance covered in kilometres.
        distance_km: f64,
        /// Occupants of the vehicle; recorded but not used by the formula.
        passengers: u32,
    },
    /// An event hosted by the organization.
    Events {
        /// Event type, e.g. `conference`.
        event_type: String,
        /// Number of attendees.
        attendees: u32,
        /// Length of the event in hours.
        duration_hours: f64,
        /// Whether food was served.
        has_catering: bool,
        /// Whether attendees travelled to the venue.
        has_travel: bool,
    },
    /// Equipment running for a period.
    Infrastructure {
        /// Equipment type, e.g. `servers`.
        equipment_type: String,
        /// Hours of operation.
        usage_hours: f64,
        /// Power draw of one unit in kW.
        power_rating_kw: f64,
        /// Number of identical units.
        quantity: u32,
    },
    /// A marketing output.
    Marketing {
        /// Marketing type, e.g. `printed_brochure`.
        marketing_type: String,
        /// Units in the factor's unit, such as pages or site-days.
        quantity: f64,
        /// Days the output ran; only daily types use it.
        duration_days: u32,
    },
    /// Day-to-day office consumption.
    Office {
        /// Office activity type, e.g. `paper_usage`.
        activity_type: String,
        /// Units in the factor's unit.
        quantity: f64,
    },
    /// A staff welfare benefit.
    StaffWelfare {
        /// Welfare type, e.g. `gym_membership`.
        welfare_type: String,
        /// Group the welfare type belongs to.
        welfare_category: WelfareGroup,
        /// Staff members receiving the benefit.
        beneficiaries: u32,
    },
}

impl ActivityDetails {
    /// Category the details belong to.
    pub fn category(&self) -> EmissionCategory {
        match self {
            Self::Travel { .. } => EmissionCategory::Travel,
            Self::Events { .. } => EmissionCategory::Events,
            Self::Infrastructure { .. } => EmissionCategory::Infrastructure,
            Self::Marketing { .. } => EmissionCategory::Marketing,
            Self::Office { .. } => EmissionCategory::Office,
            Self::StaffWelfare { .. } => EmissionCategory::StaffWelfare,
        }
    }

    /// The category-scoped type name, e.g. `petrol_car`.
    pub fn kind(&self) -> &str {
        match self {
            Self::Travel { vehicle_type, .. } => vehicle_type,
            Self::Events { event_type, .. } => event_type,
            Self::Infrastructure { equipment_type, .. } => equipment_type,
            Self::Marketing { marketing_type, .. } => marketing_type,
            Self::Office { activity_type, .. } => activity_type,
            Self::StaffWelfare { welfare_type, .. } => welfare_type,
        }
    }

    /// Request field that carries [`Self::kind`].
    pub fn kind_field(&self) -> &'static str {
        match self {
            Self::Travel { .. } => "vehicleType",
            Self::Events { .. } => "eventType",
            Self::Infrastructure { .. } => "equipmentType",
            Self::Marketing { .. } => "marketingType",
            Self::Office { .. } => "activityType",
            Self::StaffWelfare { .. } => "welfareType",
        }
    }
}

/// Reasons an activity submission is rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActivityValidationError {
    /// The type name is not in the factor registry.
    #[error("unknown {category} type '{value}'; expected one of: {known}")]
    UnknownType {
        /// Request field that carried the type.
        field: &'static str,
        /// Category that was searched.
        category: EmissionCategory,
        /// Rejected type name.
        value: String,
        /// Comma-separated list of accepted names.
        known: String,
    },
    /// The welfare type is filed under another group.
    #[error("{welfare_type} belongs to welfare category {expected}, not {actual}")]
    WelfareCategoryMismatch {
        /// Submitted welfare type.
        welfare_type: String,
        /// Group the registry files the type under.
        expected: WelfareGroup,
        /// Group the caller submitted.
        actual: WelfareGroup,
    },
    /// A quantity is zero or negative.
    #[error("{field} must be greater than zero")]
    NotPositive {
        /// Offending request field.
        field: &'static str,
    },
    /// A quantity is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite {
        /// Offending request field.
        field: &'static str,
    },
    /// Cost is negative or not finite.
    #[error("cost must be a finite, non-negative amount")]
    InvalidCost,
    /// Description exceeds [`ACTIVITY_DESCRIPTION_MAX`].
    #[error("description must be at most {max} characters")]
    DescriptionTooLong {
        /// Longest accepted description, in characters.
        max: usize,
    },
}

impl ActivityValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::UnknownType { field, .. }
            | Self::NotPositive { field }
            | Self::NotFinite { field } => field,
            Self::WelfareCategoryMismatch { .. } => "welfareCategory",
            Self::InvalidCost => "cost",
            Self::DescriptionTooLong { .. } => "description",
        }
    }

    /// Machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownType { .. } => "unknown_type",
            Self::WelfareCategoryMismatch { .. } => "category_mismatch",
            Self::NotPositive { .. } => "must_be_positive",
            Self::NotFinite { .. } => "not_finite",
            Self::InvalidCost => "invalid_cost",
            Self::DescriptionTooLong { .. } => "too_long",
        }
    }
}

impl From<ActivityValidationError> for Error {
    fn from(value: ActivityValidationError) -> Self {
        Error::validation(value.field(), value.code(), value.to_string())
    }
}

/// A validated submission waiting for its emission to be computed.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivitySubmission {
    /// Category-specific quantities.
    pub details: ActivityDetails,
    /// Day the activity took place.
    pub date: NaiveDate,
    /// Optional spend attached to the activity.
    pub cost: Option<f64>,
    /// Optional free text.
    pub description: Option<String>,
}

impl ActivitySubmission {
    /// Check the fields shared by every category.
    pub fn validate_common(&self) -> Result<(), ActivityValidationError> {
        if self.cost.is_some_and(|cost| !cost.is_finite() || cost < 0.0) {
            return Err(ActivityValidationError::InvalidCost);
        }
        if self
            .description
            .as_ref()
            .is_some_and(|description| description.chars().count() > ACTIVITY_DESCRIPTION_MAX)
        {
            return Err(ActivityValidationError::DescriptionTooLong {
                max: ACTIVITY_DESCRIPTION_MAX,
            });
        }
        Ok(())
    }
}

/// A stored activity with its frozen emission value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    id: ActivityId,
    organization_id: OrganizationId,
    #[serde(flatten)]
    details: ActivityDetails,
    date: NaiveDate,
    emission_kg: f64,
    cost: Option<f64>,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

/// Raw fields used to rebuild a record loaded from storage.
#[derive(Debug, Clone)]
pub struct ActivityRecordParts {
    /// Record identifier.
    pub id: ActivityId,
    /// Owning organization.
    pub organization_id: OrganizationId,
    /// Category-specific quantities.
    pub details: ActivityDetails,
    /// Day the activity took place.
    pub date: NaiveDate,
    /// Priced emission in kg CO2e.
    pub emission_kg: f64,
    /// Optional spend attached to the activity.
    pub cost: Option<f64>,
    /// Optional free text.
    pub description: Option<String>,
    /// Instant the record was stored.
    pub created_at: DateTime<Utc>,
}

impl ActivityRecord {
    /// Assemble a record. Negative or non-finite emissions are clamped to zero.
    pub fn from_parts(parts: ActivityRecordParts) -> Self {
        let ActivityRecordParts {
            id,
            organization_id,
            details,
            date,
            emission_kg,
            cost,
            description,
            created_at,
        } = parts;
        Self {
            id,
            organization_id,
            details,
            date,
            emission_kg: if emission_kg.is_finite() { emission_kg.max(0.0) } else { 0.0 },
            cost,
            description,
            created_at,
        }
    }

    /// Record identifier.
    pub fn id(&self) -> ActivityId {
        self.id
    }

    /// Owning organization.
    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    /// Category-specific quantities.
    pub fn details(&self) -> &ActivityDetails {
        &self.details
    }

    /// Category of the activity.
    pub fn category(&self) -> EmissionCategory {
        self.details.category()
    }

    /// Day the activity took place.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Priced emission in kg CO2e.
    pub fn emission_kg(&self) -> f64 {
        self.emission_kg
    }

    /// Optional spend attached to the activity.
    pub fn cost(&self) -> Option<f64> {
        self.cost
    }

    /// Optional free text.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Instant the record was stored.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
