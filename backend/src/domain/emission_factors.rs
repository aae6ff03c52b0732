//! Emission factor registry.
//!
//! A read-only table keyed by `(category, type)` mapping to a factor in kg
//! CO2e per unit and the [`FormulaKind`] that decides how the calculator
//! combines the factor with measured quantities. Adding a type is a table
//! change only, as long as its formula kind already exists.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Top-level emission source. The first six are activity categories;
/// `Energy` covers metered electricity readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionCategory {
    /// Business travel by vehicle.
    Travel,
    /// Hosted events.
    Events,
    /// Equipment and facilities.
    Infrastructure,
    /// Printed and digital outreach.
    Marketing,
    /// Office consumables and services.
    Office,
    /// Staff welfare benefits.
    StaffWelfare,
    /// Metered electricity.
    Energy,
}

impl EmissionCategory {
    /// Categories accepted by activity submissions.
    pub const ACTIVITIES: [Self; 6] = [
        Self::Travel,
        Self::Events,
        Self::Infrastructure,
        Self::Marketing,
        Self::Office,
        Self::StaffWelfare,
    ];

    /// Snake-case wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Travel => "travel",
            Self::Events => "events",
            Self::Infrastructure => "infrastructure",
            Self::Marketing => "marketing",
            Self::Office => "office",
            Self::StaffWelfare => "staff_welfare",
            Self::Energy => "energy",
        }
    }
}

impl fmt::Display for EmissionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown category name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown emission category: {0}")]
pub struct UnknownCategoryError(pub String);

impl FromStr for EmissionCategory {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "travel" => Ok(Self::Travel),
            "events" => Ok(Self::Events),
            "infrastructure" => Ok(Self::Infrastructure),
            "marketing" => Ok(Self::Marketing),
            "office" => Ok(Self::Office),
            "staff_welfare" => Ok(Self::StaffWelfare),
            "energy" => Ok(Self::Energy),
            other => Err(UnknownCategoryError(other.to_owned())),
        }
    }
}

/// Sub-grouping of staff welfare types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WelfareGroup {
    /// Health and wellness benefits.
    HealthWellness,
    /// Recreational benefits.
    Recreation,
    /// Uniforms and safety equipment.
    UniformsSafety,
}

impl WelfareGroup {
    /// Snake-case wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HealthWellness => "health_wellness",
            Self::Recreation => "recreation",
            Self::UniformsSafety => "uniforms_safety",
        }
    }
}

impl fmt::Display for WelfareGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown welfare group.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown welfare category: {0}")]
pub struct UnknownWelfareGroupError(pub String);

impl FromStr for WelfareGroup {
    type Err = UnknownWelfareGroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "health_wellness" => Ok(Self::HealthWellness),
            "recreation" => Ok(Self::Recreation),
            "uniforms_safety" => Ok(Self::UniformsSafety),
            other => Err(UnknownWelfareGroupError(other.to_owned())),
        }
    }
}

/// Calculation branch selected by a registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaKind {
    /// `factor × distance_km`.
    Distance,
    /// `factor × attendees × duration_hours`, plus event surcharges.
    AttendeeHours,
    /// `factor × usage_hours × power_rating_kw × quantity`.
    EquipmentLoad,
    /// `factor × quantity`.
    PerUnit,
    /// `factor × quantity × duration_days`.
    PerUnitPerDay,
    /// `factor × beneficiaries`.
    PerBeneficiary,
    /// Grid electricity plus air-conditioning and temperature load terms.
    GridEnergy,
}

/// One row of the factor table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionFactorEntry {
    /// Category the entry belongs to.
    pub category: EmissionCategory,
    /// Type name within the category.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Welfare group, only set for staff welfare.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<WelfareGroup>,
    /// kg CO2e per `unit`.
    pub factor: f64,
    /// Unit the factor is quoted per.
    pub unit: &'static str,
    /// How the factor combines with submitted quantities.
    pub formula: FormulaKind,
}

impl EmissionFactorEntry {
    /// Build an entry without a welfare group.
    pub const fn new(
        category: EmissionCategory,
        kind: &'static str,
        factor: f64,
        unit: &'static str,
        formula: FormulaKind,
    ) -> Self {
        Self {
            category,
            kind,
            group: None,
            factor,
            unit,
            formula,
        }
    }

    /// Attach a welfare group to a staff welfare entry.
    pub const fn in_group(mut self, group: WelfareGroup) -> Self {
        self.group = Some(group);
        self
    }
}

/// Errors raised while assembling a registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The same type is registered twice.
    #[error("duplicate emission factor for {category}/{kind}")]
    Duplicate {
        /// Category of the entry.
        category: EmissionCategory,
        /// Type name of the entry.
        kind: &'static str,
    },
    /// A required entry is absent.
    #[error("no emission factor registered for {category}/{kind}")]
    MissingEntry {
        /// Category of the entry.
        category: EmissionCategory,
        /// Type name of the entry.
        kind: &'static str,
    },
    /// A factor is negative or not finite.
    #[error("emission factor for {category}/{kind} must be finite and non-negative")]
    InvalidFactor {
        /// Category of the entry.
        category: EmissionCategory,
        /// Type name of the entry.
        kind: &'static str,
    },
}

/// Immutable `(category, type)` lookup table.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionFactorRegistry {
    entries: BTreeMap<EmissionCategory, BTreeMap<&'static str, EmissionFactorEntry>>,
}

impl EmissionFactorRegistry {
    /// Build a registry, rejecting duplicate keys and negative factors.
    pub fn from_entries(
        entries: impl IntoIterator<Item = EmissionFactorEntry>,
    ) -> Result<Self, RegistryError> {
        let mut table: BTreeMap<EmissionCategory, BTreeMap<&'static str, EmissionFactorEntry>> =
            BTreeMap::new();
        for entry in entries {
            if !entry.factor.is_finite() || entry.factor < 0.0 {
                return Err(RegistryError::InvalidFactor {
                    category: entry.category,
                    kind: entry.kind,
                });
            }
            let previous = table
                .entry(entry.category)
                .or_default()
                .insert(entry.kind, entry);
            if previous.is_some() {
                return Err(RegistryError::Duplicate {
                    category: entry.category,
                    kind: entry.kind,
                });
            }
        }
        Ok(Self { entries: table })
    }

    /// The process-wide published factor table, built on first use.
    ///
    /// # Examples
    /// ```
    /// use ecopulse::domain::{EmissionCategory, EmissionFactorRegistry};
    ///
    /// let registry = EmissionFactorRegistry::standard();
    /// let entry = registry
    ///     .lookup(EmissionCategory::Travel, "petrol_car")
    ///     .expect("published factor");
    /// assert_eq!(entry.factor, 0.21);
    /// ```
    pub fn standard() -> &'static Self {
        static STANDARD: OnceLock<EmissionFactorRegistry> = OnceLock::new();
        STANDARD.get_or_init(|| Self {
            entries: STANDARD_FACTORS.iter().fold(BTreeMap::new(), |mut table, entry| {
                table
                    .entry(entry.category)
                    .or_insert_with(BTreeMap::new)
                    .insert(entry.kind, *entry);
                table
            }),
        })
    }

    /// Entry for a type within a category, if registered.
    pub fn lookup(&self, category: EmissionCategory, kind: &str) -> Option<&EmissionFactorEntry> {
        self.entries.get(&category).and_then(|types| types.get(kind))
    }

    /// Entries of one category, ordered by type name.
    pub fn entries_for(&self, category: EmissionCategory) -> impl Iterator<Item = &EmissionFactorEntry> {
        self.entries
            .get(&category)
            .into_iter()
            .flat_map(BTreeMap::values)
    }

    /// Type names known for a category, for error messages.
    pub fn known_types(&self, category: EmissionCategory) -> Vec<&'static str> {
        self.entries_for(category).map(|entry| entry.kind).collect()
    }

    /// Every entry grouped by category.
    pub fn grouped(&self) -> &BTreeMap<EmissionCategory, BTreeMap<&'static str, EmissionFactorEntry>> {
        &self.entries
    }
}

use EmissionCategory as C;
use FormulaKind as F;
use WelfareGroup as W;

const KM: &str = "km";
const ATTENDEE_HOUR: &str = "attendee-hour";
const KWH: &str = "kWh";

static STANDARD_FACTORS: &[EmissionFactorEntry] = &[
    EmissionFactorEntry::new(C::Travel, "petrol_car", 0.21, KM, F::Distance),
    EmissionFactorEntry::new(C::Travel, "diesel_car", 0.27, KM, F::Distance),
    EmissionFactorEntry::new(C::Travel, "electric_car", 0.05, KM, F::Distance),
    EmissionFactorEntry::new(C::Travel, "hybrid_car", 0.12, KM, F::Distance),
    EmissionFactorEntry::new(C::Travel, "motorcycle", 0.10, KM, F::Distance),
    EmissionFactorEntry::new(C::Travel, "bus", 0.089, KM, F::Distance),
    EmissionFactorEntry::new(C::Travel, "train", 0.041, KM, F::Distance),
    EmissionFactorEntry::new(C::Travel, "flight_domestic", 0.255, KM, F::Distance),
    EmissionFactorEntry::new(C::Travel, "flight_international", 0.195, KM, F::Distance),
    EmissionFactorEntry::new(C::Travel, "bicycle", 0.0, KM, F::Distance),
    EmissionFactorEntry::new(C::Travel, "walking", 0.0, KM, F::Distance),
    EmissionFactorEntry::new(C::Events, "indoor_conference", 2.5, ATTENDEE_HOUR, F::AttendeeHours),
    EmissionFactorEntry::new(C::Events, "outdoor_event", 1.2, ATTENDEE_HOUR, F::AttendeeHours),
    EmissionFactorEntry::new(C::Events, "virtual_meeting", 0.05, ATTENDEE_HOUR, F::AttendeeHours),
    EmissionFactorEntry::new(C::Events, "workshop", 1.8, ATTENDEE_HOUR, F::AttendeeHours),
    EmissionFactorEntry::new(C::Events, "training_session", 1.5, ATTENDEE_HOUR, F::AttendeeHours),
    EmissionFactorEntry::new(C::Events, "fundraiser", 3.0, ATTENDEE_HOUR, F::AttendeeHours),
    EmissionFactorEntry::new(C::Events, "community_gathering", 1.0, ATTENDEE_HOUR, F::AttendeeHours),
    EmissionFactorEntry::new(C::Infrastructure, "electricity", 0.5, KWH, F::EquipmentLoad),
    EmissionFactorEntry::new(C::Infrastructure, "generator_diesel", 2.68, KWH, F::EquipmentLoad),
    EmissionFactorEntry::new(C::Infrastructure, "solar_panel", 0.02, KWH, F::EquipmentLoad),
    EmissionFactorEntry::new(C::Infrastructure, "air_conditioning", 0.8, KWH, F::EquipmentLoad),
    EmissionFactorEntry::new(C::Infrastructure, "heating", 0.6, KWH, F::EquipmentLoad),
    EmissionFactorEntry::new(C::Infrastructure, "lighting", 0.4, KWH, F::EquipmentLoad),
    EmissionFactorEntry::new(C::Infrastructure, "computers", 0.3, KWH, F::EquipmentLoad),
    EmissionFactorEntry::new(C::Infrastructure, "servers", 0.5, KWH, F::EquipmentLoad),
    EmissionFactorEntry::new(C::Marketing, "digital_campaign", 0.02, "impression", F::PerUnit),
    EmissionFactorEntry::new(C::Marketing, "email_marketing", 0.004, "email", F::PerUnit),
    EmissionFactorEntry::new(C::Marketing, "social_media_post", 0.01, "post", F::PerUnit),
    EmissionFactorEntry::new(C::Marketing, "printed_brochure", 0.05, "page", F::PerUnit),
    EmissionFactorEntry::new(C::Marketing, "printed_banner", 2.5, "banner", F::PerUnit),
    EmissionFactorEntry::new(C::Marketing, "video_production", 50.0, "minute", F::PerUnit),
    EmissionFactorEntry::new(C::Marketing, "website_hosting", 0.3, "site-day", F::PerUnitPerDay),
    EmissionFactorEntry::new(C::Office, "phone_call", 0.01, "minute", F::PerUnit),
    EmissionFactorEntry::new(C::Office, "internet_usage", 0.05, "GB", F::PerUnit),
    EmissionFactorEntry::new(C::Office, "paper_usage", 0.005, "sheet", F::PerUnit),
    EmissionFactorEntry::new(C::Office, "courier_local", 1.5, "package", F::PerUnit),
    EmissionFactorEntry::new(C::Office, "courier_national", 5.0, "package", F::PerUnit),
    EmissionFactorEntry::new(C::Office, "courier_international", 15.0, "package", F::PerUnit),
    EmissionFactorEntry::new(C::Office, "water_consumption", 0.0003, "litre", F::PerUnit),
    EmissionFactorEntry::new(C::StaffWelfare, "gym_membership", 5.0, "person-month", F::PerBeneficiary)
        .in_group(W::HealthWellness),
    EmissionFactorEntry::new(C::StaffWelfare, "health_checkup", 3.0, "checkup", F::PerBeneficiary)
        .in_group(W::HealthWellness),
    EmissionFactorEntry::new(C::StaffWelfare, "medical_insurance_admin", 1.0, "person-month", F::PerBeneficiary)
        .in_group(W::HealthWellness),
    EmissionFactorEntry::new(C::StaffWelfare, "wellness_program", 2.0, "session", F::PerBeneficiary)
        .in_group(W::HealthWellness),
    EmissionFactorEntry::new(C::StaffWelfare, "team_outing_local", 15.0, "person", F::PerBeneficiary)
        .in_group(W::Recreation),
    EmissionFactorEntry::new(C::StaffWelfare, "team_outing_travel", 50.0, "person", F::PerBeneficiary)
        .in_group(W::Recreation),
    EmissionFactorEntry::new(C::StaffWelfare, "staff_party", 8.0, "person", F::PerBeneficiary)
        .in_group(W::Recreation),
    EmissionFactorEntry::new(C::StaffWelfare, "gifts_physical", 2.0, "gift", F::PerBeneficiary)
        .in_group(W::Recreation),
    EmissionFactorEntry::new(C::StaffWelfare, "gifts_digital", 0.1, "gift", F::PerBeneficiary)
        .in_group(W::Recreation),
    EmissionFactorEntry::new(C::StaffWelfare, "uniform_cotton", 10.0, "piece", F::PerBeneficiary)
        .in_group(W::UniformsSafety),
    EmissionFactorEntry::new(C::StaffWelfare, "uniform_synthetic", 15.0, "piece", F::PerBeneficiary)
        .in_group(W::UniformsSafety),
    EmissionFactorEntry::new(C::StaffWelfare, "safety_equipment", 5.0, "item", F::PerBeneficiary)
        .in_group(W::UniformsSafety),
    EmissionFactorEntry::new(C::StaffWelfare, "ppe_disposable", 0.5, "item", F::PerBeneficiary)
        .in_group(W::UniformsSafety),
    EmissionFactorEntry::new(C::Energy, GRID_ELECTRICITY, 0.5, KWH, F::GridEnergy),
];

/// Registry type name of the grid electricity factor used for energy readings.
pub const GRID_ELECTRICITY: &str = "grid_electricity";
