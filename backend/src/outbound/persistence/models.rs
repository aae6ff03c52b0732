//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions to domain values live next to
//! the repository that reads them.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{activities, energy_records, goals, organizations};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = organizations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrganizationRow {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = organizations)]
pub(crate) struct NewOrganizationRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Activity models
// ---------------------------------------------------------------------------

/// Read model for activities. `category` and `activity_type` are not
/// selected; both are recovered from the `details` tag.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = activities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ActivityRow {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub details: serde_json::Value,
    pub date: NaiveDate,
    pub emission_kg: f64,
    pub cost: Option<f64>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = activities)]
pub(crate) struct NewActivityRow<'a> {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub category: &'a str,
    pub activity_type: &'a str,
    pub details: serde_json::Value,
    pub date: NaiveDate,
    pub emission_kg: f64,
    pub cost: Option<f64>,
    pub description: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Energy models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = energy_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EnergyRecordRow {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub date: NaiveDate,
    pub electricity_kwh: f64,
    pub num_people: i32,
    pub num_systems: i32,
    pub ac_hours: f64,
    pub outdoor_temp_celsius: f64,
    pub notes: Option<String>,
    pub emission_kg: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = energy_records)]
pub(crate) struct NewEnergyRecordRow<'a> {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub date: NaiveDate,
    pub electricity_kwh: f64,
    pub num_people: i32,
    pub num_systems: i32,
    pub ac_hours: f64,
    pub outdoor_temp_celsius: f64,
    pub notes: Option<&'a str>,
    pub emission_kg: f64,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Goal models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = goals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GoalRow {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub title: String,
    pub description: String,
    pub target_reduction_percent: f64,
    pub target_date: NaiveDate,
    pub baseline_emissions_kg: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = goals)]
pub(crate) struct NewGoalRow<'a> {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub target_reduction_percent: f64,
    pub target_date: NaiveDate,
    pub baseline_emissions_kg: f64,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
}
