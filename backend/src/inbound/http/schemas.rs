//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the serialised shape of their domain types but
//! live in the inbound adapter layer where framework concerns belong.

use std::collections::BTreeMap;

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No organization is selected for this session.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing store is temporarily unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "distanceKm must be greater than zero")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level context such as `{"field": "date", "code": "invalid_date"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::EmissionCategory`].
#[derive(ToSchema)]
#[schema(as = crate::domain::EmissionCategory)]
pub enum EmissionCategorySchema {
    /// Business travel.
    #[schema(rename = "travel")]
    Travel,
    /// Hosted events.
    #[schema(rename = "events")]
    Events,
    /// Equipment and facilities.
    #[schema(rename = "infrastructure")]
    Infrastructure,
    /// Marketing outputs.
    #[schema(rename = "marketing")]
    Marketing,
    /// Office consumption.
    #[schema(rename = "office")]
    Office,
    /// Staff welfare benefits.
    #[schema(rename = "staff_welfare")]
    StaffWelfare,
    /// Metered electricity.
    #[schema(rename = "energy")]
    Energy,
}

/// OpenAPI schema for [`crate::domain::Organization`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Organization, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct OrganizationSchema {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "Clean Water Trust")]
    name: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::ActivityRecord`].
///
/// Category-specific measurements appear inline next to `category`; only the
/// fields of the record's own category are present.
#[derive(ToSchema)]
#[schema(as = crate::domain::ActivityRecord, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ActivityRecordSchema {
    id: String,
    organization_id: String,
    category: EmissionCategorySchema,
    #[schema(value_type = String, format = Date, example = "2024-03-14")]
    date: String,
    /// Frozen at submission time.
    #[schema(example = 39.6)]
    emission_kg: f64,
    cost: Option<f64>,
    description: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    vehicle_type: Option<String>,
    distance_km: Option<f64>,
    passengers: Option<u32>,
    event_type: Option<String>,
    attendees: Option<u32>,
    duration_hours: Option<f64>,
    has_catering: Option<bool>,
    has_travel: Option<bool>,
    equipment_type: Option<String>,
    usage_hours: Option<f64>,
    power_rating_kw: Option<f64>,
    marketing_type: Option<String>,
    duration_days: Option<u32>,
    activity_type: Option<String>,
    quantity: Option<f64>,
    welfare_type: Option<String>,
    welfare_category: Option<String>,
    beneficiaries: Option<u32>,
}

/// OpenAPI schema for [`crate::domain::EnergyRecord`].
#[derive(ToSchema)]
#[schema(as = crate::domain::EnergyRecord, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EnergyRecordSchema {
    id: String,
    organization_id: String,
    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    date: String,
    #[schema(example = 40.0)]
    electricity_kwh: f64,
    num_people: u32,
    num_systems: u32,
    ac_hours: f64,
    outdoor_temp_celsius: f64,
    notes: Option<String>,
    emission_kg: f64,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::GoalProgress`].
#[derive(ToSchema)]
#[schema(as = crate::domain::GoalProgress, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct GoalProgressSchema {
    id: String,
    organization_id: String,
    title: String,
    description: String,
    #[schema(example = 20.0)]
    target_reduction_percent: f64,
    #[schema(value_type = String, format = Date)]
    target_date: String,
    baseline_emissions_kg: f64,
    /// `active` or `completed`; completion is never reverted.
    #[schema(example = "active")]
    status: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    /// Emissions over the trailing goal window, recomputed on every read.
    current_emissions_kg: f64,
    /// Clamped to 0..=100.
    #[schema(example = 50.0)]
    progress_percent: f64,
}

/// Monthly bucket inside [`DashboardStatsSchema`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MonthlyEmission, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MonthlyEmissionSchema {
    #[schema(example = "2024-03")]
    month: String,
    emission_kg: f64,
}

/// OpenAPI schema for [`crate::domain::DashboardStats`].
#[derive(ToSchema)]
#[schema(as = crate::domain::DashboardStats, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DashboardStatsSchema {
    total_emissions_kg: f64,
    total_activities: usize,
    total_energy_records: usize,
    emissions_by_category: BTreeMap<String, f64>,
    monthly_trend: Vec<MonthlyEmissionSchema>,
    trees_saved_equivalent: f64,
    /// 0..=100, higher is better.
    sustainability_score: f64,
    active_goals: usize,
    completed_goals: usize,
}

/// OpenAPI schema for [`crate::domain::RankedEntry`].
#[derive(ToSchema)]
#[schema(as = crate::domain::RankedEntry, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RankedEntrySchema {
    #[schema(example = 1)]
    rank: usize,
    organization_id: String,
    organization_name: String,
    total_emissions_kg: f64,
    /// Positive when emissions fell against the previous period.
    #[schema(example = 12.5)]
    reduction_percent: f64,
}

/// OpenAPI schema for [`crate::domain::InsightReport`].
#[derive(ToSchema)]
#[schema(as = crate::domain::InsightReport, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct InsightReportSchema {
    total_emissions_kg: f64,
    activity_emissions_kg: f64,
    energy_emissions_kg: f64,
    emissions_by_category: BTreeMap<String, f64>,
    #[schema(value_type = Option<Object>)]
    top_source: Option<serde_json::Value>,
    trees_saved_equivalent: f64,
    sustainability_score: f64,
    /// `{"level": "low" | "medium" | "high", "factors": [..]}`.
    #[schema(value_type = Object)]
    risk_assessment: serde_json::Value,
    #[schema(value_type = Object)]
    roi_metrics: serde_json::Value,
    recommendations: Vec<String>,
    #[schema(value_type = Object)]
    data_summary: serde_json::Value,
}

/// OpenAPI schema for [`crate::domain::EmissionFactorEntry`].
#[derive(ToSchema)]
#[schema(as = crate::domain::EmissionFactorEntry)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EmissionFactorEntrySchema {
    category: EmissionCategorySchema,
    #[schema(rename = "type", example = "petrol_car")]
    kind: String,
    /// Welfare group, staff welfare entries only.
    group: Option<String>,
    /// kg CO2e per `unit`.
    #[schema(example = 0.192)]
    factor: f64,
    #[schema(example = "km")]
    unit: String,
    #[schema(example = "distance")]
    formula: String,
}
