//! Domain primitives, calculations and services.
//!
//! Purpose: model activities, energy readings and goals, compute their
//! emissions, and derive the aggregated views the API serves. Nothing in this
//! module touches HTTP or a database directly; adapters plug in through the
//! traits in [`ports`].
//!
//! Public surface:
//! - [`EmissionCalculator`] prices activities and energy readings from the
//!   [`EmissionFactorRegistry`] and an [`EmissionPolicy`].
//! - [`dashboard_stats`], [`rank`], [`insights`] and [`forecast`] are pure
//!   aggregations over record slices.
//! - The `*Service` types implement the driving ports for the inbound layer.
//! - [`Error`] and [`ErrorCode`] form the API error payload.

pub mod activity;
pub mod activity_service;
pub mod aggregation;
pub mod dashboard_service;
pub mod emission_calculator;
pub mod emission_factors;
pub mod energy;
pub mod energy_forecast;
pub mod energy_service;
pub mod error;
pub mod goal;
pub mod goal_service;
pub mod insights;
pub mod leaderboard;
pub mod organization;
pub mod organization_service;
pub mod policy;
pub mod ports;
mod record_id;
pub mod record_snapshot;
pub mod trace_id;

#[cfg(test)]
pub(crate) mod fixtures;

pub use self::activity::{
    ACTIVITY_DESCRIPTION_MAX, ActivityDetails, ActivityId, ActivityRecord, ActivityRecordParts,
    ActivitySubmission, ActivityValidationError,
};
pub use self::activity_service::ActivityService;
pub use self::aggregation::{
    DashboardStats, DateWindow, EmissionSample, GoalCounts, MonthlyEmission, PERFECT_SCORE,
    dashboard_stats, samples, sustainability_score, trees_equivalent, window_total,
};
pub use self::dashboard_service::DashboardService;
pub use self::emission_calculator::{EMISSION_DECIMALS, EmissionCalculator};
pub use self::emission_factors::{
    EmissionCategory, EmissionFactorEntry, EmissionFactorRegistry, FormulaKind, GRID_ELECTRICITY,
    RegistryError, UnknownCategoryError, UnknownWelfareGroupError, WelfareGroup,
};
pub use self::energy::{
    ENERGY_NOTES_MAX, EnergyReading, EnergyRecord, EnergyRecordId, EnergyValidationError,
    OUTDOOR_TEMP_RANGE,
};
pub use self::energy_forecast::{
    EnergyForecast, ForecastConfidence, ForecastFactors, ForecastResult, confidence_for, forecast,
};
pub use self::energy_service::EnergyService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::goal::{
    GOAL_DESCRIPTION_MAX, GOAL_TITLE_MAX, Goal, GoalDraft, GoalId, GoalParts, GoalProgress,
    GoalStatus, GoalValidationError, UnknownGoalStatus, progress_percent,
};
pub use self::goal_service::GoalService;
pub use self::insights::{
    DataSummary, InsightReport, RiskAssessment, RiskLevel, RoiMetrics, TopSource, insights,
};
pub use self::leaderboard::{OrganizationTotals, RankedEntry, rank, reduction_percent};
pub use self::organization::{
    ORGANIZATION_NAME_MAX, Organization, OrganizationId, OrganizationValidationError,
};
pub use self::organization_service::OrganizationService;
pub use self::policy::{
    EmissionPolicy, EnergyLoadPolicy, EventSurcharges, ForecastPolicy, GoalPolicy,
    LeaderboardPolicy, PolicyValidationError, ScoreFormula,
};
pub use self::record_id::{InvalidRecordId, round_to};
pub use self::record_snapshot::{RecordReader, RecordSnapshot};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use ecopulse::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such goal"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
