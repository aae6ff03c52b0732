//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer together
//! with the schema wrappers from [`crate::inbound::http::schemas`], which
//! describe domain types without coupling them to utoipa. The session cookie
//! security scheme is added by a modifier.
//!
//! The document backs Swagger UI in debug builds and is exported by the
//! `openapi-dump` binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::activities::ActivityRequest;
use crate::inbound::http::energy::{
    EnergyRecordRequest, FactorsBody, ForecastBody, ForecastResponse,
};
use crate::inbound::http::goals::GoalRequest;
use crate::inbound::http::organizations::RegisterOrganizationBody;
use crate::inbound::http::schemas::{
    ActivityRecordSchema, DashboardStatsSchema, EmissionCategorySchema, EmissionFactorEntrySchema,
    EnergyRecordSchema, ErrorCodeSchema, ErrorSchema, GoalProgressSchema, InsightReportSchema,
    MonthlyEmissionSchema, OrganizationSchema, RankedEntrySchema,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/organizations.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "EcoPulse API",
        description = "Carbon footprint estimation, leaderboards, reduction goals and energy forecasts for nonprofits.",
        license(name = "ISC", url = "https://opensource.org/license/isc-license-txt")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::organizations::register_organization,
        crate::inbound::http::organizations::current_organization,
        crate::inbound::http::activities::submit_activity,
        crate::inbound::http::activities::list_activities,
        crate::inbound::http::activities::delete_activity,
        crate::inbound::http::energy::submit_energy_record,
        crate::inbound::http::energy::list_energy_records,
        crate::inbound::http::energy::energy_forecast,
        crate::inbound::http::dashboard::dashboard_stats,
        crate::inbound::http::dashboard::leaderboard,
        crate::inbound::http::dashboard::insights,
        crate::inbound::http::goals::create_goal,
        crate::inbound::http::goals::list_goals,
        crate::inbound::http::goals::delete_goal,
        crate::inbound::http::emission_factors::emission_factors,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        EmissionCategorySchema,
        OrganizationSchema,
        ActivityRecordSchema,
        EnergyRecordSchema,
        GoalProgressSchema,
        MonthlyEmissionSchema,
        DashboardStatsSchema,
        RankedEntrySchema,
        InsightReportSchema,
        EmissionFactorEntrySchema,
        RegisterOrganizationBody,
        ActivityRequest,
        EnergyRecordRequest,
        ForecastResponse,
        ForecastBody,
        FactorsBody,
        GoalRequest,
    )),
    tags(
        (name = "organizations", description = "Registration and session scoping"),
        (name = "activities", description = "Activity submissions and history"),
        (name = "energy", description = "Daily energy readings and forecasts"),
        (name = "dashboard", description = "Aggregated statistics, leaderboard and insights"),
        (name = "goals", description = "Reduction goals with live progress"),
        (name = "emission-factors", description = "Read-only emission factor table"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
