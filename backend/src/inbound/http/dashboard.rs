//! Aggregated view HTTP handlers.
//!
//! ```text
//! GET /api/v1/dashboard/stats
//! GET /api/v1/dashboard/leaderboard
//! GET /api/v1/insights
//! ```
//!
//! Every response is recomputed from the current record set, so none of them
//! may be cached by intermediaries.

use actix_web::{HttpResponse, get, http::header, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    DashboardStatsSchema, ErrorSchema, InsightReportSchema, RankedEntrySchema,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const NO_STORE: (header::HeaderName, &str) = (header::CACHE_CONTROL, "private, no-store");

/// Dashboard statistics for the session's organization.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStatsSchema),
        (status = 401, description = "No organization selected", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "getDashboardStats"
)]
#[get("/dashboard/stats")]
pub async fn dashboard_stats(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let organization_id = session.require_organization_id()?;
    let stats = state.dashboard.stats(organization_id).await?;
    Ok(HttpResponse::Ok().insert_header(NO_STORE).json(stats))
}

/// Rank every organization by emissions over the current period.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/leaderboard",
    responses(
        (status = 200, description = "Leaderboard, lowest emissions first", body = [RankedEntrySchema]),
        (status = 401, description = "No organization selected", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "getLeaderboard"
)]
#[get("/dashboard/leaderboard")]
pub async fn leaderboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    session.require_organization_id()?;
    let entries = state.dashboard.leaderboard().await?;
    Ok(HttpResponse::Ok().insert_header(NO_STORE).json(entries))
}

/// Risk, cost efficiency and recommendations for the session's organization.
#[utoipa::path(
    get,
    path = "/api/v1/insights",
    responses(
        (status = 200, description = "Insight report", body = InsightReportSchema),
        (status = 401, description = "No organization selected", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "getInsights"
)]
#[get("/insights")]
pub async fn insights(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let organization_id = session.require_organization_id()?;
    let report = state.dashboard.insights(organization_id).await?;
    Ok(HttpResponse::Ok().insert_header(NO_STORE).json(report))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::MockDashboardQuery;
    use crate::domain::{Error, OrganizationId, RankedEntry};
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::{
        SELECT_ORGANIZATION_PATH, select_organization, session_cookie, test_session_middleware,
    };

    macro_rules! app {
        ($ports:expr) => {
            actix_test::init_service(
                App::new()
                    .app_data(web::Data::new(HttpState::new($ports)))
                    .wrap(test_session_middleware())
                    .route(SELECT_ORGANIZATION_PATH, web::get().to(select_organization))
                    .service(
                        web::scope("/api/v1")
                            .service(dashboard_stats)
                            .service(leaderboard)
                            .service(insights),
                    ),
            )
            .await
        };
    }

    #[rstest]
    #[case("/api/v1/dashboard/stats")]
    #[case("/api/v1/dashboard/leaderboard")]
    #[case("/api/v1/insights")]
    #[actix_web::test]
    async fn views_require_a_session(#[case] uri: &str) {
        let app = app!(HttpStatePorts::default());
        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn empty_organization_gets_a_perfect_score() {
        let app = app!(HttpStatePorts::default());
        let cookie = session_cookie(&app, OrganizationId::random()).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/dashboard/stats")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()
                .get(header::CACHE_CONTROL)
                .and_then(|value| value.to_str().ok()),
            Some("private, no-store")
        );
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["totalEmissionsKg"], 0.0);
        assert_eq!(body["sustainabilityScore"], 100.0);
        assert_eq!(body["monthlyTrend"], Value::Array(Vec::new()));
    }

    #[actix_web::test]
    async fn leaderboard_serialises_ranked_entries() {
        let mut dashboard = MockDashboardQuery::new();
        dashboard.expect_leaderboard().times(1).returning(|| {
            Ok(vec![RankedEntry {
                rank: 1,
                organization_id: OrganizationId::random(),
                organization_name: "Quiet".into(),
                total_emissions_kg: 12.5,
                reduction_percent: 50.0,
            }])
        });
        let app = app!(HttpStatePorts {
            dashboard: Arc::new(dashboard),
            ..HttpStatePorts::default()
        });
        let cookie = session_cookie(&app, OrganizationId::random()).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/dashboard/leaderboard")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body[0]["rank"], 1);
        assert_eq!(body[0]["organizationName"], "Quiet");
        assert_eq!(body[0]["reductionPercent"], 50.0);
    }

    #[actix_web::test]
    async fn store_outages_surface_as_service_unavailable() {
        let mut dashboard = MockDashboardQuery::new();
        dashboard
            .expect_insights()
            .times(1)
            .returning(|_| Err(Error::service_unavailable("record store unavailable")));
        let app = app!(HttpStatePorts {
            dashboard: Arc::new(dashboard),
            ..HttpStatePorts::default()
        });
        let cookie = session_cookie(&app, OrganizationId::random()).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/insights")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
