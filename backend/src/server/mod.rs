//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{PolicySettings, ServerConfig, ServerSettings};

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use ecopulse::Trace;
#[cfg(debug_assertions)]
use ecopulse::doc::ApiDoc;
use ecopulse::inbound::http::activities::{delete_activity, list_activities, submit_activity};
use ecopulse::inbound::http::dashboard::{dashboard_stats, insights, leaderboard};
use ecopulse::inbound::http::emission_factors::emission_factors;
use ecopulse::inbound::http::energy::{energy_forecast, list_energy_records, submit_energy_record};
use ecopulse::inbound::http::error::{json_config, query_config};
use ecopulse::inbound::http::goals::{create_goal, delete_goal, list_goals};
use ecopulse::inbound::http::health::{HealthState, live, ready};
use ecopulse::inbound::http::organizations::{current_organization, register_organization};
use ecopulse::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::days(7)),
        )
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .app_data(json_config())
        .app_data(query_config())
        .service(register_organization)
        .service(current_organization)
        .service(submit_activity)
        .service(list_activities)
        .service(delete_activity)
        .service(energy_forecast)
        .service(submit_energy_record)
        .service(list_energy_records)
        .service(dashboard_stats)
        .service(leaderboard)
        .service(insights)
        .service(create_goal)
        .service(list_goals)
        .service(delete_goal)
        .service(emission_factors);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the HTTP server and mark it ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when the emission factor registry cannot
/// back a calculator or the socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)?;
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        policy: _,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;

    fn deps() -> AppDependencies {
        let config = ServerConfig::new(
            Key::generate(),
            false,
            SameSite::Lax,
            "127.0.0.1:0".parse().expect("valid address"),
        );
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: build_http_state(&config).expect("state builds"),
            key: config.key,
            cookie_secure: false,
            same_site: SameSite::Lax,
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn registration_scopes_later_requests() {
        let app = actix_test::init_service(build_app(deps())).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/organizations")
                .set_json(json!({"name": "River Trust"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        assert!(res.headers().contains_key("trace-id"));
        let cookie = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned();

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/activities")
                .cookie(cookie.clone())
                .set_json(json!({
                    "category": "travel",
                    "vehicleType": "petrol_car",
                    "distanceKm": 100.0,
                    "date": "2024-03-01"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["emissionKg"], 21.0);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/activities")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_bodies_are_invalid_requests() {
        let app = actix_test::init_service(build_app(deps())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/organizations")
                .insert_header(("content-type", "application/json"))
                .set_payload("{not json")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");
    }

    #[rstest]
    #[case("/health/live")]
    #[case("/api/v1/emission-factors")]
    #[actix_web::test]
    async fn public_endpoints_need_no_session(#[case] uri: &str) {
        let app = actix_test::init_service(build_app(deps())).await;
        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
