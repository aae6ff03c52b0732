//! Shared world for behavioural suites driving the REST API in-process.
//!
//! Every request builds a fresh app over the same `HttpState`, so records
//! persist across steps while the world only has to carry session cookies
//! between calls.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use actix_session::{SessionMiddleware, config::CookieContentSecurity, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::http::Method;
use actix_web::{App, test as actix_test, web};
use chrono::{Days, NaiveDate, Utc};
use ecopulse::Trace;
use ecopulse::domain::{
    ActivityService, DashboardService, EmissionCalculator, EmissionFactorRegistry, EmissionPolicy,
    EnergyService, GoalService, OrganizationService, RecordReader,
};
use ecopulse::inbound::http::activities::{delete_activity, list_activities, submit_activity};
use ecopulse::inbound::http::dashboard::{dashboard_stats, insights, leaderboard};
use ecopulse::inbound::http::emission_factors::emission_factors;
use ecopulse::inbound::http::energy::{energy_forecast, list_energy_records, submit_energy_record};
use ecopulse::inbound::http::error::{json_config, query_config};
use ecopulse::inbound::http::goals::{create_goal, delete_goal, list_goals};
use ecopulse::inbound::http::organizations::{current_organization, register_organization};
use ecopulse::inbound::http::state::{HttpState, HttpStatePorts};
use ecopulse::outbound::memory::InMemoryRecordStore;
use mockable::{Clock, DefaultClock};
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

const SESSION_COOKIE: &str = "session";

/// Request issued by a step.
pub struct JsonRequest<'a> {
    pub method: Method,
    pub path: &'a str,
    pub payload: Option<Value>,
}

/// Response captured from the last request.
#[derive(Debug, Default, Clone)]
pub struct Captured {
    pub status: Option<u16>,
    pub body: Option<Value>,
    pub trace_id: Option<String>,
    pub cache_control: Option<String>,
}

pub struct EcoWorld {
    runtime: Runtime,
    local: LocalSet,
    key: Key,
    state: web::Data<HttpState>,
    pub store: Arc<InMemoryRecordStore>,
    sessions: RefCell<HashMap<String, Cookie<'static>>>,
    acting_as: RefCell<Option<String>>,
    pub last: RefCell<Captured>,
    pub remembered_id: RefCell<Option<String>>,
}

fn http_state(store: &Arc<InMemoryRecordStore>) -> web::Data<HttpState> {
    let policy = EmissionPolicy::standard();
    let registry = EmissionFactorRegistry::standard();
    let calculator = EmissionCalculator::new(registry, policy).expect("standard registry is valid");
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let organizations = Arc::new(OrganizationService::new(
        Arc::clone(store),
        Arc::clone(&clock),
    ));
    let activities = Arc::new(ActivityService::new(
        Arc::clone(store),
        calculator,
        Arc::clone(&clock),
    ));
    let energy = Arc::new(EnergyService::new(
        Arc::clone(store),
        calculator,
        Arc::clone(&clock),
    ));
    let records = RecordReader::new(Arc::clone(store), Arc::clone(store));
    let goals = GoalService::new(
        Arc::clone(store),
        records.clone(),
        policy,
        Arc::clone(&clock),
    );
    let dashboard = Arc::new(DashboardService::new(
        Arc::clone(store),
        goals.clone(),
        records,
        policy,
        clock,
    ));
    let goals = Arc::new(goals);

    web::Data::new(HttpState::new(HttpStatePorts {
        organizations: organizations.clone(),
        organizations_query: organizations,
        activities: activities.clone(),
        activities_query: activities,
        energy: energy.clone(),
        energy_query: energy,
        goals: goals.clone(),
        goals_query: goals,
        dashboard,
        emission_factors: registry,
    }))
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Date `days` before today, formatted for request payloads.
pub fn days_ago(days: u64) -> String {
    let today = Utc::now().date_naive();
    format_date(today.checked_sub_days(Days::new(days)).unwrap_or(today))
}

/// Date `days` after today, formatted for request payloads.
pub fn days_ahead(days: u64) -> String {
    let today = Utc::now().date_naive();
    format_date(today.checked_add_days(Days::new(days)).unwrap_or(today))
}

impl EcoWorld {
    pub fn new() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("test runtime");
        let store = Arc::new(InMemoryRecordStore::new());
        Self {
            runtime,
            local: LocalSet::new(),
            key: Key::generate(),
            state: http_state(&store),
            store,
            sessions: RefCell::new(HashMap::new()),
            acting_as: RefCell::new(None),
            last: RefCell::new(Captured::default()),
            remembered_id: RefCell::new(None),
        }
    }

    /// Switch the client to a previously registered organization's session.
    pub fn act_as(&self, name: &str) {
        assert!(
            self.sessions.borrow().contains_key(name),
            "organization {name} has no session"
        );
        self.acting_as.replace(Some(name.to_owned()));
    }

    /// Drop the current session so the next request is anonymous.
    pub fn forget_session(&self) {
        self.acting_as.replace(None);
    }

    /// Register an organization and keep its session cookie.
    pub fn register(&self, name: &str) {
        self.acting_as.replace(Some(name.to_owned()));
        self.send(JsonRequest {
            method: Method::POST,
            path: "/api/v1/organizations",
            payload: Some(serde_json::json!({ "name": name })),
        });
        assert_eq!(self.status(), Some(201), "registration of {name} failed");
    }

    pub fn status(&self) -> Option<u16> {
        self.last.borrow().status
    }

    pub fn body(&self) -> Value {
        self.last.borrow().body.clone().expect("response body")
    }

    /// Keep the `id` of the last response body for a later step.
    pub fn remember_created_id(&self) {
        let id = self.body()["id"]
            .as_str()
            .map(str::to_owned)
            .expect("response carries an id");
        self.remembered_id.replace(Some(id));
    }

    /// Issue a request as the current organization and capture the response.
    pub fn send(&self, request: JsonRequest<'_>) {
        let JsonRequest {
            method,
            path,
            payload,
        } = request;
        let acting_as = self.acting_as.borrow().clone();
        let cookie = acting_as
            .as_ref()
            .and_then(|name| self.sessions.borrow().get(name).cloned());
        let state = self.state.clone();
        let key = self.key.clone();

        let (captured, session) = self.local.block_on(&self.runtime, async move {
            let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
                .cookie_name(SESSION_COOKIE.into())
                .cookie_secure(false)
                .cookie_content_security(CookieContentSecurity::Private)
                .build();
            let app = actix_test::init_service(
                App::new().app_data(state).wrap(Trace).service(
                    web::scope("/api/v1")
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
                        .service(emission_factors),
                ),
            )
            .await;

            let mut req = actix_test::TestRequest::default()
                .method(method)
                .uri(path);
            if let Some(cookie) = cookie {
                req = req.cookie(cookie);
            }
            if let Some(payload) = payload {
                req = req.set_json(payload);
            }
            let res = actix_test::call_service(&app, req.to_request()).await;

            let header = |name: &str| {
                res.headers()
                    .get(name)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_owned)
            };
            let trace_id = header("trace-id");
            let cache_control = header("cache-control");
            let status = res.status().as_u16();
            let session = res
                .response()
                .cookies()
                .find(|cookie| cookie.name() == SESSION_COOKIE)
                .map(Cookie::into_owned);
            let bytes = actix_test::read_body(res).await;
            let body = serde_json::from_slice::<Value>(&bytes).ok();
            (
                Captured {
                    status: Some(status),
                    body,
                    trace_id,
                    cache_control,
                },
                session,
            )
        });

        if let (Some(name), Some(cookie)) = (acting_as, session) {
            self.sessions.borrow_mut().insert(name, cookie);
        }
        self.last.replace(captured);
    }
}
