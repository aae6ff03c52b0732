//! Tests for activity handlers and request parsing.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use chrono::{NaiveDate, Utc};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockActivityCommand, MockActivityQuery};
use crate::domain::{ActivityRecord, ActivityRecordParts, ErrorCode, OrganizationId};
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
                        .service(submit_activity)
                        .service(list_activities)
                        .service(delete_activity),
                ),
        )
        .await
    };
}

fn org() -> OrganizationId {
    OrganizationId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("fixture id")
}

fn travel_body() -> ActivityRequest {
    ActivityRequest {
        category: Some("travel".into()),
        date: Some("2024-03-14".into()),
        vehicle_type: Some("petrol_car".into()),
        distance_km: Some(100.0),
        ..ActivityRequest::default()
    }
}

fn field_of(err: &Error) -> Option<&Value> {
    err.details().and_then(|details| details.get("field"))
}

#[rstest]
fn travel_defaults_to_one_passenger() {
    let submission = parse_activity_request(travel_body()).expect("valid travel");
    assert_eq!(
        submission.details,
        ActivityDetails::Travel {
            vehicle_type: "petrol_car".into(),
            distance_km: 100.0,
            passengers: 1,
        }
    );
    assert_eq!(
        submission.date,
        NaiveDate::from_ymd_opt(2024, 3, 14).expect("valid date")
    );
}

#[rstest]
fn fields_of_other_categories_are_ignored() {
    let body = ActivityRequest {
        attendees: Some(-5),
        welfare_category: Some("nonsense".into()),
        ..travel_body()
    };
    assert!(parse_activity_request(body).is_ok());
}

#[rstest]
#[case::category(ActivityRequest { category: None, ..travel_body() }, "category")]
#[case::date(ActivityRequest { date: None, ..travel_body() }, "date")]
#[case::distance(ActivityRequest { distance_km: None, ..travel_body() }, "distanceKm")]
#[case::vehicle(ActivityRequest { vehicle_type: None, ..travel_body() }, "vehicleType")]
fn missing_fields_are_named(#[case] body: ActivityRequest, #[case] expected: &str) {
    let err = parse_activity_request(body).expect_err("missing field");
    assert_eq!(field_of(&err), Some(&json!(expected)));
    assert_eq!(
        err.details().and_then(|details| details.get("code")),
        Some(&json!("missing_field"))
    );
}

#[rstest]
fn events_default_surcharges_to_false() {
    let body = ActivityRequest {
        category: Some("events".into()),
        date: Some("2024-03-14".into()),
        event_type: Some("conference".into()),
        attendees: Some(50),
        duration_hours: Some(8.0),
        ..ActivityRequest::default()
    };
    let submission = parse_activity_request(body).expect("valid event");
    assert!(matches!(
        submission.details,
        ActivityDetails::Events {
            attendees: 50,
            has_catering: false,
            has_travel: false,
            ..
        }
    ));
}

#[rstest]
fn infrastructure_quantity_must_be_whole() {
    let body = ActivityRequest {
        category: Some("infrastructure".into()),
        date: Some("2024-03-14".into()),
        equipment_type: Some("laptop".into()),
        usage_hours: Some(8.0),
        power_rating_kw: Some(0.05),
        quantity: Some(2.5),
        ..ActivityRequest::default()
    };
    let err = parse_activity_request(body).expect_err("fractional quantity");
    assert_eq!(field_of(&err), Some(&json!("quantity")));
}

#[rstest]
#[case("recreation", true)]
#[case(" health_wellness ", true)]
#[case("parties", false)]
fn welfare_category_is_parsed(#[case] raw: &str, #[case] ok: bool) {
    let body = ActivityRequest {
        category: Some("staff_welfare".into()),
        date: Some("2024-03-14".into()),
        welfare_type: Some("staff_party".into()),
        welfare_category: Some(raw.into()),
        beneficiaries: Some(20),
        ..ActivityRequest::default()
    };
    let result = parse_activity_request(body);
    assert_eq!(result.is_ok(), ok);
    if let Err(err) = result {
        assert_eq!(field_of(&err), Some(&json!("welfareCategory")));
    }
}

#[rstest]
fn blank_descriptions_are_dropped() {
    let body = ActivityRequest {
        description: Some("   ".into()),
        ..travel_body()
    };
    let submission = parse_activity_request(body).expect("valid travel");
    assert_eq!(submission.description, None);
}

fn stored(request: SubmitActivityRequest) -> ActivityRecord {
    ActivityRecord::from_parts(ActivityRecordParts {
        id: ActivityId::random(),
        organization_id: request.organization_id,
        details: request.submission.details,
        date: request.submission.date,
        emission_kg: 19.2,
        cost: request.submission.cost,
        description: request.submission.description,
        created_at: Utc::now(),
    })
}

#[actix_web::test]
async fn submit_returns_the_priced_record() {
    let mut command = MockActivityCommand::new();
    command
        .expect_submit()
        .withf(|request| request.organization_id == org())
        .times(1)
        .returning(|request| Ok(stored(request)));
    let app = app!(HttpStatePorts {
        activities: Arc::new(command),
        ..HttpStatePorts::default()
    });
    let cookie = session_cookie(&app, org()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/activities")
            .cookie(cookie)
            .set_json(json!({
                "category": "travel",
                "date": "2024-03-14",
                "vehicleType": "petrol_car",
                "distanceKm": 100.0
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["category"], "travel");
    assert_eq!(body["vehicleType"], "petrol_car");
    assert_eq!(body["emissionKg"], 19.2);
    assert_eq!(body["passengers"], 1);
}

#[actix_web::test]
async fn submit_requires_a_session() {
    let mut command = MockActivityCommand::new();
    command.expect_submit().never();
    let app = app!(HttpStatePorts {
        activities: Arc::new(command),
        ..HttpStatePorts::default()
    });
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/activities")
            .set_json(json!({"category": "travel"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn list_passes_filters_and_default_limit() {
    let mut query = MockActivityQuery::new();
    query
        .expect_list()
        .withf(|request| {
            request.category == Some(EmissionCategory::Office)
                && request.limit == DEFAULT_ACTIVITY_LIMIT
        })
        .times(1)
        .returning(|_| Ok(Vec::new()));
    let app = app!(HttpStatePorts {
        activities_query: Arc::new(query),
        ..HttpStatePorts::default()
    });
    let cookie = session_cookie(&app, org()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/activities?category=office")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn list_rejects_the_energy_category() {
    let mut query = MockActivityQuery::new();
    query.expect_list().never();
    let app = app!(HttpStatePorts {
        activities_query: Arc::new(query),
        ..HttpStatePorts::default()
    });
    let cookie = session_cookie(&app, org()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/activities?category=energy&limit=5")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[case("not-a-uuid", StatusCode::BAD_REQUEST)]
#[case("6f1c2a64-0d2f-4a57-8f0e-5a7b1e2c3d4e", StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn delete_maps_errors(#[case] id: &str, #[case] expected: StatusCode) {
    let app = app!(HttpStatePorts::default());
    let cookie = session_cookie(&app, org()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/activities/{id}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), expected);
    let body: Error = actix_test::read_body_json(res).await;
    let code = if expected == StatusCode::NOT_FOUND {
        ErrorCode::NotFound
    } else {
        ErrorCode::InvalidRequest
    };
    assert_eq!(body.code(), code);
}

#[actix_web::test]
async fn delete_returns_no_content() {
    let mut command = MockActivityCommand::new();
    command
        .expect_delete()
        .withf(|request| request.organization_id == org())
        .times(1)
        .returning(|_| Ok(()));
    let app = app!(HttpStatePorts {
        activities: Arc::new(command),
        ..HttpStatePorts::default()
    });
    let cookie = session_cookie(&app, org()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/v1/activities/6f1c2a64-0d2f-4a57-8f0e-5a7b1e2c3d4e")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}
