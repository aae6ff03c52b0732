//! Steps shared by the REST behavioural suites.

use actix_web::http::Method;
use rstest_bdd_macros::{given, then, when};
use serde_json::Value;

use crate::eco_world::{EcoWorld, JsonRequest, days_ago};

#[given("organization {name} is registered")]
fn organization_is_registered(world: &EcoWorld, name: String) {
    world.register(&name);
}

#[given("no organization session")]
fn no_organization_session(world: &EcoWorld) {
    world.forget_session();
}

fn submit_petrol_car_trip(world: &EcoWorld, distance: f64) {
    world.send(JsonRequest {
        method: Method::POST,
        path: "/api/v1/activities",
        payload: Some(serde_json::json!({
            "category": "travel",
            "vehicleType": "petrol_car",
            "distanceKm": distance,
            "date": days_ago(1),
        })),
    });
}

#[given("the client submits a petrol car trip of {distance} km")]
fn the_client_has_submitted_a_petrol_car_trip(world: &EcoWorld, distance: f64) {
    submit_petrol_car_trip(world, distance);
    assert_eq!(world.status(), Some(201), "trip submission failed");
}

#[when("the client submits a petrol car trip of {distance} km")]
fn the_client_submits_a_petrol_car_trip(world: &EcoWorld, distance: f64) {
    submit_petrol_car_trip(world, distance);
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &EcoWorld, status: u16) {
    assert_eq!(
        world.status(),
        Some(status),
        "unexpected body: {:?}",
        world.last.borrow().body
    );
}

#[then("the error code is {code}")]
fn the_error_code_is(world: &EcoWorld, code: String) {
    assert_eq!(
        world.body().get("code").and_then(Value::as_str),
        Some(code.as_str())
    );
    assert!(
        world.last.borrow().trace_id.is_some(),
        "errors carry a trace id"
    );
}
