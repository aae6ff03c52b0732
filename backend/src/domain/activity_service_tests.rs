//! Tests for the activity service.

use std::sync::Arc;

use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::fixtures::{date, fixture_clock, travel_details};
use crate::domain::ports::{ActivityRepositoryError, MockActivityRepository};
use crate::domain::{
    ActivityDetails, ActivitySubmission, EmissionCategory, EmissionFactorRegistry, EmissionPolicy,
    ErrorCode, OrganizationId,
};

#[fixture]
fn calculator() -> EmissionCalculator {
    EmissionCalculator::new(EmissionFactorRegistry::standard(), EmissionPolicy::standard())
        .expect("standard registry")
}

fn service(repo: MockActivityRepository, calculator: EmissionCalculator) -> ActivityService<MockActivityRepository> {
    ActivityService::new(Arc::new(repo), calculator, fixture_clock())
}

fn submit_request(details: ActivityDetails) -> SubmitActivityRequest {
    SubmitActivityRequest {
        organization_id: OrganizationId::random(),
        submission: ActivitySubmission {
            details,
            date: date(2024, 3, 10),
            cost: Some(45.0),
            description: Some("  Field visit  ".into()),
        },
    }
}

#[rstest]
#[tokio::test]
async fn submit_freezes_the_computed_emission(calculator: EmissionCalculator) {
    let mut repo = MockActivityRepository::new();
    repo.expect_save()
        .withf(|record| record.emission_kg() == 21.0)
        .times(1)
        .return_once(|_| Ok(()));

    let record = service(repo, calculator)
        .submit(submit_request(travel_details(100.0)))
        .await
        .expect("submission succeeds");

    assert_eq!(record.emission_kg(), 21.0);
    assert_eq!(record.category(), EmissionCategory::Travel);
    assert_eq!(record.description(), Some("Field visit"));
    assert_eq!(record.cost(), Some(45.0));
}

#[rstest]
#[tokio::test]
async fn submit_rejects_unknown_types_before_saving(calculator: EmissionCalculator) {
    let mut repo = MockActivityRepository::new();
    repo.expect_save().times(0);

    let err = service(repo, calculator)
        .submit(submit_request(ActivityDetails::Office {
            activity_type: "telegram".into(),
            quantity: 1.0,
        }))
        .await
        .expect_err("unknown type");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details(),
        Some(&json!({"field": "activityType", "code": "unknown_type"}))
    );
}

#[rstest]
#[tokio::test]
async fn submit_rejects_negative_cost(calculator: EmissionCalculator) {
    let mut repo = MockActivityRepository::new();
    repo.expect_save().times(0);

    let mut request = submit_request(travel_details(10.0));
    request.submission.cost = Some(-5.0);
    let err = service(repo, calculator)
        .submit(request)
        .await
        .expect_err("negative cost");
    assert_eq!(err.details(), Some(&json!({"field": "cost", "code": "invalid_cost"})));
}

#[rstest]
#[tokio::test]
async fn submit_maps_store_outage(calculator: EmissionCalculator) {
    let mut repo = MockActivityRepository::new();
    repo.expect_save()
        .times(1)
        .return_once(|_| Err(ActivityRepositoryError::connection("pool unavailable")));

    let err = service(repo, calculator)
        .submit(submit_request(travel_details(10.0)))
        .await
        .expect_err("unavailable");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn delete_reports_missing_records(calculator: EmissionCalculator) {
    let mut repo = MockActivityRepository::new();
    repo.expect_delete().times(1).return_once(|_, _| Ok(false));

    let err = service(repo, calculator)
        .delete(DeleteActivityRequest {
            organization_id: OrganizationId::random(),
            activity_id: ActivityId::random(),
        })
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn delete_succeeds_when_a_row_is_removed(calculator: EmissionCalculator) {
    let mut repo = MockActivityRepository::new();
    repo.expect_delete().times(1).return_once(|_, _| Ok(true));

    service(repo, calculator)
        .delete(DeleteActivityRequest {
            organization_id: OrganizationId::random(),
            activity_id: ActivityId::random(),
        })
        .await
        .expect("delete succeeds");
}

#[rstest]
#[case(0, 1)]
#[case(50, 50)]
#[case(5000, MAX_ACTIVITY_LIMIT)]
#[tokio::test]
async fn list_clamps_limit_and_passes_category(
    calculator: EmissionCalculator,
    #[case] requested: usize,
    #[case] expected: usize,
) {
    let mut repo = MockActivityRepository::new();
    repo.expect_list_for_organization()
        .withf(move |_, filter| {
            filter.limit == Some(expected) && filter.category == Some(EmissionCategory::Events)
        })
        .times(1)
        .return_once(|_, _| Ok(Vec::new()));

    let listed = service(repo, calculator)
        .list(ListActivitiesRequest {
            organization_id: OrganizationId::random(),
            category: Some(EmissionCategory::Events),
            limit: requested,
        })
        .await
        .expect("list succeeds");
    assert!(listed.is_empty());
}
