//! Activity submission, deletion and listing.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    ActivityCommand, ActivityListFilter, ActivityQuery, ActivityRepository, DeleteActivityRequest,
    ListActivitiesRequest, MAX_ACTIVITY_LIMIT, SubmitActivityRequest,
};
use crate::domain::record_snapshot::map_activity_error;
use crate::domain::{
    ActivityId, ActivityRecord, ActivityRecordParts, EmissionCalculator, Error,
};

/// Implements the activity driving ports.
#[derive(Clone)]
pub struct ActivityService<R> {
    activities: Arc<R>,
    calculator: EmissionCalculator,
    clock: Arc<dyn Clock>,
}

impl<R> ActivityService<R> {
    /// Create the service over an activity repository.
    pub fn new(activities: Arc<R>, calculator: EmissionCalculator, clock: Arc<dyn Clock>) -> Self {
        Self {
            activities,
            calculator,
            clock,
        }
    }
}

#[async_trait]
impl<R> ActivityCommand for ActivityService<R>
where
    R: ActivityRepository,
{
    async fn submit(&self, request: SubmitActivityRequest) -> Result<ActivityRecord, Error> {
        let SubmitActivityRequest {
            organization_id,
            submission,
        } = request;
        submission.validate_common()?;
        let emission_kg = self.calculator.activity_emission(&submission.details)?;

        let record = ActivityRecord::from_parts(ActivityRecordParts {
            id: ActivityId::random(),
            organization_id,
            details: submission.details,
            date: submission.date,
            emission_kg,
            cost: submission.cost,
            description: submission
                .description
                .map(|text| text.trim().to_owned())
                .filter(|text| !text.is_empty()),
            created_at: self.clock.utc(),
        });
        self.activities
            .save(&record)
            .await
            .map_err(map_activity_error)?;

        info!(
            organization_id = %record.organization_id(),
            activity_id = %record.id(),
            category = %record.category(),
            emission_kg = record.emission_kg(),
            "activity recorded"
        );
        Ok(record)
    }

    async fn delete(&self, request: DeleteActivityRequest) -> Result<(), Error> {
        let removed = self
            .activities
            .delete(&request.organization_id, &request.activity_id)
            .await
            .map_err(map_activity_error)?;
        if !removed {
            return Err(Error::not_found(format!(
                "activity {} not found",
                request.activity_id
            )));
        }
        info!(
            organization_id = %request.organization_id,
            activity_id = %request.activity_id,
            "activity deleted"
        );
        Ok(())
    }
}

#[async_trait]
impl<R> ActivityQuery for ActivityService<R>
where
    R: ActivityRepository,
{
    async fn list(&self, request: ListActivitiesRequest) -> Result<Vec<ActivityRecord>, Error> {
        self.activities
            .list_for_organization(
                &request.organization_id,
                ActivityListFilter {
                    category: request.category,
                    dated_after: None,
                    limit: Some(request.limit.clamp(1, MAX_ACTIVITY_LIMIT)),
                },
            )
            .await
            .map_err(map_activity_error)
    }
}

#[cfg(test)]
#[path = "activity_service_tests.rs"]
mod tests;
