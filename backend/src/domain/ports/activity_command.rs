//! Driving port for activity submissions and deletions.
//!
//! Submissions are priced by the emission calculator before they are stored,
//! so a rejected submission never leaves a partial record behind.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{
    ActivityId, ActivityRecord, ActivityRecordParts, ActivitySubmission, Error, OrganizationId,
};

/// Submission on behalf of an organization.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitActivityRequest {
    /// Submitting organization.
    pub organization_id: OrganizationId,
    /// Validated activity fields.
    pub submission: ActivitySubmission,
}

/// Deletion scoped to the owning organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteActivityRequest {
    /// Organization that must own the record.
    pub organization_id: OrganizationId,
    /// Record to delete.
    pub activity_id: ActivityId,
}

/// Records and removes activities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityCommand: Send + Sync {
    /// Compute the emission, freeze it on a new record, and store it.
    async fn submit(&self, request: SubmitActivityRequest) -> Result<ActivityRecord, Error>;

    /// Hard-delete a record. Fails with `not_found` when it does not exist
    /// for the organization.
    async fn delete(&self, request: DeleteActivityRequest) -> Result<(), Error>;
}

/// Fixture that records nothing and reports zero emissions.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureActivityCommand;

#[async_trait]
impl ActivityCommand for FixtureActivityCommand {
    async fn submit(&self, request: SubmitActivityRequest) -> Result<ActivityRecord, Error> {
        let ActivitySubmission {
            details,
            date,
            cost,
            description,
        } = request.submission;
        Ok(ActivityRecord::from_parts(ActivityRecordParts {
            id: ActivityId::random(),
            organization_id: request.organization_id,
            details,
            date,
            emission_kg: 0.0,
            cost,
            description,
            created_at: Utc::now(),
        }))
    }

    async fn delete(&self, request: DeleteActivityRequest) -> Result<(), Error> {
        Err(Error::not_found(format!(
            "activity {} not found",
            request.activity_id
        )))
    }
}
