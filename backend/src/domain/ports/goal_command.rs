//! Driving port for goal creation and deletion.

use async_trait::async_trait;

use crate::domain::{Error, GoalDraft, GoalId, GoalProgress, OrganizationId};

/// Goal creation on behalf of an organization.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateGoalRequest {
    /// Owning organization.
    pub organization_id: OrganizationId,
    /// Caller-supplied goal fields.
    pub draft: GoalDraft,
}

/// Deletion scoped to the owning organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteGoalRequest {
    /// Organization that must own the goal.
    pub organization_id: OrganizationId,
    /// Goal to delete.
    pub goal_id: GoalId,
}

/// Creates and removes reduction goals.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GoalCommand: Send + Sync {
    /// Create an active goal, fixing its baseline. Fails with
    /// `invalid_request` when the baseline is not positive.
    async fn create(&self, request: CreateGoalRequest) -> Result<GoalProgress, Error>;

    /// Delete a goal in any state.
    async fn delete(&self, request: DeleteGoalRequest) -> Result<(), Error>;
}

/// Fixture reporting goal tracking as unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGoalCommand;

#[async_trait]
impl GoalCommand for FixtureGoalCommand {
    async fn create(&self, _request: CreateGoalRequest) -> Result<GoalProgress, Error> {
        Err(Error::service_unavailable("goal tracking is not configured"))
    }

    async fn delete(&self, request: DeleteGoalRequest) -> Result<(), Error> {
        Err(Error::not_found(format!("goal {} not found", request.goal_id)))
    }
}
