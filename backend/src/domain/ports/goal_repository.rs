//! Port for reduction goal persistence.

use async_trait::async_trait;

use crate::domain::{Goal, GoalId, OrganizationId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by goal repository adapters.
    pub enum GoalRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "goal repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "goal repository query failed: {message}",
    }
}

/// Persists reduction goals per organization.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GoalRepository: Send + Sync {
    /// Insert or replace a goal.
    async fn save(&self, goal: &Goal) -> Result<(), GoalRepositoryError>;

    /// Goals owned by the organization, oldest first.
    async fn list_for_organization(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<Goal>, GoalRepositoryError>;

    /// Record the `active -> completed` transition. Returns `false` when the
    /// goal does not exist; completing a completed goal is a no-op.
    async fn mark_completed(
        &self,
        organization_id: &OrganizationId,
        id: &GoalId,
    ) -> Result<bool, GoalRepositoryError>;

    /// Remove a goal regardless of status. Returns `false` when missing.
    async fn delete(
        &self,
        organization_id: &OrganizationId,
        id: &GoalId,
    ) -> Result<bool, GoalRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGoalRepository;

#[async_trait]
impl GoalRepository for FixtureGoalRepository {
    async fn save(&self, _goal: &Goal) -> Result<(), GoalRepositoryError> {
        Ok(())
    }

    async fn list_for_organization(
        &self,
        _organization_id: &OrganizationId,
    ) -> Result<Vec<Goal>, GoalRepositoryError> {
        Ok(Vec::new())
    }

    async fn mark_completed(
        &self,
        _organization_id: &OrganizationId,
        _id: &GoalId,
    ) -> Result<bool, GoalRepositoryError> {
        Ok(false)
    }

    async fn delete(
        &self,
        _organization_id: &OrganizationId,
        _id: &GoalId,
    ) -> Result<bool, GoalRepositoryError> {
        Ok(false)
    }
}
