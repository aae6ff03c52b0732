//! Driving port for listing goals with live progress.

use async_trait::async_trait;

use crate::domain::{Error, GoalProgress, OrganizationId};

/// Reads goals with their progress.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GoalQuery: Send + Sync {
    /// Goals with progress recomputed from current emissions.
    async fn list(&self, organization_id: OrganizationId) -> Result<Vec<GoalProgress>, Error>;
}

/// Fixture with no goals.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGoalQuery;

#[async_trait]
impl GoalQuery for FixtureGoalQuery {
    async fn list(&self, _organization_id: OrganizationId) -> Result<Vec<GoalProgress>, Error> {
        Ok(Vec::new())
    }
}
