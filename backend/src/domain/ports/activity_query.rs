//! Driving port for reading activity history.

use async_trait::async_trait;

use crate::domain::{ActivityRecord, EmissionCategory, Error, OrganizationId};

/// Number of activities returned when the caller sets no limit.
pub const DEFAULT_ACTIVITY_LIMIT: usize = 100;
/// Largest accepted activity page.
pub const MAX_ACTIVITY_LIMIT: usize = 1000;

/// Activity listing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListActivitiesRequest {
    /// Organization whose records are listed.
    pub organization_id: OrganizationId,
    /// Restrict to one category.
    pub category: Option<EmissionCategory>,
    /// Maximum records returned.
    pub limit: usize,
}

/// Reads an organization's activity history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityQuery: Send + Sync {
    /// Activities ordered most recent first.
    async fn list(&self, request: ListActivitiesRequest) -> Result<Vec<ActivityRecord>, Error>;
}

/// Fixture returning an empty history.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureActivityQuery;

#[async_trait]
impl ActivityQuery for FixtureActivityQuery {
    async fn list(&self, _request: ListActivitiesRequest) -> Result<Vec<ActivityRecord>, Error> {
        Ok(Vec::new())
    }
}
