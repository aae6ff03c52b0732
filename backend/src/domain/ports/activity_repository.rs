//! Port for activity record persistence.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{ActivityId, ActivityRecord, EmissionCategory, OrganizationId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by activity repository adapters.
    pub enum ActivityRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "activity repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "activity repository query failed: {message}",
    }
}

/// Filters applied when listing an organization's activities.
///
/// Results are always ordered most recent first: date descending, then
/// creation time descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityListFilter {
    /// Restrict to one category.
    pub category: Option<EmissionCategory>,
    /// Only records dated strictly after this day.
    pub dated_after: Option<NaiveDate>,
    /// Maximum records returned; `None` returns all.
    pub limit: Option<usize>,
}

/// Persists activity records per organization.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Insert or replace a record.
    async fn save(&self, record: &ActivityRecord) -> Result<(), ActivityRepositoryError>;

    /// Remove a record owned by `organization_id`. Returns `false` when no
    /// such record exists.
    async fn delete(
        &self,
        organization_id: &OrganizationId,
        id: &ActivityId,
    ) -> Result<bool, ActivityRepositoryError>;

    /// Records owned by `organization_id` matching `filter`.
    async fn list_for_organization(
        &self,
        organization_id: &OrganizationId,
        filter: ActivityListFilter,
    ) -> Result<Vec<ActivityRecord>, ActivityRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureActivityRepository;

#[async_trait]
impl ActivityRepository for FixtureActivityRepository {
    async fn save(&self, _record: &ActivityRecord) -> Result<(), ActivityRepositoryError> {
        Ok(())
    }

    async fn delete(
        &self,
        _organization_id: &OrganizationId,
        _id: &ActivityId,
    ) -> Result<bool, ActivityRepositoryError> {
        Ok(false)
    }

    async fn list_for_organization(
        &self,
        _organization_id: &OrganizationId,
        _filter: ActivityListFilter,
    ) -> Result<Vec<ActivityRecord>, ActivityRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_delete_reports_missing() {
        let removed = FixtureActivityRepository
            .delete(&OrganizationId::random(), &ActivityId::random())
            .await
            .expect("fixture delete succeeds");
        assert!(!removed);
    }

    #[rstest]
    fn query_error_formats_message() {
        let err = ActivityRepositoryError::query("syntax error");
        assert_eq!(err.to_string(), "activity repository query failed: syntax error");
    }
}
