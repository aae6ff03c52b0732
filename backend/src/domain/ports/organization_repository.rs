//! Port for organization persistence.

use async_trait::async_trait;

use crate::domain::{Organization, OrganizationId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by organization repository adapters.
    pub enum OrganizationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "organization repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "organization repository query failed: {message}",
    }
}

/// Persists organizations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// Insert or replace an organization.
    async fn save(&self, organization: &Organization) -> Result<(), OrganizationRepositoryError>;

    /// Look up one organization.
    async fn find_by_id(
        &self,
        id: &OrganizationId,
    ) -> Result<Option<Organization>, OrganizationRepositoryError>;

    /// Every registered organization, ordered by id.
    async fn list_all(&self) -> Result<Vec<Organization>, OrganizationRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOrganizationRepository;

#[async_trait]
impl OrganizationRepository for FixtureOrganizationRepository {
    async fn save(&self, _organization: &Organization) -> Result<(), OrganizationRepositoryError> {
        Ok(())
    }

    async fn find_by_id(
        &self,
        _id: &OrganizationId,
    ) -> Result<Option<Organization>, OrganizationRepositoryError> {
        Ok(None)
    }

    async fn list_all(&self) -> Result<Vec<Organization>, OrganizationRepositoryError> {
        Ok(Vec::new())
    }
}
