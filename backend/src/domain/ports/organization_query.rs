//! Driving port for reading organizations.

use async_trait::async_trait;

use crate::domain::{Error, Organization, OrganizationId};

/// Reads organizations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganizationQuery: Send + Sync {
    /// Fetch the organization the caller is scoped to.
    async fn current(&self, organization_id: OrganizationId) -> Result<Organization, Error>;
}

/// Fixture that knows no organizations.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOrganizationQuery;

#[async_trait]
impl OrganizationQuery for FixtureOrganizationQuery {
    async fn current(&self, organization_id: OrganizationId) -> Result<Organization, Error> {
        Err(Error::not_found(format!(
            "organization {organization_id} not found"
        )))
    }
}
