//! Driving port for registering organizations.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Error, Organization, OrganizationId};

/// Registration of a new organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterOrganizationRequest {
    /// Display name, trimmed before validation.
    pub name: String,
}

/// Registers organizations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganizationCommand: Send + Sync {
    /// Validate the name and persist a new organization.
    async fn register(&self, request: RegisterOrganizationRequest) -> Result<Organization, Error>;
}

/// Fixture that validates and echoes the organization without storing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOrganizationCommand;

#[async_trait]
impl OrganizationCommand for FixtureOrganizationCommand {
    async fn register(&self, request: RegisterOrganizationRequest) -> Result<Organization, Error> {
        Ok(Organization::new(
            OrganizationId::random(),
            request.name,
            Utc::now(),
        )?)
    }
}
