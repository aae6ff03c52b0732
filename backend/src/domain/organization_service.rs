//! Organization registration and lookup.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    OrganizationCommand, OrganizationQuery, OrganizationRepository, RegisterOrganizationRequest,
};
use crate::domain::record_snapshot::map_organization_error;
use crate::domain::{Error, Organization, OrganizationId};

/// Implements the organization driving ports over a repository.
#[derive(Clone)]
pub struct OrganizationService<R> {
    organizations: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> OrganizationService<R> {
    /// Create the service over an organization repository.
    pub fn new(organizations: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            organizations,
            clock,
        }
    }
}

#[async_trait]
impl<R> OrganizationCommand for OrganizationService<R>
where
    R: OrganizationRepository,
{
    async fn register(&self, request: RegisterOrganizationRequest) -> Result<Organization, Error> {
        let organization =
            Organization::new(OrganizationId::random(), request.name, self.clock.utc())?;
        self.organizations
            .save(&organization)
            .await
            .map_err(map_organization_error)?;
        info!(organization_id = %organization.id(), "organization registered");
        Ok(organization)
    }
}

#[async_trait]
impl<R> OrganizationQuery for OrganizationService<R>
where
    R: OrganizationRepository,
{
    async fn current(&self, organization_id: OrganizationId) -> Result<Organization, Error> {
        self.organizations
            .find_by_id(&organization_id)
            .await
            .map_err(map_organization_error)?
            .ok_or_else(|| Error::not_found(format!("organization {organization_id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::fixtures::fixture_clock;
    use crate::domain::ports::{MockOrganizationRepository, OrganizationRepositoryError};

    #[rstest]
    #[tokio::test]
    async fn register_persists_trimmed_name() {
        let mut repo = MockOrganizationRepository::new();
        repo.expect_save()
            .withf(|org| org.name() == "Green Relief")
            .times(1)
            .return_once(|_| Ok(()));

        let service = OrganizationService::new(Arc::new(repo), fixture_clock());
        let org = service
            .register(RegisterOrganizationRequest {
                name: "  Green Relief ".into(),
            })
            .await
            .expect("registration succeeds");
        assert_eq!(org.name(), "Green Relief");
    }

    #[rstest]
    #[tokio::test]
    async fn register_rejects_blank_names_without_saving() {
        let mut repo = MockOrganizationRepository::new();
        repo.expect_save().times(0);

        let service = OrganizationService::new(Arc::new(repo), fixture_clock());
        let err = service
            .register(RegisterOrganizationRequest { name: " ".into() })
            .await
            .expect_err("blank name");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn current_maps_missing_to_not_found() {
        let mut repo = MockOrganizationRepository::new();
        repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let service = OrganizationService::new(Arc::new(repo), fixture_clock());
        let err = service
            .current(OrganizationId::random())
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failures_become_service_unavailable() {
        let mut repo = MockOrganizationRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .return_once(|_| Err(OrganizationRepositoryError::connection("refused")));

        let service = OrganizationService::new(Arc::new(repo), fixture_clock());
        let err = service
            .current(OrganizationId::random())
            .await
            .expect_err("unavailable");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
