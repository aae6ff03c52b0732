//! Port for energy record persistence.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{EnergyRecord, OrganizationId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by energy repository adapters.
    pub enum EnergyRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "energy repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "energy repository query failed: {message}",
    }
}

/// Filters applied when listing energy records, most recent first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnergyListFilter {
    /// Only records dated strictly after this day.
    pub dated_after: Option<NaiveDate>,
    /// Maximum records returned; `None` returns all.
    pub limit: Option<usize>,
}

/// Persists energy records per organization.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnergyRepository: Send + Sync {
    /// Insert or replace a record.
    async fn save(&self, record: &EnergyRecord) -> Result<(), EnergyRepositoryError>;

    /// Records owned by `organization_id` matching `filter`.
    async fn list_for_organization(
        &self,
        organization_id: &OrganizationId,
        filter: EnergyListFilter,
    ) -> Result<Vec<EnergyRecord>, EnergyRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEnergyRepository;

#[async_trait]
impl EnergyRepository for FixtureEnergyRepository {
    async fn save(&self, _record: &EnergyRecord) -> Result<(), EnergyRepositoryError> {
        Ok(())
    }

    async fn list_for_organization(
        &self,
        _organization_id: &OrganizationId,
        _filter: EnergyListFilter,
    ) -> Result<Vec<EnergyRecord>, EnergyRepositoryError> {
        Ok(Vec::new())
    }
}
