//! Driving port for energy history and forecasts.

use async_trait::async_trait;

use crate::domain::{EnergyRecord, Error, ForecastResult, OrganizationId};

/// Number of energy records returned when the caller sets no limit.
pub const DEFAULT_ENERGY_LIMIT: usize = 365;
/// Largest accepted energy page.
pub const MAX_ENERGY_LIMIT: usize = 3650;

/// Energy listing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListEnergyRecordsRequest {
    /// Organization whose readings are listed.
    pub organization_id: OrganizationId,
    /// Maximum records returned.
    pub limit: usize,
}

/// Reads energy history and forecasts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnergyQuery: Send + Sync {
    /// Energy records ordered most recent first.
    async fn list(&self, request: ListEnergyRecordsRequest) -> Result<Vec<EnergyRecord>, Error>;

    /// Forecast next month's consumption from the organization's history.
    async fn forecast(&self, organization_id: OrganizationId) -> Result<ForecastResult, Error>;
}

/// Fixture with no history.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEnergyQuery;

#[async_trait]
impl EnergyQuery for FixtureEnergyQuery {
    async fn list(&self, _request: ListEnergyRecordsRequest) -> Result<Vec<EnergyRecord>, Error> {
        Ok(Vec::new())
    }

    async fn forecast(&self, _organization_id: OrganizationId) -> Result<ForecastResult, Error> {
        Ok(ForecastResult::Insufficient {
            message: "No energy records yet.".to_owned(),
            data_points: 0,
        })
    }
}
