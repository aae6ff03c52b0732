//! Driving port for energy readings.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{EnergyReading, EnergyRecord, EnergyRecordId, Error, OrganizationId};

/// Reading submitted on behalf of an organization.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitEnergyRecordRequest {
    /// Submitting organization.
    pub organization_id: OrganizationId,
    /// Validated reading.
    pub reading: EnergyReading,
}

/// Records energy readings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnergyCommand: Send + Sync {
    /// Price and store one daily reading.
    async fn submit(&self, request: SubmitEnergyRecordRequest) -> Result<EnergyRecord, Error>;
}

/// Fixture that validates readings and prices them at zero without storing them.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEnergyCommand;

#[async_trait]
impl EnergyCommand for FixtureEnergyCommand {
    async fn submit(&self, request: SubmitEnergyRecordRequest) -> Result<EnergyRecord, Error> {
        request.reading.validate()?;
        Ok(EnergyRecord::new(
            EnergyRecordId::random(),
            request.organization_id,
            request.reading,
            0.0,
            Utc::now(),
        ))
    }
}
