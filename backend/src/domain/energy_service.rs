//! Energy readings and forecasts.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    EnergyCommand, EnergyListFilter, EnergyQuery, EnergyRepository, ListEnergyRecordsRequest,
    MAX_ENERGY_LIMIT, SubmitEnergyRecordRequest,
};
use crate::domain::record_snapshot::map_energy_error;
use crate::domain::{
    EmissionCalculator, EnergyRecord, EnergyRecordId, Error, ForecastResult, OrganizationId,
    forecast,
};

/// Implements the energy driving ports.
#[derive(Clone)]
pub struct EnergyService<R> {
    energy: Arc<R>,
    calculator: EmissionCalculator,
    clock: Arc<dyn Clock>,
}

impl<R> EnergyService<R> {
    /// Create the service over an energy repository.
    pub fn new(energy: Arc<R>, calculator: EmissionCalculator, clock: Arc<dyn Clock>) -> Self {
        Self {
            energy,
            calculator,
            clock,
        }
    }
}

#[async_trait]
impl<R> EnergyCommand for EnergyService<R>
where
    R: EnergyRepository,
{
    async fn submit(&self, request: SubmitEnergyRecordRequest) -> Result<EnergyRecord, Error> {
        let SubmitEnergyRecordRequest {
            organization_id,
            mut reading,
        } = request;
        let emission_kg = self.calculator.energy_emission(&reading)?;
        reading.notes = reading
            .notes
            .map(|notes| notes.trim().to_owned())
            .filter(|notes| !notes.is_empty());

        let record = EnergyRecord::new(
            EnergyRecordId::random(),
            organization_id,
            reading,
            emission_kg,
            self.clock.utc(),
        );
        self.energy.save(&record).await.map_err(map_energy_error)?;

        info!(
            organization_id = %record.organization_id(),
            energy_record_id = %record.id(),
            emission_kg = record.emission_kg(),
            "energy reading recorded"
        );
        Ok(record)
    }
}

#[async_trait]
impl<R> EnergyQuery for EnergyService<R>
where
    R: EnergyRepository,
{
    async fn list(&self, request: ListEnergyRecordsRequest) -> Result<Vec<EnergyRecord>, Error> {
        self.energy
            .list_for_organization(
                &request.organization_id,
                EnergyListFilter {
                    dated_after: None,
                    limit: Some(request.limit.clamp(1, MAX_ENERGY_LIMIT)),
                },
            )
            .await
            .map_err(map_energy_error)
    }

    async fn forecast(&self, organization_id: OrganizationId) -> Result<ForecastResult, Error> {
        let mut records = self
            .energy
            .list_for_organization(&organization_id, EnergyListFilter::default())
            .await
            .map_err(map_energy_error)?;
        records.sort_by_key(EnergyRecord::date);
        let policy = self.calculator.policy();
        Ok(forecast(&records, &policy.forecast, &policy.energy_load))
    }
}
