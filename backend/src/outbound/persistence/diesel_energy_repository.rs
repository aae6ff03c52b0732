//! PostgreSQL-backed `EnergyRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{EnergyListFilter, EnergyRepository, EnergyRepositoryError};
use crate::domain::{EnergyReading, EnergyRecord, EnergyRecordId, OrganizationId};

use super::error_mapping::{
    count_to_db, limit_to_db, map_corrupt_row, map_diesel_error, map_pool_error,
};
use super::models::{EnergyRecordRow, NewEnergyRecordRow};
use super::pool::{DbPool, PoolError};
use super::schema::energy_records;

/// Diesel-backed implementation of the `EnergyRepository` port.
#[derive(Clone)]
pub struct DieselEnergyRepository {
    pool: DbPool,
}

impl DieselEnergyRepository {
    /// Repository backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> EnergyRepositoryError {
    map_pool_error(error, EnergyRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> EnergyRepositoryError {
    map_diesel_error(
        error,
        EnergyRepositoryError::query,
        EnergyRepositoryError::connection,
    )
}

fn row_to_record(row: EnergyRecordRow) -> Result<EnergyRecord, EnergyRepositoryError> {
    let corrupt = |reason: std::num::TryFromIntError| {
        map_corrupt_row("energy_records", row.id, reason, EnergyRepositoryError::query)
    };
    let reading = EnergyReading {
        date: row.date,
        electricity_kwh: row.electricity_kwh,
        num_people: u32::try_from(row.num_people).map_err(corrupt)?,
        num_systems: u32::try_from(row.num_systems).map_err(corrupt)?,
        ac_hours: row.ac_hours,
        outdoor_temp_celsius: row.outdoor_temp_celsius,
        notes: row.notes,
    };
    Ok(EnergyRecord::new(
        EnergyRecordId::from_uuid(row.id),
        OrganizationId::from_uuid(row.organization_id),
        reading,
        row.emission_kg,
        row.created_at,
    ))
}

#[async_trait]
impl EnergyRepository for DieselEnergyRepository {
    async fn save(&self, record: &EnergyRecord) -> Result<(), EnergyRepositoryError> {
        let reading = record.reading();
        let row = NewEnergyRecordRow {
            id: *record.id().as_uuid(),
            organization_id: *record.organization_id().as_uuid(),
            date: reading.date,
            electricity_kwh: reading.electricity_kwh,
            num_people: count_to_db(
                "num_people",
                reading.num_people,
                EnergyRepositoryError::query,
            )?,
            num_systems: count_to_db(
                "num_systems",
                reading.num_systems,
                EnergyRepositoryError::query,
            )?,
            ac_hours: reading.ac_hours,
            outdoor_temp_celsius: reading.outdoor_temp_celsius,
            notes: reading.notes.as_deref(),
            emission_kg: record.emission_kg(),
            created_at: record.created_at(),
        };
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(energy_records::table)
            .values(&row)
            .on_conflict(energy_records::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn list_for_organization(
        &self,
        organization_id: &OrganizationId,
        filter: EnergyListFilter,
    ) -> Result<Vec<EnergyRecord>, EnergyRepositoryError> {
        let mut query = energy_records::table
            .filter(energy_records::organization_id.eq(*organization_id.as_uuid()))
            .select(EnergyRecordRow::as_select())
            .order((energy_records::date.desc(), energy_records::created_at.desc()))
            .into_boxed();
        if let Some(after) = filter.dated_after {
            query = query.filter(energy_records::date.gt(after));
        }
        if let Some(limit) = filter.limit {
            query = query.limit(limit_to_db(limit));
        }

        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<EnergyRecordRow> = query.load(&mut conn).await.map_err(diesel_error)?;
        rows.into_iter().map(row_to_record).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use rstest::rstest;

    use super::*;

    fn row(num_people: i32) -> EnergyRecordRow {
        EnergyRecordRow {
            id: uuid::Uuid::new_v4(),
            organization_id: uuid::Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
            electricity_kwh: 120.0,
            num_people,
            num_systems: 8,
            ac_hours: 4.0,
            outdoor_temp_celsius: 31.0,
            notes: Some("heatwave".into()),
            emission_kg: 60.6,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn rows_convert_to_records() {
        let record = row_to_record(row(12)).expect("valid row");
        assert_eq!(record.reading().num_people, 12);
        assert_eq!(record.reading().num_systems, 8);
        assert_eq!(record.reading().notes.as_deref(), Some("heatwave"));
        assert_eq!(record.emission_kg(), 60.6);
    }

    #[rstest]
    fn negative_counts_are_corrupt() {
        let err = row_to_record(row(-1)).expect_err("negative count");
        assert!(matches!(err, EnergyRepositoryError::Query { .. }));
    }
}
