//! PostgreSQL-backed `ActivityRepository`.
//!
//! Category-specific measurements are stored as the tagged JSON form of
//! [`ActivityDetails`] in the `details` column; the category and type are
//! duplicated into plain columns for filtering.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ActivityListFilter, ActivityRepository, ActivityRepositoryError};
use crate::domain::{
    ActivityDetails, ActivityId, ActivityRecord, ActivityRecordParts, OrganizationId,
};

use super::error_mapping::{limit_to_db, map_corrupt_row, map_diesel_error, map_pool_error};
use super::models::{ActivityRow, NewActivityRow};
use super::pool::{DbPool, PoolError};
use super::schema::activities;

/// Diesel-backed implementation of the `ActivityRepository` port.
#[derive(Clone)]
pub struct DieselActivityRepository {
    pool: DbPool,
}

impl DieselActivityRepository {
    /// Repository backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ActivityRepositoryError {
    map_pool_error(error, ActivityRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ActivityRepositoryError {
    map_diesel_error(
        error,
        ActivityRepositoryError::query,
        ActivityRepositoryError::connection,
    )
}

fn row_to_record(row: ActivityRow) -> Result<ActivityRecord, ActivityRepositoryError> {
    let details: ActivityDetails = serde_json::from_value(row.details).map_err(|reason| {
        map_corrupt_row("activities", row.id, reason, ActivityRepositoryError::query)
    })?;
    Ok(ActivityRecord::from_parts(ActivityRecordParts {
        id: ActivityId::from_uuid(row.id),
        organization_id: OrganizationId::from_uuid(row.organization_id),
        details,
        date: row.date,
        emission_kg: row.emission_kg,
        cost: row.cost,
        description: row.description,
        created_at: row.created_at,
    }))
}

#[async_trait]
impl ActivityRepository for DieselActivityRepository {
    async fn save(&self, record: &ActivityRecord) -> Result<(), ActivityRepositoryError> {
        let details = serde_json::to_value(record.details())
            .map_err(|err| ActivityRepositoryError::query(err.to_string()))?;
        let row = NewActivityRow {
            id: *record.id().as_uuid(),
            organization_id: *record.organization_id().as_uuid(),
            category: record.category().as_str(),
            activity_type: record.details().kind(),
            details,
            date: record.date(),
            emission_kg: record.emission_kg(),
            cost: record.cost(),
            description: record.description(),
            created_at: record.created_at(),
        };
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(activities::table)
            .values(&row)
            .on_conflict(activities::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn delete(
        &self,
        organization_id: &OrganizationId,
        id: &ActivityId,
    ) -> Result<bool, ActivityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(
            activities::table.filter(
                activities::id
                    .eq(id.as_uuid())
                    .and(activities::organization_id.eq(organization_id.as_uuid())),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;
        Ok(removed > 0)
    }

    async fn list_for_organization(
        &self,
        organization_id: &OrganizationId,
        filter: ActivityListFilter,
    ) -> Result<Vec<ActivityRecord>, ActivityRepositoryError> {
        let mut query = activities::table
            .filter(activities::organization_id.eq(*organization_id.as_uuid()))
            .select(ActivityRow::as_select())
            .order((activities::date.desc(), activities::created_at.desc()))
            .into_boxed();
        if let Some(category) = filter.category {
            query = query.filter(activities::category.eq(category.as_str()));
        }
        if let Some(after) = filter.dated_after {
            query = query.filter(activities::date.gt(after));
        }
        if let Some(limit) = filter.limit {
            query = query.limit(limit_to_db(limit));
        }

        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<ActivityRow> = query.load(&mut conn).await.map_err(diesel_error)?;
        rows.into_iter().map(row_to_record).collect()
    }
}
