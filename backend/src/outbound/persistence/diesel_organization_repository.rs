//! PostgreSQL-backed `OrganizationRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{OrganizationRepository, OrganizationRepositoryError};
use crate::domain::{Organization, OrganizationId};

use super::error_mapping::{map_corrupt_row, map_diesel_error, map_pool_error};
use super::models::{NewOrganizationRow, OrganizationRow};
use super::pool::{DbPool, PoolError};
use super::schema::organizations;

/// Diesel-backed implementation of the `OrganizationRepository` port.
#[derive(Clone)]
pub struct DieselOrganizationRepository {
    pool: DbPool,
}

impl DieselOrganizationRepository {
    /// Repository backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> OrganizationRepositoryError {
    map_pool_error(error, OrganizationRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> OrganizationRepositoryError {
    map_diesel_error(
        error,
        OrganizationRepositoryError::query,
        OrganizationRepositoryError::connection,
    )
}

fn row_to_organization(row: OrganizationRow) -> Result<Organization, OrganizationRepositoryError> {
    Organization::new(OrganizationId::from_uuid(row.id), row.name, row.created_at).map_err(
        |reason| map_corrupt_row("organizations", row.id, reason, OrganizationRepositoryError::query),
    )
}

#[async_trait]
impl OrganizationRepository for DieselOrganizationRepository {
    async fn save(&self, organization: &Organization) -> Result<(), OrganizationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewOrganizationRow {
            id: *organization.id().as_uuid(),
            name: organization.name(),
            created_at: organization.created_at(),
        };
        diesel::insert_into(organizations::table)
            .values(&row)
            .on_conflict(organizations::id)
            .do_update()
            .set(organizations::name.eq(excluded(organizations::name)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_id(
        &self,
        id: &OrganizationId,
    ) -> Result<Option<Organization>, OrganizationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<OrganizationRow> = organizations::table
            .filter(organizations::id.eq(id.as_uuid()))
            .select(OrganizationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_organization).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Organization>, OrganizationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<OrganizationRow> = organizations::table
            .order(organizations::id.asc())
            .select(OrganizationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(row_to_organization).collect()
    }
}
