//! PostgreSQL-backed `GoalRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{GoalRepository, GoalRepositoryError};
use crate::domain::{Goal, GoalId, GoalParts, GoalStatus, OrganizationId};

use super::error_mapping::{map_corrupt_row, map_diesel_error, map_pool_error};
use super::models::{GoalRow, NewGoalRow};
use super::pool::{DbPool, PoolError};
use super::schema::goals;

/// Diesel-backed implementation of the `GoalRepository` port.
#[derive(Clone)]
pub struct DieselGoalRepository {
    pool: DbPool,
}

impl DieselGoalRepository {
    /// Repository backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> GoalRepositoryError {
    map_pool_error(error, GoalRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> GoalRepositoryError {
    map_diesel_error(
        error,
        GoalRepositoryError::query,
        GoalRepositoryError::connection,
    )
}

fn row_to_goal(row: GoalRow) -> Result<Goal, GoalRepositoryError> {
    let id = row.id;
    let status: GoalStatus = row
        .status
        .parse()
        .map_err(|reason| map_corrupt_row("goals", id, reason, GoalRepositoryError::query))?;
    Goal::new(GoalParts {
        id: GoalId::from_uuid(row.id),
        organization_id: OrganizationId::from_uuid(row.organization_id),
        title: row.title,
        description: row.description,
        target_reduction_percent: row.target_reduction_percent,
        target_date: row.target_date,
        baseline_emissions_kg: row.baseline_emissions_kg,
        status,
        created_at: row.created_at,
    })
    .map_err(|reason| map_corrupt_row("goals", id, reason, GoalRepositoryError::query))
}

/// Filter matching one goal owned by one organization.
macro_rules! owned_goal {
    ($organization_id:expr, $id:expr) => {
        goals::table.filter(
            goals::id
                .eq($id.as_uuid())
                .and(goals::organization_id.eq($organization_id.as_uuid())),
        )
    };
}

#[async_trait]
impl GoalRepository for DieselGoalRepository {
    async fn save(&self, goal: &Goal) -> Result<(), GoalRepositoryError> {
        let row = NewGoalRow {
            id: *goal.id().as_uuid(),
            organization_id: *goal.organization_id().as_uuid(),
            title: goal.title(),
            description: goal.description(),
            target_reduction_percent: goal.target_reduction_percent(),
            target_date: goal.target_date(),
            baseline_emissions_kg: goal.baseline_emissions_kg(),
            status: goal.status().as_str(),
            created_at: goal.created_at(),
        };
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(goals::table)
            .values(&row)
            .on_conflict(goals::id)
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
    ) -> Result<Vec<Goal>, GoalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<GoalRow> = goals::table
            .filter(goals::organization_id.eq(organization_id.as_uuid()))
            .order((goals::created_at.asc(), goals::id.asc()))
            .select(GoalRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(row_to_goal).collect()
    }

    async fn mark_completed(
        &self,
        organization_id: &OrganizationId,
        id: &GoalId,
    ) -> Result<bool, GoalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(owned_goal!(organization_id, id))
            .set(goals::status.eq(GoalStatus::Completed.as_str()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(
        &self,
        organization_id: &OrganizationId,
        id: &GoalId,
    ) -> Result<bool, GoalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(owned_goal!(organization_id, id))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(removed > 0)
    }
}
