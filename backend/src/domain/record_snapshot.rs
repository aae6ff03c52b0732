//! Read-only snapshots of an organization's records, shared by the services
//! that aggregate them.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::ports::{
    ActivityListFilter, ActivityRepository, ActivityRepositoryError, EnergyListFilter,
    EnergyRepository, EnergyRepositoryError, GoalRepositoryError, OrganizationRepositoryError,
};
use crate::domain::{ActivityRecord, EmissionSample, EnergyRecord, Error, OrganizationId, samples};

pub(crate) fn map_activity_error(error: ActivityRepositoryError) -> Error {
    match error {
        ActivityRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("activity repository unavailable: {message}"))
        }
        ActivityRepositoryError::Query { message } => {
            Error::internal(format!("activity repository error: {message}"))
        }
    }
}

pub(crate) fn map_energy_error(error: EnergyRepositoryError) -> Error {
    match error {
        EnergyRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("energy repository unavailable: {message}"))
        }
        EnergyRepositoryError::Query { message } => {
            Error::internal(format!("energy repository error: {message}"))
        }
    }
}

pub(crate) fn map_goal_error(error: GoalRepositoryError) -> Error {
    match error {
        GoalRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("goal repository unavailable: {message}"))
        }
        GoalRepositoryError::Query { message } => {
            Error::internal(format!("goal repository error: {message}"))
        }
    }
}

pub(crate) fn map_organization_error(error: OrganizationRepositoryError) -> Error {
    match error {
        OrganizationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("organization repository unavailable: {message}"))
        }
        OrganizationRepositoryError::Query { message } => {
            Error::internal(format!("organization repository error: {message}"))
        }
    }
}

/// Activity and energy records fetched together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSnapshot {
    /// Activity records, newest first.
    pub activities: Vec<ActivityRecord>,
    /// Energy records, newest first.
    pub energy: Vec<EnergyRecord>,
}

impl RecordSnapshot {
    /// Both record kinds flattened into samples.
    pub fn samples(&self) -> impl Iterator<Item = EmissionSample> + '_ {
        samples(&self.activities, &self.energy)
    }
}

/// Loads [`RecordSnapshot`]s from the activity and energy repositories.
pub struct RecordReader<A, E> {
    activities: Arc<A>,
    energy: Arc<E>,
}

impl<A, E> Clone for RecordReader<A, E> {
    fn clone(&self) -> Self {
        Self {
            activities: Arc::clone(&self.activities),
            energy: Arc::clone(&self.energy),
        }
    }
}

impl<A, E> RecordReader<A, E>
where
    A: ActivityRepository,
    E: EnergyRepository,
{
    /// Read from the given repositories.
    pub fn new(activities: Arc<A>, energy: Arc<E>) -> Self {
        Self { activities, energy }
    }

    /// Every record for the organization, optionally only those dated after
    /// `dated_after`.
    pub async fn load(
        &self,
        organization_id: &OrganizationId,
        dated_after: Option<NaiveDate>,
    ) -> Result<RecordSnapshot, Error> {
        let activities = self
            .activities
            .list_for_organization(
                organization_id,
                ActivityListFilter {
                    dated_after,
                    ..ActivityListFilter::default()
                },
            )
            .await
            .map_err(map_activity_error)?;
        let energy = self
            .energy
            .list_for_organization(
                organization_id,
                EnergyListFilter {
                    dated_after,
                    limit: None,
                },
            )
            .await
            .map_err(map_energy_error)?;
        Ok(RecordSnapshot { activities, energy })
    }
}
