//! Aggregated read models: dashboard statistics, leaderboard and insights.
//!
//! Nothing here is cached. Each call reads the current record set so a
//! submission is visible to the very next request.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{
    ActivityRepository, DashboardQuery, EnergyRepository, GoalQuery, GoalRepository,
    OrganizationRepository,
};
use crate::domain::record_snapshot::{RecordReader, map_organization_error};
use crate::domain::{
    DashboardStats, DateWindow, EmissionPolicy, EmissionSample, Error, GoalCounts, GoalService,
    GoalStatus, InsightReport, OrganizationId, OrganizationTotals, RankedEntry, dashboard_stats,
    insights, rank, window_total,
};

/// Implements [`DashboardQuery`].
pub struct DashboardService<O, G, A, E> {
    organizations: Arc<O>,
    goals: GoalService<G, A, E>,
    records: RecordReader<A, E>,
    policy: EmissionPolicy,
    clock: Arc<dyn Clock>,
}

impl<O, G, A, E> DashboardService<O, G, A, E>
where
    O: OrganizationRepository,
    G: GoalRepository,
    A: ActivityRepository,
    E: EnergyRepository,
{
    /// Create the service over the organization, goal and record sources.
    pub fn new(
        organizations: Arc<O>,
        goals: GoalService<G, A, E>,
        records: RecordReader<A, E>,
        policy: EmissionPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            organizations,
            goals,
            records,
            policy,
            clock,
        }
    }

    /// Goal counts after live progress has been applied, so a goal reaching
    /// its target is counted as completed on the same read.
    async fn goal_counts(&self, organization_id: OrganizationId) -> Result<GoalCounts, Error> {
        let tracked = self.goals.list(organization_id).await?;
        let completed = tracked
            .iter()
            .filter(|progress| progress.goal.status() == GoalStatus::Completed)
            .count();
        Ok(GoalCounts {
            active: tracked.len() - completed,
            completed,
        })
    }
}

#[async_trait]
impl<O, G, A, E> DashboardQuery for DashboardService<O, G, A, E>
where
    O: OrganizationRepository,
    G: GoalRepository,
    A: ActivityRepository,
    E: EnergyRepository,
{
    async fn stats(&self, organization_id: OrganizationId) -> Result<DashboardStats, Error> {
        let snapshot = self.records.load(&organization_id, None).await?;
        let goals = self.goal_counts(organization_id).await?;
        Ok(dashboard_stats(
            &snapshot.activities,
            &snapshot.energy,
            goals,
            &self.policy,
        ))
    }

    async fn leaderboard(&self) -> Result<Vec<RankedEntry>, Error> {
        let organizations = self
            .organizations
            .list_all()
            .await
            .map_err(map_organization_error)?;
        let today = self.clock.utc().date_naive();
        let current = DateWindow::trailing(today, self.policy.leaderboard.period_days);
        let previous = current.preceding();

        let mut totals = Vec::with_capacity(organizations.len());
        for organization in organizations {
            let snapshot = self
                .records
                .load(&organization.id(), Some(previous.start_exclusive()))
                .await?;
            let recent: Vec<EmissionSample> = snapshot.samples().collect();
            let previous_total_kg = recent
                .iter()
                .any(|sample| previous.contains(sample.date))
                .then(|| window_total(recent.iter().copied(), previous));
            totals.push(OrganizationTotals {
                organization_id: organization.id(),
                organization_name: organization.name().to_owned(),
                current_total_kg: window_total(recent.iter().copied(), current),
                previous_total_kg,
            });
        }
        debug!(organizations = totals.len(), "leaderboard computed");
        Ok(rank(totals))
    }

    async fn insights(&self, organization_id: OrganizationId) -> Result<InsightReport, Error> {
        let snapshot = self.records.load(&organization_id, None).await?;
        let goals = self.goal_counts(organization_id).await?;
        Ok(insights(
            &snapshot.activities,
            &snapshot.energy,
            goals,
            &self.policy,
        ))
    }
}

#[cfg(test)]
#[path = "dashboard_service_tests.rs"]
mod tests;
