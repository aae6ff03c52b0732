//! Goal tracker.
//!
//! Baselines are fixed at creation; progress is recomputed from the trailing
//! emission window on every read. Reads that observe a reached target persist
//! the completion so it is never undone by later emissions.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    ActivityRepository, CreateGoalRequest, DeleteGoalRequest, EnergyRepository, GoalCommand,
    GoalQuery, GoalRepository,
};
use crate::domain::record_snapshot::{RecordReader, map_goal_error};
use crate::domain::{
    DateWindow, EmissionPolicy, Error, Goal, GoalId, GoalParts, GoalProgress, GoalStatus,
    OrganizationId, window_total,
};

/// Implements the goal driving ports.
pub struct GoalService<G, A, E> {
    goals: Arc<G>,
    records: RecordReader<A, E>,
    policy: EmissionPolicy,
    clock: Arc<dyn Clock>,
}

impl<G, A, E> Clone for GoalService<G, A, E> {
    fn clone(&self) -> Self {
        Self {
            goals: Arc::clone(&self.goals),
            records: self.records.clone(),
            policy: self.policy,
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<G, A, E> GoalService<G, A, E>
where
    G: GoalRepository,
    A: ActivityRepository,
    E: EnergyRepository,
{
    /// Create the service over a goal repository and the record reader.
    pub fn new(
        goals: Arc<G>,
        records: RecordReader<A, E>,
        policy: EmissionPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            goals,
            records,
            policy,
            clock,
        }
    }

    /// Emissions over the trailing baseline window ending today.
    async fn current_emissions(&self, organization_id: &OrganizationId) -> Result<f64, Error> {
        let today = self.clock.utc().date_naive();
        let window = DateWindow::trailing(today, self.policy.goals.baseline_window_days);
        let snapshot = self
            .records
            .load(organization_id, Some(window.start_exclusive()))
            .await?;
        Ok(window_total(snapshot.samples(), window))
    }

    async fn evaluate(&self, goal: Goal, current_emissions_kg: f64) -> Result<GoalProgress, Error> {
        let mut progress = GoalProgress::evaluate(goal, current_emissions_kg);
        if progress.reached_target() {
            let goal = &mut progress.goal;
            self.goals
                .mark_completed(&goal.organization_id(), &goal.id())
                .await
                .map_err(map_goal_error)?;
            goal.complete();
            info!(
                organization_id = %goal.organization_id(),
                goal_id = %goal.id(),
                "goal completed"
            );
        }
        Ok(progress)
    }
}

#[async_trait]
impl<G, A, E> GoalCommand for GoalService<G, A, E>
where
    G: GoalRepository,
    A: ActivityRepository,
    E: EnergyRepository,
{
    async fn create(&self, request: CreateGoalRequest) -> Result<GoalProgress, Error> {
        let CreateGoalRequest {
            organization_id,
            draft,
        } = request;
        let current = self.current_emissions(&organization_id).await?;
        let baseline = match draft.baseline_emissions_kg {
            Some(explicit) => explicit,
            None if current > 0.0 => current,
            None => {
                return Err(Error::validation(
                    "baselineEmissionsKg",
                    "must_be_positive",
                    format!(
                        "no emissions were recorded in the last {} days; \
                         provide baselineEmissionsKg explicitly",
                        self.policy.goals.baseline_window_days
                    ),
                ));
            }
        };

        let goal = Goal::new(GoalParts {
            id: GoalId::random(),
            organization_id,
            title: draft.title,
            description: draft.description,
            target_reduction_percent: draft.target_reduction_percent,
            target_date: draft.target_date,
            baseline_emissions_kg: baseline,
            status: GoalStatus::Active,
            created_at: self.clock.utc(),
        })?;
        self.goals.save(&goal).await.map_err(map_goal_error)?;
        info!(
            organization_id = %goal.organization_id(),
            goal_id = %goal.id(),
            baseline_emissions_kg = goal.baseline_emissions_kg(),
            "goal created"
        );
        self.evaluate(goal, current).await
    }

    async fn delete(&self, request: DeleteGoalRequest) -> Result<(), Error> {
        let removed = self
            .goals
            .delete(&request.organization_id, &request.goal_id)
            .await
            .map_err(map_goal_error)?;
        if !removed {
            return Err(Error::not_found(format!("goal {} not found", request.goal_id)));
        }
        info!(
            organization_id = %request.organization_id,
            goal_id = %request.goal_id,
            "goal deleted"
        );
        Ok(())
    }
}

#[async_trait]
impl<G, A, E> GoalQuery for GoalService<G, A, E>
where
    G: GoalRepository,
    A: ActivityRepository,
    E: EnergyRepository,
{
    async fn list(&self, organization_id: OrganizationId) -> Result<Vec<GoalProgress>, Error> {
        let goals = self
            .goals
            .list_for_organization(&organization_id)
            .await
            .map_err(map_goal_error)?;
        if goals.is_empty() {
            return Ok(Vec::new());
        }
        let current = self.current_emissions(&organization_id).await?;
        let mut tracked = Vec::with_capacity(goals.len());
        for goal in goals {
            tracked.push(self.evaluate(goal, current).await?);
        }
        Ok(tracked)
    }
}

#[cfg(test)]
#[path = "goal_service_tests.rs"]
mod tests;
