//! Builders wiring repositories into domain services and HTTP state ports.

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use ecopulse::domain::ports::{
    ActivityRepository, EnergyRepository, GoalRepository, OrganizationRepository,
};
use ecopulse::domain::{
    ActivityService, DashboardService, EmissionCalculator, EmissionFactorRegistry,
    EmissionPolicy, EnergyService, GoalService, OrganizationService, RecordReader,
};
use ecopulse::inbound::http::state::{HttpState, HttpStatePorts};
use ecopulse::outbound::memory::InMemoryRecordStore;
use ecopulse::outbound::persistence::{
    DieselActivityRepository, DieselEnergyRepository, DieselGoalRepository,
    DieselOrganizationRepository,
};

use super::ServerConfig;

/// Repository adapters backing one server instance.
struct Repositories<O, A, E, G> {
    organizations: Arc<O>,
    activities: Arc<A>,
    energy: Arc<E>,
    goals: Arc<G>,
}

/// Build every driving port over the given repositories.
fn build_ports<O, A, E, G>(
    repos: Repositories<O, A, E, G>,
    policy: EmissionPolicy,
    clock: Arc<dyn Clock>,
) -> io::Result<HttpStatePorts>
where
    O: OrganizationRepository + 'static,
    A: ActivityRepository + 'static,
    E: EnergyRepository + 'static,
    G: GoalRepository + 'static,
{
    let registry = EmissionFactorRegistry::standard();
    let calculator = EmissionCalculator::new(registry, policy)
        .map_err(|err| io::Error::other(format!("emission factor registry: {err}")))?;
    let Repositories {
        organizations,
        activities,
        energy,
        goals,
    } = repos;

    let organization_service = Arc::new(OrganizationService::new(
        Arc::clone(&organizations),
        Arc::clone(&clock),
    ));
    let activity_service = Arc::new(ActivityService::new(
        Arc::clone(&activities),
        calculator,
        Arc::clone(&clock),
    ));
    let energy_service = Arc::new(EnergyService::new(
        Arc::clone(&energy),
        calculator,
        Arc::clone(&clock),
    ));
    let records = RecordReader::new(activities, energy);
    let goal_service = GoalService::new(goals, records.clone(), policy, Arc::clone(&clock));
    let dashboard_service = Arc::new(DashboardService::new(
        organizations,
        goal_service.clone(),
        records,
        policy,
        clock,
    ));
    let goal_service = Arc::new(goal_service);

    Ok(HttpStatePorts {
        organizations: organization_service.clone(),
        organizations_query: organization_service,
        activities: activity_service.clone(),
        activities_query: activity_service,
        energy: energy_service.clone(),
        energy_query: energy_service,
        goals: goal_service.clone(),
        goals_query: goal_service,
        dashboard: dashboard_service,
        emission_factors: registry,
    })
}

/// Build HTTP state over PostgreSQL when a pool is configured, otherwise
/// over a shared in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> io::Result<web::Data<HttpState>> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let ports = match &config.db_pool {
        Some(pool) => {
            info!("storing records in PostgreSQL");
            build_ports(
                Repositories {
                    organizations: Arc::new(DieselOrganizationRepository::new(pool.clone())),
                    activities: Arc::new(DieselActivityRepository::new(pool.clone())),
                    energy: Arc::new(DieselEnergyRepository::new(pool.clone())),
                    goals: Arc::new(DieselGoalRepository::new(pool.clone())),
                },
                config.policy,
                clock,
            )?
        }
        None => {
            info!("no database configured; storing records in memory");
            let store = Arc::new(InMemoryRecordStore::new());
            build_ports(
                Repositories {
                    organizations: Arc::clone(&store),
                    activities: Arc::clone(&store),
                    energy: Arc::clone(&store),
                    goals: store,
                },
                config.policy,
                clock,
            )?
        }
    };
    Ok(web::Data::new(HttpState::new(ports)))
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use actix_web::cookie::{Key, SameSite};
    use rstest::rstest;

    use super::*;
    use ecopulse::domain::ports::RegisterOrganizationRequest;

    fn config() -> ServerConfig {
        let addr: SocketAddr = "127.0.0.1:0".parse().expect("valid address");
        ServerConfig::new(Key::generate(), false, SameSite::Lax, addr)
    }

    #[rstest]
    #[tokio::test]
    async fn in_memory_state_shares_one_store() {
        let state = build_http_state(&config()).expect("state builds");
        let organization = state
            .organizations
            .register(RegisterOrganizationRequest {
                name: "Shared".into(),
            })
            .await
            .expect("registration succeeds");

        let found = state
            .organizations_query
            .current(organization.id())
            .await
            .expect("lookup succeeds");
        assert_eq!(found.name(), "Shared");

        let board = state.dashboard.leaderboard().await.expect("leaderboard");
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].organization_id, organization.id());
    }
}
