//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::EmissionFactorRegistry;
use crate::domain::ports::{
    ActivityCommand, ActivityQuery, DashboardQuery, EnergyCommand, EnergyQuery,
    FixtureActivityCommand, FixtureActivityQuery, FixtureDashboardQuery, FixtureEnergyCommand,
    FixtureEnergyQuery, FixtureGoalCommand, FixtureGoalQuery, FixtureOrganizationCommand,
    FixtureOrganizationQuery, GoalCommand, GoalQuery, OrganizationCommand, OrganizationQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
///
/// [`Default`] wires every port to its fixture, which lets tests replace
/// only the port they exercise.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Registers organizations.
    pub organizations: Arc<dyn OrganizationCommand>,
    /// Reads organizations.
    pub organizations_query: Arc<dyn OrganizationQuery>,
    /// Records and deletes activities.
    pub activities: Arc<dyn ActivityCommand>,
    /// Lists activities.
    pub activities_query: Arc<dyn ActivityQuery>,
    /// Records energy readings.
    pub energy: Arc<dyn EnergyCommand>,
    /// Lists energy readings and forecasts.
    pub energy_query: Arc<dyn EnergyQuery>,
    /// Creates and deletes goals.
    pub goals: Arc<dyn GoalCommand>,
    /// Lists goals with progress.
    pub goals_query: Arc<dyn GoalQuery>,
    /// Dashboard, leaderboard and insights.
    pub dashboard: Arc<dyn DashboardQuery>,
    /// Factor table served by the public factors endpoint.
    pub emission_factors: &'static EmissionFactorRegistry,
}

impl Default for HttpStatePorts {
    fn default() -> Self {
        Self {
            organizations: Arc::new(FixtureOrganizationCommand),
            organizations_query: Arc::new(FixtureOrganizationQuery),
            activities: Arc::new(FixtureActivityCommand),
            activities_query: Arc::new(FixtureActivityQuery),
            energy: Arc::new(FixtureEnergyCommand),
            energy_query: Arc::new(FixtureEnergyQuery),
            goals: Arc::new(FixtureGoalCommand),
            goals_query: Arc::new(FixtureGoalQuery),
            dashboard: Arc::new(FixtureDashboardQuery),
            emission_factors: EmissionFactorRegistry::standard(),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registers organizations.
    pub organizations: Arc<dyn OrganizationCommand>,
    /// Reads organizations.
    pub organizations_query: Arc<dyn OrganizationQuery>,
    /// Records and deletes activities.
    pub activities: Arc<dyn ActivityCommand>,
    /// Lists activities.
    pub activities_query: Arc<dyn ActivityQuery>,
    /// Records energy readings.
    pub energy: Arc<dyn EnergyCommand>,
    /// Lists energy readings and forecasts.
    pub energy_query: Arc<dyn EnergyQuery>,
    /// Creates and deletes goals.
    pub goals: Arc<dyn GoalCommand>,
    /// Lists goals with progress.
    pub goals_query: Arc<dyn GoalQuery>,
    /// Dashboard, leaderboard and insights.
    pub dashboard: Arc<dyn DashboardQuery>,
    /// Factor table served by the public factors endpoint.
    pub emission_factors: &'static EmissionFactorRegistry,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use ecopulse::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(HttpStatePorts::default());
    /// assert!(!state.emission_factors.grouped().is_empty());
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            organizations,
            organizations_query,
            activities,
            activities_query,
            energy,
            energy_query,
            goals,
            goals_query,
            dashboard,
            emission_factors,
        } = ports;
        Self {
            organizations,
            organizations_query,
            activities,
            activities_query,
            energy,
            energy_query,
            goals,
            goals_query,
            dashboard,
            emission_factors,
        }
    }
}
