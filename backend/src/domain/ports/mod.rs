//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters; driving
//! ports (`*Command`, `*Query`) are implemented by domain services and called
//! by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod activity_command;
mod activity_query;
mod activity_repository;
mod dashboard_query;
mod energy_command;
mod energy_query;
mod energy_repository;
mod goal_command;
mod goal_query;
mod goal_repository;
mod organization_command;
mod organization_query;
mod organization_repository;

#[cfg(test)]
pub use activity_command::MockActivityCommand;
pub use activity_command::{
    ActivityCommand, DeleteActivityRequest, FixtureActivityCommand, SubmitActivityRequest,
};
#[cfg(test)]
pub use activity_query::MockActivityQuery;
pub use activity_query::{
    ActivityQuery, DEFAULT_ACTIVITY_LIMIT, FixtureActivityQuery, ListActivitiesRequest,
    MAX_ACTIVITY_LIMIT,
};
#[cfg(test)]
pub use activity_repository::MockActivityRepository;
pub use activity_repository::{
    ActivityListFilter, ActivityRepository, ActivityRepositoryError, FixtureActivityRepository,
};
#[cfg(test)]
pub use dashboard_query::MockDashboardQuery;
pub use dashboard_query::{DashboardQuery, FixtureDashboardQuery};
#[cfg(test)]
pub use energy_command::MockEnergyCommand;
pub use energy_command::{EnergyCommand, FixtureEnergyCommand, SubmitEnergyRecordRequest};
#[cfg(test)]
pub use energy_query::MockEnergyQuery;
pub use energy_query::{
    DEFAULT_ENERGY_LIMIT, EnergyQuery, FixtureEnergyQuery, ListEnergyRecordsRequest,
    MAX_ENERGY_LIMIT,
};
#[cfg(test)]
pub use energy_repository::MockEnergyRepository;
pub use energy_repository::{
    EnergyListFilter, EnergyRepository, EnergyRepositoryError, FixtureEnergyRepository,
};
#[cfg(test)]
pub use goal_command::MockGoalCommand;
pub use goal_command::{CreateGoalRequest, DeleteGoalRequest, FixtureGoalCommand, GoalCommand};
#[cfg(test)]
pub use goal_query::MockGoalQuery;
pub use goal_query::{FixtureGoalQuery, GoalQuery};
#[cfg(test)]
pub use goal_repository::MockGoalRepository;
pub use goal_repository::{FixtureGoalRepository, GoalRepository, GoalRepositoryError};
#[cfg(test)]
pub use organization_command::MockOrganizationCommand;
pub use organization_command::{
    FixtureOrganizationCommand, OrganizationCommand, RegisterOrganizationRequest,
};
#[cfg(test)]
pub use organization_query::MockOrganizationQuery;
pub use organization_query::{FixtureOrganizationQuery, OrganizationQuery};
#[cfg(test)]
pub use organization_repository::MockOrganizationRepository;
pub use organization_repository::{
    FixtureOrganizationRepository, OrganizationRepository, OrganizationRepositoryError,
};
