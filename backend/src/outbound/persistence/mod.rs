//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Each repository is a thin translator between Diesel row structs and domain
//! records, sharing one `bb8` pool of `diesel-async` connections. Row structs
//! (`models.rs`) and table definitions (`schema.rs`) never leave this module.
//! Database failures are mapped to the owning port's `Connection` or `Query`
//! error.
//!
//! # Example
//!
//! ```ignore
//! use ecopulse::outbound::persistence::{DbPool, DieselGoalRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/ecopulse")).await?;
//! let goals = DieselGoalRepository::new(pool);
//! ```

mod diesel_activity_repository;
mod diesel_energy_repository;
mod diesel_goal_repository;
mod diesel_organization_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_activity_repository::DieselActivityRepository;
pub use diesel_energy_repository::DieselEnergyRepository;
pub use diesel_goal_repository::DieselGoalRepository;
pub use diesel_organization_repository::DieselOrganizationRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
