//! HTTP inbound adapter exposing REST endpoints.

pub mod activities;
pub mod dashboard;
pub mod emission_factors;
pub mod energy;
pub mod error;
pub mod goals;
pub mod health;
pub mod organizations;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
