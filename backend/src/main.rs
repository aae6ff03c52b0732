//! EcoPulse server entry-point: loads settings, prepares storage and serves
//! the REST API.

mod server;

use std::ffi::OsString;

use actix_web::cookie::SameSite;
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use ecopulse::inbound::http::health::HealthState;
use ecopulse::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{PolicySettings, ServerConfig, ServerSettings, create_server};

fn config_error(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string())
}

/// Apply migrations on a blocking thread, then open the async pool.
async fn connect_database(database_url: String) -> std::io::Result<DbPool> {
    let url = database_url.clone();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .map_err(std::io::Error::other)?
        .map_err(std::io::Error::other)?;
    info!(applied, "database schema up to date");
    DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(std::io::Error::other)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(config_error)?;
    // Policy overrides come from the environment and config file only.
    let policy = PolicySettings::load_from_iter([OsString::from("ecopulse")])
        .map_err(config_error)?
        .to_policy()
        .map_err(config_error)?;

    let mut config = ServerConfig::new(
        settings.load_session_key()?,
        settings.cookie_secure(),
        SameSite::Lax,
        settings.bind_addr()?,
    )
    .with_policy(policy);
    if let Some(database_url) = settings.database_url.clone() {
        config = config.with_db_pool(connect_database(database_url).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(addr = %settings.bind_addr()?, "listening");
    server.await
}
