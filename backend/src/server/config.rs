//! Layered settings and the resolved server configuration.
//!
//! [`ServerSettings`] and [`PolicySettings`] are loaded by `ortho_config`
//! from defaults, an optional config file, `ECOPULSE_*` environment variables
//! and the command line. [`ServerConfig`] is the validated result handed to
//! [`super::create_server`].

use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

use ecopulse::domain::{EmissionPolicy, PolicyValidationError, ScoreFormula};
use ecopulse::outbound::persistence::DbPool;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Process-level server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ECOPULSE")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one, records live in process memory.
    pub database_url: Option<String>,
    /// File holding the session cookie signing key material.
    pub session_key_file: Option<PathBuf>,
    /// Mark the session cookie `Secure`. Defaults to true.
    ///
    /// Boolean switches stay off the command line: an absent flag would
    /// otherwise parse as `false` and shadow the file and environment layers.
    #[ortho_config(skip_cli)]
    pub cookie_secure: Option<bool>,
    /// Fall back to a random session key when the key file is unreadable.
    #[ortho_config(default = false, skip_cli)]
    pub allow_ephemeral_session_key: bool,
}

impl ServerSettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid bind address {raw}: {err}"),
            )
        })
    }

    pub fn session_key_file(&self) -> &Path {
        self.session_key_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_SESSION_KEY_FILE))
    }

    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    /// Derive the session key from the key file.
    ///
    /// Debug builds, or deployments that opt in with
    /// `allow_ephemeral_session_key`, fall back to a random key; sessions then
    /// do not survive a restart.
    pub fn load_session_key(&self) -> io::Result<Key> {
        let path = self.session_key_file();
        match std::fs::read(path) {
            Ok(bytes) => Ok(Key::derive_from(&bytes)),
            Err(err) if cfg!(debug_assertions) || self.allow_ephemeral_session_key => {
                warn!(path = %path.display(), error = %err, "using temporary session key");
                Ok(Key::generate())
            }
            Err(err) => Err(io::Error::other(format!(
                "failed to read session key at {}: {err}",
                path.display()
            ))),
        }
    }
}

/// Overrides for the emission policy constants. Unset values keep the
/// published defaults.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ECOPULSE_POLICY")]
pub struct PolicySettings {
    pub catering_surcharge_percent: Option<f64>,
    pub travel_surcharge_percent: Option<f64>,
    pub ac_kg_per_hour: Option<f64>,
    pub temperature_kg_per_degree: Option<f64>,
    pub comfort_baseline_celsius: Option<f64>,
    pub tree_absorption_kg_per_year: Option<f64>,
    pub score_reference_kg: Option<f64>,
    pub score_window_days: Option<u32>,
    pub baseline_window_days: Option<u32>,
    pub forecast_min_samples: Option<usize>,
    pub forecast_medium_confidence_samples: Option<usize>,
    pub forecast_high_confidence_samples: Option<usize>,
    pub forecast_days_per_month: Option<u32>,
    pub leaderboard_period_days: Option<u32>,
}

impl PolicySettings {
    /// Apply the overrides to the default policy and validate the result.
    pub fn to_policy(&self) -> Result<EmissionPolicy, PolicyValidationError> {
        let mut policy = EmissionPolicy::standard();
        let surcharges = &mut policy.event_surcharges;
        surcharges.catering_percent = self
            .catering_surcharge_percent
            .unwrap_or(surcharges.catering_percent);
        surcharges.travel_percent = self
            .travel_surcharge_percent
            .unwrap_or(surcharges.travel_percent);

        let load = &mut policy.energy_load;
        load.ac_kg_per_hour = self.ac_kg_per_hour.unwrap_or(load.ac_kg_per_hour);
        load.temperature_kg_per_degree = self
            .temperature_kg_per_degree
            .unwrap_or(load.temperature_kg_per_degree);
        load.comfort_baseline_celsius = self
            .comfort_baseline_celsius
            .unwrap_or(load.comfort_baseline_celsius);

        policy.tree_absorption_kg_per_year = self
            .tree_absorption_kg_per_year
            .unwrap_or(policy.tree_absorption_kg_per_year);
        policy.score = ScoreFormula::HyperbolicV1 {
            reference_kg: self
                .score_reference_kg
                .unwrap_or(policy.score.reference_kg()),
            window_days: self.score_window_days.unwrap_or(policy.score.window_days()),
        };
        policy.goals.baseline_window_days = self
            .baseline_window_days
            .unwrap_or(policy.goals.baseline_window_days);

        let forecast = &mut policy.forecast;
        forecast.min_samples = self.forecast_min_samples.unwrap_or(forecast.min_samples);
        forecast.medium_confidence_samples = self
            .forecast_medium_confidence_samples
            .unwrap_or(forecast.medium_confidence_samples);
        forecast.high_confidence_samples = self
            .forecast_high_confidence_samples
            .unwrap_or(forecast.high_confidence_samples);
        forecast.days_per_month = self
            .forecast_days_per_month
            .unwrap_or(forecast.days_per_month);

        policy.leaderboard.period_days = self
            .leaderboard_period_days
            .unwrap_or(policy.leaderboard.period_days);

        policy.validate()?;
        Ok(policy)
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) policy: EmissionPolicy,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            policy: EmissionPolicy::standard(),
            db_pool: None,
        }
    }

    /// Replace the default emission policy.
    #[must_use]
    pub fn with_policy(mut self, policy: EmissionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Store records in PostgreSQL instead of process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
