//! Runtime configuration: `.env` loading, environment mode, database settings

use std::path::PathBuf;
use std::time::Duration;

use campus_api::db::PoolConfig;
use clap::{Args, ValueEnum};

/// Load `.env` from the working directory, if there is one, returning its
/// path. Runs before tracing is up, so the caller logs the outcome.
///
/// Variables already set in the process environment win.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => Some(path),
        Err(e) if e.not_found() => None,
        Err(e) => {
            eprintln!("warning: failed to read .env: {}", e);
            None
        }
    }
}

/// Deployment mode; selects log verbosity and formatting
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

/// Connection settings shared by every command that talks to Postgres
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Maximum open connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 100)]
    pub db_max_connections: u32,

    /// Seconds an idle connection is kept
    #[arg(long, env = "DB_IDLE_TIMEOUT_SECS", default_value_t = 600)]
    pub db_idle_timeout_secs: u64,

    /// Seconds before a connection is recycled
    #[arg(long, env = "DB_MAX_LIFETIME_SECS", default_value_t = 3600)]
    pub db_max_lifetime_secs: u64,

    /// Seconds to wait for a free connection
    #[arg(long, env = "DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 30)]
    pub db_acquire_timeout_secs: u64,
}

impl DatabaseArgs {
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            max_connections: self.db_max_connections,
            idle_timeout: Duration::from_secs(self.db_idle_timeout_secs),
            max_lifetime: Duration::from_secs(self.db_max_lifetime_secs),
            acquire_timeout: Duration::from_secs(self.db_acquire_timeout_secs),
        }
    }
}
