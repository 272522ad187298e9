//! Database connection pool management
//!
//! Uses sqlx PgPool with bounded size, idle reaping and connection recycling.
//! Acquiring blocks (up to `acquire_timeout`) when the pool is exhausted.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Pool sizing and lifetime policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Upper bound on open connections
    pub max_connections: u32,
    /// Idle connections are closed after this long
    pub idle_timeout: Duration,
    /// Connections are recycled after this long, busy or not
    pub max_lifetime: Duration,
    /// How long a request waits for a free connection
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 100,
            idle_timeout: Duration::from_secs(10 * 60),
            max_lifetime: Duration::from_secs(60 * 60),
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// Create a PostgreSQL connection pool with the default policy.
///
/// # Errors
///
/// Returns an error if the first connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/campus").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, &PoolConfig::default()).await
}

/// Create a PostgreSQL connection pool with a custom policy.
pub async fn create_pool_with_options(
    database_url: &str,
    config: &PoolConfig,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .idle_timeout(Some(config.idle_timeout))
        .max_lifetime(Some(config.max_lifetime))
        .acquire_timeout(config.acquire_timeout)
        .connect(database_url)
        .await
}
