use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the storage layer.
///
/// Transient conditions (pool exhausted, connection refused) map to 503 at
/// the HTTP boundary; permanent ones map to 500. Neither leaks driver detail
/// to clients.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database unavailable: {0}")]
    Unavailable(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StorageError::Unavailable(err.to_string())
            }
            sqlx::Error::Io(io) => StorageError::Unavailable(io.to_string()),
            other => StorageError::Query(other.to_string()),
        }
    }
}

/// Build the PostgreSQL connection pool from configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, StorageError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.url)
        .await?;

    info!(max_connections = config.max_connections, "Connected to database");
    Ok(pool)
}

/// Pings the database to ensure connectivity.
pub async fn health_check(pool: &PgPool) -> Result<(), StorageError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
