use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

pub mod listings;

pub use listings::ListingStore;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// Path relative to crates/snaplist-db/Cargo.toml; resolves to <workspace-root>/migrations/
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
        }
    }
}

impl PoolConfig {
    #[must_use]
    pub fn from_app_config(config: &snaplist_core::AppConfig) -> Self {
        Self {
            max_connections: config.db_max_connections,
            acquire_timeout_secs: config.db_acquire_timeout_secs,
        }
    }
}

#[derive(Debug, Error)]
pub enum DbError {
    /// The database could not be opened or its schema could not be applied.
    #[error("storage unavailable: {source}")]
    StorageUnavailable {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A stored row holds JSON that no longer decodes into a listing.
    #[error("malformed record for listing '{id}': {source}")]
    MalformedRecord {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid listing: {0}")]
    Invalid(#[from] snaplist_core::CoreError),

    #[error("failed to encode listing: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DbError {
    fn unavailable(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::StorageUnavailable {
            source: Box::new(source),
        }
    }
}

/// Connect to a SQLite pool using explicit URL and config.
///
/// The database file is created if it does not exist yet.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the URL is invalid or the connection cannot be
/// established.
pub async fn connect_pool(database_url: &str, config: PoolConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .busy_timeout(BUSY_TIMEOUT);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await
}

/// Run all pending migrations against the pool.
///
/// # Errors
///
/// Returns [`sqlx::migrate::MigrateError`] if any migration fails.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Send a `SELECT 1` to verify the pool has a live connection.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(pool)
        .await?;
    Ok(())
}

/// Open a pool and bring its schema up to date.
///
/// # Errors
///
/// Returns [`DbError::StorageUnavailable`] if either step fails.
pub async fn open_database(database_url: &str, config: PoolConfig) -> Result<SqlitePool, DbError> {
    let pool = connect_pool(database_url, config)
        .await
        .map_err(DbError::unavailable)?;
    run_migrations(&pool).await.map_err(DbError::unavailable)?;
    tracing::info!(database_url, "listing database ready");
    Ok(pool)
}
