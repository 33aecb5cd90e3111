//! Local persistence for generated listings.
//!
//! Each listing is stored whole as a JSON document keyed by `id`, with
//! `created_at` duplicated into an indexed column for recency ordering.
//! There are no partial updates: callers read, modify and save the whole
//! record.

#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};

use snaplist_core::{now_millis, AppConfig, Listing};
use sqlx::SqlitePool;
use tokio::sync::OnceCell;

use crate::{open_database, DbError, PoolConfig};

/// Listing store over a lazily-opened SQLite pool.
///
/// Build one at startup and share it by reference. The pool is opened on
/// first use; concurrent first callers wait on the same initialization and
/// all receive the same pool.
pub struct ListingStore {
    database_url: Option<String>,
    pool_config: PoolConfig,
    max_images: usize,
    pool: OnceCell<SqlitePool>,
    #[cfg(test)]
    opened: AtomicUsize,
}

impl ListingStore {
    /// Creates a store that opens `database_url` on first use.
    #[must_use]
    pub fn new(database_url: &str, pool_config: PoolConfig, max_images: usize) -> Self {
        Self {
            database_url: Some(database_url.to_owned()),
            pool_config,
            max_images,
            pool: OnceCell::new(),
            #[cfg(test)]
            opened: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new(
            &config.database_url,
            PoolConfig::from_app_config(config),
            config.max_images,
        )
    }

    /// Wraps a pool that is already open. The caller is responsible for
    /// having run migrations on it.
    #[must_use]
    pub fn from_pool(pool: SqlitePool, max_images: usize) -> Self {
        Self {
            database_url: None,
            pool_config: PoolConfig::default(),
            max_images,
            pool: OnceCell::new_with(Some(pool)),
            #[cfg(test)]
            opened: AtomicUsize::new(0),
        }
    }

    /// Fresh listing id. See [`snaplist_core::generate_listing_id`].
    #[must_use]
    pub fn generate_id() -> String {
        snaplist_core::generate_listing_id()
    }

    #[must_use]
    pub fn max_images(&self) -> usize {
        self.max_images
    }

    async fn pool(&self) -> Result<&SqlitePool, DbError> {
        self.pool
            .get_or_try_init(|| async {
                let url = self.database_url.as_deref().ok_or_else(|| {
                    DbError::unavailable(std::io::Error::other("no database url configured"))
                })?;
                #[cfg(test)]
                self.opened.fetch_add(1, Ordering::SeqCst);
                open_database(url, self.pool_config).await
            })
            .await
    }

    /// Inserts or fully replaces the listing at `listing.id`.
    ///
    /// `updated_at` is refreshed to the current time, never earlier than the
    /// incoming `updated_at` or `created_at`. Returns the record as stored.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Invalid`] if the listing breaks an invariant,
    /// [`DbError::StorageUnavailable`] if the database cannot be opened, or
    /// [`DbError::Sqlx`] if the write fails.
    pub async fn save(&self, listing: &Listing) -> Result<Listing, DbError> {
        let mut record = listing.clone();
        record.updated_at = now_millis()
            .max(record.updated_at)
            .max(record.created_at);
        record.validate(self.max_images)?;
        let json = serde_json::to_string(&record)?;

        let pool = self.pool().await?;
        sqlx::query(
            "INSERT INTO listings (id, created_at, updated_at, record) \
             VALUES (?1, ?2, ?3, ?4) \
             ON CONFLICT (id) DO UPDATE SET \
                 created_at = excluded.created_at, \
                 updated_at = excluded.updated_at, \
                 record     = excluded.record",
        )
        .bind(&record.id)
        .bind(record.created_at)
        .bind(record.updated_at)
        .bind(&json)
        .execute(pool)
        .await?;

        tracing::debug!(id = %record.id, images = record.images.len(), "listing saved");
        Ok(record)
    }

    /// Fetches one listing. A missing id is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::MalformedRecord`] if the stored JSON cannot be
    /// decoded, or a storage error if the query fails.
    pub async fn get(&self, id: &str) -> Result<Option<Listing>, DbError> {
        let pool = self.pool().await?;
        let record = sqlx::query_scalar::<_, String>("SELECT record FROM listings WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        record.map(|json| decode(id, &json)).transpose()
    }

    /// Every stored listing, newest `created_at` first.
    ///
    /// Listings sharing a timestamp are all returned, most recently inserted
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::MalformedRecord`] on the first undecodable row, or a
    /// storage error if the query fails.
    pub async fn get_all(&self) -> Result<Vec<Listing>, DbError> {
        let pool = self.pool().await?;
        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT id, record FROM listings ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(pool)
        .await?;

        rows.iter().map(|(id, json)| decode(id, json)).collect()
    }

    /// Removes a listing. Returns `false` when nothing was stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the delete fails.
    pub async fn delete(&self, id: &str) -> Result<bool, DbError> {
        let pool = self.pool().await?;
        let result = sqlx::query("DELETE FROM listings WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        let removed = result.rows_affected() > 0;
        tracing::debug!(id, removed, "listing delete");
        Ok(removed)
    }

    /// Removes every listing and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the delete fails.
    pub async fn clear(&self) -> Result<u64, DbError> {
        let pool = self.pool().await?;
        let result = sqlx::query("DELETE FROM listings").execute(pool).await?;
        tracing::info!(removed = result.rows_affected(), "listing store cleared");
        Ok(result.rows_affected())
    }

    /// Number of stored listings.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub async fn count(&self) -> Result<i64, DbError> {
        let pool = self.pool().await?;
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM listings")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    #[cfg(test)]
    fn open_count(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

fn decode(id: &str, json: &str) -> Result<Listing, DbError> {
    serde_json::from_str(json).map_err(|source| DbError::MalformedRecord {
        id: id.to_owned(),
        source,
    })
}
