use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use loan_core::{FormStore, StoreError};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

/// Wizard drafts kept in a single `form_store` table.
///
/// The pool holds one connection, so an in-memory database lives exactly as
/// long as the store does.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open `database_url`, creating the file if it does not exist.
    ///
    /// Accepts a bare path (`home-online.db`), a sqlx URL
    /// (`sqlite://home-online.db`) or `sqlite::memory:`.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid SQLite connection string: {}", database_url))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// When `key` was last saved, if it exists.
    pub async fn updated_at(
        &self,
        key: &str,
    ) -> Result<Option<DateTime<Utc>>, StoreError> {
        let row = sqlx::query("SELECT updated_at FROM form_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(|row| {
            row.try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| StoreError::Database(format!("Failed to get updated_at: {}", e)))
        })
        .transpose()
    }
}

#[async_trait]
impl FormStore for SqliteStore {
    async fn save(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO form_store (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        debug!(%key, bytes = value.len(), "saved form entry");
        Ok(())
    }

    async fn load(
        &self,
        key: &str,
    ) -> Result<Option<String>, StoreError> {
        let row = sqlx::query("SELECT value FROM form_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(|row| {
            row.try_get::<String, _>("value")
                .map_err(|e| StoreError::Database(e.to_string()))
        })
        .transpose()
    }

    async fn clear(
        &self,
        key: &str,
    ) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM form_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        debug!(%key, removed = result.rows_affected(), "cleared form entry");
        Ok(())
    }
}
