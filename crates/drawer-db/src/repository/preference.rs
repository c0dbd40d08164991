//! # Preference Repository
//!
//! Durable key-value pairs, the desktop counterpart of a browser's
//! `localStorage`.
//!
//! ## Table
//! ```text
//! preferences
//! ├── key         TEXT PRIMARY KEY   e.g. "drawer-kun.checker-name"
//! ├── value       TEXT
//! └── updated_at  TEXT (RFC 3339)
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Fixed key under which the checker name is stored.
pub const CHECKER_NAME_KEY: &str = "drawer-kun.checker-name";

/// Repository for preference operations.
#[derive(Debug, Clone)]
pub struct PreferenceRepository {
    pool: SqlitePool,
}

impl PreferenceRepository {
    /// Creates a new preference repository.
    pub fn new(pool: SqlitePool) -> Self {
        PreferenceRepository { pool }
    }

    /// Reads a value.
    ///
    /// ## Returns
    /// * `Ok(Some(value))` - Key exists
    /// * `Ok(None)` - Key was never set or was deleted
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM preferences WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        debug!(key = %key, found = value.is_some(), "Preference read");
        Ok(value)
    }

    /// Writes a value, replacing any previous one.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO preferences (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, "Preference written");
        Ok(())
    }

    /// Removes a value.
    ///
    /// ## Returns
    /// `true` if a row was deleted.
    pub async fn delete(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM preferences WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Reads the persisted checker name.
    pub async fn checker_name(&self) -> DbResult<Option<String>> {
        self.get(CHECKER_NAME_KEY).await
    }

    /// Persists the checker name.
    ///
    /// An empty name is stored as-is so that clearing the field sticks
    /// across restarts.
    pub async fn set_checker_name(&self, name: &str) -> DbResult<()> {
        self.set(CHECKER_NAME_KEY, name).await
    }
}
