//! # Database State
//!
//! Wraps the `Database` connection for use in commands.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! pub async fn load_checker_name(db: &DbState, ...) -> Result<MetadataResponse, ApiError> {
//!     let stored = db.inner().preferences().checker_name().await?;
//!     ...
//! }
//! ```

use drawer_db::{Database, DbConfig, DbResult};
use tracing::warn;

/// Wrapper around `Database` for the command layer.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Opens the database at `config`, or an in-memory one if that fails.
    ///
    /// The tally works without persistence; only the checker name is lost
    /// on exit.
    pub async fn open_or_in_memory(config: DbConfig) -> DbResult<Self> {
        let path = config.database_path.clone();

        match Database::new(config).await {
            Ok(db) => Ok(DbState::new(db)),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Preference store unavailable, checker name will not persist"
                );
                Ok(DbState::new(Database::new(DbConfig::in_memory()).await?))
            }
        }
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
