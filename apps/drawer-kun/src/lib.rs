//! # Drawer-kun Application Library
//!
//! Wires configuration, state and commands into the interactive tally
//! shell.
//!
//! ## Module Organization
//! ```text
//! drawer_kun/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── shell.rs        ◄─── rustyline REPL and table rendering
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   ├── session.rs  ◄─── Tally session (Arc<Mutex>)
//! │   ├── config.rs   ◄─── Flags / env / defaults
//! │   └── export.rs   ◄─── Clipboard and download sinks
//! ├── commands/
//! │   ├── tally.rs    ◄─── Row edits, reset
//! │   ├── history.rs  ◄─── Past totals
//! │   ├── metadata.rs ◄─── Checker name, check time
//! │   ├── export.rs   ◄─── Summary, copy, download
//! │   └── config.rs   ◄─── Configuration retrieval
//! ├── sink/           ◄─── Clipboard programs, OSC 52, text files
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod shell;
pub mod sink;
pub mod state;

use chrono::Local;
use drawer_db::DbConfig;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use error::ApiError;
use shell::Shell;
use state::{AppConfig, DbState, ExportState, SessionState};

/// Runs the tally shell.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Open Preference Store ────────────────────────────────────────────► │
/// │     • SQLite with WAL mode, pending migrations applied                  │
/// │     • Falls back to in-memory if the file can't be opened               │
/// │                                                                         │
/// │  2. Initialize State Objects ─────────────────────────────────────────► │
/// │     • SessionState: empty rows, empty history                           │
/// │     • ExportState: system clipboard + OSC 52, download folder           │
/// │                                                                         │
/// │  3. Restore Checker Name ─────────────────────────────────────────────► │
/// │                                                                         │
/// │  4. Run Shell ────────────────────────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(config: AppConfig) -> Result<(), ApiError> {
    info!(
        locale = %config.locale,
        db = %config.database_path.display(),
        downloads = %config.download_dir.display(),
        "Starting Drawer-kun"
    );

    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            // Database::new reports the failure if this didn't work.
            let _ = std::fs::create_dir_all(parent);
        }
    }

    let db = DbState::open_or_in_memory(DbConfig::new(&config.database_path)).await?;
    let session = SessionState::new(config.labels(), Local::now().naive_local());
    let export = ExportState::system(&config.download_dir);

    if let Err(e) =
        commands::metadata::load_checker_name(&db, &session, Local::now().naive_local()).await
    {
        warn!(error = %e, "Could not restore checker name");
    }
    info!("State initialized");

    let shell = Shell::new(config, db.clone(), session, export);
    let result = shell.run().await;

    db.inner().close().await;
    result
}

/// Default log filter when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "info,drawer=debug,sqlx=warn";

/// Builds the log filter from a `RUST_LOG`-style directive string.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=drawer=trace` - Show trace for drawer crates only
/// - Default: `info,drawer=debug,sqlx=warn`
///
/// Logs go to stderr so they don't interleave with the table on stdout.
pub fn init_tracing() {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    fn with_filter<R>(directives: Option<&str>, f: impl FnOnce() -> R) -> R {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(log_filter(directives))
            .with_writer(std::io::sink)
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }

    #[test]
    fn test_default_filter_quiets_sqlx() {
        with_filter(None, || {
            assert!(!tracing::enabled!(target: "sqlx::query", Level::INFO));
            assert!(tracing::enabled!(target: "sqlx::query", Level::WARN));
            assert!(tracing::enabled!(target: "drawer_kun::shell", Level::DEBUG));
            assert!(!tracing::enabled!(target: "rustyline", Level::DEBUG));
            assert!(!tracing::enabled!(target: "hyper", Level::TRACE));
        });
    }

    #[test]
    fn test_rust_log_directives_apply() {
        with_filter(Some("warn"), || {
            assert!(!tracing::enabled!(target: "drawer_kun::shell", Level::INFO));
            assert!(tracing::enabled!(target: "drawer_kun::shell", Level::WARN));
        });
    }

    #[test]
    fn test_invalid_rust_log_uses_default() {
        with_filter(Some("drawer=notalevel"), || {
            assert!(!tracing::enabled!(target: "sqlx::query", Level::INFO));
            assert!(tracing::enabled!(target: "drawer_kun::shell", Level::DEBUG));
        });
    }
}
