//! # State Module
//!
//! Application state for the tally shell.
//!
//! Each concern gets its own state type, and each command takes only the
//! states it touches.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌────────────┐  ┌───────────┐ │
//! │  │   DbState    │  │  SessionState    │  │ AppConfig  │  │ExportState│ │
//! │  │              │  │                  │  │            │  │           │ │
//! │  │  Database    │  │  Arc<Mutex<      │  │  locale    │  │ clipboard │ │
//! │  │  (SQLite     │  │   TallySession   │  │  db path   │  │ download  │ │
//! │  │   pool)      │  │  >>              │  │  downloads │  │           │ │
//! │  └──────────────┘  └──────────────────┘  └────────────┘  └───────────┘ │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • DbState: Database has internal connection pool (thread-safe)        │
//! │  • SessionState: Arc<Mutex<T>>, never held across an .await            │
//! │  • AppConfig: read-only after startup                                  │
//! │  • ExportState: sinks are Send + Sync                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod export;
mod session;

pub use config::AppConfig;
pub use db::DbState;
pub use export::ExportState;
pub use session::SessionState;
