//! # drawer-db: Preference Store for Drawer-kun
//!
//! Durable storage for the few settings that outlive a tally session.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  set_checker_name command                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     drawer-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌──────────────────┐   ┌─────────────┐  │   │
//! │  │   │   Database    │    │   Repositories   │   │ Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ PreferenceRepo   │   │ (embedded)  │  │   │
//! │  │   └───────────────┘    └──────────────────┘   └─────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  drawer-kun.db (platform data dir)                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tally counts and the history log are deliberately NOT stored here; they
//! live only as long as the session.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use drawer_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/drawer-kun.db")).await?;
//! db.preferences().set_checker_name("佐藤").await?;
//! let name = db.preferences().checker_name().await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::preference::{PreferenceRepository, CHECKER_NAME_KEY};
