//! # Repository Module
//!
//! Database repository implementations for Drawer-kun.
//!
//! ## Repository Pattern
//! ```text
//! Application command
//!      │
//!      │  db.preferences().set_checker_name("佐藤")
//!      ▼
//! PreferenceRepository
//! ├── get(&self, key)
//! ├── set(&self, key, value)
//! └── delete(&self, key)
//!      │
//!      │  SQL Query
//!      ▼
//! SQLite Database
//! ```
//!
//! ## Available Repositories
//!
//! - [`PreferenceRepository`](preference::PreferenceRepository) - Durable key-value preferences

pub mod preference;
