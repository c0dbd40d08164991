//! # drawer-core: Pure Tally Logic for Drawer-kun
//!
//! This crate is the computation core of Drawer-kun, the cash-drawer tally
//! calculator. Everything here is a pure function over explicit state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Drawer-kun Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Tally shell (apps/drawer-kun)                   │   │
//! │  │    table ──► reset ──► history ──► copy / download              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ drawer-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  tally  │ │ history │ │ summary │ │ session │  │   │
//! │  │   │ 10 rows │ │ rows &  │ │ 10-slot │ │ export  │ │ owns it │  │   │
//! │  │   │         │ │ totals  │ │  FIFO   │ │  text   │ │   all   │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK READS • PURE FUNCTIONS                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                drawer-db (checker name store)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Denomination table, locale, check metadata
//! - [`money`] - Integer yen with thousands grouping
//! - [`tally`] - Row calculator and grand total aggregator
//! - [`history`] - 10-entry FIFO of past totals
//! - [`summary`] - Export text formatter and locale labels
//! - [`session`] - One counting session owning all of the above
//! - [`validation`] - Lenient count parsing, metadata checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use drawer_core::summary::Labels;
//! use drawer_core::types::index_of_face_value;
//! use drawer_core::TallySession;
//!
//! let now = NaiveDate::from_ymd_opt(2026, 10, 19)
//!     .unwrap()
//!     .and_hms_opt(21, 0, 0)
//!     .unwrap();
//! let mut session = TallySession::new(Labels::ja(), now);
//!
//! // 500円: 2 bundles + 3 loose coins, 10,000円: 4 bills
//! session.set_row(index_of_face_value(500).unwrap(), Some("2"), Some("3")).unwrap();
//! session.set_manual(index_of_face_value(10_000).unwrap(), "4").unwrap();
//! assert_eq!(session.grand_total().yen(), 91_500);
//!
//! let entry = session.reset(now);
//! assert_eq!(entry.text, "総合計: 91500 円");
//! assert!(session.grand_total().is_zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod history;
pub mod money;
pub mod session;
pub mod summary;
pub mod tally;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use history::{HistoryEntry, HistoryLog};
pub use money::Yen;
pub use session::TallySession;
pub use summary::Labels;
pub use tally::{RowInput, RowTotals, Tally};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of past grand totals kept in the history log.
pub const HISTORY_CAPACITY: usize = 10;

/// Maximum length of the checker name, in characters.
///
/// The name is persisted and printed on every summary; anything longer is
/// almost certainly a paste accident.
pub const MAX_CHECKER_NAME_LEN: usize = 100;
