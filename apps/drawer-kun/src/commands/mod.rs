//! # Commands Module
//!
//! Every operation the shell can perform, as plain functions over state.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── tally.rs     ◄─── Row edits, grand total, reset
//! ├── history.rs   ◄─── Past totals
//! ├── metadata.rs  ◄─── Checker name, check timestamp
//! ├── export.rs    ◄─── Summary text, copy, download
//! └── config.rs    ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  shell> manual 10000 4                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::tally::set_manual(                                           │
//! │      &session,         ◄── state the command needs                      │
//! │      10_000,           ◄── face value                                   │
//! │      "4",              ◄── raw field text                               │
//! │  ) -> Result<TallyResponse, ApiError>                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  shell renders TallyResponse                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands that depend on the time take it as an argument; the shell passes
//! the local clock.

pub mod config;
pub mod export;
pub mod history;
pub mod metadata;
pub mod tally;

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{NaiveDate, NaiveDateTime};
    use drawer_core::Labels;

    use crate::state::SessionState;

    pub fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(21, 5, 0)
            .unwrap()
    }

    pub fn session() -> SessionState {
        SessionState::new(Labels::ja(), now())
    }
}
