//! # Tally Session
//!
//! One counting session: the ten rows, the history log and the check
//! metadata, owned together.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TallySession                                                          │
//! │  ├── tally      Tally        ← edited on every input change           │
//! │  ├── history    HistoryLog   ← appended on reset only                 │
//! │  └── metadata   CheckMetadata                                          │
//! │                                                                         │
//! │  reset(now):  history.record(tally.grand_total()) ; tally.clear()      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session never reads the clock. Operations that need a time take it as
//! an argument, which keeps every session deterministic under test and lets
//! many sessions live side by side.

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::error::CoreResult;
use crate::history::{HistoryEntry, HistoryLog};
use crate::money::Yen;
use crate::summary::{self, Labels};
use crate::tally::{RowTotals, Tally};
use crate::types::CheckMetadata;
use crate::validation::validate_checker_name;

/// A single tally session.
#[derive(Debug, Clone)]
pub struct TallySession {
    id: Uuid,
    started_at: NaiveDateTime,
    labels: Labels,
    tally: Tally,
    history: HistoryLog,
    metadata: CheckMetadata,
}

impl TallySession {
    /// Starts a session with empty counts and an empty history.
    pub fn new(labels: Labels, started_at: NaiveDateTime) -> Self {
        TallySession {
            id: Uuid::new_v4(),
            started_at,
            labels,
            tally: Tally::new(),
            history: HistoryLog::new(),
            metadata: CheckMetadata::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> NaiveDateTime {
        self.started_at
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn metadata(&self) -> &CheckMetadata {
        &self.metadata
    }

    // -------------------------------------------------------------------------
    // Row editing
    // -------------------------------------------------------------------------

    /// Replaces both counts of a row. See [`Tally::set_row`].
    pub fn set_row(
        &mut self,
        index: usize,
        bundle_raw: Option<&str>,
        manual_raw: Option<&str>,
    ) -> CoreResult<RowTotals> {
        self.tally.set_row(index, bundle_raw, manual_raw)
    }

    /// Updates a row's bundle field. See [`Tally::set_bundle`].
    pub fn set_bundle(&mut self, index: usize, raw: &str) -> CoreResult<RowTotals> {
        self.tally.set_bundle(index, raw)
    }

    /// Updates a row's manual field. See [`Tally::set_manual`].
    pub fn set_manual(&mut self, index: usize, raw: &str) -> CoreResult<RowTotals> {
        self.tally.set_manual(index, raw)
    }

    pub fn grand_total(&self) -> Yen {
        self.tally.grand_total()
    }

    // -------------------------------------------------------------------------
    // Reset
    // -------------------------------------------------------------------------

    /// Records the current grand total into the history, then zeroes every
    /// row.
    ///
    /// The total is recorded even when it is zero. The history itself and the
    /// check metadata are left untouched.
    pub fn reset(&mut self, now: NaiveDateTime) -> HistoryEntry {
        let total = self.tally.grand_total();
        let entry = self.history.record(total, now, &self.labels).clone();
        self.tally.clear();
        entry
    }

    // -------------------------------------------------------------------------
    // Metadata
    // -------------------------------------------------------------------------

    /// Sets the checker name after trimming and length validation.
    pub fn set_checker_name(&mut self, name: &str) -> CoreResult<&str> {
        self.metadata.checker_name = validate_checker_name(name)?;
        Ok(&self.metadata.checker_name)
    }

    /// Stores the timestamp field exactly as typed.
    ///
    /// Nothing is rejected here: text that doesn't parse falls back to the
    /// current time when the summary is rendered.
    pub fn set_check_timestamp(&mut self, raw: &str) {
        self.metadata.timestamp = raw.trim().to_string();
    }

    // -------------------------------------------------------------------------
    // Summary
    // -------------------------------------------------------------------------

    /// Renders the export text for the current state.
    pub fn summary(&self, now: NaiveDateTime) -> String {
        summary::render(&self.tally, &self.metadata, now, &self.labels)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
