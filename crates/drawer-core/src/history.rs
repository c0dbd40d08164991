//! # History Log
//!
//! Fixed-capacity FIFO of past grand totals.
//!
//! ```text
//! record(A) record(B) ... record(J)   → [A B C D E F G H I J]   (len 10)
//! record(K)                           → [B C D E F G H I J K]   (A evicted)
//! ```
//!
//! Entries are appended at the tail and only ever leave from the head, by
//! eviction. Nothing edits an entry after it is recorded.

use std::collections::VecDeque;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::money::Yen;
use crate::summary::Labels;
use crate::HISTORY_CAPACITY;

/// A recorded grand total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// The grand total at reset time.
    pub total: Yen,

    /// Local time of the reset.
    pub recorded_at: NaiveDateTime,

    /// Display text, e.g. `総合計: 91500 円`.
    pub text: String,
}

/// Ordered log of past totals, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl HistoryLog {
    /// Creates an empty log with the standard capacity of 10.
    pub fn new() -> Self {
        HistoryLog::with_capacity(HISTORY_CAPACITY)
    }

    /// Creates an empty log holding at most `capacity` entries.
    ///
    /// A capacity of 0 is raised to 1 so `record` always keeps the newest.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        HistoryLog {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Appends a total and evicts the oldest entry if over capacity.
    ///
    /// ## Returns
    /// The entry that was just recorded.
    pub fn record(&mut self, total: Yen, recorded_at: NaiveDateTime, labels: &Labels) -> &HistoryEntry {
        self.entries.push_back(HistoryEntry {
            total,
            recorded_at,
            text: labels.history_entry(total),
        });

        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }

        // Just pushed, so the deque is non-empty.
        &self.entries[self.entries.len() - 1]
    }

    /// Iterates entries oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Display texts, oldest first.
    pub fn texts(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.text.clone()).collect()
    }

    /// The most recent entry.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        HistoryLog::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(20, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_record_appends_in_order() {
        let mut log = HistoryLog::new();
        log.record(Yen::from_yen(100), ts(0), &Labels::ja());
        log.record(Yen::from_yen(200), ts(1), &Labels::ja());

        assert_eq!(log.texts(), vec!["総合計: 100 円", "総合計: 200 円"]);
        assert_eq!(log.latest().unwrap().total.yen(), 200);
    }

    #[test]
    fn test_eleven_records_evict_first() {
        let mut log = HistoryLog::new();
        for i in 1..=11 {
            log.record(Yen::from_yen(i), ts(i as u32), &Labels::en());
        }

        assert_eq!(log.len(), HISTORY_CAPACITY);
        let totals: Vec<i64> = log.entries().map(|e| e.total.yen()).collect();
        assert_eq!(totals, (2..=11).collect::<Vec<i64>>());
        assert_eq!(log.texts()[0], "Grand Total: 2 yen");
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut log = HistoryLog::with_capacity(3);
        for i in 0..50 {
            log.record(Yen::from_yen(i), ts(0), &Labels::ja());
            assert!(log.len() <= 3);
        }
        assert_eq!(log.latest().unwrap().total.yen(), 49);
    }

    #[test]
    fn test_zero_capacity_keeps_newest() {
        let mut log = HistoryLog::with_capacity(0);
        log.record(Yen::from_yen(1), ts(0), &Labels::ja());
        log.record(Yen::from_yen(2), ts(1), &Labels::ja());

        assert_eq!(log.capacity(), 1);
        assert_eq!(log.texts(), vec!["総合計: 2 円"]);
    }
}
