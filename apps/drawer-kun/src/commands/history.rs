//! # History Commands
//!
//! The list of grand totals recorded by reset, oldest first.

use drawer_core::{HistoryEntry, HistoryLog};
use serde::Serialize;
use tracing::debug;

use crate::state::SessionState;

/// Past totals, oldest first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntry>,
    pub capacity: usize,
}

impl From<&HistoryLog> for HistoryResponse {
    fn from(log: &HistoryLog) -> Self {
        HistoryResponse {
            entries: log.entries().cloned().collect(),
            capacity: log.capacity(),
        }
    }
}

/// Gets the history list.
pub fn get_history(session: &SessionState) -> HistoryResponse {
    debug!("get_history command");
    session.with_session(|s| HistoryResponse::from(s.history()))
}
