//! # Tally Commands
//!
//! Row edits and reset.
//!
//! ## Tally Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Tally Lifecycle                                      │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                         │
//! │  │  Empty   │────►│ Counting │────►│ Recorded │                         │
//! │  │  sheet   │     │          │     │ in hist. │                         │
//! │  └──────────┘     └──────────┘     └────┬─────┘                         │
//! │       ▲            set_bundle           │                               │
//! │       │            set_manual           │                               │
//! │       │            set_row              │                               │
//! │       └──────────── reset_all ◄─────────┘                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows are addressed by face value (`500`, `10000`), not by index.

use chrono::NaiveDateTime;
use drawer_core::types::index_of_face_value;
use drawer_core::{HistoryEntry, RowTotals, TallySession, Yen};
use serde::Serialize;
use tracing::{debug, info};

use crate::commands::history::HistoryResponse;
use crate::error::ApiError;
use crate::state::SessionState;

/// The table: every row and the grand total.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TallyResponse {
    pub rows: Vec<RowTotals>,
    pub grand_total: Yen,
    pub total_pieces: u64,
}

impl From<&TallySession> for TallyResponse {
    fn from(session: &TallySession) -> Self {
        let tally = session.tally();
        TallyResponse {
            rows: tally.rows(),
            grand_total: tally.grand_total(),
            total_pieces: tally.total_pieces(),
        }
    }
}

/// Result of a reset: the entry just recorded plus the cleared table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetResponse {
    pub recorded: HistoryEntry,
    pub tally: TallyResponse,
    pub history: HistoryResponse,
}

/// Gets the current table.
pub fn get_tally(session: &SessionState) -> TallyResponse {
    debug!("get_tally command");
    session.with_session(|s| TallyResponse::from(s))
}

/// Replaces both counts of a row.
///
/// ## Arguments
/// * `face_value` - Denomination, e.g. `500`
/// * `bundle` / `manual` - Raw field text; missing or non-numeric reads as 0
///
/// ## Errors
/// `UNKNOWN_DENOMINATION` if `face_value` isn't one of the ten.
pub fn set_row(
    session: &SessionState,
    face_value: i64,
    bundle: Option<&str>,
    manual: Option<&str>,
) -> Result<TallyResponse, ApiError> {
    debug!(face_value, ?bundle, ?manual, "set_row command");

    let index = index_of_face_value(face_value)?;
    session.with_session_mut(|s| -> Result<TallyResponse, ApiError> {
        s.set_row(index, bundle, manual)?;
        Ok(TallyResponse::from(&*s))
    })
}

/// Updates a row's bundle count. Ignored on bill rows.
pub fn set_bundle(
    session: &SessionState,
    face_value: i64,
    raw: &str,
) -> Result<TallyResponse, ApiError> {
    debug!(face_value, raw = %raw, "set_bundle command");

    let index = index_of_face_value(face_value)?;
    session.with_session_mut(|s| -> Result<TallyResponse, ApiError> {
        let row = s.set_bundle(index, raw)?;
        if !row.supports_bundle {
            debug!(face_value, "Bundle count ignored for this denomination");
        }
        Ok(TallyResponse::from(&*s))
    })
}

/// Updates a row's loose piece count.
pub fn set_manual(
    session: &SessionState,
    face_value: i64,
    raw: &str,
) -> Result<TallyResponse, ApiError> {
    debug!(face_value, raw = %raw, "set_manual command");

    let index = index_of_face_value(face_value)?;
    session.with_session_mut(|s| -> Result<TallyResponse, ApiError> {
        s.set_manual(index, raw)?;
        Ok(TallyResponse::from(&*s))
    })
}

/// Records the grand total in the history, then clears every row.
///
/// A zero total is recorded too. The checker name and timestamp stay.
pub fn reset_all(session: &SessionState, now: NaiveDateTime) -> ResetResponse {
    debug!("reset_all command");

    session.with_session_mut(|s| {
        let recorded = s.reset(now);
        info!(
            total = recorded.total.yen(),
            history_len = s.history().len(),
            "Tally reset"
        );

        ResetResponse {
            recorded,
            tally: TallyResponse::from(&*s),
            history: HistoryResponse::from(s.history()),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{now, session};
    use crate::error::ErrorCode;

    #[test]
    fn test_worked_example() {
        let state = session();

        set_row(&state, 500, Some("2"), Some("3")).unwrap();
        let response = set_manual(&state, 10_000, "4").unwrap();

        assert_eq!(response.rows[4].quantity, 103);
        assert_eq!(response.rows[4].subtotal.yen(), 51_500);
        assert_eq!(response.rows[0].quantity, 4);
        assert_eq!(response.rows[0].subtotal.yen(), 40_000);
        assert_eq!(response.grand_total.yen(), 91_500);
        assert_eq!(response.total_pieces, 107);
    }

    #[test]
    fn test_bundle_on_bill_row_is_ignored() {
        let state = session();

        let response = set_bundle(&state, 1_000, "5").unwrap();

        assert_eq!(response.rows[3].bundle_count, 0);
        assert!(response.grand_total.is_zero());
    }

    #[test]
    fn test_non_numeric_reads_as_zero() {
        let state = session();

        set_manual(&state, 100, "7").unwrap();
        let response = set_manual(&state, 100, "abc").unwrap();

        assert_eq!(response.rows[5].manual_count, 0);
        assert!(response.grand_total.is_zero());
    }

    #[test]
    fn test_unknown_face_value() {
        let state = session();

        let err = set_manual(&state, 3_000, "1").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownDenomination);
    }

    #[test]
    fn test_reset_records_and_clears() {
        let state = session();
        set_row(&state, 500, Some("2"), Some("3")).unwrap();
        set_manual(&state, 10_000, "4").unwrap();

        let response = reset_all(&state, now());

        assert_eq!(response.recorded.text, "総合計: 91500 円");
        assert!(response.tally.grand_total.is_zero());
        assert_eq!(response.history.entries.len(), 1);
        assert!(get_tally(&state).rows.iter().all(|r| r.quantity == 0));
    }

    #[test]
    fn test_json_shape() {
        let state = session();
        set_manual(&state, 1, "3").unwrap();

        let json = serde_json::to_value(get_tally(&state)).unwrap();
        assert_eq!(json["grandTotal"], 3);
        assert_eq!(json["rows"][9]["manualCount"], 3);
    }
}
