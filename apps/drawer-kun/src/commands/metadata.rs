//! # Metadata Commands
//!
//! Who counted the drawer and when.
//!
//! ## Persistence
//! ```text
//! startup ──► load_checker_name ──► preferences["drawer-kun.checker-name"]
//!                                          │
//!                                          ▼
//!                                   session.metadata
//!                                          ▲
//! name 佐藤 ──► set_checker_name ──────────┤
//!                     │                    │
//!                     └──► preferences (upsert)
//! ```
//!
//! The check timestamp is never persisted.

use chrono::NaiveDateTime;
use drawer_core::summary::{resolve_timestamp, SUMMARY_TIMESTAMP_FORMAT};
use drawer_core::validation::{parse_check_timestamp, validate_checker_name};
use drawer_core::{CheckMetadata, CoreError, TallySession};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::{DbState, SessionState};

/// Check metadata as typed, plus the timestamp the summary will print.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataResponse {
    pub timestamp: String,
    pub checker_name: String,
    /// `YYYY-MM-DD HH:MM`; falls back to `now` when `timestamp` is blank or
    /// doesn't parse.
    pub resolved_timestamp: String,
    pub timestamp_valid: bool,
}

impl MetadataResponse {
    fn build(session: &TallySession, now: NaiveDateTime) -> Self {
        let CheckMetadata {
            timestamp,
            checker_name,
        } = session.metadata().clone();

        let resolved = resolve_timestamp(session.metadata(), now);
        MetadataResponse {
            timestamp_valid: parse_check_timestamp(&timestamp).is_some(),
            timestamp,
            checker_name,
            resolved_timestamp: resolved.format(SUMMARY_TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Gets the current metadata.
pub fn get_metadata(session: &SessionState, now: NaiveDateTime) -> MetadataResponse {
    debug!("get_metadata command");
    session.with_session(|s| MetadataResponse::build(s, now))
}

/// Restores the persisted checker name into the session.
///
/// A stored name that no longer validates is skipped with a warning.
pub async fn load_checker_name(
    db: &DbState,
    session: &SessionState,
    now: NaiveDateTime,
) -> Result<MetadataResponse, ApiError> {
    debug!("load_checker_name command");

    if let Some(stored) = db.inner().preferences().checker_name().await? {
        let applied = session.with_session_mut(|s| s.set_checker_name(&stored).map(str::to_string));
        match applied {
            Ok(name) => info!(checker = %name, "Checker name restored"),
            Err(e) => warn!(error = %e, "Ignoring stored checker name"),
        }
    }

    Ok(get_metadata(session, now))
}

/// Persists the checker name, then applies it to the session.
///
/// ## Errors
/// - `VALIDATION_ERROR` if the trimmed name is longer than 100 characters
/// - `DATABASE_ERROR` if the store rejects the write
///
/// The session keeps its previous name on either error.
pub async fn set_checker_name(
    db: &DbState,
    session: &SessionState,
    name: &str,
    now: NaiveDateTime,
) -> Result<MetadataResponse, ApiError> {
    debug!(name = %name, "set_checker_name command");

    let name = validate_checker_name(name).map_err(CoreError::from)?;
    db.inner().preferences().set_checker_name(&name).await?;
    session.with_session_mut(|s| s.set_checker_name(&name).map(|_| ()))?;

    Ok(get_metadata(session, now))
}

/// Sets the check timestamp field. An empty value means "now".
///
/// Text that doesn't parse is kept as typed; the summary then uses the
/// current time.
pub fn set_check_timestamp(
    session: &SessionState,
    raw: &str,
    now: NaiveDateTime,
) -> MetadataResponse {
    debug!(raw = %raw, "set_check_timestamp command");

    session.with_session_mut(|s| {
        s.set_check_timestamp(raw);
        MetadataResponse::build(s, now)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{now, session};
    use crate::error::ErrorCode;
    use drawer_db::{Database, DbConfig};

    async fn db() -> DbState {
        DbState::new(Database::new(DbConfig::in_memory()).await.unwrap())
    }

    #[tokio::test]
    async fn test_set_checker_name_persists() {
        let db = db().await;
        let state = session();

        let response = set_checker_name(&db, &state, "  佐藤  ", now()).await.unwrap();

        assert_eq!(response.checker_name, "佐藤");
        assert_eq!(
            db.inner().preferences().checker_name().await.unwrap().as_deref(),
            Some("佐藤")
        );
    }

    #[tokio::test]
    async fn test_load_restores_name_into_new_session() {
        let db = db().await;
        set_checker_name(&db, &session(), "Sato", now()).await.unwrap();

        let fresh = session();
        let response = load_checker_name(&db, &fresh, now()).await.unwrap();

        assert_eq!(response.checker_name, "Sato");
        assert!(fresh.with_session(|s| s.summary(now())).contains("担当者: Sato"));
    }

    #[tokio::test]
    async fn test_load_with_nothing_stored() {
        let db = db().await;
        let response = load_checker_name(&db, &session(), now()).await.unwrap();
        assert_eq!(response.checker_name, "");
    }

    #[tokio::test]
    async fn test_too_long_name_is_rejected_and_not_stored() {
        let db = db().await;
        let state = session();

        let err = set_checker_name(&db, &state, &"x".repeat(101), now())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(db.inner().preferences().checker_name().await.unwrap(), None);
        assert_eq!(get_metadata(&state, now()).checker_name, "");
    }

    #[tokio::test]
    async fn test_failed_write_leaves_session_unchanged() {
        let db = db().await;
        let state = session();
        set_checker_name(&db, &state, "佐藤", now()).await.unwrap();

        db.inner().close().await;
        let err = set_checker_name(&db, &state, "Sato", now())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(get_metadata(&state, now()).checker_name, "佐藤");
        assert!(state.with_session(|s| s.summary(now())).contains("担当者: 佐藤"));
    }

    #[test]
    fn test_timestamp_resolution() {
        let state = session();

        let response = set_check_timestamp(&state, "2024-03-15T08:30", now());
        assert!(response.timestamp_valid);
        assert_eq!(response.resolved_timestamp, "2024-03-15 08:30");

        let response = set_check_timestamp(&state, "yesterday", now());
        assert!(!response.timestamp_valid);
        assert_eq!(response.timestamp, "yesterday");
        assert_eq!(response.resolved_timestamp, "2026-10-19 21:05");

        let response = set_check_timestamp(&state, "", now());
        assert_eq!(response.resolved_timestamp, "2026-10-19 21:05");
    }
}
