//! # Export Commands
//!
//! Summary text, copy to clipboard, save as file.
//!
//! ## Export Flow
//! ```text
//! session.summary(now)
//!       │
//!       ├── copy_summary ─────► ClipboardSink ──► "テキストをコピーしました。"
//!       │
//!       └── download_summary ─► DownloadSink ──► drawer-kun-{UTC date}.txt
//! ```
//!
//! The summary is rendered under the session lock and released before any
//! I/O starts.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDateTime, TimeZone};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::sink::{ClipboardSink, DownloadSink};
use crate::state::SessionState;

/// Where the summary went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    Clipboard,
    Download,
}

/// Result of an export.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub mode: ExportMode,

    /// The exported text.
    pub text: String,

    /// Message to show the user, if any.
    pub notice: Option<String>,

    /// Clipboard backend that took the text.
    pub backend: Option<String>,

    pub used_fallback: bool,

    /// File written by a download.
    pub path: Option<PathBuf>,
}

/// Renders the summary text.
pub fn get_summary(session: &SessionState, now: NaiveDateTime) -> String {
    debug!("get_summary command");
    session.with_session(|s| s.summary(now))
}

/// Copies the summary to the clipboard.
///
/// The notice is the same whether the primary clipboard or the fallback
/// took the text.
///
/// ## Errors
/// `CLIPBOARD_ERROR` only when both paths fail.
pub async fn copy_summary(
    session: &SessionState,
    clipboard: &ClipboardSink,
    now: NaiveDateTime,
) -> Result<ExportResponse, ApiError> {
    debug!("copy_summary command");

    let (text, notice) = session.with_session(|s| (s.summary(now), s.labels().copied_notice()));
    let outcome = clipboard.copy(&text).await?;

    Ok(ExportResponse {
        mode: ExportMode::Clipboard,
        text,
        notice: Some(notice.to_string()),
        backend: Some(outcome.backend),
        used_fallback: outcome.used_fallback,
        path: None,
    })
}

/// Saves the summary as `drawer-kun-{date}.txt`.
///
/// The summary uses the local wall-clock time of `now`; the file name uses
/// its UTC date, so an early-morning save east of Greenwich carries the
/// previous day's date.
pub async fn download_summary<Tz: TimeZone>(
    session: &SessionState,
    download: &DownloadSink,
    now: DateTime<Tz>,
) -> Result<ExportResponse, ApiError> {
    debug!("download_summary command");

    let local = now.naive_local();
    let file_date = now.naive_utc().date();

    let text = session.with_session(|s| s.summary(local));
    let path = download.save(&text, file_date).await?;

    Ok(ExportResponse {
        mode: ExportMode::Download,
        text,
        notice: None,
        backend: None,
        used_fallback: false,
        path: Some(path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tally::{set_manual, set_row};
    use crate::commands::test_support::{now, session};
    use crate::error::ErrorCode;
    use crate::sink::clipboard::tests::FakeClipboard;
    use chrono::FixedOffset;

    const EXPECTED: &str = "【ドロアー君 集計結果】
日時: 2026-10-19 21:05
担当者: (未入力)

10,000円: 4枚／40,000円
5,000円: 0枚／0円
2,000円: 0枚／0円
1,000円: 0枚／0円
500円: 103枚／51,500円
100円: 0枚／0円
50円: 0枚／0円
10円: 0枚／0円
5円: 0枚／0円
1円: 0枚／0円

総合計: 91,500円";

    fn counted() -> SessionState {
        let state = session();
        set_row(&state, 500, Some("2"), Some("3")).unwrap();
        set_manual(&state, 10_000, "4").unwrap();
        state
    }

    #[test]
    fn test_summary_text() {
        assert_eq!(get_summary(&counted(), now()), EXPECTED);
    }

    #[tokio::test]
    async fn test_copy_reports_notice_on_fallback() {
        let fallback = FakeClipboard::new("osc52", false);
        let received = fallback.received.clone();
        let sink = ClipboardSink::new(
            Box::new(FakeClipboard::new("system", true)),
            Box::new(fallback),
        );

        let response = copy_summary(&counted(), &sink, now()).await.unwrap();

        assert_eq!(response.notice.as_deref(), Some("テキストをコピーしました。"));
        assert!(response.used_fallback);
        assert_eq!(*received.lock().unwrap(), vec![EXPECTED.to_string()]);
    }

    #[tokio::test]
    async fn test_copy_fails_when_both_paths_fail() {
        let sink = ClipboardSink::new(
            Box::new(FakeClipboard::new("system", true)),
            Box::new(FakeClipboard::new("osc52", true)),
        );

        let err = copy_summary(&counted(), &sink, now()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ClipboardError);
    }

    #[tokio::test]
    async fn test_download_uses_utc_date_for_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DownloadSink::new(dir.path());

        // 2026-10-20 08:00 in Tokyo is still 2026-10-19 in UTC.
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let at = tokyo.with_ymd_and_hms(2026, 10, 20, 8, 0, 0).unwrap();

        let response = download_summary(&counted(), &sink, at).await.unwrap();
        let path = response.path.unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str(),
            Some("drawer-kun-2026-10-19.txt")
        );
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("【ドロアー君 集計結果】\n日時: 2026-10-20 08:00\n"));
        assert!(written.ends_with("総合計: 91,500円"));
    }
}
