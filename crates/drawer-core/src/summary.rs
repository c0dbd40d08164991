//! # Summary Formatter
//!
//! Renders the tally as the fixed-format text block used for export.
//!
//! ## Layout (Japanese labels)
//! ```text
//! 【ドロアー君 集計結果】
//! 日時: 2026-10-19 09:30
//! 担当者: 佐藤
//!
//! 10,000円: 4枚／40,000円
//! 5,000円: 0枚／0円
//! ...
//! 1円: 0枚／0円
//!
//! 総合計: 91,500円
//! ```
//!
//! [`render`] is pure: the current time is a parameter, so the same state,
//! metadata and instant always produce the same text.

use chrono::NaiveDateTime;

use crate::money::Yen;
use crate::tally::{RowTotals, Tally};
use crate::types::{CheckMetadata, Locale};
use crate::validation::parse_check_timestamp;

/// Output format of the check timestamp line.
pub const SUMMARY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

// =============================================================================
// Labels
// =============================================================================

/// Fixed strings for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    locale: Locale,
    title: &'static str,
    timestamp_prefix: &'static str,
    checker_prefix: &'static str,
    not_entered: &'static str,
    copied_notice: &'static str,
}

impl Labels {
    /// Japanese labels.
    pub const fn ja() -> Self {
        Labels {
            locale: Locale::Ja,
            title: "【ドロアー君 集計結果】",
            timestamp_prefix: "日時: ",
            checker_prefix: "担当者: ",
            not_entered: "(未入力)",
            copied_notice: "テキストをコピーしました。",
        }
    }

    /// English labels.
    pub const fn en() -> Self {
        Labels {
            locale: Locale::En,
            title: "[Drawer-kun Tally]",
            timestamp_prefix: "Checked at: ",
            checker_prefix: "Checker: ",
            not_entered: "(not entered)",
            copied_notice: "Text copied.",
        }
    }

    /// Labels for the given locale.
    pub const fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::Ja => Labels::ja(),
            Locale::En => Labels::en(),
        }
    }

    pub const fn locale(&self) -> Locale {
        self.locale
    }

    pub const fn title(&self) -> &'static str {
        self.title
    }

    /// Placeholder for a blank checker name.
    pub const fn not_entered(&self) -> &'static str {
        self.not_entered
    }

    /// Notification shown after a successful copy.
    pub const fn copied_notice(&self) -> &'static str {
        self.copied_notice
    }

    /// Name of a row as printed in the summary.
    pub fn row_name(&self, row: &RowTotals) -> String {
        match self.locale {
            Locale::Ja => row.name.to_string(),
            Locale::En => format!("{} yen", Yen::from_yen(row.face_value).grouped()),
        }
    }

    /// One denomination line: `100円: 12枚／1,200円`.
    pub fn row_line(&self, row: &RowTotals) -> String {
        match self.locale {
            Locale::Ja => format!(
                "{}: {}枚／{}円",
                self.row_name(row),
                row.quantity,
                row.subtotal.grouped()
            ),
            Locale::En => format!(
                "{}: {} pcs / {} yen",
                self.row_name(row),
                row.quantity,
                row.subtotal.grouped()
            ),
        }
    }

    /// Grand total line, thousands-separated.
    pub fn grand_total_line(&self, total: Yen) -> String {
        match self.locale {
            Locale::Ja => format!("総合計: {}円", total.grouped()),
            Locale::En => format!("Grand Total: {} yen", total.grouped()),
        }
    }

    /// History entry text. The amount is the raw integer, ungrouped.
    pub fn history_entry(&self, total: Yen) -> String {
        match self.locale {
            Locale::Ja => format!("総合計: {} 円", total.yen()),
            Locale::En => format!("Grand Total: {} yen", total.yen()),
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Labels::ja()
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Resolves the check timestamp: the metadata field if it parses, else `now`.
pub fn resolve_timestamp(metadata: &CheckMetadata, now: NaiveDateTime) -> NaiveDateTime {
    parse_check_timestamp(&metadata.timestamp).unwrap_or(now)
}

/// Renders the summary text.
///
/// ## Arguments
/// * `tally` - Current counts
/// * `metadata` - Check timestamp and checker name, as typed
/// * `now` - Local time used when the timestamp field is blank or unparsable
/// * `labels` - Locale strings
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use drawer_core::summary::{render, Labels};
/// use drawer_core::tally::Tally;
/// use drawer_core::types::CheckMetadata;
///
/// let now = NaiveDate::from_ymd_opt(2026, 10, 19)
///     .unwrap()
///     .and_hms_opt(9, 30, 0)
///     .unwrap();
/// let text = render(&Tally::new(), &CheckMetadata::default(), now, &Labels::ja());
///
/// assert!(text.starts_with("【ドロアー君 集計結果】\n日時: 2026-10-19 09:30\n"));
/// assert!(text.ends_with("総合計: 0円"));
/// ```
pub fn render(
    tally: &Tally,
    metadata: &CheckMetadata,
    now: NaiveDateTime,
    labels: &Labels,
) -> String {
    let timestamp = resolve_timestamp(metadata, now);

    let checker = metadata.checker_name.trim();
    let checker = if checker.is_empty() {
        labels.not_entered()
    } else {
        checker
    };

    let mut lines = Vec::with_capacity(16);
    lines.push(labels.title().to_string());
    lines.push(format!(
        "{}{}",
        labels.timestamp_prefix,
        timestamp.format(SUMMARY_TIMESTAMP_FORMAT)
    ));
    lines.push(format!("{}{}", labels.checker_prefix, checker));
    lines.push(String::new());

    lines.extend(tally.rows().iter().map(|row| labels.row_line(row)));

    lines.push(String::new());
    lines.push(labels.grand_total_line(tally.grand_total()));

    lines.join("\n")
}

// =============================================================================
// Unit Tests
// =============================================================================
