//! # Validation Module
//!
//! Input parsing and validation for Drawer-kun.
//!
//! ## Two Kinds of Input
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Input Handling                                     │
//! │                                                                         │
//! │  Count fields (bundle, manual)                                         │
//! │  ├── NEVER rejected                                                    │
//! │  └── Anything unusable degrades to 0                                   │
//! │                                                                         │
//! │  Check metadata                                                        │
//! │  ├── Timestamp: kept as typed, unparsable means "now" at render time   │
//! │  └── Checker name: trimmed, length-limited (it is persisted)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use drawer_core::validation::{parse_count, validate_checker_name};
//!
//! assert_eq!(parse_count("12"), 12);
//! assert_eq!(parse_count("abc"), 0);
//! assert_eq!(validate_checker_name("  Sato ").unwrap(), "Sato");
//! ```

use chrono::NaiveDateTime;

use crate::error::ValidationError;
use crate::MAX_CHECKER_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Formats accepted for the check timestamp field.
///
/// The first is what a `datetime-local` input produces; the second is the
/// same with seconds, which some browsers emit when a step is set.
const CHECK_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

// =============================================================================
// Count Parsing
// =============================================================================

/// Parses a raw count field as a non-negative integer.
///
/// ## Rules
/// - Leading whitespace is skipped, then an optional `+`/`-` sign
/// - The longest run of ASCII digits that follows is the value
///   (`"12abc"` → 12, `"3.9"` → 3)
/// - No digits at all → 0
/// - A negative value → 0
/// - Values past `u32::MAX` saturate
///
/// Never fails: invalid input is treated exactly like an empty field.
///
/// ## Example
/// ```rust
/// use drawer_core::validation::parse_count;
///
/// assert_eq!(parse_count(" 7"), 7);
/// assert_eq!(parse_count("-3"), 0);
/// assert_eq!(parse_count(""), 0);
/// ```
pub fn parse_count(raw: &str) -> u32 {
    let s = raw.trim_start();

    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: u32 = 0;
    let mut seen_digit = false;

    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        value = value.saturating_mul(10).saturating_add(u32::from(b - b'0'));
    }

    if !seen_digit || negative {
        return 0;
    }

    value
}

/// Parses an optional raw count field; a missing field counts as 0.
#[inline]
pub fn parse_optional_count(raw: Option<&str>) -> u32 {
    raw.map(parse_count).unwrap_or(0)
}

// =============================================================================
// Check Metadata
// =============================================================================

/// Validates and normalizes a checker name.
///
/// ## Rules
/// - Surrounding whitespace is trimmed
/// - Empty is allowed (renders as "not entered")
/// - At most [`MAX_CHECKER_NAME_LEN`] characters
///
/// ## Returns
/// The trimmed name.
pub fn validate_checker_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.chars().count() > MAX_CHECKER_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "checker name".to_string(),
            max: MAX_CHECKER_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Parses the check timestamp field (`YYYY-MM-DDTHH:MM`).
///
/// ## Returns
/// `None` for blank or unparsable text; callers substitute the current time.
///
/// ## Example
/// ```rust
/// use drawer_core::validation::parse_check_timestamp;
///
/// assert!(parse_check_timestamp("2026-10-19T09:30").is_some());
/// assert!(parse_check_timestamp("").is_none());
/// assert!(parse_check_timestamp("yesterday").is_none());
/// ```
pub fn parse_check_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    CHECK_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

// =============================================================================
// Unit Tests
// =============================================================================
