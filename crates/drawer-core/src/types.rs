//! # Domain Types
//!
//! Core domain types used throughout Drawer-kun.
//!
//! ## Denomination Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  index │ name      │ face value │ bundle (50 pcs)                       │
//! │  ──────┼───────────┼────────────┼────────────────                       │
//! │    0   │ 10,000円  │   10000    │   no                                  │
//! │    1   │  5,000円  │    5000    │   no                                  │
//! │    2   │  2,000円  │    2000    │   no                                  │
//! │    3   │  1,000円  │    1000    │   no                                  │
//! │    4   │    500円  │     500    │   yes                                 │
//! │    5   │    100円  │     100    │   yes                                 │
//! │    6   │     50円  │      50    │   yes                                 │
//! │    7   │     10円  │      10    │   yes                                 │
//! │    8   │      5円  │       5    │   yes                                 │
//! │    9   │      1円  │       1    │   yes                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The table is fixed: rows are never added, removed or reordered at runtime,
//! and every other module addresses a row by its index into [`DENOMINATIONS`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Yen;

// =============================================================================
// Denomination
// =============================================================================

/// One tier of currency with a fixed face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Denomination {
    /// Display name as printed on the tally sheet ("10,000円").
    pub name: &'static str,

    /// Face value in yen.
    pub face_value: i64,

    /// Whether this tier can be entered as bundles of [`BUNDLE_SIZE`].
    pub supports_bundle: bool,
}

impl Denomination {
    const fn new(name: &'static str, face_value: i64, supports_bundle: bool) -> Self {
        Denomination {
            name,
            face_value,
            supports_bundle,
        }
    }

    /// Returns the face value as Yen.
    #[inline]
    pub const fn value(&self) -> Yen {
        Yen::from_yen(self.face_value)
    }
}

/// Pieces in one bundle (a roll of coins).
pub const BUNDLE_SIZE: u64 = 50;

/// Number of rows on the tally sheet.
pub const DENOMINATION_COUNT: usize = 10;

/// The fixed denomination table, highest value first.
pub const DENOMINATIONS: [Denomination; DENOMINATION_COUNT] = [
    Denomination::new("10,000円", 10_000, false),
    Denomination::new("5,000円", 5_000, false),
    Denomination::new("2,000円", 2_000, false),
    Denomination::new("1,000円", 1_000, false),
    Denomination::new("500円", 500, true),
    Denomination::new("100円", 100, true),
    Denomination::new("50円", 50, true),
    Denomination::new("10円", 10, true),
    Denomination::new("5円", 5, true),
    Denomination::new("1円", 1, true),
];

/// Looks up a denomination by row index.
pub fn denomination(index: usize) -> CoreResult<&'static Denomination> {
    DENOMINATIONS
        .get(index)
        .ok_or_else(|| CoreError::UnknownDenomination(index.to_string()))
}

/// Finds the row index of the denomination with the given face value.
///
/// ## Example
/// ```rust
/// use drawer_core::types::index_of_face_value;
///
/// assert_eq!(index_of_face_value(500).unwrap(), 4);
/// assert!(index_of_face_value(3000).is_err());
/// ```
pub fn index_of_face_value(face_value: i64) -> CoreResult<usize> {
    DENOMINATIONS
        .iter()
        .position(|d| d.face_value == face_value)
        .ok_or_else(|| CoreError::UnknownDenomination(format!("{}円", face_value)))
}

// =============================================================================
// Locale
// =============================================================================

/// Language for every fixed label in rendered text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Japanese labels (the tally sheet's native language).
    #[default]
    Ja,
    /// English labels.
    En,
}

impl FromStr for Locale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ja" | "ja-jp" | "jp" => Ok(Locale::Ja),
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            _ => Err(ValidationError::NotAllowed {
                field: "locale".to_string(),
                allowed: vec!["ja".to_string(), "en".to_string()],
            }),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Ja => f.write_str("ja"),
            Locale::En => f.write_str("en"),
        }
    }
}

// =============================================================================
// Check Metadata
// =============================================================================

/// Who counted the drawer and when.
///
/// Both fields hold the raw text of the form inputs. Interpretation happens
/// at render time: a blank or unparsable timestamp means "now", a blank name
/// means "not entered".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckMetadata {
    /// Editable date-time in `YYYY-MM-DDTHH:MM` form, or empty.
    pub timestamp: String,

    /// Free-text checker name, or empty.
    pub checker_name: String,
}

impl CheckMetadata {
    /// Creates metadata with only a checker name (timestamp left to "now").
    pub fn with_checker(name: impl Into<String>) -> Self {
        CheckMetadata {
            timestamp: String::new(),
            checker_name: name.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
