//! # Error Types
//!
//! Domain-specific error types for drawer-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  drawer-core errors (this file)                                        │
//! │  ├── CoreError        - Command-level domain errors                    │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  drawer-db errors (separate crate)                                     │
//! │  └── DbError          - Preference store failures                      │
//! │                                                                         │
//! │  Application errors                                                    │
//! │  └── ApiError         - What the shell shows                           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Shell                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Count inputs never produce an error: bad text degrades to zero inside
//! [`crate::validation::parse_count`]. The variants here cover what a caller
//! can get wrong around the counts, such as naming a row that doesn't exist.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core tally errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No row on the tally sheet matches the request.
    ///
    /// ## When This Occurs
    /// - Row index past the end of the table
    /// - Face value that isn't one of the ten denominations (e.g. 3000)
    #[error("Unknown denomination: {0}")]
    UnknownDenomination(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
