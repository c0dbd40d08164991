//! # Export Sinks
//!
//! Deliver the summary text somewhere the user can use it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Export Paths                                       │
//! │                                                                         │
//! │  summary text                                                          │
//! │       │                                                                 │
//! │       ├── copy ──────► ClipboardSink                                   │
//! │       │                 ├── primary:  clipboard program (pbcopy, ...)  │
//! │       │                 └── fallback: OSC 52 escape to the terminal    │
//! │       │                                                                 │
//! │       └── download ──► DownloadSink                                    │
//! │                         └── {dir}/drawer-kun-YYYY-MM-DD.txt            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod clipboard;
pub mod download;

use std::path::PathBuf;

use thiserror::Error;

pub use clipboard::{
    ClipboardBackend, ClipboardSink, CopyOutcome, Osc52Clipboard, SystemClipboard,
};
pub use download::DownloadSink;

/// Export failures.
///
/// A failing primary clipboard is not an error; only losing both paths is.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing the download file failed.
    #[error("Could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every free file name was taken.
    #[error("No free file name for {0}")]
    NameExhausted(String),

    /// Both the primary and the fallback clipboard failed.
    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),
}

/// Reason a single clipboard backend could not take the text.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// The backend's program isn't installed.
    #[error("{0} not found")]
    NotInstalled(String),

    /// The backend ran but reported failure.
    #[error("{backend} failed: {reason}")]
    Failed { backend: String, reason: String },
}
