//! # Export State
//!
//! The two places a summary can go.

use std::path::PathBuf;

use crate::sink::{ClipboardSink, DownloadSink};

/// Clipboard and download sinks, built once at startup.
#[derive(Debug)]
pub struct ExportState {
    pub clipboard: ClipboardSink,
    pub download: DownloadSink,
}

impl ExportState {
    pub fn new(clipboard: ClipboardSink, download: DownloadSink) -> Self {
        ExportState {
            clipboard,
            download,
        }
    }

    /// System clipboard (with OSC 52 fallback) and the given download folder.
    pub fn system(download_dir: impl Into<PathBuf>) -> Self {
        ExportState::new(ClipboardSink::system(), DownloadSink::new(download_dir))
    }
}
