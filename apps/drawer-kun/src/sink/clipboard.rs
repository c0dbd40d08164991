//! # Clipboard Sink
//!
//! Copies text to the system clipboard, with a fallback when the primary
//! mechanism is missing or fails.
//!
//! ## Copy Flow
//! ```text
//! copy(text)
//!    │
//!    ▼
//! primary.write_text ── Ok ─────────────────────────► CopyOutcome { fallback: false }
//!    │
//!    Err (not installed / failed)
//!    │  warn!
//!    ▼
//! fallback.write_text ── Ok ────────────────────────► CopyOutcome { fallback: true }
//!    │
//!    Err
//!    ▼
//! ExportError::ClipboardUnavailable
//! ```
//!
//! Either success path ends in the same notification for the user.

use std::io::Write;
use std::process::Stdio;
use std::sync::Mutex;

use async_trait::async_trait;
use base64::Engine;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::{ClipboardError, ExportError};

// =============================================================================
// Backend Trait
// =============================================================================

/// Something that can put text on a clipboard.
#[async_trait]
pub trait ClipboardBackend: Send + Sync {
    /// Short name for logs ("pbcopy", "osc52", ...).
    fn name(&self) -> &str;

    /// Places `text` on the clipboard.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

// =============================================================================
// System Clipboard (primary)
// =============================================================================

/// A clipboard program that takes the text on stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipboardProgram {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

impl ClipboardProgram {
    pub const fn new(program: &'static str, args: &'static [&'static str]) -> Self {
        ClipboardProgram { program, args }
    }
}

/// Platform clipboard through the first installed clipboard program.
///
/// ## Candidates
/// - macOS: `pbcopy`
/// - Windows: `clip`
/// - Others: `wl-copy`, `xclip -selection clipboard`, `xsel --clipboard --input`
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    candidates: Vec<ClipboardProgram>,
}

impl SystemClipboard {
    /// Uses the candidate programs for the current platform.
    pub fn detect() -> Self {
        let candidates = if cfg!(target_os = "macos") {
            vec![ClipboardProgram::new("pbcopy", &[])]
        } else if cfg!(target_os = "windows") {
            vec![ClipboardProgram::new("clip", &[])]
        } else {
            vec![
                ClipboardProgram::new("wl-copy", &[]),
                ClipboardProgram::new("xclip", &["-selection", "clipboard"]),
                ClipboardProgram::new("xsel", &["--clipboard", "--input"]),
            ]
        };

        SystemClipboard { candidates }
    }

    /// Uses exactly the given programs, in order.
    pub fn with_programs(candidates: Vec<ClipboardProgram>) -> Self {
        SystemClipboard { candidates }
    }

    async fn run(program: &ClipboardProgram, text: &str) -> Result<(), ClipboardError> {
        // stdout/stderr go to null: xclip forks a child that keeps serving
        // the selection, and a piped stream would never close.
        let mut child = Command::new(program.program)
            .args(program.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    ClipboardError::NotInstalled(program.program.to_string())
                }
                _ => ClipboardError::Failed {
                    backend: program.program.to_string(),
                    reason: e.to_string(),
                },
            })?;

        let failed = |reason: String| ClipboardError::Failed {
            backend: program.program.to_string(),
            reason,
        };

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| failed(e.to_string()))?;
            // Dropping stdin closes the pipe so the program sees EOF.
        }

        let status = child.wait().await.map_err(|e| failed(e.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(failed(format!("exited with {}", status)))
        }
    }
}

#[async_trait]
impl ClipboardBackend for SystemClipboard {
    fn name(&self) -> &str {
        "system"
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut last_err = ClipboardError::NotInstalled("clipboard program".to_string());

        for program in &self.candidates {
            match Self::run(program, text).await {
                Ok(()) => {
                    debug!(program = program.program, "Clipboard program accepted text");
                    return Ok(());
                }
                Err(e) => {
                    debug!(program = program.program, error = %e, "Clipboard program unusable");
                    last_err = e;
                }
            }
        }

        Err(last_err)
    }
}

// =============================================================================
// OSC 52 (fallback)
// =============================================================================

/// Asks the terminal emulator to set the clipboard via an OSC 52 escape.
///
/// This works over SSH and without any clipboard program, as long as the
/// terminal honours the sequence.
pub struct Osc52Clipboard {
    out: Mutex<Box<dyn Write + Send>>,
}

impl Osc52Clipboard {
    /// Writes the escape sequence to the given stream.
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Osc52Clipboard {
            out: Mutex::new(out),
        }
    }

    /// Writes the escape sequence to stdout.
    pub fn stdout() -> Self {
        Osc52Clipboard::new(Box::new(std::io::stdout()))
    }

    /// Builds the escape sequence for `text`.
    pub fn sequence(text: &str) -> String {
        let payload = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
        format!("\x1b]52;c;{}\x07", payload)
    }
}

impl std::fmt::Debug for Osc52Clipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Osc52Clipboard").finish_non_exhaustive()
    }
}

#[async_trait]
impl ClipboardBackend for Osc52Clipboard {
    fn name(&self) -> &str {
        "osc52"
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let seq = Osc52Clipboard::sequence(text);
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        out.write_all(seq.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| ClipboardError::Failed {
                backend: "osc52".to_string(),
                reason: e.to_string(),
            })
    }
}

// =============================================================================
// Clipboard Sink
// =============================================================================

/// Which path delivered the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyOutcome {
    pub backend: String,
    pub used_fallback: bool,
}

/// Primary clipboard with a fallback.
pub struct ClipboardSink {
    primary: Box<dyn ClipboardBackend>,
    fallback: Box<dyn ClipboardBackend>,
}

impl ClipboardSink {
    pub fn new(primary: Box<dyn ClipboardBackend>, fallback: Box<dyn ClipboardBackend>) -> Self {
        ClipboardSink { primary, fallback }
    }

    /// System clipboard program first, OSC 52 to stdout second.
    pub fn system() -> Self {
        ClipboardSink::new(
            Box::new(SystemClipboard::detect()),
            Box::new(Osc52Clipboard::stdout()),
        )
    }

    /// Copies `text`, falling back if the primary path fails.
    ///
    /// ## Errors
    /// `ExportError::ClipboardUnavailable` only when both paths fail.
    pub async fn copy(&self, text: &str) -> Result<CopyOutcome, ExportError> {
        match self.primary.write_text(text).await {
            Ok(()) => {
                info!(backend = self.primary.name(), bytes = text.len(), "Summary copied");
                Ok(CopyOutcome {
                    backend: self.primary.name().to_string(),
                    used_fallback: false,
                })
            }
            Err(primary_err) => {
                warn!(
                    backend = self.primary.name(),
                    error = %primary_err,
                    "Primary clipboard failed, using fallback"
                );

                self.fallback.write_text(text).await.map_err(|fallback_err| {
                    ExportError::ClipboardUnavailable(format!("{}; {}", primary_err, fallback_err))
                })?;

                info!(backend = self.fallback.name(), bytes = text.len(), "Summary copied");
                Ok(CopyOutcome {
                    backend: self.fallback.name().to_string(),
                    used_fallback: true,
                })
            }
        }
    }
}

impl std::fmt::Debug for ClipboardSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipboardSink")
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Arc;

    /// Records what it receives; optionally refuses everything.
    pub(crate) struct FakeClipboard {
        name: &'static str,
        fail: bool,
        pub(crate) received: Arc<Mutex<Vec<String>>>,
    }

    impl FakeClipboard {
        pub(crate) fn new(name: &'static str, fail: bool) -> Self {
            FakeClipboard {
                name,
                fail,
                received: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl ClipboardBackend for FakeClipboard {
        fn name(&self) -> &str {
            self.name
        }

        async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::NotInstalled(self.name.to_string()));
            }
            self.received.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_primary_used_when_available() {
        let primary = FakeClipboard::new("primary", false);
        let fallback = FakeClipboard::new("fallback", false);
        let (p_rx, f_rx) = (primary.received.clone(), fallback.received.clone());

        let sink = ClipboardSink::new(Box::new(primary), Box::new(fallback));
        let outcome = sink.copy("hello").await.unwrap();

        assert_eq!(outcome.backend, "primary");
        assert!(!outcome.used_fallback);
        assert_eq!(*p_rx.lock().unwrap(), vec!["hello".to_string()]);
        assert!(f_rx.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fallback_on_primary_failure() {
        let fallback = FakeClipboard::new("fallback", false);
        let f_rx = fallback.received.clone();

        let sink = ClipboardSink::new(
            Box::new(FakeClipboard::new("primary", true)),
            Box::new(fallback),
        );
        let outcome = sink.copy("総合計").await.unwrap();

        assert!(outcome.used_fallback);
        assert_eq!(outcome.backend, "fallback");
        assert_eq!(*f_rx.lock().unwrap(), vec!["総合計".to_string()]);
    }

    #[tokio::test]
    async fn test_both_failing_is_an_error() {
        let sink = ClipboardSink::new(
            Box::new(FakeClipboard::new("primary", true)),
            Box::new(FakeClipboard::new("fallback", true)),
        );

        assert!(matches!(
            sink.copy("x").await,
            Err(ExportError::ClipboardUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_osc52_sequence() {
        assert_eq!(Osc52Clipboard::sequence("abc"), "\x1b]52;c;YWJj\x07");

        let buf = SharedBuf::default();
        let osc = Osc52Clipboard::new(Box::new(buf.clone()));
        osc.write_text("abc").await.unwrap();

        assert_eq!(buf.0.lock().unwrap().as_slice(), b"\x1b]52;c;YWJj\x07");
    }

    #[tokio::test]
    async fn test_missing_program_reports_not_installed() {
        let clip = SystemClipboard::with_programs(vec![ClipboardProgram::new(
            "drawer-kun-no-such-clipboard-program",
            &[],
        )]);

        assert!(matches!(
            clip.write_text("x").await,
            Err(ClipboardError::NotInstalled(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_program_success_and_failure() {
        let ok = SystemClipboard::with_programs(vec![ClipboardProgram::new("cat", &[])]);
        assert!(ok.write_text("hello").await.is_ok());

        let bad = SystemClipboard::with_programs(vec![ClipboardProgram::new("false", &[])]);
        assert!(matches!(
            bad.write_text("hello").await,
            Err(ClipboardError::Failed { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_first_installed_program_wins() {
        let clip = SystemClipboard::with_programs(vec![
            ClipboardProgram::new("drawer-kun-no-such-clipboard-program", &[]),
            ClipboardProgram::new("cat", &[]),
        ]);
        assert!(clip.write_text("hello").await.is_ok());
    }
}
