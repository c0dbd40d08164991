//! # Session State
//!
//! Holds the current tally session.
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>` so commands can run from any
//! task. Every access goes through a closure, which keeps the lock from
//! being held across an `.await`.
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session State Operations                             │
//! │                                                                         │
//! │  Shell Input              Command                 Session Change        │
//! │  ───────────              ───────                 ──────────────        │
//! │                                                                         │
//! │  bundle 500 2 ───────────► set_bundle() ────────► row 500 bundle = 2   │
//! │                                                                         │
//! │  manual 500 3 ───────────► set_manual() ────────► row 500 manual = 3   │
//! │                                                                         │
//! │  reset ──────────────────► reset_all() ─────────► history += total     │
//! │                                                   rows = 0             │
//! │                                                                         │
//! │  name 佐藤 ──────────────► set_checker_name() ──► metadata.checker     │
//! │                                                                         │
//! │  show ───────────────────► get_tally() ─────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use chrono::NaiveDateTime;
use drawer_core::{Labels, TallySession};

/// Shared handle to the current tally session.
#[derive(Debug, Clone)]
pub struct SessionState {
    session: Arc<Mutex<TallySession>>,
}

impl SessionState {
    /// Starts a fresh session.
    pub fn new(labels: Labels, started_at: NaiveDateTime) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(TallySession::new(labels, started_at))),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = session_state.with_session(|s| s.grand_total());
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&TallySession) -> R,
    {
        // Poisoning is recovered: no session mutation spans more than one step.
        let session = self
            .session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&session)
    }

    /// Executes a function with write access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// session_state.with_session_mut(|s| s.set_manual(0, "4"))?;
    /// ```
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut TallySession) -> R,
    {
        let mut session = self
            .session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut session)
    }
}
