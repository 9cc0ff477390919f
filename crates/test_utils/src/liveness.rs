// Path: crates/test_utils/src/liveness.rs
//! A liveness check whose verdicts are scripted by the test.

use chrono::{DateTime, Utc};
use evote_api::identity::LivenessCheck;
use evote_types::app::{LivenessConfirmation, VoterIdentity};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Returns queued verdicts in order, then falls back to a fixed default.
#[derive(Debug)]
pub struct ScriptedLiveness {
    script: Mutex<VecDeque<Result<(), String>>>,
    fallback: Result<(), String>,
    confirmed_at: DateTime<Utc>,
}

impl ScriptedLiveness {
    /// Always passes.
    pub fn passing() -> Self {
        Self::with_fallback(Ok(()))
    }

    /// Always fails with `reason`.
    pub fn failing(reason: &str) -> Self {
        Self::with_fallback(Err(reason.to_string()))
    }

    /// Plays `verdicts` in order, then passes.
    pub fn scripted(verdicts: impl IntoIterator<Item = Result<(), String>>) -> Self {
        let this = Self::passing();
        if let Ok(mut script) = this.script.lock() {
            script.extend(verdicts);
        }
        this
    }

    fn with_fallback(fallback: Result<(), String>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            confirmed_at: DateTime::<Utc>::default(),
        }
    }

    /// Number of queued verdicts not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.lock().map(|s| s.len()).unwrap_or(0)
    }
}

impl LivenessCheck for ScriptedLiveness {
    fn method(&self) -> &'static str {
        "scripted"
    }

    fn confirm(&self, _identity: &VoterIdentity) -> Result<LivenessConfirmation, String> {
        let verdict = self
            .script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or_else(|| self.fallback.clone());
        verdict.map(|()| LivenessConfirmation {
            method: self.method().to_string(),
            confirmed_at: self.confirmed_at,
        })
    }
}
