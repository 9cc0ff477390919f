// Path: crates/test_utils/src/store.rs
//! A ledger store that fails on demand.

use evote_api::storage::{LedgerStore, StorageError};
use evote_storage::MemoryLedgerStore;
use evote_types::app::{LedgerMutation, LedgerState};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Wraps a [`MemoryLedgerStore`] and rejects commits while failing is switched on.
///
/// Loads always succeed, so a ledger can be opened over it and then made to
/// fail mid-run.
#[derive(Debug, Default)]
pub struct FailingStore {
    inner: MemoryLedgerStore,
    failing: AtomicBool,
    rejected: AtomicUsize,
}

impl FailingStore {
    /// A healthy store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches commit failures on or off.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of commits rejected so far.
    pub fn rejected_commits(&self) -> usize {
        self.rejected.load(Ordering::SeqCst)
    }

    /// The state as last committed, bypassing the fault switch.
    pub fn committed(&self) -> Option<LedgerState> {
        self.inner.load().ok().flatten()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            self.rejected.fetch_add(1, Ordering::SeqCst);
            return Err(StorageError::Io("injected write failure".into()));
        }
        Ok(())
    }
}

impl LedgerStore for FailingStore {
    fn backend_name(&self) -> &'static str {
        "failing"
    }

    fn load(&self) -> Result<Option<LedgerState>, StorageError> {
        self.inner.load()
    }

    fn save(&self, state: &LedgerState) -> Result<(), StorageError> {
        self.check()?;
        self.inner.save(state)
    }

    fn apply(&self, mutation: &LedgerMutation) -> Result<(), StorageError> {
        self.check()?;
        self.inner.apply(mutation)
    }
}
