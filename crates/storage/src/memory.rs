// Path: crates/storage/src/memory.rs
//! A process-local ledger store.

use crate::metrics::instrumented_commit;
use evote_api::storage::{LedgerStore, StorageError};
use evote_types::app::{LedgerMutation, LedgerState};
use std::sync::Mutex;

const BACKEND: &str = "memory";

/// Keeps the ledger state in memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    state: Mutex<Option<LedgerState>>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `state`, as if it had been saved earlier.
    pub fn with_state(state: LedgerState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
        }
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    fn load(&self) -> Result<Option<LedgerState>, StorageError> {
        let guard = self
            .state
            .lock()
            .map_err(|_| StorageError::Backend("memory store lock poisoned".into()))?;
        Ok(guard.clone())
    }

    fn save(&self, state: &LedgerState) -> Result<(), StorageError> {
        instrumented_commit(BACKEND, || {
            let mut guard = self
                .state
                .lock()
                .map_err(|_| StorageError::Backend("memory store lock poisoned".into()))?;
            *guard = Some(state.clone());
            Ok(())
        })
    }

    fn apply(&self, mutation: &LedgerMutation) -> Result<(), StorageError> {
        instrumented_commit(BACKEND, || {
            let mut guard = self
                .state
                .lock()
                .map_err(|_| StorageError::Backend("memory store lock poisoned".into()))?;
            // `LedgerState::apply` leaves the state untouched when it fails.
            guard.get_or_insert_with(LedgerState::default).apply(mutation)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsaved_store_loads_nothing() {
        let store = MemoryLedgerStore::new();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn apply_is_visible_to_load_and_rejects_conflicts() {
        let store = MemoryLedgerStore::new();
        let vote = LedgerMutation::CastVote {
            national_id: "1234567890".into(),
            party_id: "boat".into(),
        };
        store.apply(&vote).unwrap();
        assert!(matches!(
            store.apply(&vote),
            Err(StorageError::Conflict(_))
        ));
        let state = store.load().unwrap().unwrap();
        assert_eq!(state.votes["boat"], 1);
        assert_eq!(state.voted_ids.len(), 1);
    }
}
