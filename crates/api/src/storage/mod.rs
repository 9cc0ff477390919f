// Path: crates/api/src/storage/mod.rs

//! API for a durable ledger store.

use evote_types::app::{LedgerMutation, LedgerState};

pub use evote_types::error::StorageError;

/// The primary trait defining the API for a durable ledger store.
///
/// This interface abstracts the underlying storage backend (memory, snapshot
/// file, `redb`) so that the voting ledger is storage-agnostic.
///
/// # Atomicity
///
/// [`LedgerStore::apply`] must be all-or-nothing: when it returns `Ok` the
/// whole mutation is durable, and when it returns `Err` nothing about the
/// mutation is durable. A cast vote is never persisted as a tally increment
/// without the matching voter marker, or the reverse.
pub trait LedgerStore: Send + Sync {
    /// A short, static name for the backend, used in logs.
    fn backend_name(&self) -> &'static str;

    /// Loads the persisted state, or `None` if the store has never been written.
    fn load(&self) -> Result<Option<LedgerState>, StorageError>;

    /// Replaces the persisted state wholesale. Used to seed a fresh store.
    fn save(&self, state: &LedgerState) -> Result<(), StorageError>;

    /// Atomically commits a single mutation.
    ///
    /// Implementations should fail with [`StorageError::Conflict`] if the
    /// persisted state already contradicts the mutation (for example the voter
    /// is already marked as voted).
    fn apply(&self, mutation: &LedgerMutation) -> Result<(), StorageError>;
}

impl<T: LedgerStore + ?Sized> LedgerStore for std::sync::Arc<T> {
    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
    fn load(&self) -> Result<Option<LedgerState>, StorageError> {
        (**self).load()
    }
    fn save(&self, state: &LedgerState) -> Result<(), StorageError> {
        (**self).save(state)
    }
    fn apply(&self, mutation: &LedgerMutation) -> Result<(), StorageError> {
        (**self).apply(mutation)
    }
}
