// Path: crates/storage/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! Durable ledger stores for the eVote kernel.
//!
//! Three backends implement [`evote_api::storage::LedgerStore`]:
//!
//! * [`MemoryLedgerStore`]: process-local, for tests and demonstrations.
//! * [`FileLedgerStore`]: a JSON snapshot keyed by the ledger storage id,
//!   replaced atomically (write, fsync, rename) on every commit.
//! * [`RedbLedgerStore`]: one redb write transaction per mutation, with the
//!   tally, voter markers and registrations in separate tables.

pub mod file_store;
pub mod memory;
mod metrics;
pub mod redb_store;

pub use file_store::FileLedgerStore;
pub use memory::MemoryLedgerStore;
pub use redb_store::RedbLedgerStore;
