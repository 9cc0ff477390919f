// Path: crates/api/src/lib.rs

//! # eVote Kernel API Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
#![deny(missing_docs)]
//! # eVote Kernel API
//!
//! Core traits and interfaces for the eVote kernel. This crate defines the
//! stable contract between the voting ledger and its collaborators: the
//! durable store, the identity directory, the liveness check, the election
//! catalog and the clock.

/// Defines the read-only `ElectionCatalog` trait.
pub mod catalog;
/// Defines the `IdentityDirectory` and `LivenessCheck` traits used by the verification gate.
pub mod identity;
/// The storage interface through which the ledger persists its state.
pub mod storage;
/// A pluggable source of the current time.
pub mod time;

/// A curated set of the most commonly used traits and types.
pub mod prelude {
    pub use crate::catalog::ElectionCatalog;
    pub use crate::identity::{IdentityDirectory, LivenessCheck};
    pub use crate::storage::{LedgerStore, StorageError};
    pub use crate::time::{Clock, SystemClock};
}
