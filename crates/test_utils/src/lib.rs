// Path: crates/test_utils/src/lib.rs
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

//! # eVote Kernel Test Utilities
//!
//! Assertion macros, deterministic fakes for the clock and the liveness check,
//! a fault-injecting ledger store, and fixture builders.

pub mod assertions;
pub mod clock;
pub mod fixtures;
pub mod liveness;
pub mod store;

pub use clock::FixedClock;
pub use liveness::ScriptedLiveness;
pub use store::FailingStore;
