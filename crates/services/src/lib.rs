// Path: crates/services/src/lib.rs
#![forbid(unsafe_code)]
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

//! # eVote Kernel Services
//!
//! The voting ledger and the verification gate, together with the concrete
//! identity directories, liveness strategies and election catalog they are
//! composed from. [`kernel::Kernel`] wires all of them up from a
//! [`evote_types::config::KernelConfig`].

pub mod catalog;
pub mod directory;
pub mod kernel;
pub mod ledger;
pub mod liveness;
pub mod verification;

pub use catalog::StaticElectionCatalog;
pub use directory::{ProvisionalDirectory, StaticDirectory};
pub use kernel::{Kernel, KernelError};
pub use ledger::VotingLedger;
pub use liveness::OperatorAttestation;
pub use verification::VerificationGate;
