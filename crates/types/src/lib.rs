// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]
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

//! # eVote Kernel Types
//!
//! This crate is the foundational library for the eVote kernel, containing the
//! voter, election and ledger data model, the error taxonomy, the canonical
//! codec and the configuration objects.
//!
//! ## Architectural Role
//!
//! As the base crate, `evote-types` has minimal dependencies and is itself a
//! dependency for every other crate in the workspace. Shared definitions such as
//! `NationalId`, `LedgerState` and `LedgerError` live here so that storage
//! backends, services and the CLI agree on a single canonical shape.

/// Voter, election, party and ledger data structures.
pub mod app;
/// The canonical, deterministic binary codec for persisted ledger records.
pub mod codec;
/// Configuration structures for the kernel and its catalogs.
pub mod config;
/// A unified set of all error types used across the workspace.
pub mod error;
/// Constants for well-known storage identifiers and key layouts.
pub mod keys;
