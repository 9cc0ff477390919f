// Path: crates/cli/src/lib.rs
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

//! # eVote Kernel CLI Library
//!
//! The `evote` binary is a thin operator front end standing in for the
//! presentation layer: it loads a configuration, builds the kernel, runs one
//! command and exits.
//!
//! **The CLI is an external consumer of the kernel.** It only uses the public
//! APIs of the `evote-*` library crates, so every command exercises the same
//! surface a real front end would.

pub mod commands;
pub mod util;
