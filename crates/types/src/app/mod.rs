// Path: crates/types/src/app/mod.rs
//! Core application-level data structures for the eVote kernel.

/// Elections, their lifecycle status, and the parties that appear on a ballot.
pub mod election;
/// The persisted ledger state, its mutations, and the outcomes of ledger calls.
pub mod ledger;
/// National IDs, voter identities and verified voter profiles.
pub mod voter;

pub use election::*;
pub use ledger::*;
pub use voter::*;
