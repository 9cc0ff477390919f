// Path: crates/types/src/keys/mod.rs
//! Defines constants for well-known storage identifiers.
//!
//! These constants provide a single source of truth for the keys used to store
//! ledger data. Every backend (memory, snapshot file, redb) keys its durable
//! record by the same identifier so that a deployment can switch backends
//! without losing track of which cycle a record belongs to.

/// The fixed identifier of the durable ledger record.
pub const LEDGER_STORAGE_ID: &str = "BD_EVOTE_DB_2026";

/// Separator between the national ID and the election ID in registration keys.
pub const REGISTRATION_KEY_SEPARATOR: &str = "::";

/// Builds the composite key `<national_id>::<election_id>` for a registration.
pub fn registration_key(national_id: &str, election_id: &str) -> String {
    [national_id, REGISTRATION_KEY_SEPARATOR, election_id].concat()
}
