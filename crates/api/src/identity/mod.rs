// Path: crates/api/src/identity/mod.rs

//! Defines the capabilities the verification gate composes: identity lookup
//! and liveness confirmation.

use evote_types::app::{LivenessConfirmation, NationalId, VoterIdentity};
use chrono::NaiveDate;

/// A read-only lookup of registered voters.
///
/// The verification gate validates the ID format and the voter's age before
/// calling this trait, so implementations only decide whether a record exists.
pub trait IdentityDirectory: Send + Sync {
    /// Returns the identity registered under `national_id` whose date of birth
    /// is `date_of_birth`, or `None`.
    ///
    /// `location_hint` is the division the voter selected; directories that
    /// hold authoritative location data may ignore it.
    fn lookup(
        &self,
        national_id: &NationalId,
        date_of_birth: NaiveDate,
        location_hint: &str,
    ) -> Option<VoterIdentity>;
}

/// A biometric liveness / proof-of-presence check.
///
/// This is a stand-in for a real biometric matcher. The kernel never embeds a
/// simulated pass/fail distribution; callers inject a concrete strategy.
pub trait LivenessCheck: Send + Sync {
    /// A short, static name for the strategy, recorded in the confirmation.
    fn method(&self) -> &'static str;

    /// Confirms that `identity` is physically present.
    ///
    /// On failure, returns a human-readable reason.
    fn confirm(&self, identity: &VoterIdentity) -> Result<LivenessConfirmation, String>;
}
