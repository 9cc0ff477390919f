// Path: crates/services/src/verification/mod.rs
//! The verification gate: national ID format, age eligibility, directory
//! lookup, then liveness.
//!
//! Checks always run in that order, so a malformed ID never reaches the age
//! check and an underage voter never reaches the directory.

use chrono::NaiveDate;
use evote_api::identity::{IdentityDirectory, LivenessCheck};
use evote_api::time::Clock;
use evote_telemetry::sinks::{ErrorMetricsSink, VerificationMetricsSink};
use evote_telemetry::{error_metrics, verification_metrics};
use evote_types::app::{calendar_age, NationalId, VoterIdentity, VoterProfile};
use evote_types::error::{ErrorCode, RejectionReason};
use std::sync::Arc;

/// The voting age applied when configuration does not override it.
pub const DEFAULT_MINIMUM_AGE: u32 = 18;

const STEP_IDENTITY: &str = "identity";
const STEP_LIVENESS: &str = "liveness";

/// Produces verified [`VoterProfile`]s or a [`RejectionReason`].
pub struct VerificationGate {
    directory: Arc<dyn IdentityDirectory>,
    liveness: Arc<dyn LivenessCheck>,
    clock: Arc<dyn Clock>,
    minimum_age: u32,
}

impl VerificationGate {
    pub fn new(
        directory: Arc<dyn IdentityDirectory>,
        liveness: Arc<dyn LivenessCheck>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            directory,
            liveness,
            clock,
            minimum_age: DEFAULT_MINIMUM_AGE,
        }
    }

    pub fn with_minimum_age(mut self, minimum_age: u32) -> Self {
        self.minimum_age = minimum_age;
        self
    }

    pub fn minimum_age(&self) -> u32 {
        self.minimum_age
    }

    /// Checks the ID format, the voter's age on the gate's current date, and
    /// that the directory holds a matching record.
    pub fn verify_identity(
        &self,
        national_id: &str,
        date_of_birth: NaiveDate,
        location_hint: &str,
    ) -> Result<VoterIdentity, RejectionReason> {
        let result = self.check_identity(national_id, date_of_birth, location_hint);
        record(STEP_IDENTITY, &result);
        result
    }

    fn check_identity(
        &self,
        national_id: &str,
        date_of_birth: NaiveDate,
        location_hint: &str,
    ) -> Result<VoterIdentity, RejectionReason> {
        let nid = NationalId::parse(national_id).map_err(RejectionReason::InvalidFormat)?;

        let age = calendar_age(date_of_birth, self.clock.today());
        let eligible = u32::try_from(age).is_ok_and(|age| age >= self.minimum_age);
        if !eligible {
            tracing::info!(target: "verification", nid = %nid.masked(), age, "Voter is under the minimum age");
            return Err(RejectionReason::Underage {
                age: u32::try_from(age).unwrap_or(0),
            });
        }

        let identity = self
            .directory
            .lookup(&nid, date_of_birth, location_hint)
            .filter(|identity| identity.national_id == nid && identity.date_of_birth == date_of_birth)
            .ok_or(RejectionReason::NotFound)?;

        tracing::info!(
            target: "verification",
            nid = %nid.masked(),
            constituency = %identity.location.constituency,
            "Identity verified"
        );
        Ok(identity)
    }

    /// Runs the liveness strategy against an identity returned by
    /// [`Self::verify_identity`].
    pub fn confirm_liveness(&self, identity: &VoterIdentity) -> Result<VoterProfile, RejectionReason> {
        let result = self
            .liveness
            .confirm(identity)
            .map(|liveness| VoterProfile {
                identity: identity.clone(),
                liveness,
            })
            .map_err(RejectionReason::LivenessFailed);
        record(STEP_LIVENESS, &result);
        if let Err(e) = &result {
            tracing::warn!(
                target: "verification",
                nid = %identity.national_id.masked(),
                method = self.liveness.method(),
                error = %e,
                "Liveness confirmation failed"
            );
        }
        result
    }
}

fn record<T>(step: &'static str, result: &Result<T, RejectionReason>) {
    match result {
        Ok(_) => verification_metrics().inc_verification(step, "accepted"),
        Err(reason) => {
            verification_metrics().inc_verification(step, reason.code());
            error_metrics().inc_error("verification", reason.code());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{ProvisionalDirectory, StaticDirectory};
    use evote_test_utils::fixtures::voter;
    use evote_test_utils::{assert_err, assert_matches, assert_ok, FixedClock, ScriptedLiveness};
    use evote_types::error::NationalIdError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn gate_on(today: (i32, u32, u32), directory: Arc<dyn IdentityDirectory>) -> VerificationGate {
        let clock = Arc::new(FixedClock::on(today.0, today.1, today.2).unwrap());
        VerificationGate::new(directory, Arc::new(ScriptedLiveness::passing()), clock)
    }

    fn provisional() -> Arc<dyn IdentityDirectory> {
        Arc::new(ProvisionalDirectory::default())
    }

    #[test]
    fn eighteenth_birthday_is_the_cutoff() {
        let gate = gate_on((2026, 12, 20), provisional());
        let err = assert_err!(gate.verify_identity("1234567890", date(2008, 12, 21), "Dhaka"));
        assert_eq!(err, RejectionReason::Underage { age: 17 });
        assert_ok!(gate.verify_identity("1234567890", date(2008, 12, 20), "Dhaka"));
    }

    #[test]
    fn leap_day_birthday_turns_over_on_first_of_march() {
        let born = date(2008, 2, 29);
        let feb_28 = gate_on((2026, 2, 28), provisional());
        assert_matches!(
            feb_28.verify_identity("1234567890", born, "Dhaka"),
            Err(RejectionReason::Underage { age: 17 })
        );
        let mar_1 = gate_on((2026, 3, 1), provisional());
        assert_ok!(mar_1.verify_identity("1234567890", born, "Dhaka"));
    }

    #[test]
    fn format_is_checked_before_age_and_lookup() {
        let gate = gate_on((2026, 12, 20), Arc::new(StaticDirectory::default()));
        // Underage and unknown as well, but the format error wins.
        let err = assert_err!(gate.verify_identity("12345678901", date(2020, 1, 1), "Dhaka"));
        assert_eq!(err, RejectionReason::InvalidFormat(NationalIdError::InvalidLength(11)));
        // Unknown, but the age error wins.
        let err = assert_err!(gate.verify_identity("1234567890", date(2020, 1, 1), "Dhaka"));
        assert_matches!(err, RejectionReason::Underage { age: 6 });
        let err = assert_err!(gate.verify_identity("1234567890", date(1990, 1, 1), "Dhaka"));
        assert_eq!(err, RejectionReason::NotFound);
    }

    #[test]
    fn accepted_lengths() {
        let gate = gate_on((2026, 12, 20), provisional());
        for nid in ["1234567890", "1234567890123", "12345678901234567"] {
            assert_ok!(gate.verify_identity(nid, date(1990, 1, 1), "Dhaka"), "length {}", nid.len());
        }
    }

    #[test]
    fn future_birth_date_is_underage() {
        let gate = gate_on((2026, 12, 20), provisional());
        let err = assert_err!(gate.verify_identity("1234567890", date(2030, 1, 1), "Dhaka"));
        assert_eq!(err, RejectionReason::Underage { age: 0 });
    }

    #[test]
    fn date_of_birth_mismatch_is_not_found() {
        let known = voter("1234567890", date(1985, 7, 4)).unwrap();
        let gate = gate_on((2026, 12, 20), Arc::new(StaticDirectory::new([known.clone()])));
        assert_eq!(
            gate.verify_identity("1234567890", date(1985, 7, 5), "Dhaka"),
            Err(RejectionReason::NotFound)
        );
        assert_eq!(gate.verify_identity("1234567890", date(1985, 7, 4), "Dhaka"), Ok(known));
    }

    #[test]
    fn minimum_age_is_configurable() {
        let gate = gate_on((2026, 12, 20), provisional()).with_minimum_age(21);
        assert_matches!(
            gate.verify_identity("1234567890", date(2006, 1, 1), "Dhaka"),
            Err(RejectionReason::Underage { age: 20 }),
            "minimum age {}",
            gate.minimum_age()
        );
    }

    #[test]
    fn liveness_verdicts_are_passed_through() {
        let clock = Arc::new(FixedClock::on(2026, 12, 20).unwrap());
        let liveness = Arc::new(ScriptedLiveness::scripted([Err("face not detected".to_string())]));
        let gate = VerificationGate::new(provisional(), liveness.clone(), clock);
        let identity = gate.verify_identity("1234567890", date(1990, 1, 1), "Dhaka").unwrap();
        assert_eq!(liveness.remaining(), 1);

        let err = assert_err!(gate.confirm_liveness(&identity));
        assert_eq!(err, RejectionReason::LivenessFailed("face not detected".into()));
        assert_eq!(liveness.remaining(), 0);

        let profile = assert_ok!(gate.confirm_liveness(&identity));
        assert_eq!(profile.national_id().as_str(), "1234567890");
        assert_eq!(profile.liveness.method, "scripted");
    }

    #[test]
    fn failing_liveness_never_yields_a_profile() {
        let clock = Arc::new(FixedClock::on(2026, 12, 20).unwrap());
        let liveness = Arc::new(ScriptedLiveness::failing("no face in frame"));
        let gate = VerificationGate::new(provisional(), liveness, clock);
        let identity = assert_ok!(gate.verify_identity("1234567890", date(1990, 1, 1), "Dhaka"));

        for _ in 0..3 {
            let err = assert_err!(gate.confirm_liveness(&identity));
            assert_matches!(err, RejectionReason::LivenessFailed(_));
            assert_eq!(err, RejectionReason::LivenessFailed("no face in frame".into()));
        }
    }
}
