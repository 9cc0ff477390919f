// Path: crates/services/src/liveness/mod.rs
//! Liveness strategies that ship with the kernel.

use evote_api::identity::LivenessCheck;
use evote_api::time::Clock;
use evote_types::app::{LivenessConfirmation, VoterIdentity};
use std::sync::Arc;

/// A polling-station operator vouches that the voter is physically present.
///
/// The operator's decision is fixed when the strategy is built (the CLI maps
/// its `--liveness-attested` flag onto it), so the check itself is
/// deterministic.
pub struct OperatorAttestation {
    attested: bool,
    clock: Arc<dyn Clock>,
}

impl OperatorAttestation {
    pub fn new(attested: bool, clock: Arc<dyn Clock>) -> Self {
        Self { attested, clock }
    }
}

impl LivenessCheck for OperatorAttestation {
    fn method(&self) -> &'static str {
        "operator-attestation"
    }

    fn confirm(&self, identity: &VoterIdentity) -> Result<LivenessConfirmation, String> {
        if !self.attested {
            return Err(format!(
                "no operator attestation for voter {}",
                identity.national_id.masked()
            ));
        }
        Ok(LivenessConfirmation {
            method: self.method().to_string(),
            confirmed_at: self.clock.now(),
        })
    }
}
