// Path: crates/cli/src/util.rs

use crate::commands::{GlobalArgs, VoterArgs};
use anyhow::{anyhow, Context, Result};
use evote_api::time::{Clock, SystemClock};
use evote_services::{Kernel, OperatorAttestation};
use evote_types::app::VoterProfile;
use evote_types::config::KernelConfig;
use std::path::Path;
use std::sync::Arc;

/// Loads the configuration at `path`, falling back to the built-in defaults
/// (an in-memory ledger) when the file does not exist.
pub fn load_config(path: &Path) -> Result<KernelConfig> {
    if !path.exists() {
        tracing::warn!(
            path = %path.display(),
            "Configuration file not found; using in-memory defaults"
        );
        return Ok(KernelConfig::default());
    }
    KernelConfig::load(path).with_context(|| format!("loading {}", path.display()))
}

/// Builds the kernel from the configured file. `liveness_attested` is the
/// operator's liveness verdict for the voter being served, if any.
pub fn open_kernel(global: &GlobalArgs, liveness_attested: bool) -> Result<Kernel> {
    let config = load_config(&global.config)?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let liveness = Arc::new(OperatorAttestation::new(liveness_attested, clock.clone()));
    Ok(Kernel::build(&config, liveness, clock)?)
}

/// Runs both verification steps for the voter described by `voter`.
pub fn verify_voter(kernel: &Kernel, voter: &VoterArgs) -> Result<VoterProfile> {
    let identity = kernel
        .gate
        .verify_identity(&voter.nid, voter.dob, &voter.division)
        .map_err(|reason| anyhow!("Verification rejected: {}", reason))?;
    kernel
        .gate
        .confirm_liveness(&identity)
        .map_err(|reason| anyhow!("Verification rejected: {}", reason))
}

/// Formats a ratio as a percentage with two decimals.
pub fn percent(part: u64, whole: u64) -> String {
    if whole == 0 {
        return "0.00%".into();
    }
    format!("{:.2}%", part as f64 * 100.0 / whole as f64)
}
