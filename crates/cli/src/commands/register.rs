// Path: crates/cli/src/commands/register.rs

use super::{GlobalArgs, VoterArgs};
use crate::util::{open_kernel, verify_voter};
use anyhow::Result;
use clap::Parser;
use evote_api::time::{Clock, SystemClock};
use evote_types::app::RegistrationOutcome;

#[derive(Parser, Debug)]
pub struct RegisterArgs {
    #[clap(flatten)]
    pub voter: VoterArgs,
    /// Election id (see `evote elections`).
    #[clap(long)]
    pub election: String,
    /// Constituency to register in; defaults to the voter's own.
    #[clap(long)]
    pub constituency: Option<String>,
}

pub fn run(global: &GlobalArgs, args: RegisterArgs) -> Result<()> {
    let kernel = open_kernel(global, args.voter.liveness_attested)?;
    let profile = verify_voter(&kernel, &args.voter)?;
    let nid = profile.national_id();
    let constituency = args
        .constituency
        .unwrap_or_else(|| profile.identity.location.constituency.clone());

    let outcome = kernel.ledger.register_for_election(
        nid.as_str(),
        &args.election,
        &constituency,
        SystemClock.now_millis(),
    )?;
    match outcome {
        RegistrationOutcome::Registered => {
            println!(
                "✅ {} registered for {} in {}",
                nid.masked(),
                args.election,
                constituency
            );
        }
        RegistrationOutcome::AlreadyRegistered => {
            println!("⚠️  {} is already registered for {}", nid.masked(), args.election);
        }
    }
    Ok(())
}
