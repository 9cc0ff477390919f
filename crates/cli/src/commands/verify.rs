// Path: crates/cli/src/commands/verify.rs

use super::{GlobalArgs, VoterArgs};
use crate::util::{open_kernel, verify_voter};
use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct VerifyArgs {
    #[clap(flatten)]
    pub voter: VoterArgs,
}

pub fn run(global: &GlobalArgs, args: VerifyArgs) -> Result<()> {
    let kernel = open_kernel(global, args.voter.liveness_attested)?;
    let profile = verify_voter(&kernel, &args.voter)?;
    let identity = &profile.identity;

    println!("✅ Verified {} ({})", identity.name, identity.national_id.masked());
    println!("   Division:     {}", identity.location.division);
    println!("   District:     {}", identity.location.district);
    println!("   Constituency: {}", identity.location.constituency);
    println!(
        "   Liveness:     {} at {}",
        profile.liveness.method, profile.liveness.confirmed_at
    );
    let voted = kernel.ledger.has_voted(identity.national_id.as_str());
    println!("   Has voted:    {}", if voted { "yes" } else { "no" });
    Ok(())
}
