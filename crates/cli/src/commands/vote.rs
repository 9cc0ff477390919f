// Path: crates/cli/src/commands/vote.rs

use super::{GlobalArgs, VoterArgs};
use crate::util::{open_kernel, verify_voter};
use anyhow::{anyhow, bail, Result};
use clap::Parser;
use evote_api::catalog::ElectionCatalog;
use evote_types::app::{Election, ElectionStatus, VoteOutcome};

#[derive(Parser, Debug)]
pub struct VoteArgs {
    #[clap(flatten)]
    pub voter: VoterArgs,
    /// Party id to vote for; it must field a candidate on the voter's ballot.
    #[clap(long)]
    pub party: String,
    /// Election to vote in. Defaults to the first ongoing election.
    #[clap(long)]
    pub election: Option<String>,
}

pub fn run(global: &GlobalArgs, args: VoteArgs) -> Result<()> {
    let kernel = open_kernel(global, args.voter.liveness_attested)?;
    let election = open_election(kernel.catalog.as_ref(), args.election.as_deref())?;
    let profile = verify_voter(&kernel, &args.voter)?;
    let nid = profile.national_id();

    let ballot = kernel.catalog.ballot_for(&election, &profile.identity);
    if ballot.is_empty() {
        bail!(
            "No candidates stand in {} for {}",
            profile.identity.location.constituency,
            election.title
        );
    }
    if !ballot.iter().any(|c| c.party_id == args.party) {
        bail!(
            "Party {} has no candidate on the ballot for {} in {}",
            args.party,
            profile.identity.location.constituency,
            election.title
        );
    }

    match kernel.ledger.cast_vote(nid.as_str(), &args.party)? {
        VoteOutcome::Accepted => {
            println!("✅ Ballot recorded for {} in {}", nid.masked(), election.title);
            println!("   Total votes: {}", kernel.ledger.get_total_vote_count());
        }
        VoteOutcome::AlreadyVoted => {
            println!("⚠️  {} has already voted; nothing was recorded", nid.masked());
        }
    }
    Ok(())
}

/// The election a ballot is cast in. Only ongoing elections accept ballots.
fn open_election(catalog: &dyn ElectionCatalog, id: Option<&str>) -> Result<Election> {
    let election = match id {
        Some(id) => catalog
            .get_election(id)
            .ok_or_else(|| anyhow!("Unknown election {}", id))?,
        None => catalog
            .elections_with_status(ElectionStatus::Ongoing)
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("No election is open for voting"))?,
    };
    if election.status != ElectionStatus::Ongoing {
        bail!("{} is not open for voting ({:?})", election.title, election.status);
    }
    Ok(election)
}
