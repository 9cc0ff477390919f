// Path: crates/cli/src/commands/status.rs

use super::GlobalArgs;
use crate::util::{open_kernel, percent};
use anyhow::Result;

pub fn run(global: &GlobalArgs) -> Result<()> {
    let kernel = open_kernel(global, false)?;
    let ledger = &kernel.ledger;
    let turnout = ledger.turnout();

    println!("Backend:         {}", ledger.backend_name());
    println!("Votes cast:      {}", turnout.votes_cast);
    println!("Eligible voters: {}", turnout.total_eligible_voters);
    println!(
        "Turnout:         {}",
        percent(turnout.votes_cast, turnout.total_eligible_voters)
    );

    ledger.check_invariants()?;
    println!("Invariants:      ok");
    Ok(())
}
