// Path: crates/cli/src/commands/results.rs

use super::GlobalArgs;
use crate::util::{open_kernel, percent};
use anyhow::Result;

pub fn run(global: &GlobalArgs) -> Result<()> {
    let kernel = open_kernel(global, false)?;
    let total = kernel.ledger.get_total_vote_count();

    println!("{:<28} {:>10} {:>9}", "Party", "Votes", "Share");
    for row in kernel.ledger.get_results() {
        println!(
            "{:<28} {:>10} {:>9}",
            row.label,
            row.votes,
            percent(row.votes, total)
        );
    }
    println!("{:<28} {:>10}", "Total", total);
    Ok(())
}
