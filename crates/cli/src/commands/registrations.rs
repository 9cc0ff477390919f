// Path: crates/cli/src/commands/registrations.rs

use super::GlobalArgs;
use crate::util::open_kernel;
use anyhow::Result;
use clap::{ArgGroup, Parser};
use evote_types::app::{NationalId, RegistrationRecord};

#[derive(Parser, Debug)]
#[clap(group(ArgGroup::new("subject").required(true).args(["nid", "election"])))]
pub struct RegistrationsArgs {
    /// List the elections this national ID registered for.
    #[clap(long)]
    pub nid: Option<String>,
    /// List every registration for this election.
    #[clap(long)]
    pub election: Option<String>,
}

pub fn run(global: &GlobalArgs, args: RegistrationsArgs) -> Result<()> {
    let kernel = open_kernel(global, false)?;
    let records = match (&args.nid, &args.election) {
        (Some(nid), _) => kernel.ledger.get_registration_records(nid),
        (None, Some(election)) => kernel.ledger.registrations_for_election(election),
        (None, None) => Vec::new(),
    };

    if records.is_empty() {
        println!("No registrations found.");
        return Ok(());
    }
    for record in &records {
        println!("{}", describe(record));
    }
    println!("{} registration(s)", records.len());
    Ok(())
}

fn describe(record: &RegistrationRecord) -> String {
    let who = NationalId::parse(&record.national_id)
        .map(|nid| nid.masked())
        .unwrap_or_else(|_| "<invalid>".into());
    format!(
        "{}  {:<6} {:<40} {:<12} {}",
        who, record.election_id, record.election_title, record.election_date, record.constituency
    )
}
