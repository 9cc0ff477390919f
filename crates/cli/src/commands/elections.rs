// Path: crates/cli/src/commands/elections.rs

use super::GlobalArgs;
use crate::util::load_config;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use evote_api::catalog::ElectionCatalog;
use evote_services::StaticElectionCatalog;
use evote_types::app::ElectionStatus;

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum StatusFilter {
    Upcoming,
    Ongoing,
    Completed,
}

impl From<StatusFilter> for ElectionStatus {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Upcoming => ElectionStatus::Upcoming,
            StatusFilter::Ongoing => ElectionStatus::Ongoing,
            StatusFilter::Completed => ElectionStatus::Completed,
        }
    }
}

#[derive(Parser, Debug)]
pub struct ElectionsArgs {
    /// Only list elections in this stage.
    #[clap(long, value_enum)]
    pub status: Option<StatusFilter>,
}

pub fn run(global: &GlobalArgs, args: ElectionsArgs) -> Result<()> {
    // Listing the catalog does not need the ledger, so the store is not opened.
    let catalog = StaticElectionCatalog::new(load_config(&global.config)?.elections);
    let elections = match args.status {
        Some(status) => catalog.elections_with_status(status.into()),
        None => catalog.list_elections(),
    };

    for election in elections {
        println!(
            "{:<6} {:<40} {:<12} {:?}/{:?}",
            election.id, election.title, election.date, election.status, election.level
        );
        if !election.description.is_empty() {
            println!("       {}", election.description);
        }
    }
    Ok(())
}
