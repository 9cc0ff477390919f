// Path: crates/cli/src/main.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # eVote CLI
//!
//! Operator tooling for the eVote kernel: verify voters, cast votes, manage
//! election registrations and inspect the tally.

use anyhow::Result;
use clap::{Parser, Subcommand};
use evote_cli::commands::*;

#[derive(Parser, Debug)]
#[clap(
    name = "evote",
    version,
    about = "The eVote operator CLI.",
    long_about = "Verifies voters, records ballots and election registrations, and reports the live tally of an eVote ledger."
)]
struct Cli {
    #[clap(flatten)]
    global: GlobalArgs,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    // --- Setup ---
    /// Write a default configuration file.
    Init(init::InitArgs),

    // --- Voter workflow ---
    /// Verify a voter's identity and liveness without voting.
    Verify(verify::VerifyArgs),

    /// Verify a voter and cast their ballot.
    Vote(vote::VoteArgs),

    /// Verify a voter and register them for an election.
    Register(register::RegisterArgs),

    // --- Reporting ---
    /// List registrations by voter or by election.
    Registrations(registrations::RegistrationsArgs),

    /// Show the tally, most votes first.
    Results,

    /// List the election catalog.
    Elections(elections::ElectionsArgs),

    /// Show turnout and check the ledger invariants.
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    evote_telemetry::init::init_tracing_with_default("warn")?;
    if cli.global.metrics {
        evote_telemetry::prometheus::install()?;
    }

    let outcome = match cli.command {
        Commands::Init(args) => init::run(&cli.global, args),
        Commands::Verify(args) => verify::run(&cli.global, args),
        Commands::Vote(args) => vote::run(&cli.global, args),
        Commands::Register(args) => register::run(&cli.global, args),
        Commands::Registrations(args) => registrations::run(&cli.global, args),
        Commands::Results => results::run(&cli.global),
        Commands::Elections(args) => elections::run(&cli.global, args),
        Commands::Status => status::run(&cli.global),
    };

    // Metrics are printed even when the command failed, so rejections show up.
    if cli.global.metrics {
        print!("{}", evote_telemetry::prometheus::render()?);
    }
    outcome
}
