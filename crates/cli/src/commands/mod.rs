// Path: crates/cli/src/commands/mod.rs

use clap::Args;
use std::path::PathBuf;

pub mod elections;
pub mod init;
pub mod register;
pub mod registrations;
pub mod results;
pub mod status;
pub mod verify;
pub mod vote;

/// Flags shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Path to the kernel configuration file.
    #[clap(long, global = true, default_value = "evote.toml")]
    pub config: PathBuf,

    /// Print Prometheus metrics after the command completes.
    #[clap(long, global = true)]
    pub metrics: bool,
}

/// The details a voter presents at the verification gate.
#[derive(Args, Debug, Clone)]
pub struct VoterArgs {
    /// National ID (10, 13 or 17 digits).
    #[clap(long)]
    pub nid: String,

    /// Date of birth, `YYYY-MM-DD`.
    #[clap(long)]
    pub dob: chrono::NaiveDate,

    /// Division the voter selected; used by the provisional directory.
    #[clap(long, default_value = "Dhaka")]
    pub division: String,

    /// The operator confirms the voter is physically present.
    #[clap(long)]
    pub liveness_attested: bool,
}
