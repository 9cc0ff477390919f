// Path: crates/cli/src/commands/init.rs

use super::GlobalArgs;
use anyhow::{anyhow, Result};
use clap::Parser;
use evote_types::config::{KernelConfig, StorageBackend};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Store the ledger in a redb database at this path instead of in memory.
    #[clap(long)]
    pub redb: Option<PathBuf>,
    /// Overwrite an existing configuration file.
    #[clap(long)]
    pub force: bool,
}

pub fn run(global: &GlobalArgs, args: InitArgs) -> Result<()> {
    let path = &global.config;
    if path.exists() && !args.force {
        return Err(anyhow!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        ));
    }

    let mut config = KernelConfig::default();
    if let Some(db) = args.redb {
        config.storage.backend = StorageBackend::Redb;
        config.storage.path = Some(db);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, config.to_toml_string()?)?;

    println!("✅ Wrote {}", path.display());
    println!("   🗳️  {} parties, {} elections", config.parties.len(), config.elections.len());
    println!("   💾 storage backend: {:?}", config.storage.backend);
    Ok(())
}
