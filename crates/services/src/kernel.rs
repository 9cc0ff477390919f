// Path: crates/services/src/kernel.rs
//! Wires a ledger and a verification gate from a [`KernelConfig`].

use crate::catalog::StaticElectionCatalog;
use crate::directory::{ProvisionalDirectory, StaticDirectory};
use crate::ledger::VotingLedger;
use crate::verification::VerificationGate;
use evote_api::identity::{IdentityDirectory, LivenessCheck};
use evote_api::storage::{LedgerStore, StorageError};
use evote_api::time::Clock;
use evote_storage::{FileLedgerStore, MemoryLedgerStore, RedbLedgerStore};
use evote_types::config::{DirectoryMode, KernelConfig, StorageBackend, StorageConfig};
use evote_types::error::{ConfigError, ErrorCode, LedgerError, NationalIdError};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while assembling the kernel.
#[derive(Error, Debug)]
pub enum KernelError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid voter record in directory configuration: {0}")]
    Directory(#[from] NationalIdError),
    #[error("Failed to open ledger store: {0}")]
    Storage(#[from] StorageError),
    #[error("Failed to open ledger: {0}")]
    Ledger(#[from] LedgerError),
}

impl ErrorCode for KernelError {
    fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "KERNEL_CONFIG",
            Self::Directory(e) => e.code(),
            Self::Storage(e) => e.code(),
            Self::Ledger(e) => e.code(),
        }
    }
}

/// The assembled services.
pub struct Kernel {
    pub ledger: Arc<VotingLedger>,
    pub gate: VerificationGate,
    pub catalog: Arc<StaticElectionCatalog>,
}

impl Kernel {
    /// Validates `config`, opens the configured store and builds the ledger
    /// and the verification gate around it.
    pub fn build(
        config: &KernelConfig,
        liveness: Arc<dyn LivenessCheck>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, KernelError> {
        config.validate()?;

        let store = open_store(&config.storage)?;
        let catalog = Arc::new(
            StaticElectionCatalog::new(config.elections.clone())
                .with_candidates(config.candidates.clone()),
        );
        let ledger = Arc::new(VotingLedger::open(
            store,
            config.parties.clone(),
            catalog.clone(),
            config.total_eligible_voters,
        )?);

        let directory: Arc<dyn IdentityDirectory> = match config.directory.mode {
            DirectoryMode::Static => {
                let directory = StaticDirectory::from_config(&config.directory.voters)?;
                if directory.is_empty() {
                    tracing::warn!(
                        target: "verification",
                        "Static directory has no voter records; every lookup will fail"
                    );
                }
                Arc::new(directory)
            }
            DirectoryMode::Provisional => {
                tracing::warn!(
                    target: "verification",
                    "Provisional directory enabled; identities are not checked against any register"
                );
                Arc::new(ProvisionalDirectory::new(config.directory.constituencies.clone()))
            }
        };
        let gate = VerificationGate::new(directory, liveness, clock)
            .with_minimum_age(config.verification.minimum_age);

        Ok(Self {
            ledger,
            gate,
            catalog,
        })
    }
}

/// Opens the backend selected by `config`.
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn LedgerStore>, KernelError> {
    let path = || {
        config.path.clone().ok_or_else(|| {
            ConfigError::Invalid("storage.path is required for file and redb backends".into())
        })
    };
    let store: Arc<dyn LedgerStore> = match config.backend {
        StorageBackend::Memory => Arc::new(MemoryLedgerStore::new()),
        StorageBackend::File => Arc::new(FileLedgerStore::open(path()?)?),
        StorageBackend::Redb => Arc::new(RedbLedgerStore::open(path()?)?),
    };
    tracing::info!(target: "storage", backend = store.backend_name(), "Ledger store ready");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use evote_api::catalog::ElectionCatalog;
    use evote_test_utils::{FixedClock, ScriptedLiveness};
    use evote_types::app::VoteOutcome;

    fn build(config: &KernelConfig) -> Result<Kernel, KernelError> {
        Kernel::build(
            config,
            Arc::new(ScriptedLiveness::passing()),
            Arc::new(FixedClock::on(2026, 12, 20).unwrap()),
        )
    }

    #[test]
    fn default_config_builds_an_in_memory_kernel() {
        let kernel = build(&KernelConfig::default()).unwrap();
        assert_eq!(kernel.ledger.backend_name(), "memory");
        assert_eq!(kernel.ledger.get_results().len(), 4);
        assert_eq!(kernel.gate.minimum_age(), 18);
        assert_eq!(kernel.catalog.list_candidates().len(), 5);
    }

    #[test]
    fn file_backend_without_path_is_rejected() {
        let mut config = KernelConfig::default();
        config.storage.backend = StorageBackend::File;
        assert!(matches!(build(&config), Err(KernelError::Config(_))));
    }

    #[test]
    fn redb_backend_persists_across_builds() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = KernelConfig::default();
        config.storage.backend = StorageBackend::Redb;
        config.storage.path = Some(dir.path().join("ledger.redb"));

        {
            let kernel = build(&config).unwrap();
            assert_eq!(
                kernel.ledger.cast_vote("1234567890", "boat").unwrap(),
                VoteOutcome::Accepted
            );
        }
        let kernel = build(&config).unwrap();
        assert!(kernel.ledger.has_voted("1234567890"));
        assert_eq!(kernel.ledger.get_total_vote_count(), 1);
    }
}
