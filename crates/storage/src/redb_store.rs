// Path: crates/storage/src/redb_store.rs
use crate::metrics::instrumented_commit;
use evote_api::storage::{LedgerStore, StorageError};
use evote_types::app::{LedgerMutation, LedgerState, RegistrationRecord};
use evote_types::codec;
use evote_types::keys::{registration_key, LEDGER_STORAGE_ID};
use parity_scale_codec::{Decode, Encode};
use redb::{Database, ReadTransaction, ReadableTable, TableDefinition, WriteTransaction};
use std::path::Path;

const BACKEND: &str = "redb";

/// ---- Table definitions ----
/// key = storage id, value = SCALE(StoreHeader)
const META: TableDefinition<&str, &[u8]> = TableDefinition::new("META");
/// key = party id
const TALLY: TableDefinition<&str, u64> = TableDefinition::new("TALLY");
/// key = national id; the party is never recorded next to the voter.
const VOTED: TableDefinition<&str, ()> = TableDefinition::new("VOTED");
/// key = `<nid>::<election>`, value = SCALE(RegistrationRecord)
const REGISTRATIONS: TableDefinition<&str, &[u8]> = TableDefinition::new("REGISTRATIONS");

const HEADER_VERSION: u16 = 1;

#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
struct StoreHeader {
    version: u16,
    total_eligible_voters: u64,
}

fn backend_err(e: impl std::fmt::Display) -> StorageError {
    StorageError::Backend(e.to_string())
}

/// A transactional ledger store: every mutation is one redb write transaction
/// touching the tally, voter-marker and registration tables together.
pub struct RedbLedgerStore {
    db: Database,
}

impl RedbLedgerStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db_path = path.as_ref();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(db_path).map_err(backend_err)?;

        // Ensure tables exist
        {
            let w = db.begin_write().map_err(backend_err)?;
            {
                w.open_table(META).map_err(backend_err)?;
                w.open_table(TALLY).map_err(backend_err)?;
                w.open_table(VOTED).map_err(backend_err)?;
                w.open_table(REGISTRATIONS).map_err(backend_err)?;
            }
            w.commit().map_err(backend_err)?;
        }
        tracing::info!(target: "storage", path = %db_path.display(), "Opened redb ledger store");
        Ok(Self { db })
    }

    fn read_txn(&self) -> Result<ReadTransaction<'_>, StorageError> {
        self.db.begin_read().map_err(backend_err)
    }

    fn write_txn(&self) -> Result<WriteTransaction<'_>, StorageError> {
        self.db.begin_write().map_err(backend_err)
    }

    /// Runs `body` inside one write transaction. The transaction is committed
    /// only if `body` succeeds; otherwise it is aborted and nothing is written.
    fn transact<F>(&self, body: F) -> Result<(), StorageError>
    where
        F: FnOnce(&WriteTransaction<'_>) -> Result<(), StorageError>,
    {
        let w = self.write_txn()?;
        match body(&w) {
            Ok(()) => w.commit().map_err(backend_err),
            Err(e) => {
                if let Err(abort_err) = w.abort() {
                    tracing::warn!(target: "storage", error = %abort_err, "Failed to abort redb transaction");
                }
                Err(e)
            }
        }
    }

    fn write_header(w: &WriteTransaction<'_>, total_eligible_voters: u64) -> Result<(), StorageError> {
        let header = StoreHeader {
            version: HEADER_VERSION,
            total_eligible_voters,
        };
        let bytes = codec::to_bytes_canonical(&header).map_err(StorageError::Encode)?;
        let mut meta = w.open_table(META).map_err(backend_err)?;
        meta.insert(LEDGER_STORAGE_ID, bytes.as_slice())
            .map_err(backend_err)?;
        Ok(())
    }

    fn cast_vote(
        w: &WriteTransaction<'_>,
        national_id: &str,
        party_id: &str,
    ) -> Result<(), StorageError> {
        let mut voted = w.open_table(VOTED).map_err(backend_err)?;
        if voted.get(national_id).map_err(backend_err)?.is_some() {
            return Err(StorageError::Conflict(format!(
                "national ID already marked as voted (party {})",
                party_id
            )));
        }
        let mut tally = w.open_table(TALLY).map_err(backend_err)?;
        let current = tally
            .get(party_id)
            .map_err(backend_err)?
            .map(|v| v.value())
            .unwrap_or(0);
        let next = current
            .checked_add(1)
            .ok_or_else(|| StorageError::Conflict("tally overflow".into()))?;
        tally.insert(party_id, next).map_err(backend_err)?;
        voted.insert(national_id, ()).map_err(backend_err)?;
        Ok(())
    }

    fn register(w: &WriteTransaction<'_>, record: &RegistrationRecord) -> Result<(), StorageError> {
        let key = registration_key(&record.national_id, &record.election_id);
        let mut registrations = w.open_table(REGISTRATIONS).map_err(backend_err)?;
        if registrations.get(key.as_str()).map_err(backend_err)?.is_some() {
            return Err(StorageError::Conflict(format!(
                "registration for election {} already exists",
                record.election_id
            )));
        }
        let bytes = codec::to_bytes_canonical(record).map_err(StorageError::Encode)?;
        registrations
            .insert(key.as_str(), bytes.as_slice())
            .map_err(backend_err)?;
        Ok(())
    }
}

impl LedgerStore for RedbLedgerStore {
    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    fn load(&self) -> Result<Option<LedgerState>, StorageError> {
        let r = self.read_txn()?;

        let header = {
            let meta = r.open_table(META).map_err(backend_err)?;
            let Some(bytes) = meta.get(LEDGER_STORAGE_ID).map_err(backend_err)? else {
                return Ok(None);
            };
            codec::from_bytes_canonical::<StoreHeader>(bytes.value())
                .map_err(StorageError::Decode)?
        };
        if header.version != HEADER_VERSION {
            return Err(StorageError::Decode(format!(
                "unsupported ledger store version {}",
                header.version
            )));
        }

        let mut state = LedgerState {
            total_eligible_voters: header.total_eligible_voters,
            ..LedgerState::default()
        };

        let tally = r.open_table(TALLY).map_err(backend_err)?;
        for entry in tally.iter().map_err(backend_err)? {
            let (party, count) = entry.map_err(backend_err)?;
            state.votes.insert(party.value().to_string(), count.value());
        }

        let voted = r.open_table(VOTED).map_err(backend_err)?;
        for entry in voted.iter().map_err(backend_err)? {
            let (national_id, _) = entry.map_err(backend_err)?;
            state.voted_ids.insert(national_id.value().to_string());
        }

        let registrations = r.open_table(REGISTRATIONS).map_err(backend_err)?;
        for entry in registrations.iter().map_err(backend_err)? {
            let (_, bytes) = entry.map_err(backend_err)?;
            let record: RegistrationRecord =
                codec::from_bytes_canonical(bytes.value()).map_err(StorageError::Decode)?;
            state
                .registrations
                .entry(record.national_id.clone())
                .or_default()
                .push(record);
        }
        // Keys sort by election id; registration order is recovered from the timestamp.
        for records in state.registrations.values_mut() {
            records.sort_by_key(|r| r.timestamp);
        }

        Ok(Some(state))
    }

    fn save(&self, state: &LedgerState) -> Result<(), StorageError> {
        instrumented_commit(BACKEND, || {
            self.transact(|w| {
                w.delete_table(TALLY).map_err(backend_err)?;
                w.delete_table(VOTED).map_err(backend_err)?;
                w.delete_table(REGISTRATIONS).map_err(backend_err)?;
                Self::write_header(w, state.total_eligible_voters)?;
                {
                    let mut tally = w.open_table(TALLY).map_err(backend_err)?;
                    for (party, count) in &state.votes {
                        tally.insert(party.as_str(), *count).map_err(backend_err)?;
                    }
                }
                {
                    let mut voted = w.open_table(VOTED).map_err(backend_err)?;
                    for national_id in &state.voted_ids {
                        voted.insert(national_id.as_str(), ()).map_err(backend_err)?;
                    }
                }
                {
                    // Opened even when empty so the table exists for later reads.
                    let _registrations = w.open_table(REGISTRATIONS).map_err(backend_err)?;
                }
                for record in state.registrations.values().flatten() {
                    Self::register(w, record)?;
                }
                Ok(())
            })
        })?;
        tracing::debug!(target: "storage", parties = state.votes.len(), "Wrote full ledger state to redb");
        Ok(())
    }

    fn apply(&self, mutation: &LedgerMutation) -> Result<(), StorageError> {
        instrumented_commit(BACKEND, || {
            self.transact(|w| {
                let has_header = {
                    let meta = w.open_table(META).map_err(backend_err)?;
                    let found = meta.get(LEDGER_STORAGE_ID).map_err(backend_err)?.is_some();
                    found
                };
                if !has_header {
                    Self::write_header(w, LedgerState::default().total_eligible_voters)?;
                }
                match mutation {
                    LedgerMutation::CastVote {
                        national_id,
                        party_id,
                    } => Self::cast_vote(w, national_id, party_id),
                    LedgerMutation::Register(record) => Self::register(w, record),
                }
            })
        })
    }
}
