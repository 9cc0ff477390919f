// Path: crates/storage/src/file_store.rs
//! A JSON snapshot store.
//!
//! The file holds one object keyed by the ledger storage id:
//!
//! ```json
//! { "BD_EVOTE_DB_2026": { "votes": {..}, "votedIds": [..], "registrations": {..}, "totalEligibleVoters": 154200000 } }
//! ```
//!
//! Every commit rewrites the whole snapshot to a temporary file, syncs it,
//! renames it over the original and syncs the containing directory, so a
//! crash leaves either the old or the new snapshot on disk and never a mix.

use crate::metrics::instrumented_commit;
use evote_api::storage::{LedgerStore, StorageError};
use evote_types::app::{LedgerMutation, LedgerState};
use evote_types::keys::LEDGER_STORAGE_ID;
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const BACKEND: &str = "file";

type Snapshot = BTreeMap<String, LedgerState>;

pub struct FileLedgerStore {
    path: PathBuf,
    // Last committed state; `None` until the first save.
    cache: Mutex<Option<LedgerState>>,
}

impl FileLedgerStore {
    /// Opens (or prepares to create) the snapshot at `path`.
    ///
    /// An existing snapshot is parsed eagerly so that a corrupt file is
    /// reported at startup rather than on the first vote.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let existing = read_snapshot(&path)?;
        tracing::info!(
            target: "storage",
            path = %path.display(),
            existing = existing.is_some(),
            "Opened ledger snapshot"
        );
        Ok(Self {
            path,
            cache: Mutex::new(existing),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_snapshot(&self, state: &LedgerState) -> Result<(), StorageError> {
        let mut snapshot = Snapshot::new();
        snapshot.insert(LEDGER_STORAGE_ID.to_string(), state.clone());
        let bytes =
            serde_json::to_vec_pretty(&snapshot).map_err(|e| StorageError::Encode(e.to_string()))?;

        let tmp_path = self.path.with_extension("json.tmp");
        {
            let mut tmp_file = BufWriter::new(
                OpenOptions::new()
                    .create(true)
                    .write(true)
                    .truncate(true)
                    .open(&tmp_path)?,
            );
            tmp_file.write_all(&bytes)?;
            tmp_file.flush()?;
            tmp_file.get_ref().sync_data()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        sync_parent_dir(&self.path)?;
        Ok(())
    }
}

/// Flushes the directory entry for `path` so a completed rename survives a crash.
#[cfg(unix)]
fn sync_parent_dir(path: &Path) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    File::open(parent)?.sync_all()
}

// Directories cannot be opened as files here; the rename is already durable
// once it returns.
#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

fn read_snapshot(path: &Path) -> Result<Option<LedgerState>, StorageError> {
    if !path.exists() {
        return Ok(None);
    }
    let file = File::open(path)?;
    let mut snapshot: Snapshot =
        serde_json::from_reader(file).map_err(|e| StorageError::Decode(e.to_string()))?;
    Ok(snapshot.remove(LEDGER_STORAGE_ID))
}

impl LedgerStore for FileLedgerStore {
    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    fn load(&self) -> Result<Option<LedgerState>, StorageError> {
        let guard = self
            .cache
            .lock()
            .map_err(|_| StorageError::Backend("snapshot lock poisoned".into()))?;
        Ok(guard.clone())
    }

    fn save(&self, state: &LedgerState) -> Result<(), StorageError> {
        instrumented_commit(BACKEND, || {
            let mut guard = self
                .cache
                .lock()
                .map_err(|_| StorageError::Backend("snapshot lock poisoned".into()))?;
            self.write_snapshot(state)?;
            *guard = Some(state.clone());
            Ok(())
        })
    }

    fn apply(&self, mutation: &LedgerMutation) -> Result<(), StorageError> {
        instrumented_commit(BACKEND, || {
            let mut guard = self
                .cache
                .lock()
                .map_err(|_| StorageError::Backend("snapshot lock poisoned".into()))?;
            let mut next = guard.clone().unwrap_or_default();
            next.apply(mutation)?;
            self.write_snapshot(&next)?;
            *guard = Some(next);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evote_types::app::RegistrationRecord;
    use tempfile::tempdir;

    #[test]
    fn commit_leaves_only_the_snapshot_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let store = FileLedgerStore::open(&path).unwrap();
        store.save(&LedgerState::default()).unwrap();
        store
            .apply(&LedgerMutation::Register(registration("1234567890", "e2")))
            .unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("ledger.json")]);
    }

    #[test]
    fn parent_directory_sync_accepts_bare_and_nested_paths() {
        let dir = tempdir().unwrap();
        sync_parent_dir(&dir.path().join("ledger.json")).unwrap();
        // A bare file name lives in the working directory.
        sync_parent_dir(Path::new("ledger.json")).unwrap();
    }

    fn registration(nid: &str, election: &str) -> RegistrationRecord {
        RegistrationRecord {
            national_id: nid.into(),
            election_id: election.into(),
            election_title: "Union Parishad and Local Elections".into(),
            election_date: "2027-01-15".into(),
            constituency: "Dhaka-10".into(),
            timestamp: 1_767_225_600_000,
        }
    }

    #[test]
    fn test_snapshot_reload_reproduces_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        let store = FileLedgerStore::open(&path).unwrap();
        store.save(&LedgerState::default()).unwrap();
        store
            .apply(&LedgerMutation::CastVote {
                national_id: "1234567890".into(),
                party_id: "boat".into(),
            })
            .unwrap();
        store
            .apply(&LedgerMutation::Register(registration("1234567890", "e2")))
            .unwrap();
        let written = store.load().unwrap().unwrap();
        drop(store);

        let reopened = FileLedgerStore::open(&path).unwrap();
        let reloaded = reopened.load().unwrap().unwrap();
        assert_eq!(reloaded.votes, written.votes);
        assert_eq!(reloaded.voted_ids, written.voted_ids);
        assert_eq!(reloaded.registrations, written.registrations);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_conflicting_apply_leaves_file_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let store = FileLedgerStore::open(&path).unwrap();
        let vote = LedgerMutation::CastVote {
            national_id: "1234567890".into(),
            party_id: "boat".into(),
        };
        store.apply(&vote).unwrap();
        let before = fs::read(&path).unwrap();

        assert!(matches!(store.apply(&vote), Err(StorageError::Conflict(_))));
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_legacy_snapshot_without_registrations_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("legacy.json");
        fs::write(
            &path,
            r#"{"BD_EVOTE_DB_2026":{"votes":{"boat":1},"votedNIDs":["1234567890"],"totalVoters":154200000}}"#,
        )
        .unwrap();

        let state = FileLedgerStore::open(&path).unwrap().load().unwrap().unwrap();
        assert!(state.has_voted("1234567890"));
        assert!(state.registrations.is_empty());
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_corrupt_snapshot_is_reported_on_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corrupt.json");
        fs::write(&path, b"{not json").unwrap();
        assert!(matches!(
            FileLedgerStore::open(&path),
            Err(StorageError::Decode(_))
        ));
    }
}
