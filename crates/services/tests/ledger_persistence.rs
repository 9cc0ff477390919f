// Path: crates/services/tests/ledger_persistence.rs
//! Ledger behaviour across restarts and storage failures.

use evote_api::storage::LedgerStore;
use evote_services::{StaticElectionCatalog, VotingLedger};
use evote_storage::{FileLedgerStore, RedbLedgerStore};
use evote_test_utils::fixtures::{nid, parties_abc, sample_elections};
use evote_test_utils::{assert_err, assert_ok, FailingStore};
use evote_types::error::{LedgerError, StorageError};
use std::sync::Arc;

fn open(store: Arc<dyn LedgerStore>) -> VotingLedger {
    VotingLedger::open(
        store,
        parties_abc(),
        Arc::new(StaticElectionCatalog::new(sample_elections())),
        500,
    )
    .unwrap()
}

fn exercise(ledger: &VotingLedger) {
    assert_ok!(ledger.cast_vote(&nid(1), "A"));
    assert_ok!(ledger.cast_vote(&nid(2), "B"));
    assert_ok!(ledger.cast_vote(&nid(3), "B"));
    assert_ok!(ledger.register_for_election(&nid(1), "e2", "Dhaka-10", 10));
    assert_ok!(ledger.register_for_election(&nid(1), "e3", "Dhaka-11", 20));
    assert_ok!(ledger.register_for_election(&nid(2), "e2", "Khulna-2", 30));
}

fn assert_reload_matches(reopen: impl Fn() -> Arc<dyn LedgerStore>) {
    let before = {
        let ledger = open(reopen());
        exercise(&ledger);
        ledger.snapshot()
    };
    let ledger = open(reopen());
    let after = ledger.snapshot();

    assert_eq!(after.votes, before.votes);
    assert_eq!(after.voted_ids, before.voted_ids);
    assert_eq!(after.registrations, before.registrations);
    assert_eq!(after.total_eligible_voters, 500);
    assert!(ledger.has_voted(&nid(3)));
    assert_eq!(ledger.get_registrations(&nid(1)).len(), 2);
}

#[test]
fn file_store_reload_reproduces_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("evote.json");
    assert_reload_matches(|| Arc::new(FileLedgerStore::open(&path).unwrap()));
}

#[test]
fn redb_store_reload_reproduces_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("evote.redb");
    assert_reload_matches(|| Arc::new(RedbLedgerStore::open(&path).unwrap()));
}

#[test]
fn failing_store_leaves_ledger_unchanged() {
    let store = Arc::new(FailingStore::new());
    let ledger = open(store.clone());
    assert_ok!(ledger.cast_vote(&nid(1), "A"));
    assert_ok!(ledger.register_for_election(&nid(1), "e2", "Dhaka-10", 1));
    let before = ledger.snapshot();

    store.set_failing(true);
    let err = assert_err!(ledger.cast_vote(&nid(2), "A"));
    assert!(matches!(err, LedgerError::Persistence(StorageError::Io(_))));
    let err = assert_err!(ledger.register_for_election(&nid(1), "e3", "Dhaka-10", 2));
    assert!(matches!(err, LedgerError::Persistence(_)));

    assert_eq!(ledger.snapshot(), before);
    assert!(!ledger.has_voted(&nid(2)));
    assert_eq!(store.committed(), Some(before));
    assert_eq!(store.rejected_commits(), 2);

    // Once the store recovers the same voter can vote: nothing was half-recorded.
    store.set_failing(false);
    assert_ok!(ledger.cast_vote(&nid(2), "A"));
    assert_eq!(ledger.get_total_vote_count(), 2);
    ledger.check_invariants().unwrap();
}

#[test]
fn failing_store_at_startup_is_reported() {
    let store = Arc::new(FailingStore::new());
    store.set_failing(true);
    let result = VotingLedger::open(
        store,
        parties_abc(),
        Arc::new(StaticElectionCatalog::new(sample_elections())),
        500,
    );
    assert!(matches!(result, Err(LedgerError::Persistence(_))));
}
