// Path: crates/services/tests/ledger_concurrency.rs
//! Concurrent voting against the ledger.

use evote_api::storage::LedgerStore;
use evote_services::{StaticElectionCatalog, VotingLedger};
use evote_storage::{MemoryLedgerStore, RedbLedgerStore};
use evote_test_utils::fixtures::{nid, parties_abc, sample_elections};
use evote_types::app::{RegistrationOutcome, VoteOutcome};
use std::sync::{Arc, Barrier};
use std::thread;

fn open(store: Arc<dyn LedgerStore>) -> Arc<VotingLedger> {
    Arc::new(
        VotingLedger::open(
            store,
            parties_abc(),
            Arc::new(StaticElectionCatalog::new(sample_elections())),
            1_000_000,
        )
        .unwrap(),
    )
}

fn race_same_identity(ledger: Arc<VotingLedger>, contenders: usize) -> Vec<VoteOutcome> {
    let barrier = Arc::new(Barrier::new(contenders));
    let handles: Vec<_> = (0..contenders)
        .map(|i| {
            let ledger = ledger.clone();
            let barrier = barrier.clone();
            let party = ["A", "B", "C"][i % 3];
            thread::spawn(move || {
                barrier.wait();
                ledger.cast_vote(&nid(42), party).unwrap()
            })
        })
        .collect();
    handles.into_iter().map(|h| h.join().unwrap()).collect()
}

#[test]
fn exactly_one_of_many_concurrent_votes_wins() {
    let ledger = open(Arc::new(MemoryLedgerStore::new()));
    let outcomes = race_same_identity(ledger.clone(), 16);

    let accepted = outcomes.iter().filter(|o| **o == VoteOutcome::Accepted).count();
    assert_eq!(accepted, 1);
    assert_eq!(outcomes.len() - accepted, 15);
    assert_eq!(ledger.get_total_vote_count(), 1);
    ledger.check_invariants().unwrap();
}

#[test]
fn exactly_one_wins_against_redb() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(RedbLedgerStore::open(dir.path().join("ledger.redb")).unwrap());
    let ledger = open(store.clone());
    let outcomes = race_same_identity(ledger.clone(), 8);

    assert_eq!(outcomes.iter().filter(|o| **o == VoteOutcome::Accepted).count(), 1);
    let persisted = store.load().unwrap().unwrap();
    assert_eq!(persisted.total_votes(), 1);
    assert_eq!(persisted.voted_ids.len(), 1);
}

#[test]
fn distinct_identities_all_count() {
    let ledger = open(Arc::new(MemoryLedgerStore::new()));
    let voters = 64;
    let barrier = Arc::new(Barrier::new(voters));
    let handles: Vec<_> = (0..voters)
        .map(|i| {
            let ledger = ledger.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                let party = if i % 2 == 0 { "A" } else { "B" };
                ledger.cast_vote(&nid(i as u64), party).unwrap()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), VoteOutcome::Accepted);
    }

    assert_eq!(ledger.get_total_vote_count(), voters as u64);
    let results = ledger.get_results();
    assert_eq!(results[0].votes, 32);
    assert_eq!(results[1].votes, 32);
    assert_eq!(results[2].votes, 0);
    ledger.check_invariants().unwrap();
}

#[test]
fn concurrent_registrations_for_one_election_record_once() {
    let ledger = open(Arc::new(MemoryLedgerStore::new()));
    let contenders = 8;
    let barrier = Arc::new(Barrier::new(contenders));
    let handles: Vec<_> = (0..contenders)
        .map(|i| {
            let ledger = ledger.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                ledger
                    .register_for_election(&nid(7), "e2", "Dhaka-10", i as u64)
                    .unwrap()
            })
        })
        .collect();
    let registered = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|o| *o == RegistrationOutcome::Registered)
        .count();

    assert_eq!(registered, 1);
    assert_eq!(ledger.get_registration_records(&nid(7)).len(), 1);
}

#[test]
fn readers_never_see_a_half_applied_vote() {
    let ledger = open(Arc::new(MemoryLedgerStore::new()));
    let writer = {
        let ledger = ledger.clone();
        thread::spawn(move || {
            for i in 0..200 {
                ledger.cast_vote(&nid(i), "C").unwrap();
            }
        })
    };
    while !writer.is_finished() {
        let snapshot = ledger.snapshot();
        assert_eq!(snapshot.total_votes(), snapshot.voted_ids.len() as u64);
    }
    writer.join().unwrap();
    assert_eq!(ledger.get_total_vote_count(), 200);
}
