// Path: crates/services/tests/ledger_results.rs
//! Result ordering and the tally invariant.

use evote_services::{StaticElectionCatalog, VotingLedger};
use evote_storage::MemoryLedgerStore;
use evote_test_utils::fixtures::{nid, parties_abc, sample_elections};
use evote_types::app::VoteOutcome;
use proptest::prelude::*;
use std::sync::Arc;

fn ledger() -> VotingLedger {
    VotingLedger::open(
        Arc::new(MemoryLedgerStore::new()),
        parties_abc(),
        Arc::new(StaticElectionCatalog::new(sample_elections())),
        100,
    )
    .unwrap()
}

fn labels(ledger: &VotingLedger) -> Vec<String> {
    ledger.get_results().into_iter().map(|r| r.full_name).collect()
}

#[test]
fn ties_keep_catalog_order() {
    let ledger = ledger();
    let mut voter = 0;
    for (party, votes) in [("C", 5), ("B", 10), ("A", 10)] {
        for _ in 0..votes {
            ledger.cast_vote(&nid(voter), party).unwrap();
            voter += 1;
        }
    }
    assert_eq!(labels(&ledger), vec!["Party A (A)", "Party B (B)", "Party C (C)"]);
    let votes: Vec<_> = ledger.get_results().into_iter().map(|r| r.votes).collect();
    assert_eq!(votes, vec![10, 10, 5]);
}

#[test]
fn leader_moves_to_the_top() {
    let ledger = ledger();
    ledger.cast_vote(&nid(1), "C").unwrap();
    let results = ledger.get_results();
    assert_eq!(results[0].label, "★ Party C");
    assert_eq!(results[0].color, "#000000");
    assert_eq!(labels(&ledger)[1..], ["Party A (A)", "Party B (B)"]);
}

proptest! {
    #[test]
    fn total_always_equals_voters(ballots in proptest::collection::vec((0u64..30, 0usize..3), 0..120)) {
        let ledger = ledger();
        let mut accepted = 0u64;
        for (voter, party) in ballots {
            let party = ["A", "B", "C"][party];
            if ledger.cast_vote(&nid(voter), party).unwrap() == VoteOutcome::Accepted {
                accepted += 1;
            }
            prop_assert_eq!(ledger.get_total_vote_count(), ledger.snapshot().voted_ids.len() as u64);
        }
        prop_assert_eq!(ledger.get_total_vote_count(), accepted);
        prop_assert!(ledger.check_invariants().is_ok());
    }
}
