// Path: crates/services/src/ledger/mod.rs
//! The voting ledger: one-vote-per-identity, per-party tally and election
//! registrations over a pluggable [`LedgerStore`].
//!
//! # Concurrency
//!
//! Calls for the same national ID are serialised by a per-identity mutex, so
//! the "has this identity voted" check and the commit that follows cannot
//! interleave with another call for that identity. A mutex lives in the lock
//! map only while some call for its identity is in flight. Calls for different
//! identities only meet inside the store's own commit and in a short write
//! lock on the in-memory state.
//!
//! Every mutation is committed by the store first and then applied to memory
//! under that write lock, using the same [`LedgerState::apply`] the store used.
//! A failed commit therefore leaves both sides untouched, and readers (which
//! take the read lock) never see a tally increment without its voter marker.

use dashmap::DashMap;
use evote_api::catalog::ElectionCatalog;
use evote_api::storage::{LedgerStore, StorageError};
use evote_telemetry::sinks::{ErrorMetricsSink, LedgerMetricsSink};
use evote_telemetry::{error_metrics, ledger_metrics};
use evote_types::app::{
    ElectionId, LedgerMutation, LedgerState, NationalId, Party, PartyResult, RegistrationOutcome,
    RegistrationRecord, Turnout, VoteOutcome,
};
use evote_types::error::{ErrorCode, LedgerError};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// The single source of truth for vote status, tally and registrations.
///
/// Share it as `Arc<VotingLedger>`; every method takes `&self`.
pub struct VotingLedger {
    store: Arc<dyn LedgerStore>,
    parties: Vec<Party>,
    catalog: Arc<dyn ElectionCatalog>,
    state: RwLock<LedgerState>,
    identity_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl VotingLedger {
    /// Loads the ledger from `store`, seeding a fresh state with a zero tally
    /// for every party when the store is empty.
    ///
    /// A loaded state that violates the ledger invariants is refused.
    pub fn open(
        store: Arc<dyn LedgerStore>,
        parties: Vec<Party>,
        catalog: Arc<dyn ElectionCatalog>,
        total_eligible_voters: u64,
    ) -> Result<Self, LedgerError> {
        let state = match store.load()? {
            Some(mut state) => {
                state.ensure_parties(&parties);
                state.check_invariants().map_err(LedgerError::InvariantViolation)?;
                tracing::info!(
                    target: "ledger",
                    backend = store.backend_name(),
                    votes = state.total_votes(),
                    registrants = state.registrations.len(),
                    "Loaded ledger state"
                );
                state
            }
            None => {
                let seeded = LedgerState::seeded(&parties, total_eligible_voters);
                store.save(&seeded)?;
                tracing::info!(
                    target: "ledger",
                    backend = store.backend_name(),
                    parties = parties.len(),
                    total_eligible_voters,
                    "Seeded new ledger"
                );
                seeded
            }
        };
        ledger_metrics().set_total_votes(state.total_votes());

        Ok(Self {
            store,
            parties,
            catalog,
            state: RwLock::new(state),
            identity_locks: DashMap::new(),
        })
    }

    /// The party catalog, in tie-break order.
    pub fn parties(&self) -> &[Party] {
        &self.parties
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Whether `national_id` has cast a vote. Malformed IDs have not.
    pub fn has_voted(&self, national_id: &str) -> bool {
        match NationalId::parse(national_id) {
            Ok(nid) => self.read_state().has_voted(nid.as_str()),
            Err(_) => false,
        }
    }

    /// Records one vote for `party_id`.
    ///
    /// Returns [`VoteOutcome::AlreadyVoted`] without touching the tally if the
    /// identity has voted before.
    pub fn cast_vote(&self, national_id: &str, party_id: &str) -> Result<VoteOutcome, LedgerError> {
        let nid = NationalId::parse(national_id).map_err(|e| count(LedgerError::from(e)))?;
        if !self.parties.iter().any(|p| p.id == party_id) {
            return Err(count(LedgerError::UnknownParty(party_id.to_string())));
        }

        self.with_identity_lock(&nid, || -> Result<VoteOutcome, LedgerError> {
            if self.read_state().has_voted(nid.as_str()) {
                ledger_metrics().inc_duplicate_votes();
                tracing::info!(target: "ledger", nid = %nid.masked(), "Duplicate vote refused");
                return Ok(VoteOutcome::AlreadyVoted);
            }

            let mutation = LedgerMutation::CastVote {
                national_id: nid.as_str().to_string(),
                party_id: party_id.to_string(),
            };
            let total = self.commit(&mutation)?;

            ledger_metrics().inc_votes_accepted();
            ledger_metrics().set_total_votes(total);
            // Never log the party next to the voter.
            tracing::info!(target: "ledger", nid = %nid.masked(), total, "Vote accepted");
            Ok(VoteOutcome::Accepted)
        })
    }

    /// Tally rows for every catalog party, most votes first; ties keep catalog order.
    pub fn get_results(&self) -> Vec<PartyResult> {
        let state = self.read_state();
        let mut results: Vec<PartyResult> = self
            .parties
            .iter()
            .map(|party| PartyResult {
                label: party.label(),
                full_name: party.name.clone(),
                votes: state.votes.get(&party.id).copied().unwrap_or(0),
                color: party.color.clone(),
            })
            .collect();
        drop(state);
        // `sort_by` is stable, which is what keeps ties in catalog order.
        results.sort_by(|a, b| b.votes.cmp(&a.votes));
        results
    }

    /// The sum of every tally entry. Always equal to the number of voters.
    pub fn get_total_vote_count(&self) -> u64 {
        self.read_state().total_votes()
    }

    /// Signs `national_id` up for `election_id` in `constituency`.
    ///
    /// The election must exist in the catalog; its status is not checked.
    /// Returns [`RegistrationOutcome::AlreadyRegistered`] if a record for this
    /// identity and election already exists.
    pub fn register_for_election(
        &self,
        national_id: &str,
        election_id: &str,
        constituency: &str,
        timestamp: u64,
    ) -> Result<RegistrationOutcome, LedgerError> {
        let nid = NationalId::parse(national_id).map_err(|e| count(LedgerError::from(e)))?;
        let election = self
            .catalog
            .get_election(election_id)
            .ok_or_else(|| count(LedgerError::UnknownElection(election_id.to_string())))?;
        let constituency = constituency.trim();
        if constituency.is_empty() {
            return Err(count(LedgerError::InvalidConstituency));
        }

        self.with_identity_lock(&nid, || -> Result<RegistrationOutcome, LedgerError> {
            if self.read_state().is_registered(nid.as_str(), &election.id) {
                ledger_metrics().inc_duplicate_registrations();
                tracing::info!(
                    target: "ledger",
                    nid = %nid.masked(),
                    election = %election.id,
                    "Duplicate registration refused"
                );
                return Ok(RegistrationOutcome::AlreadyRegistered);
            }

            let mutation = LedgerMutation::Register(RegistrationRecord {
                national_id: nid.as_str().to_string(),
                election_id: election.id.clone(),
                election_title: election.title.clone(),
                election_date: election.date.clone(),
                constituency: constituency.to_string(),
                timestamp,
            });
            self.commit(&mutation)?;

            ledger_metrics().inc_registrations();
            tracing::info!(
                target: "ledger",
                nid = %nid.masked(),
                election = %election.id,
                constituency,
                "Registration recorded"
            );
            Ok(RegistrationOutcome::Registered)
        })
    }

    /// Elections `national_id` has registered for. Empty for unknown or malformed IDs.
    pub fn get_registrations(&self, national_id: &str) -> BTreeSet<ElectionId> {
        self.get_registration_records(national_id)
            .into_iter()
            .map(|r| r.election_id)
            .collect()
    }

    /// Full registration records for `national_id`, in registration order.
    pub fn get_registration_records(&self, national_id: &str) -> Vec<RegistrationRecord> {
        let Ok(nid) = NationalId::parse(national_id) else {
            return Vec::new();
        };
        self.read_state()
            .registrations
            .get(nid.as_str())
            .cloned()
            .unwrap_or_default()
    }

    /// Every registration for `election_id`, ordered by national ID, then timestamp.
    pub fn registrations_for_election(&self, election_id: &str) -> Vec<RegistrationRecord> {
        let state = self.read_state();
        let mut records: Vec<RegistrationRecord> = state
            .registrations
            .values()
            .flatten()
            .filter(|r| r.election_id == election_id)
            .cloned()
            .collect();
        drop(state);
        records.sort_by(|a, b| {
            a.national_id
                .cmp(&b.national_id)
                .then(a.timestamp.cmp(&b.timestamp))
        });
        records
    }

    /// Votes cast against the eligible-voter reference figure.
    pub fn turnout(&self) -> Turnout {
        let state = self.read_state();
        Turnout {
            votes_cast: state.voted_ids.len() as u64,
            total_eligible_voters: state.total_eligible_voters,
        }
    }

    /// Verifies the tally-equals-voters and one-registration-per-election invariants.
    pub fn check_invariants(&self) -> Result<(), LedgerError> {
        self.read_state()
            .check_invariants()
            .map_err(|detail| count(LedgerError::InvariantViolation(detail)))
    }

    /// A consistent copy of the whole state.
    pub fn snapshot(&self) -> LedgerState {
        self.read_state().clone()
    }

    /// Commits `mutation` to the store, then publishes it in memory. Returns
    /// the tally total after the change.
    fn commit(&self, mutation: &LedgerMutation) -> Result<u64, LedgerError> {
        if let Err(e) = self.store.apply(mutation) {
            tracing::error!(
                target: "ledger",
                backend = self.store.backend_name(),
                error = %e,
                code = e.code(),
                "Ledger commit failed; nothing was applied"
            );
            return Err(count(LedgerError::Persistence(e)));
        }

        let mut state = self.write_state();
        state.apply(mutation).map_err(|e| {
            let detail = match e {
                StorageError::Conflict(detail) => detail,
                other => other.to_string(),
            };
            count(LedgerError::InvariantViolation(format!(
                "store accepted a mutation the in-memory state refused: {}",
                detail
            )))
        })?;
        Ok(state.total_votes())
    }

    /// Runs `body` holding the mutex for `nid`, then drops the map entry if
    /// no other call has picked it up meanwhile.
    fn with_identity_lock<T>(&self, nid: &NationalId, body: impl FnOnce() -> T) -> T {
        // Clones are only taken under the shard lock held by `entry`, and
        // `remove_if` checks the count under that same lock.
        let lock = self
            .identity_locks
            .entry(nid.as_str().to_string())
            .or_default()
            .clone();
        let result = {
            let _guard = lock_ignoring_poison(&lock);
            body()
        };
        drop(lock);
        self.identity_locks
            .remove_if(nid.as_str(), |_, lock| Arc::strong_count(lock) == 1);
        result
    }

    // State is only written after a successful `apply`, which cannot panic
    // halfway, so a poisoned lock still guards a consistent value.
    fn read_state(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn lock_ignoring_poison(lock: &Mutex<()>) -> MutexGuard<'_, ()> {
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}

fn count(error: LedgerError) -> LedgerError {
    error_metrics().inc_error("ledger", error.code());
    error
}
