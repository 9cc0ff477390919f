// Path: crates/types/src/app/ledger.rs

//! The persisted voting ledger state and the mutations that advance it.
//!
//! `LedgerState::apply` is the single definition of how a mutation changes the
//! state. Stores replay it against their own copy before committing, and the
//! ledger replays it against its in-memory copy after the store has committed,
//! so both sides always agree on the effect of a call.

use crate::app::election::{ElectionId, Party, PartyId};
use crate::error::StorageError;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The default reference figure for eligible voters, used for turnout ratios.
pub const DEFAULT_TOTAL_ELIGIBLE_VOTERS: u64 = 154_200_000;

/// A voter's advance sign-up for a not-yet-open election.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    /// National ID of the registrant.
    #[serde(rename = "nid")]
    pub national_id: String,
    /// Election the registrant signed up for.
    pub election_id: ElectionId,
    /// Election title as listed when the registration was made.
    #[serde(default)]
    pub election_title: String,
    /// Election date as listed when the registration was made.
    #[serde(default)]
    pub election_date: String,
    /// The constituency the registrant chose.
    pub constituency: String,
    /// Registration time in milliseconds since the Unix epoch.
    pub timestamp: u64,
}

/// The complete durable state of the ledger.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LedgerState {
    /// Tally: party id to vote count.
    pub votes: BTreeMap<PartyId, u64>,
    /// National IDs that have cast a vote.
    #[serde(alias = "votedNIDs")]
    pub voted_ids: BTreeSet<String>,
    /// Registrations grouped by national ID, in registration order.
    #[serde(default)]
    pub registrations: BTreeMap<String, Vec<RegistrationRecord>>,
    /// Reference figure used only for display ratios.
    #[serde(alias = "totalVoters", default = "default_total_eligible_voters")]
    pub total_eligible_voters: u64,
}

fn default_total_eligible_voters() -> u64 {
    DEFAULT_TOTAL_ELIGIBLE_VOTERS
}

/// One atomic change to the ledger.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerMutation {
    /// Increment `party_id`'s tally and mark `national_id` as voted.
    CastVote {
        /// The voter.
        national_id: String,
        /// The chosen party.
        party_id: PartyId,
    },
    /// Append a registration record.
    Register(RegistrationRecord),
}

impl LedgerState {
    /// A fresh state with a zero tally for every catalog party.
    pub fn seeded(parties: &[Party], total_eligible_voters: u64) -> Self {
        Self {
            votes: parties.iter().map(|p| (p.id.clone(), 0)).collect(),
            voted_ids: BTreeSet::new(),
            registrations: BTreeMap::new(),
            total_eligible_voters,
        }
    }

    /// Whether `national_id` has cast a vote.
    pub fn has_voted(&self, national_id: &str) -> bool {
        self.voted_ids.contains(national_id)
    }

    /// The sum of every tally entry.
    pub fn total_votes(&self) -> u64 {
        self.votes.values().sum()
    }

    /// Whether `national_id` holds a registration for `election_id`.
    pub fn is_registered(&self, national_id: &str, election_id: &str) -> bool {
        self.registrations
            .get(national_id)
            .is_some_and(|records| records.iter().any(|r| r.election_id == election_id))
    }

    /// Ensures every catalog party has a tally entry, without touching existing counts.
    pub fn ensure_parties(&mut self, parties: &[Party]) {
        for party in parties {
            self.votes.entry(party.id.clone()).or_insert(0);
        }
    }

    /// Applies one mutation. Fails with [`StorageError::Conflict`] and leaves the
    /// state untouched if the mutation would break a uniqueness invariant.
    pub fn apply(&mut self, mutation: &LedgerMutation) -> Result<(), StorageError> {
        match mutation {
            LedgerMutation::CastVote {
                national_id,
                party_id,
            } => {
                if self.voted_ids.contains(national_id) {
                    return Err(StorageError::Conflict(format!(
                        "national ID already marked as voted (party {})",
                        party_id
                    )));
                }
                let count = self.votes.entry(party_id.clone()).or_insert(0);
                *count = count
                    .checked_add(1)
                    .ok_or_else(|| StorageError::Conflict("tally overflow".into()))?;
                self.voted_ids.insert(national_id.clone());
            }
            LedgerMutation::Register(record) => {
                if self.is_registered(&record.national_id, &record.election_id) {
                    return Err(StorageError::Conflict(format!(
                        "registration for election {} already exists",
                        record.election_id
                    )));
                }
                self.registrations
                    .entry(record.national_id.clone())
                    .or_default()
                    .push(record.clone());
            }
        }
        Ok(())
    }

    /// Checks the tally-equals-voters and registration-uniqueness invariants.
    pub fn check_invariants(&self) -> Result<(), String> {
        let total = self.total_votes();
        let voters = self.voted_ids.len() as u64;
        if total != voters {
            return Err(format!(
                "tally total {} does not match {} distinct voters",
                total, voters
            ));
        }
        for (national_id, records) in &self.registrations {
            let mut seen = BTreeSet::new();
            for record in records {
                if record.national_id != *national_id {
                    return Err(format!(
                        "registration for election {} filed under the wrong voter",
                        record.election_id
                    ));
                }
                if !seen.insert(record.election_id.as_str()) {
                    return Err(format!(
                        "duplicate registration for election {}",
                        record.election_id
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Outcome of a successful `cast_vote` call.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The vote was counted.
    Accepted,
    /// The identity had already voted; nothing changed.
    AlreadyVoted,
}

/// Outcome of a successful `register_for_election` call.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The registration was recorded.
    Registered,
    /// A registration for this identity and election already existed; nothing changed.
    AlreadyRegistered,
}

/// One row of the results table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PartyResult {
    /// Ballot symbol and short party name.
    pub label: String,
    /// Full party name.
    pub full_name: String,
    /// Votes counted for the party.
    pub votes: u64,
    /// Display color.
    pub color: String,
}

/// Votes cast against the eligible-voter reference figure.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turnout {
    /// Distinct voters who have voted.
    pub votes_cast: u64,
    /// Reference number of eligible voters.
    pub total_eligible_voters: u64,
}

impl Turnout {
    /// Fraction of eligible voters who have voted; `0.0` when the reference is zero.
    pub fn ratio(&self) -> f64 {
        if self.total_eligible_voters == 0 {
            0.0
        } else {
            self.votes_cast as f64 / self.total_eligible_voters as f64
        }
    }
}
