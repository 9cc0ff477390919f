// Path: crates/api/src/catalog/mod.rs

//! Defines the `ElectionCatalog` trait for decoupled election lookups.

use evote_types::app::{Candidate, Election, ElectionStatus, VoterIdentity};

/// A read-only view of the elections known to the deployment and the
/// candidates standing in them.
///
/// The ledger uses this trait only to check that a registration targets a real
/// election and to copy the election's title and date into the record.
pub trait ElectionCatalog: Send + Sync {
    /// All elections, in catalog order.
    fn list_elections(&self) -> Vec<Election>;

    /// All candidates, in ballot order.
    fn list_candidates(&self) -> Vec<Candidate>;

    /// The election with the given id, if any.
    fn get_election(&self, id: &str) -> Option<Election> {
        self.list_elections().into_iter().find(|e| e.id == id)
    }

    /// Elections currently in `status`, in catalog order.
    fn elections_with_status(&self, status: ElectionStatus) -> Vec<Election> {
        self.list_elections()
            .into_iter()
            .filter(|e| e.status == status)
            .collect()
    }

    /// The candidates on `voter`'s ballot for `election`, in ballot order.
    fn ballot_for(&self, election: &Election, voter: &VoterIdentity) -> Vec<Candidate> {
        self.list_candidates()
            .into_iter()
            .filter(|c| c.on_ballot(election.level, &voter.location))
            .collect()
    }
}
