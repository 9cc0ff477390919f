// Path: crates/services/src/catalog/mod.rs
//! An election and candidate catalog backed by fixed lists.

use evote_api::catalog::ElectionCatalog;
use evote_types::app::{Candidate, Election};

/// Elections and candidates supplied at startup, usually from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticElectionCatalog {
    elections: Vec<Election>,
    candidates: Vec<Candidate>,
}

impl StaticElectionCatalog {
    pub fn new(elections: Vec<Election>) -> Self {
        Self {
            elections,
            candidates: Vec::new(),
        }
    }

    pub fn with_candidates(mut self, candidates: Vec<Candidate>) -> Self {
        self.candidates = candidates;
        self
    }
}

impl ElectionCatalog for StaticElectionCatalog {
    fn list_elections(&self) -> Vec<Election> {
        self.elections.clone()
    }

    fn list_candidates(&self) -> Vec<Candidate> {
        self.candidates.clone()
    }

    fn get_election(&self, id: &str) -> Option<Election> {
        self.elections.iter().find(|e| e.id == id).cloned()
    }
}
