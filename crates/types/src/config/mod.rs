// Path: crates/types/src/config/mod.rs

//! Shared configuration structures for the eVote kernel.
//!
//! A single TOML file describes the storage backend, the party, election and
//! candidate catalogs, and the identity directory. Every field has a default, so an empty
//! file yields a runnable in-memory demonstration.

use crate::app::{
    AdministrativeLocation, Candidate, Election, ElectionLevel, ElectionStatus, Party,
    DEFAULT_TOTAL_ELIGIBLE_VOTERS,
};
use crate::error::ConfigError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Selects the durable backend that stores the ledger.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local memory; state is lost on exit.
    #[default]
    Memory,
    /// A JSON snapshot file rewritten atomically on every mutation.
    File,
    /// A redb database committing one write transaction per mutation.
    Redb,
}

/// Storage settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// The backend to use.
    #[serde(default)]
    pub backend: StorageBackend,
    /// Location of the snapshot file or database; required by `file` and `redb`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            path: None,
        }
    }
}

/// How the verification gate resolves national IDs to identities.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryMode {
    /// Only the records listed in `[[directory.voters]]` are known.
    #[default]
    Static,
    /// Any well-formed ID resolves to a placeholder identity derived from the
    /// location hint. For demonstrations only.
    Provisional,
}

/// One voter record for the static directory.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct VoterRecordConfig {
    /// National ID digits.
    pub national_id: String,
    /// Full name.
    pub name: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Administrative location.
    #[serde(flatten)]
    pub location: AdministrativeLocation,
}

/// Identity directory settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct DirectoryConfig {
    /// Lookup mode.
    #[serde(default)]
    pub mode: DirectoryMode,
    /// Known voters (static mode).
    #[serde(default)]
    pub voters: Vec<VoterRecordConfig>,
    /// Division to constituency map (provisional mode).
    #[serde(default)]
    pub constituencies: BTreeMap<String, String>,
}

/// Verification gate settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct VerificationConfig {
    /// Minimum age in whole years on the verification date.
    #[serde(default = "default_minimum_age")]
    pub minimum_age: u32,
}

fn default_minimum_age() -> u32 {
    18
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            minimum_age: default_minimum_age(),
        }
    }
}

/// Top-level kernel configuration.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct KernelConfig {
    /// Reference figure for turnout ratios, used when seeding a fresh ledger.
    #[serde(default = "default_total_eligible_voters")]
    pub total_eligible_voters: u64,
    /// Storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Verification gate settings.
    #[serde(default)]
    pub verification: VerificationConfig,
    /// Identity directory settings.
    #[serde(default)]
    pub directory: DirectoryConfig,
    /// Party catalog, in tie-break order.
    #[serde(default = "default_parties")]
    pub parties: Vec<Party>,
    /// Election catalog, in display order.
    #[serde(default = "default_elections")]
    pub elections: Vec<Election>,
    /// Candidate catalog, in ballot order.
    #[serde(default = "default_candidates")]
    pub candidates: Vec<Candidate>,
}

fn default_total_eligible_voters() -> u64 {
    DEFAULT_TOTAL_ELIGIBLE_VOTERS
}

fn party(id: &str, name: &str, symbol: &str, color: &str) -> Party {
    Party {
        id: id.into(),
        name: name.into(),
        symbol: symbol.into(),
        color: color.into(),
    }
}

/// The demonstration party catalog.
pub fn default_parties() -> Vec<Party> {
    vec![
        party("boat", "River Alliance (RA)", "⛵", "#006a4e"),
        party("scale", "Justice Front (JF)", "⚖️", "#f42a41"),
        party("plough", "Farmers' League (FL)", "🌾", "#1e40af"),
        party("other", "Independent Candidates", "⭐", "#64748b"),
    ]
}

/// The demonstration election catalog.
pub fn default_elections() -> Vec<Election> {
    vec![
        Election {
            id: "e1".into(),
            title: "National Parliamentary Election 2026".into(),
            date: "2026-12-20".into(),
            status: ElectionStatus::Ongoing,
            level: ElectionLevel::National,
            description: "General election for the 300 parliamentary constituencies.".into(),
        },
        Election {
            id: "e2".into(),
            title: "Union Parishad and Local Elections".into(),
            date: "2027-01-15".into(),
            status: ElectionStatus::Upcoming,
            level: ElectionLevel::Union,
            description: "Local elections for chairs, members and councillors.".into(),
        },
    ]
}

fn candidate(id: &str, name: &str, party: &Party, manifesto: &str, region: &str) -> Candidate {
    Candidate {
        id: id.into(),
        name: name.into(),
        party: party.short_name().into(),
        party_id: party.id.clone(),
        symbol: party.symbol.clone(),
        manifesto: manifesto.into(),
        region: region.into(),
    }
}

/// The demonstration candidate catalog: one parliamentary seat and one union ward.
pub fn default_candidates() -> Vec<Candidate> {
    let parties = default_parties();
    let [boat, scale, plough, other] = parties.as_slice() else {
        return Vec::new();
    };
    vec![
        candidate("c1", "Rahima Begum", boat, "Flood defences for every char.", "Dhaka-10"),
        candidate("c2", "Kamal Hossain", scale, "Courts within a day's travel.", "Dhaka-10"),
        candidate("c3", "Nurul Islam", plough, "Fair prices at the haat.", "Dhaka-10"),
        candidate("c4", "Shirin Akter", boat, "Clean water for every ward.", "Tejgaon Union Ward 5"),
        candidate("c5", "Abul Kashem", other, "Open council accounts.", "Tejgaon Union Ward 5"),
    ]
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            total_eligible_voters: default_total_eligible_voters(),
            storage: StorageConfig::default(),
            verification: VerificationConfig::default(),
            directory: DirectoryConfig::default(),
            parties: default_parties(),
            elections: default_elections(),
            candidates: default_candidates(),
        }
    }
}

impl KernelConfig {
    /// Parses a configuration from TOML text and validates it.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Checks catalog uniqueness and backend requirements.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parties.is_empty() {
            return Err(ConfigError::Invalid("party catalog is empty".into()));
        }
        let mut party_ids = BTreeSet::new();
        for p in &self.parties {
            if p.id.trim().is_empty() {
                return Err(ConfigError::Invalid("party id must not be empty".into()));
            }
            if !party_ids.insert(p.id.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate party id {}", p.id)));
            }
        }
        let mut election_ids = BTreeSet::new();
        for e in &self.elections {
            if !election_ids.insert(e.id.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate election id {}",
                    e.id
                )));
            }
        }
        let mut candidate_ids = BTreeSet::new();
        for c in &self.candidates {
            if !candidate_ids.insert(c.id.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate candidate id {}", c.id)));
            }
            if !party_ids.contains(c.party_id.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "candidate {} stands for unknown party {}",
                    c.id, c.party_id
                )));
            }
        }
        if self.storage.backend != StorageBackend::Memory && self.storage.path.is_none() {
            return Err(ConfigError::Invalid(format!(
                "storage backend {:?} requires storage.path",
                self.storage.backend
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = KernelConfig::from_toml_str("").unwrap();
        assert_eq!(config, KernelConfig::default());
        assert_eq!(config.verification.minimum_age, 18);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn parses_directory_and_storage_sections() {
        let text = r##"
total_eligible_voters = 1000
candidates = []

[storage]
backend = "redb"
path = "/var/lib/evote/ledger.redb"

[directory]
mode = "static"

[[directory.voters]]
national_id = "1234567890"
name = "Abdur Rahman"
date_of_birth = "1990-05-01"
division = "Dhaka"
district = "Dhaka"
upazila = "Tejgaon"
union = "Ward Union"
ward = "Ward 5"
constituency = "Dhaka-10"

[[parties]]
id = "a"
name = "Alpha (A)"
symbol = "A"
color = "#111111"
"##;
        let config = KernelConfig::from_toml_str(text).unwrap();
        assert_eq!(config.total_eligible_voters, 1000);
        assert_eq!(config.storage.backend, StorageBackend::Redb);
        assert_eq!(config.directory.voters.len(), 1);
        assert_eq!(config.directory.voters[0].location.constituency, "Dhaka-10");
        assert_eq!(config.parties.len(), 1);
        assert_eq!(config.elections, default_elections());
    }

    #[test]
    fn rejects_duplicate_party_ids() {
        let mut config = KernelConfig::default();
        config.parties.push(config.parties[0].clone());
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn candidates_must_reference_known_parties() {
        let text = r##"
[[parties]]
id = "a"
name = "Alpha (A)"
symbol = "A"
color = "#111111"

[[candidates]]
id = "c1"
name = "Amina"
party = "Alpha"
party_id = "a"
symbol = "A"
region = "Dhaka-10"

[[candidates]]
id = "c2"
name = "Babul"
party = "Beta"
party_id = "b"
symbol = "B"
region = "Dhaka-10"
"##;
        let err = KernelConfig::from_toml_str(text).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("unknown party b")));
    }

    #[test]
    fn default_candidates_stand_for_default_parties() {
        let config = KernelConfig::default();
        assert_eq!(config.candidates.len(), 5);
        assert!(config.validate().is_ok());
        assert_eq!(config.candidates.iter().filter(|c| c.is_union_seat()).count(), 2);
    }

    #[test]
    fn file_backend_requires_path() {
        let text = "[storage]\nbackend = \"file\"\n";
        assert!(matches!(
            KernelConfig::from_toml_str(text),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn default_config_survives_toml() {
        let text = KernelConfig::default().to_toml_string().unwrap();
        let parsed = KernelConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, KernelConfig::default());
    }
}
