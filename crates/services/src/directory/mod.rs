// Path: crates/services/src/directory/mod.rs
//! Identity directories.
//!
//! [`StaticDirectory`] answers only for the voters it was loaded with.
//! [`ProvisionalDirectory`] accepts any well-formed ID and derives a placeholder
//! identity from the location hint; it exists for demonstrations and must be
//! selected explicitly in configuration.

use chrono::NaiveDate;
use evote_api::identity::IdentityDirectory;
use evote_types::app::{AdministrativeLocation, NationalId, VoterIdentity};
use evote_types::config::VoterRecordConfig;
use evote_types::error::NationalIdError;
use std::collections::{BTreeMap, HashMap};

/// A directory of known voters held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    records: HashMap<NationalId, VoterIdentity>,
}

impl StaticDirectory {
    pub fn new(identities: impl IntoIterator<Item = VoterIdentity>) -> Self {
        Self {
            records: identities
                .into_iter()
                .map(|identity| (identity.national_id.clone(), identity))
                .collect(),
        }
    }

    /// Builds the directory from `[[directory.voters]]` entries, rejecting the
    /// first malformed national ID.
    pub fn from_config(voters: &[VoterRecordConfig]) -> Result<Self, NationalIdError> {
        let identities = voters
            .iter()
            .map(|v| {
                Ok(VoterIdentity {
                    national_id: NationalId::parse(&v.national_id)?,
                    name: v.name.clone(),
                    date_of_birth: v.date_of_birth,
                    location: v.location.clone(),
                })
            })
            .collect::<Result<Vec<_>, NationalIdError>>()?;
        Ok(Self::new(identities))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl IdentityDirectory for StaticDirectory {
    fn lookup(
        &self,
        national_id: &NationalId,
        date_of_birth: NaiveDate,
        _location_hint: &str,
    ) -> Option<VoterIdentity> {
        self.records
            .get(national_id)
            .filter(|identity| identity.date_of_birth == date_of_birth)
            .cloned()
    }
}

/// Resolves every well-formed ID to a placeholder identity in the hinted division.
#[derive(Debug, Clone, Default)]
pub struct ProvisionalDirectory {
    constituencies: BTreeMap<String, String>,
}

impl ProvisionalDirectory {
    /// `constituencies` maps a division to the constituency assigned to voters
    /// from it. Divisions not listed get `"<division>-1"`.
    pub fn new(constituencies: BTreeMap<String, String>) -> Self {
        Self { constituencies }
    }

    fn constituency_for(&self, division: &str) -> String {
        self.constituencies
            .get(division)
            .cloned()
            .unwrap_or_else(|| format!("{}-1", division))
    }
}

impl IdentityDirectory for ProvisionalDirectory {
    fn lookup(
        &self,
        national_id: &NationalId,
        date_of_birth: NaiveDate,
        location_hint: &str,
    ) -> Option<VoterIdentity> {
        let division = location_hint.trim();
        if division.is_empty() {
            return None;
        }
        tracing::debug!(
            target: "verification",
            nid = %national_id.masked(),
            division,
            "Issuing provisional identity"
        );
        Some(VoterIdentity {
            national_id: national_id.clone(),
            name: "Provisional Voter".into(),
            date_of_birth,
            location: AdministrativeLocation {
                division: division.to_string(),
                district: division.to_string(),
                upazila: String::new(),
                union: String::new(),
                ward: String::new(),
                constituency: self.constituency_for(division),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dob() -> NaiveDate {
        NaiveDate::from_ymd_opt(1990, 5, 1).unwrap()
    }

    fn record(nid: &str) -> VoterRecordConfig {
        VoterRecordConfig {
            national_id: nid.into(),
            name: "Rahima Begum".into(),
            date_of_birth: dob(),
            location: AdministrativeLocation {
                division: "Khulna".into(),
                constituency: "Khulna-2".into(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn static_lookup_requires_matching_date_of_birth() {
        let directory = StaticDirectory::from_config(&[record("1234567890")]).unwrap();
        let nid = NationalId::parse("1234567890").unwrap();

        let found = directory.lookup(&nid, dob(), "Dhaka").unwrap();
        assert_eq!(found.location.constituency, "Khulna-2");

        let wrong_dob = NaiveDate::from_ymd_opt(1990, 5, 2).unwrap();
        assert!(directory.lookup(&nid, wrong_dob, "Khulna").is_none());

        let unknown = NationalId::parse("1234567890123").unwrap();
        assert!(directory.lookup(&unknown, dob(), "Khulna").is_none());
    }

    #[test]
    fn static_directory_rejects_malformed_config() {
        let err = StaticDirectory::from_config(&[record("12345")]).unwrap_err();
        assert_eq!(err, NationalIdError::InvalidLength(5));
    }

    #[test]
    fn provisional_lookup_maps_division_to_constituency() {
        let mut map = BTreeMap::new();
        map.insert("Dhaka".to_string(), "Dhaka-10".to_string());
        let directory = ProvisionalDirectory::new(map);
        let nid = NationalId::parse("1234567890").unwrap();

        let mapped = directory.lookup(&nid, dob(), "Dhaka").unwrap();
        assert_eq!(mapped.location.constituency, "Dhaka-10");
        assert_eq!(mapped.date_of_birth, dob());

        let fallback = directory.lookup(&nid, dob(), "Sylhet").unwrap();
        assert_eq!(fallback.location.constituency, "Sylhet-1");

        assert!(directory.lookup(&nid, dob(), "  ").is_none());
    }
}
