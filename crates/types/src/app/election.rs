// Path: crates/types/src/app/election.rs

//! Elections, parties and candidates: read-only reference data supplied by
//! the catalogs.

use crate::app::AdministrativeLocation;
use serde::{Deserialize, Serialize};

/// Identifier of an election in the election catalog.
pub type ElectionId = String;
/// Identifier of a party in the party catalog.
pub type PartyId = String;
/// Identifier of a candidate in the candidate catalog.
pub type CandidateId = String;

/// Region names containing one of these mark a union-council seat.
pub const UNION_REGION_MARKERS: [&str; 2] = ["Union", "ইউনিয়ন"];

/// The lifecycle stage of an election.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ElectionStatus {
    /// Open for advance registration, not yet for voting.
    Upcoming,
    /// Voting is in progress.
    Ongoing,
    /// Voting has closed.
    Completed,
}

/// The administrative level an election is held at.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ElectionLevel {
    /// Parliamentary (national) election.
    National,
    /// Municipal or city-corporation election.
    Local,
    /// Union council election.
    Union,
}

/// An election as listed by the election catalog.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Election {
    /// Stable identifier, e.g. `e1`.
    pub id: ElectionId,
    /// Human-readable title.
    pub title: String,
    /// Human-readable polling date.
    pub date: String,
    /// Current lifecycle stage.
    pub status: ElectionStatus,
    /// Administrative level.
    pub level: ElectionLevel,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

/// A party that can receive votes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Party {
    /// Stable identifier used as the tally key.
    pub id: PartyId,
    /// Full display name, optionally followed by an abbreviation in parentheses.
    pub name: String,
    /// Ballot symbol.
    pub symbol: String,
    /// Display color, e.g. `#006a4e`.
    pub color: String,
}

impl Party {
    /// The party name without a trailing ` (ABBR)` suffix.
    pub fn short_name(&self) -> &str {
        self.name
            .split_once(" (")
            .map_or(self.name.as_str(), |(head, _)| head)
    }

    /// The tally label: ballot symbol followed by the short name.
    pub fn label(&self) -> String {
        format!("{} {}", self.symbol, self.short_name())
    }
}

/// A person standing for a seat, under a party's ballot symbol.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Stable identifier, e.g. `c1`.
    pub id: CandidateId,
    /// Full name.
    pub name: String,
    /// Display name of the party the candidate stands for.
    pub party: String,
    /// The party the candidate's votes are tallied under.
    pub party_id: PartyId,
    /// Ballot symbol.
    pub symbol: String,
    /// Short campaign statement.
    #[serde(default)]
    pub manifesto: String,
    /// The seat contested: a constituency such as `Dhaka-10`, or a union ward.
    pub region: String,
}

impl Candidate {
    /// Whether the region names a union-council seat.
    pub fn is_union_seat(&self) -> bool {
        UNION_REGION_MARKERS
            .iter()
            .any(|marker| self.region.contains(marker))
    }

    /// Whether the candidate appears on the ballot of a voter at `location`
    /// in an election held at `level`.
    ///
    /// National ballots list the voter's own constituency. Local and union
    /// ballots list every union-council seat.
    pub fn on_ballot(&self, level: ElectionLevel, location: &AdministrativeLocation) -> bool {
        match level {
            ElectionLevel::National => self.region == location.constituency,
            ElectionLevel::Local | ElectionLevel::Union => self.is_union_seat(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn party(name: &str) -> Party {
        Party {
            id: "p".into(),
            name: name.into(),
            symbol: "⛵".into(),
            color: "#000000".into(),
        }
    }

    #[test]
    fn label_drops_parenthesised_abbreviation() {
        assert_eq!(party("Green Harvest Front (GHF)").label(), "⛵ Green Harvest Front");
        assert_eq!(party("Independent").label(), "⛵ Independent");
    }

    fn candidate(region: &str) -> Candidate {
        Candidate {
            id: "c".into(),
            name: "Candidate".into(),
            party: "Party".into(),
            party_id: "p".into(),
            symbol: "⛵".into(),
            manifesto: String::new(),
            region: region.into(),
        }
    }

    fn located_in(constituency: &str) -> AdministrativeLocation {
        AdministrativeLocation {
            division: "Dhaka".into(),
            district: "Dhaka".into(),
            upazila: "Tejgaon".into(),
            union: "Tejgaon Union".into(),
            ward: "Ward 5".into(),
            constituency: constituency.into(),
        }
    }

    #[test]
    fn national_ballot_matches_constituency_exactly() {
        let voter = located_in("Dhaka-10");
        assert!(candidate("Dhaka-10").on_ballot(ElectionLevel::National, &voter));
        assert!(!candidate("Dhaka-1").on_ballot(ElectionLevel::National, &voter));
        assert!(!candidate("Dhaka-10 Union").on_ballot(ElectionLevel::National, &voter));
    }

    #[test]
    fn local_and_union_ballots_list_union_seats() {
        let voter = located_in("Dhaka-10");
        for level in [ElectionLevel::Union, ElectionLevel::Local] {
            assert!(candidate("Savar Union Ward 3").on_ballot(level, &voter));
            assert!(candidate("সাভার ইউনিয়ন").on_ballot(level, &voter));
            assert!(!candidate("Dhaka-10").on_ballot(level, &voter));
        }
    }

    #[test]
    fn status_uses_lowercase_wire_names() {
        let json = serde_json::to_string(&ElectionStatus::Upcoming).unwrap();
        assert_eq!(json, "\"upcoming\"");
        let level: ElectionLevel = serde_json::from_str("\"union\"").unwrap();
        assert_eq!(level, ElectionLevel::Union);
    }
}
