// Path: crates/test_utils/src/fixtures/mod.rs
//! Builders for reproducible test data.

use chrono::NaiveDate;
use evote_types::app::{
    AdministrativeLocation, Election, ElectionLevel, ElectionStatus, NationalId, Party,
    VoterIdentity,
};

/// A ten-digit national ID string derived from `n`, e.g. `nid(7)` is `"0000000007"`.
pub fn nid(n: u64) -> String {
    format!("{:010}", n % 10_000_000_000)
}

/// A party with a `"<Name> (<ID>)"` display name.
pub fn party(id: &str) -> Party {
    let upper = id.to_uppercase();
    Party {
        id: id.to_string(),
        name: format!("Party {} ({})", upper, upper),
        symbol: "★".into(),
        color: "#000000".into(),
    }
}

/// Parties `A`, `B`, `C` in that catalog order.
pub fn parties_abc() -> Vec<Party> {
    ["A", "B", "C"].into_iter().map(party).collect()
}

/// An election with the given id and status.
pub fn election(id: &str, status: ElectionStatus) -> Election {
    Election {
        id: id.to_string(),
        title: format!("Election {}", id),
        date: "2027-01-15".into(),
        status,
        level: ElectionLevel::Local,
        description: String::new(),
    }
}

/// One ongoing and two upcoming elections: `e1`, `e2`, `e3`.
pub fn sample_elections() -> Vec<Election> {
    vec![
        election("e1", ElectionStatus::Ongoing),
        election("e2", ElectionStatus::Upcoming),
        election("e3", ElectionStatus::Upcoming),
    ]
}

/// A fully populated location in the Dhaka division.
pub fn dhaka_location() -> AdministrativeLocation {
    AdministrativeLocation {
        division: "Dhaka".into(),
        district: "Dhaka".into(),
        upazila: "Dhanmondi".into(),
        union: "Ward 15".into(),
        ward: "15".into(),
        constituency: "Dhaka-10".into(),
    }
}

/// A voter identity born on `date_of_birth`.
///
/// Returns `None` if `national_id` is malformed.
pub fn voter(national_id: &str, date_of_birth: NaiveDate) -> Option<VoterIdentity> {
    Some(VoterIdentity {
        national_id: NationalId::parse(national_id).ok()?,
        name: "Test Voter".into(),
        date_of_birth,
        location: dhaka_location(),
    })
}
