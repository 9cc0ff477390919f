// Path: crates/types/src/app/voter.rs

//! Defines the canonical `NationalId` and the identity records produced by the
//! verification gate.
//!
//! The ledger never stores a full identity: it keys everything by the national
//! ID string. `VoterIdentity` and `VoterProfile` are session values owned by
//! the caller.

use crate::error::NationalIdError;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated national ID number: 10, 13 or 17 ASCII digits.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct NationalId(String);

impl NationalId {
    /// The only accepted lengths, in digits.
    pub const VALID_LENGTHS: [usize; 3] = [10, 13, 17];

    /// Parses and validates a national ID. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Result<Self, NationalIdError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(NationalIdError::Empty);
        }
        if let Some((position, _)) = trimmed.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
            return Err(NationalIdError::NonDigit { position });
        }
        // All characters are ASCII digits here, so byte length equals digit count.
        if !Self::VALID_LENGTHS.contains(&trimmed.len()) {
            return Err(NationalIdError::InvalidLength(trimmed.len()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the ID with every digit but the last four replaced by `*`.
    /// This is the only form in which national IDs are written to logs.
    pub fn masked(&self) -> String {
        let visible = self.0.len().saturating_sub(4);
        self.0
            .chars()
            .enumerate()
            .map(|(i, c)| if i < visible { '*' } else { c })
            .collect()
    }
}

impl fmt::Debug for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NationalId({})", self.masked())
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NationalId {
    type Err = NationalIdError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for NationalId {
    type Error = NationalIdError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NationalId> for String {
    fn from(id: NationalId) -> Self {
        id.0
    }
}

impl AsRef<str> for NationalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The administrative location a voter is registered under.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct AdministrativeLocation {
    /// Top-level division.
    pub division: String,
    /// District within the division.
    pub district: String,
    /// Upazila (sub-district).
    pub upazila: String,
    /// Union council.
    pub union: String,
    /// Ward within the union.
    pub ward: String,
    /// Electoral constituency (seat), e.g. `Dhaka-10`.
    pub constituency: String,
}

/// A voter identity returned by a successful directory lookup.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VoterIdentity {
    /// The voter's national ID.
    pub national_id: NationalId,
    /// The voter's full name.
    pub name: String,
    /// The voter's date of birth.
    pub date_of_birth: NaiveDate,
    /// Where the voter is registered.
    pub location: AdministrativeLocation,
}

impl VoterIdentity {
    /// The voter's age in whole years on the given date.
    pub fn age_on(&self, on: NaiveDate) -> i32 {
        calendar_age(self.date_of_birth, on)
    }
}

/// Evidence that a liveness check passed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LivenessConfirmation {
    /// Name of the liveness strategy that confirmed the voter.
    pub method: String,
    /// When the confirmation was produced.
    pub confirmed_at: DateTime<Utc>,
}

/// A voter identity that has passed both the identity and the liveness step.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VoterProfile {
    /// The verified identity.
    pub identity: VoterIdentity,
    /// The liveness evidence.
    pub liveness: LivenessConfirmation,
}

impl VoterProfile {
    /// Shortcut for the profile's national ID.
    pub fn national_id(&self) -> &NationalId {
        &self.identity.national_id
    }
}

/// Computes age using the calendar year/month/day difference.
///
/// The result is negative for a date of birth in the future. A 29 February
/// birthday turns over on 1 March in non-leap years.
pub fn calendar_age(date_of_birth: NaiveDate, on: NaiveDate) -> i32 {
    let mut years = on.year() - date_of_birth.year();
    if (on.month(), on.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    years
}
