// Path: crates/types/src/error/mod.rs
//! Core error types for the eVote kernel.
//!
//! Invariant-guard outcomes (`AlreadyVoted`, `AlreadyRegistered`) are not
//! errors and live in [`crate::app`]. Everything here is a genuine rejection
//! or failure that callers must render distinctly.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors produced while parsing a national ID.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NationalIdError {
    /// The supplied ID was empty or only whitespace.
    #[error("National ID is empty")]
    Empty,
    /// The supplied ID contains a character that is not an ASCII digit.
    #[error("National ID contains a non-digit character at position {position}")]
    NonDigit {
        /// Zero-based character position of the offending character.
        position: usize,
    },
    /// The supplied ID has a length other than 10, 13 or 17 digits.
    #[error("National ID must be 10, 13 or 17 digits long, got {0}")]
    InvalidLength(usize),
}

impl ErrorCode for NationalIdError {
    fn code(&self) -> &'static str {
        match self {
            Self::Empty => "NID_EMPTY",
            Self::NonDigit { .. } => "NID_NON_DIGIT",
            Self::InvalidLength(_) => "NID_INVALID_LENGTH",
        }
    }
}

/// Represents errors that can occur within the durable storage layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// A generic error originating from the underlying store backend (e.g., redb).
    #[error("backend error: {0}")]
    Backend(String),
    /// An error occurred while serializing data for storage.
    #[error("encode error: {0}")]
    Encode(String),
    /// An error occurred while deserializing data from storage.
    #[error("decode error: {0}")]
    Decode(String),
    /// A filesystem operation failed.
    #[error("io error: {0}")]
    Io(String),
    /// The persisted state already contradicts the mutation being committed.
    #[error("conflicting write: {0}")]
    Conflict(String),
}

impl ErrorCode for StorageError {
    fn code(&self) -> &'static str {
        match self {
            Self::Backend(_) => "STORAGE_BACKEND_ERROR",
            Self::Encode(_) => "STORAGE_ENCODE_ERROR",
            Self::Decode(_) => "STORAGE_DECODE_ERROR",
            Self::Io(_) => "STORAGE_IO_ERROR",
            Self::Conflict(_) => "STORAGE_CONFLICT",
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// Errors returned by the voting ledger.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The national ID is malformed.
    #[error("Invalid national ID: {0}")]
    InvalidNationalId(#[from] NationalIdError),
    /// The party is not listed in the party catalog.
    #[error("Unknown party: {0}")]
    UnknownParty(String),
    /// The election is not listed in the election catalog.
    #[error("Unknown election: {0}")]
    UnknownElection(String),
    /// The chosen constituency is empty.
    #[error("Constituency must not be empty")]
    InvalidConstituency,
    /// The storage layer failed; no part of the operation was applied.
    #[error("Persistence failure: {0}")]
    Persistence(#[from] StorageError),
    /// A ledger invariant does not hold for the current state.
    #[error("Ledger invariant violated: {0}")]
    InvariantViolation(String),
}

impl ErrorCode for LedgerError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidNationalId(_) => "LEDGER_INVALID_NATIONAL_ID",
            Self::UnknownParty(_) => "LEDGER_UNKNOWN_PARTY",
            Self::UnknownElection(_) => "LEDGER_UNKNOWN_ELECTION",
            Self::InvalidConstituency => "LEDGER_INVALID_CONSTITUENCY",
            Self::Persistence(_) => "LEDGER_PERSISTENCE_FAILURE",
            Self::InvariantViolation(_) => "LEDGER_INVARIANT_VIOLATION",
        }
    }
}

/// Reasons the verification gate refuses a voter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// The national ID does not have a valid format.
    #[error("Invalid national ID format: {0}")]
    InvalidFormat(NationalIdError),
    /// The voter is younger than the minimum voting age.
    #[error("Voter is under the minimum voting age (age {age})")]
    Underage {
        /// The computed age in whole years.
        age: u32,
    },
    /// No directory record matches the supplied national ID and date of birth.
    #[error("No voter record matches the supplied details")]
    NotFound,
    /// The liveness or biometric confirmation did not pass.
    #[error("Liveness check failed: {0}")]
    LivenessFailed(String),
}

impl ErrorCode for RejectionReason {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidFormat(_) => "VERIFY_INVALID_FORMAT",
            Self::Underage { .. } => "VERIFY_UNDERAGE",
            Self::NotFound => "VERIFY_NOT_FOUND",
            Self::LivenessFailed(_) => "VERIFY_LIVENESS_FAILED",
        }
    }
}

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid TOML for the expected schema.
    #[error("Config parse error: {0}")]
    Parse(String),
    /// The configuration parsed but is semantically invalid.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "CONFIG_IO_ERROR",
            Self::Parse(_) => "CONFIG_PARSE_ERROR",
            Self::Invalid(_) => "CONFIG_INVALID",
        }
    }
}
