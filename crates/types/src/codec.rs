// crates/types/src/codec.rs

//! Defines the canonical, deterministic binary codec for persisted ledger records.
//!
//! This module provides simple wrappers around `parity-scale-codec` (SCALE). The
//! transactional store writes every tally, voter marker and registration record
//! through these two functions, so that a record written by one build of the
//! kernel is read back byte-for-byte by another.

use parity_scale_codec::{Decode, DecodeAll, Encode};

/// Encodes a value into a deterministic, canonical byte representation using SCALE codec.
///
/// # Arguments
///
/// * `v` - A reference to a value that implements the `parity_scale_codec::Encode` trait.
///
/// # Returns
///
/// A `Vec<u8>` containing the canonical SCALE-encoded bytes.
pub fn to_bytes_canonical<T: Encode>(v: &T) -> Result<Vec<u8>, String> {
    Ok(v.encode())
}

/// Decodes a value from a canonical byte representation using SCALE codec.
///
/// Trailing bytes are rejected, so a truncated or concatenated record fails fast
/// instead of being silently accepted.
pub fn from_bytes_canonical<T: Decode>(b: &[u8]) -> Result<T, String> {
    T::decode_all(&mut &*b).map_err(|e| format!("canonical decode failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::RegistrationRecord;

    #[test]
    fn test_registration_record_survives_codec() {
        let record = RegistrationRecord {
            national_id: "1234567890".into(),
            election_id: "e2".into(),
            election_title: "Union Parishad Election".into(),
            election_date: "2027-01-15".into(),
            constituency: "Dhaka-10".into(),
            timestamp: 1_767_225_600_000,
        };
        let encoded = to_bytes_canonical(&record).unwrap();
        let decoded: RegistrationRecord = from_bytes_canonical(&encoded).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_canonical_decode_fails_on_trailing_bytes() {
        let mut encoded = to_bytes_canonical(&42u64).unwrap();
        encoded.push(0xFF);
        let result = from_bytes_canonical::<u64>(&encoded);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("canonical decode failed"));
    }
}
