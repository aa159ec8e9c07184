//! Content fingerprints for generated batches.
//!
//! A fingerprint is the lowercase hex SHA-256 of the compact JSON encoding.
//! Two runs with the same seed and `today` produce the same fingerprint, so
//! the CLI prints it next to each batch as a reproducibility check.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// SHA-256 hex digest of `value`'s compact JSON encoding.
pub fn fingerprint<T: Serialize + ?Sized>(value: &T) -> String {
    // Only plain data types are fingerprinted here; their encoding cannot fail.
    let json = serde_json::to_vec(value).expect("fingerprinted values must serialize to JSON");

    let mut hasher = Sha256::new();
    hasher.update(&json);
    hex::encode(hasher.finalize())
}

/// Short form used in log lines and CLI footers: the first 12 hex chars.
pub fn short_fingerprint<T: Serialize + ?Sized>(value: &T) -> String {
    let mut full = fingerprint(value);
    full.truncate(12);
    full
}

/// Whether `value` still hashes to `expected`.
pub fn matches_fingerprint<T: Serialize + ?Sized>(value: &T, expected: &str) -> bool {
    fingerprint(value).eq_ignore_ascii_case(expected)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{
        formulary::Formulary,
        medula::{generate_provisions, sut_catalog},
        pharmacy::generate_prescription_batch,
        seed::SeedStreams,
    };

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn fingerprint_is_64_lowercase_hex() {
        let fp = fingerprint(&vec![1, 2, 3]);
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(short_fingerprint(&vec![1, 2, 3]), fp[..12]);
    }

    #[test]
    fn same_seed_same_fingerprint() {
        let formulary = Formulary::standard();
        let a = generate_prescription_batch(&SeedStreams::new(42), &formulary, 40, today());
        let b = generate_prescription_batch(&SeedStreams::new(42), &formulary, 40, today());
        let c = generate_prescription_batch(&SeedStreams::new(43), &formulary, 40, today());
        assert_eq!(fingerprint(&a), fingerprint(&b));
        assert_ne!(fingerprint(&a), fingerprint(&c));
    }

    #[test]
    fn any_edit_changes_the_fingerprint() {
        let mut rng = SeedStreams::new(7).rng(crate::seed::Domain::Medula);
        let mut provisions = generate_provisions(&mut rng, &sut_catalog(), 10, today());
        let fp = fingerprint(&provisions);
        assert!(matches_fingerprint(&provisions, &fp.to_uppercase()));

        provisions[0].amount_kurus += 1;
        assert!(!matches_fingerprint(&provisions, &fp));
    }
}
