//! License key generation and validation.
//!
//! Keys are deterministic and machine-bound, in the fixed 23-character format
//! `AURA-CCCC-MMMM-SSSSSSSS`:
//!
//! - `CCCC`: customer id (4 characters, space-padded)
//! - `MMMM`: first 4 characters of the machine id
//! - `SSSSSSSS`: keyed MD5 signature (8 hex characters)
//!
//! The signature is the truncated MD5 of `secret-customer-machine`, so the
//! same inputs always produce the same key. MD5 is weak by modern standards
//! but is kept deliberately: every key already in the field was issued with
//! it, and swapping in a stronger hash would silently invalidate them all.
//!
//! # Example
//!
//! ```rust,ignore
//! use aura_license::license_key::{generate_key, validate_key};
//!
//! let key = generate_key("0001", "AB12CD34")?;
//! let result = validate_key(&key, "AB12CD34");
//! assert!(result.valid);
//! ```

use md5::{Digest, Md5};

use crate::errors::{LicenseError, LicenseResult};
use crate::secret::license_secret;

/// Literal prefix every key starts with.
pub const KEY_PREFIX: &str = "AURA";

/// Total key length, separators included.
pub const KEY_LENGTH: usize = 23;

/// Customer id width after padding.
pub const CUSTOMER_ID_LENGTH: usize = 4;

/// Number of machine id characters embedded in the key.
pub const MACHINE_PREFIX_LENGTH: usize = 4;

/// Signature width in hex characters.
pub const SIGNATURE_LENGTH: usize = 8;

/// Fixed byte offsets of the `-` separators.
const SEPARATOR_POSITIONS: [usize; 3] = [4, 9, 14];

/// Outcome of a key validation.
///
/// Validation never fails hard: a malformed or mismatched key produces
/// `valid == false` plus a diagnostic message suitable for showing to the
/// user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValidation {
    pub valid: bool,
    pub message: String,
}

impl KeyValidation {
    fn rejected(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }

    fn accepted(message: impl Into<String>) -> Self {
        Self {
            valid: true,
            message: message.into(),
        }
    }
}

/// Compute the keyed signature binding a customer id to a machine id.
///
/// The input string is `secret-customer_id-machine_id`; the signature is the
/// first 8 characters of its uppercase MD5 hex digest. Pure function: the
/// same inputs always yield the same signature.
pub fn compute_signature(customer_id: &str, machine_id: &str) -> String {
    let input = format!("{}-{}-{}", license_secret(), customer_id, machine_id);
    let digest = Md5::digest(input.as_bytes());
    hex::encode(digest)[..SIGNATURE_LENGTH].to_uppercase()
}

/// Normalize a customer id: uppercase, then space-pad or truncate to exactly
/// 4 characters.
fn normalize_customer_id(customer_id: &str) -> String {
    let upper = customer_id.to_uppercase();
    let mut cid: String = upper.chars().take(CUSTOMER_ID_LENGTH).collect();
    while cid.chars().count() < CUSTOMER_ID_LENGTH {
        cid.push(' ');
    }
    cid
}

/// Generate a machine-bound license key.
///
/// The customer id is uppercased and padded/truncated to 4 characters; the
/// machine id is uppercased as-is. Fails with `InvalidInput` if the machine
/// id has fewer than 4 characters.
pub fn generate_key(customer_id: &str, machine_id: &str) -> LicenseResult<String> {
    let cid = normalize_customer_id(customer_id);
    let mid = machine_id.to_uppercase();

    // The wire format is fixed-width ASCII; anything else cannot produce a
    // well-formed 23-byte key.
    if !cid.is_ascii() || !mid.is_ascii() {
        return Err(LicenseError::InvalidInput(
            "customer id and machine id must be ASCII".to_string(),
        ));
    }

    if mid.len() < MACHINE_PREFIX_LENGTH {
        return Err(LicenseError::InvalidInput(format!(
            "machine id must have at least {} characters (got '{}')",
            MACHINE_PREFIX_LENGTH, mid
        )));
    }

    let machine_prefix = &mid[..MACHINE_PREFIX_LENGTH];
    let signature = compute_signature(&cid, &mid);

    let key = format!("{}-{}-{}-{}", KEY_PREFIX, cid, machine_prefix, signature);

    // Invariant of the wire format. A violation means the normalization
    // above is broken, so fail hard rather than hand out a bad key.
    assert_eq!(
        key.len(),
        KEY_LENGTH,
        "generated key has wrong length: {}",
        key.len()
    );

    Ok(key)
}

/// Validate a license key against a machine id.
///
/// Both inputs are uppercased and trimmed first. Checks run in order and
/// short-circuit on the first failure, each with its own diagnostic:
/// prefix, length, separator positions, embedded machine prefix, signature.
pub fn validate_key(key: &str, machine_id: &str) -> KeyValidation {
    let key = key.trim().to_uppercase();
    let machine_id = machine_id.trim().to_uppercase();

    if !key.starts_with("AURA-") {
        return KeyValidation::rejected("key must start with 'AURA-'");
    }

    if key.len() != KEY_LENGTH {
        return KeyValidation::rejected(format!(
            "invalid key length (expected {}, got {})",
            KEY_LENGTH,
            key.len()
        ));
    }

    // Field extraction below slices at fixed byte offsets.
    if !key.is_ascii() {
        return KeyValidation::rejected("key contains non-ASCII characters");
    }

    let bytes = key.as_bytes();
    if SEPARATOR_POSITIONS.iter().any(|&pos| bytes[pos] != b'-') {
        return KeyValidation::rejected("invalid separator positions");
    }

    let customer_id = &key[5..9];
    let machine_prefix = &key[10..14];
    let signature = &key[15..23];

    let expected_prefix: String = machine_id.chars().take(MACHINE_PREFIX_LENGTH).collect();
    if machine_prefix != expected_prefix {
        return KeyValidation::rejected(format!(
            "machine id mismatch ({} != {})",
            machine_prefix, expected_prefix
        ));
    }

    let expected = compute_signature(customer_id, &machine_id);
    if signature != expected {
        return KeyValidation::rejected(format!(
            "invalid signature (expected {}, got {})",
            expected, signature
        ));
    }

    KeyValidation::accepted(format!(
        "key valid for machine {} (customer: {})",
        machine_id, customer_id
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MACHINE_ID: &str = "AB12CD34";

    #[test]
    fn signature_matches_reference_vector() {
        // Reference value produced by the original issuing tool. Must never
        // change, or keys already in the field stop validating.
        assert_eq!(compute_signature("0001", "AB12CD34"), "F78A950E");
    }

    #[test]
    fn generate_key_matches_reference_vector() {
        let key = generate_key("0001", MACHINE_ID).unwrap();
        assert_eq!(key, "AURA-0001-AB12-F78A950E");
    }

    #[test]
    fn signature_is_deterministic() {
        let a = compute_signature("0001", MACHINE_ID);
        let b = compute_signature("0001", MACHINE_ID);
        assert_eq!(a, b);
    }

    #[test]
    fn signature_changes_with_either_input() {
        let base = compute_signature("0001", MACHINE_ID);
        assert_ne!(base, compute_signature("0002", MACHINE_ID));
        assert_ne!(base, compute_signature("0001", "AB12CD35"));
    }

    #[test]
    fn generated_key_has_correct_format() {
        let key = generate_key("0001", MACHINE_ID).unwrap();
        assert_eq!(key.len(), KEY_LENGTH);
        assert!(key.starts_with("AURA-"));
        let bytes = key.as_bytes();
        assert_eq!(bytes[4], b'-');
        assert_eq!(bytes[9], b'-');
        assert_eq!(bytes[14], b'-');
    }

    #[test]
    fn short_customer_id_is_space_padded() {
        let key = generate_key("1", MACHINE_ID).unwrap();
        assert_eq!(key, "AURA-1   -AB12-E4407A3D");
        assert_eq!(&key[5..9], "1   ");
    }

    #[test]
    fn long_customer_id_is_truncated() {
        let key = generate_key("CUSTOMER", MACHINE_ID).unwrap();
        assert_eq!(&key[5..9], "CUST");
    }

    #[test]
    fn customer_id_is_uppercased() {
        let upper = generate_key("acme", MACHINE_ID).unwrap();
        let lower = generate_key("ACME", MACHINE_ID).unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn short_machine_id_is_rejected() {
        let err = generate_key("0001", "AB1").unwrap_err();
        assert!(err.to_string().contains("at least 4"));
    }

    #[test]
    fn non_ascii_input_is_rejected() {
        assert!(generate_key("ÄÖÜ1", MACHINE_ID).is_err());
        assert!(generate_key("0001", "ÄB12CD34").is_err());
    }

    #[test]
    fn round_trip_validates() {
        let key = generate_key("0001", MACHINE_ID).unwrap();
        let result = validate_key(&key, MACHINE_ID);
        assert!(result.valid, "{}", result.message);
        assert!(result.message.contains("0001"));
        assert!(result.message.contains(MACHINE_ID));
    }

    #[test]
    fn round_trip_validates_with_padded_customer() {
        let key = generate_key("1", MACHINE_ID).unwrap();
        let result = validate_key(&key, MACHINE_ID);
        assert!(result.valid, "{}", result.message);
    }

    #[test]
    fn validation_is_case_insensitive() {
        let key = generate_key("0001", MACHINE_ID).unwrap();
        let result = validate_key(&key.to_lowercase(), &MACHINE_ID.to_lowercase());
        assert!(result.valid, "{}", result.message);
    }

    #[test]
    fn validation_trims_whitespace() {
        let key = generate_key("0001", MACHINE_ID).unwrap();
        let padded = format!("  {}  ", key);
        assert!(validate_key(&padded, MACHINE_ID).valid);
    }

    #[test]
    fn wrong_prefix_is_rejected() {
        let result = validate_key("NOPE-0001-AB12-F78A950E", MACHINE_ID);
        assert!(!result.valid);
        assert!(result.message.contains("AURA-"));
    }

    #[test]
    fn wrong_length_is_rejected() {
        let result = validate_key("AURA-0001-AB12-F78A950", MACHINE_ID);
        assert!(!result.valid);
        assert!(result.message.contains("length"));

        let result = validate_key("AURA-0001-AB12-F78A950EE", MACHINE_ID);
        assert!(!result.valid);
        assert!(result.message.contains("length"));
    }

    #[test]
    fn wrong_separator_positions_are_rejected() {
        // Right length, but a separator replaced by a regular character.
        let result = validate_key("AURA-0001XAB12-F78A950E", MACHINE_ID);
        assert!(!result.valid);
        assert!(result.message.contains("separator"));
    }

    #[test]
    fn different_machine_is_rejected_with_mismatch_message() {
        let key = generate_key("0001", MACHINE_ID).unwrap();
        let result = validate_key(&key, "ZZ99CD34");
        assert!(!result.valid);
        assert!(result.message.contains("machine id mismatch"));
    }

    #[test]
    fn forged_signature_is_rejected() {
        let result = validate_key("AURA-0001-AB12-00000000", MACHINE_ID);
        assert!(!result.valid);
        assert!(result.message.contains("signature"));
    }

    #[test]
    fn any_single_character_mutation_invalidates() {
        let key = generate_key("0001", MACHINE_ID).unwrap();
        assert!(validate_key(&key, MACHINE_ID).valid);

        for pos in 0..key.len() {
            let mut mutated: Vec<u8> = key.clone().into_bytes();
            mutated[pos] = if mutated[pos] == b'X' { b'Z' } else { b'X' };
            let mutated = String::from_utf8(mutated).unwrap();
            let result = validate_key(&mutated, MACHINE_ID);
            assert!(
                !result.valid,
                "mutation at position {} still validated: {}",
                pos, mutated
            );
        }
    }

    #[test]
    fn non_ascii_key_is_rejected() {
        // 23 bytes, valid prefix, but multi-byte characters inside.
        let result = validate_key("AURA-ÄÖ01-AB12-F78A95", MACHINE_ID);
        assert!(!result.valid);
    }

    #[test]
    fn empty_key_is_rejected() {
        assert!(!validate_key("", MACHINE_ID).valid);
    }
}
