//! Runtime assembly of the shared signing secret.
//!
//! The secret is never stored as a readable string literal. It is split into
//! four byte fragments, each masked with a different XOR key, and recombined
//! on first use. A `strings` pass over the shipped binary finds nothing
//! legible.
//!
//! This is an obfuscation tactic, not a cryptographic guarantee: anyone who
//! reverse-engineers the binary (or reads this source) can recover the secret
//! and forge keys. The scheme only raises the bar above casual inspection.
//!
//! The assembled value must stay byte-identical between every issuing and
//! validating deployment. Changing it invalidates all previously issued keys.

use std::sync::OnceLock;

static SECRET: OnceLock<String> = OnceLock::new();

// Four fragments of the 34-byte secret, each XOR-masked with its own key.
const FRAGMENT_1: [u8; 9] = [0xe6, 0xd2, 0xf5, 0xc6, 0xf8, 0xe2, 0xd6, 0xf8, 0x95];
const FRAGMENT_2: [u8; 9] = [0x6b, 0x69, 0x6d, 0x04, 0x17, 0x32, 0x18, 0x3e, 0x15];
const FRAGMENT_3: [u8; 9] = [0xa0, 0x96, 0x8c, 0xb8, 0x96, 0xaa, 0x8c, 0x80, 0xb6];
const FRAGMENT_4: [u8; 7] = [0xcc, 0xfd, 0xca, 0xfb, 0xd0, 0xd9, 0xbd];

const KEY_1: u8 = 0xa7;
const KEY_2: u8 = 0x5b;
const KEY_3: u8 = 0xd3;
const KEY_4: u8 = 0x8f;

fn assemble() -> String {
    let mut out = String::with_capacity(
        FRAGMENT_1.len() + FRAGMENT_2.len() + FRAGMENT_3.len() + FRAGMENT_4.len(),
    );
    for b in FRAGMENT_1 {
        out.push((b ^ KEY_1) as char);
    }
    for b in FRAGMENT_2 {
        out.push((b ^ KEY_2) as char);
    }
    for b in FRAGMENT_3 {
        out.push((b ^ KEY_3) as char);
    }
    for b in FRAGMENT_4 {
        out.push((b ^ KEY_4) as char);
    }
    out
}

/// Returns the shared signing secret, assembling it on first call.
pub fn license_secret() -> &'static str {
    SECRET.get_or_init(assemble)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembled_secret_matches_reference() {
        // Plaintext lives in the test binary only, never in the shipped tool.
        assert_eq!(license_secret(), "AuRa_Eq_2026_LiCeNsE_kEy_SeCrEt_V2");
    }

    #[test]
    fn assembled_secret_has_expected_length() {
        assert_eq!(license_secret().len(), 34);
    }

    #[test]
    fn repeated_calls_return_same_value() {
        assert_eq!(license_secret(), license_secret());
    }
}
