//! Deterministic statement identifiers
//!
//! Statement ids are derived, not assigned: the same logical event always
//! yields the same UUID, and a related event can reference another event's
//! statement by recomputing its id instead of looking it up in storage.

use md5::{Digest, Md5};
use uuid::Uuid;

use lume_models::{Platform, VerbDef};

/// Derive the deterministic statement id for an event.
///
/// The platform URL, the verb's canonical xAPI identifier and the seed
/// values are concatenated in that fixed order with no separator and hashed
/// with MD5. The 32-character hex digest is then folded into 16 bytes by
/// summing the ASCII codes of each adjacent pair of hex characters, and the
/// result is used as the "random" input of a version-4 UUID.
///
/// The folding step is deliberately NOT a hex decode. It is weaker than one,
/// but it is the scheme deployed peers derive ids with, so it must be kept
/// byte-for-byte compatible: changing it (or the seed order of any event
/// kind) would silently break every cross-statement reference.
pub fn derive_statement_id(platform: &Platform, verb: &VerbDef, seed: &[&str]) -> Uuid {
    let mut joined = String::with_capacity(
        platform.url.len() + verb.xapi.id.len() + seed.iter().map(|s| s.len()).sum::<usize>(),
    );
    joined.push_str(&platform.url);
    joined.push_str(verb.xapi.id);
    for value in seed {
        joined.push_str(value);
    }

    let digest = Md5::digest(joined.as_bytes());

    // The two hex characters of digest byte i are its nibbles, so the
    // pairwise character-code sum folds down to this per-byte form. Sums
    // stay in '0'+'0'..='f'+'f', well inside a u8.
    let mut random = [0u8; 16];
    for (slot, byte) in random.iter_mut().zip(digest) {
        *slot = hex_ascii(byte >> 4) + hex_ascii(byte & 0x0f);
    }

    uuid::Builder::from_random_bytes(random).into_uuid()
}

fn hex_ascii(nibble: u8) -> u8 {
    match nibble {
        0..=9 => b'0' + nibble,
        _ => b'a' + (nibble - 10),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lume_models::verbs;

    fn platform() -> Platform {
        Platform::new("Example LMS", "https://lms.example.edu")
    }

    #[test]
    fn derived_id_matches_known_vector() {
        // Pinned against the reference derivation; a change here means ids
        // have diverged from deployed peers.
        let id = derive_statement_id(
            &platform(),
            &verbs::CREATED,
            &["https://lms.example.edu/courses/1"],
        );
        assert_eq!(id.to_string(), "9ac6cb6d-6f63-4698-8769-949e9e96c898");
    }

    #[test]
    fn derived_id_with_timestamp_seed_matches_known_vector() {
        let id = derive_statement_id(
            &platform(),
            &verbs::VIEWED,
            &["2018-03-14T10:00:00Z", "https://lms.example.edu/assignments/1"],
        );
        assert_eq!(id.to_string(), "989a97c5-6ec9-4b6c-a968-6768c4669993");
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = derive_statement_id(&platform(), &verbs::SUBMITTED, &["s1", "a1"]);
        let b = derive_statement_id(&platform(), &verbs::SUBMITTED, &["s1", "a1"]);
        assert_eq!(a, b);
    }

    #[test]
    fn differing_seed_values_produce_differing_ids() {
        let a = derive_statement_id(&platform(), &verbs::VIEWED, &["x"]);
        let b = derive_statement_id(&platform(), &verbs::VIEWED, &["y"]);
        assert_ne!(a, b);
    }

    #[test]
    fn seed_order_matters() {
        let a = derive_statement_id(&platform(), &verbs::VIEWED, &["a", "b"]);
        let b = derive_statement_id(&platform(), &verbs::VIEWED, &["b", "a"]);
        assert_ne!(a, b);
    }

    #[test]
    fn differing_verbs_produce_differing_ids() {
        let a = derive_statement_id(&platform(), &verbs::CREATED, &["x"]);
        let b = derive_statement_id(&platform(), &verbs::VIEWED, &["x"]);
        assert_ne!(a, b);
    }

    #[test]
    fn derived_id_is_version_4_shaped() {
        let id = derive_statement_id(&platform(), &verbs::CREATED, &[]);
        assert_eq!(id.get_version_num(), 4);
        assert_eq!(id.get_variant(), uuid::Variant::RFC4122);
    }
}
