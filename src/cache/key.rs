//! Key Derivation Module
//!
//! Turns a roster into a compact, order-independent cache key of the form
//! `{discriminator}-{digest}`.
//!
//! The digest is a 32-bit rolling hash, so distinct rosters can collide.
//! A collision reads as a cache hit; callers that cannot tolerate a stale or
//! foreign value must not memoize through this key.

use serde_json::Value;

use crate::models::roster::{normalize_roster, PlayerFingerprint};

const FINGERPRINT_SEPARATOR: &str = "|";
const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// == Derive Key ==
/// Derives the cache key for a raw roster.
///
/// Returns `None` when `items` is not a JSON array.
pub fn derive_key(items: &Value, discriminator: &str) -> Option<String> {
    normalize_roster(items).map(|roster| derive_key_from_fingerprints(&roster, discriminator))
}

/// Derives the cache key for an already normalized roster.
///
/// Players are ordered by identity, then by full fingerprint, so the key does
/// not depend on input order even when identities repeat.
pub fn derive_key_from_fingerprints(players: &[PlayerFingerprint], discriminator: &str) -> String {
    let mut fingerprints: Vec<(&str, String)> = players
        .iter()
        .map(|p| (p.identity.as_str(), p.fingerprint()))
        .collect();
    fingerprints.sort();

    let joined = fingerprints
        .into_iter()
        .map(|(_, fingerprint)| fingerprint)
        .collect::<Vec<_>>()
        .join(FINGERPRINT_SEPARATOR);

    format!("{}-{}", discriminator, to_base36(rolling_hash(&joined)))
}

// == Rolling Hash ==
/// `hash = hash * 31 + unit` over UTF-16 code units, wrapping at 32 bits.
///
/// Returns the magnitude of the signed result.
pub fn rolling_hash(input: &str) -> u32 {
    input
        .encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_mul(31).wrapping_add(i32::from(unit))
        })
        .unsigned_abs()
}

/// Lowercase base-36 rendering.
pub fn to_base36(mut value: u32) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rolling_hash_known_values() {
        assert_eq!(to_base36(rolling_hash("")), "0");
        assert_eq!(to_base36(rolling_hash("a")), "2p");
        assert_eq!(to_base36(rolling_hash("1-80-ST")), "v30gxm");
        assert_eq!(to_base36(rolling_hash("1-80-ST|2-70-CM")), "z4y94v");
        assert_eq!(
            to_base36(rolling_hash("Kane-Spurs-30-ST-88-ST,CF")),
            "xzipgv"
        );
    }

    #[test]
    fn test_rolling_hash_wraps_instead_of_overflowing() {
        let long = "formation".repeat(1_000);
        assert_eq!(rolling_hash(&long), rolling_hash(&long));
    }

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(u32::MAX), "1z141z3");
    }

    #[test]
    fn test_most_negative_hash_renders_its_magnitude() {
        assert_eq!(i32::MIN.unsigned_abs(), 2_147_483_648);
        assert_eq!(to_base36(2_147_483_648), "zik0zk");
    }

    #[test]
    fn test_derive_key_two_players() {
        let roster = json!([
            {"UID": "1", "Overall": 80, "shortPositions": ["ST"]},
            {"UID": "2", "Overall": 70, "shortPositions": ["CM"]}
        ]);
        assert_eq!(derive_key(&roster, "team").as_deref(), Some("team-z4y94v"));
    }

    #[test]
    fn test_derive_key_is_order_independent() {
        let forward = json!([
            {"UID": "1", "Overall": 80, "shortPositions": ["ST"]},
            {"UID": "2", "Overall": 70, "shortPositions": ["CM"]}
        ]);
        let reversed = json!([
            {"UID": "2", "Overall": 70, "shortPositions": ["CM"]},
            {"UID": "1", "Overall": 80, "shortPositions": ["ST"]}
        ]);
        assert_eq!(derive_key(&forward, "team"), derive_key(&reversed, "team"));
    }

    #[test]
    fn test_duplicate_identities_are_order_independent() {
        let a = json!([{"UID": "7", "Overall": 60}, {"UID": "7", "Overall": 90}]);
        let b = json!([{"UID": "7", "Overall": 90}, {"UID": "7", "Overall": 60}]);
        assert_eq!(derive_key(&a, "team"), derive_key(&b, "team"));
    }

    #[test]
    fn test_discriminators_are_disjoint() {
        let roster = json!([{"UID": "1", "Overall": 80}]);
        let team = derive_key(&roster, "team").unwrap();
        let best = derive_key(&roster, "best-xi").unwrap();

        assert!(team.starts_with("team-"));
        assert!(best.starts_with("best-xi-"));
        assert_ne!(team, best);
    }

    #[test]
    fn test_rating_change_changes_key() {
        let before = json!([{"UID": "1", "Overall": 80, "shortPositions": ["ST"]}]);
        let after = json!([{"UID": "1", "Overall": 81, "shortPositions": ["ST"]}]);
        assert_ne!(derive_key(&before, "team"), derive_key(&after, "team"));
    }

    #[test]
    fn test_non_array_has_no_key() {
        assert_eq!(derive_key(&Value::Null, "team"), None);
        assert_eq!(derive_key(&json!({"UID": "1"}), "team"), None);
        assert_eq!(derive_key(&json!("roster"), "team"), None);
    }

    #[test]
    fn test_empty_roster() {
        assert_eq!(derive_key(&json!([]), "team").as_deref(), Some("team-0"));
    }
}
