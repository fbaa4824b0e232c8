//! Opaque public identifiers.
//!
//! Numeric ids are written in base 62 over a shuffled alphabet, so that
//! consecutive ids do not look consecutive. The encoding is a bijection
//! between `u64` and canonical strings (no leading zero digit).

const ALPHABET: &[u8; 62] = b"cKaVPRug0job8tZSlEmMivsHLXGCh1DxWOe7ANIzJfTqr52dwUBn6yQ43Fp9Yk";
const BASE: u64 = ALPHABET.len() as u64;

/// Encode `id` as a UID.
pub fn to_uid(mut id: u64) -> String {
    if id == 0 {
        return (ALPHABET[0] as char).to_string();
    }

    let mut digits = Vec::new();
    while id > 0 {
        digits.push(ALPHABET[(id % BASE) as usize]);
        id /= BASE;
    }
    digits.iter().rev().map(|&b| b as char).collect()
}

fn digit(c: u8) -> Option<u64> {
    ALPHABET.iter().position(|&a| a == c).map(|p| p as u64)
}

/// Decode a UID. Non-canonical, foreign or overflowing input gives `None`.
pub fn from_uid(uid: &str) -> Option<u64> {
    let bytes = uid.as_bytes();
    match bytes {
        [] => return None,
        [first, _, ..] if *first == ALPHABET[0] => return None,
        _ => {}
    }

    bytes
        .iter()
        .try_fold(0u64, |acc, &c| acc.checked_mul(BASE)?.checked_add(digit(c)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_alphabet_has_no_duplicates() {
        let mut sorted = ALPHABET.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 62);
    }

    #[test]
    fn test_known_values() {
        assert_eq!(to_uid(0), "c");
        assert_eq!(to_uid(1), "K");
        assert_eq!(to_uid(61), "k");
        assert_eq!(to_uid(62), "Kc");
        assert_eq!(from_uid("Kc"), Some(62));
    }

    #[test]
    fn test_rejects_non_canonical_and_foreign_input() {
        assert_eq!(from_uid(""), None);
        assert_eq!(from_uid("cK"), None);
        assert_eq!(from_uid("K-"), None);
        assert_eq!(from_uid("héllo"), None);
    }

    #[test]
    fn test_rejects_overflow() {
        let max = to_uid(u64::MAX);
        assert_eq!(from_uid(&max), Some(u64::MAX));
        assert_eq!(from_uid(&format!("{}c", max)), None);
    }

    proptest! {
        #[test]
        fn roundtrip(id in any::<u64>()) {
            prop_assert_eq!(from_uid(&to_uid(id)), Some(id));
        }

        #[test]
        fn decoded_strings_are_canonical(s in "[A-Za-z0-9]{1,8}") {
            if let Some(id) = from_uid(&s) {
                prop_assert_eq!(to_uid(id), s);
            }
        }
    }
}
