//! The 32-symbol bech32 alphabet and case normalization.

use alloc::string::String;

/// Bech32 data alphabet, indexed by 5-bit symbol value.
pub const CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";

const INVALID: i8 = -1;

/// Reverse lookup from ASCII byte to symbol value, `-1` for non-members.
const CHARSET_REV: [i8; 128] = build_reverse_table();

const fn build_reverse_table() -> [i8; 128] {
    let mut table = [INVALID; 128];
    let bytes = CHARSET.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        table[bytes[i] as usize] = i as i8;
        i += 1;
    }
    table
}

/// Decode one lowercase data character into its 5-bit value.
///
/// Returns `None` for anything outside the alphabet, including uppercase
/// letters; callers normalize first.
#[inline]
pub fn decode_char(c: char) -> Option<u8> {
    if !c.is_ascii() {
        return None;
    }
    match CHARSET_REV[c as usize] {
        INVALID => None,
        value => Some(value as u8),
    }
}

/// Encode a 5-bit value as its alphabet character.
#[inline]
pub fn encode_symbol(value: u8) -> Option<char> {
    CHARSET.as_bytes().get(value as usize).map(|&b| b as char)
}

/// Whether `c` is a member of the data alphabet.
#[inline]
pub fn is_charset_char(c: char) -> bool {
    decode_char(c).is_some()
}

/// True if the string contains both an uppercase and a lowercase letter.
///
/// Bech32 strings must be entirely one case. This looks at the original
/// caller input, before any lowercasing.
pub fn has_mixed_case(s: &str) -> bool {
    let has_lower = s.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = s.chars().any(|c| c.is_ascii_uppercase());
    has_lower && has_upper
}

/// Canonical (lowercase) form used for all parsing.
pub fn to_canonical(s: &str) -> String {
    s.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_every_symbol() {
        for (i, c) in CHARSET.chars().enumerate() {
            assert_eq!(decode_char(c), Some(i as u8));
            assert_eq!(encode_symbol(i as u8), Some(c));
        }
    }

    #[test]
    fn test_excluded_characters() {
        // 1, b, i and o are not part of the alphabet
        for c in ['1', 'b', 'i', 'o', 'B', 'Q', ' ', '\u{e9}'] {
            assert!(!is_charset_char(c), "{:?} should be rejected", c);
        }
        assert_eq!(encode_symbol(32), None);
    }

    #[test]
    fn test_mixed_case() {
        assert!(has_mixed_case("bC1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"));
        assert!(!has_mixed_case("BC1QW508D6QEJXTDG4Y5R3ZARVARY0C5XW7KV8F3T4"));
        assert!(!has_mixed_case("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"));
        // Digits carry no case
        assert!(!has_mixed_case("1234"));
    }

    #[test]
    fn test_to_canonical() {
        assert_eq!(to_canonical("BC1SW50QGDZ25J"), "bc1sw50qgdz25j");
    }
}
