//! Hex digit string handling.
//!
//! CMP files store every float as a run of space-separated hex byte pairs in
//! little-endian order (`"00 00 80 3F"` for `1.0`). This module provides the
//! string-level operations used to turn such a run into 32-bit words:
//! space stripping, grouping into 8-digit words, byte order reversal and
//! strict word parsing.

use crate::{Error, Result};

/// Marker placed in front of a hex word before its bytes are reversed.
pub const HEX_PREFIX: &str = "0x";

/// Number of bytes in one encoded float.
pub const WORD_BYTES: usize = 4;

/// Number of hex digits in one encoded float.
pub const WORD_DIGITS: usize = WORD_BYTES * 2;

/// Reverse the byte order of a prefixed hex string.
///
/// `input` is a 2-character marker (usually [`HEX_PREFIX`]) followed by exactly
/// `2 * count` hex digits. The marker is kept as is and the digit pairs are
/// emitted in reverse order. Pairs are moved as a unit, the digits inside a
/// pair are never swapped.
///
/// # Example
///
/// ```
/// use cmpose_common::hex::reverse_byte_order;
///
/// assert_eq!(reverse_byte_order("0xDBC4323F", 4).unwrap(), "0x3F32C4DB");
/// assert!(reverse_byte_order("0xDBC4323", 4).is_err());
/// ```
pub fn reverse_byte_order(input: &str, count: usize) -> Result<String> {
    if !input.is_ascii() {
        return Err(Error::InvalidHexDigit(input.to_string()));
    }
    if input.len() < HEX_PREFIX.len() {
        return Err(Error::MissingPrefix(input.to_string()));
    }

    let (prefix, digits) = input.split_at(HEX_PREFIX.len());

    if digits.len() % 2 != 0 {
        return Err(Error::OddDigitCount(digits.len()));
    }
    if digits.len() != count * 2 {
        return Err(Error::DigitCountMismatch {
            expected: count * 2,
            actual: digits.len(),
        });
    }

    let mut result = String::with_capacity(input.len());
    result.push_str(prefix);
    for pair in digits.as_bytes().chunks_exact(2).rev() {
        result.push(char::from(pair[0]));
        result.push(char::from(pair[1]));
    }

    Ok(result)
}

/// Remove every space character from a byte-pair string.
#[inline]
pub fn strip_spaces(value: &str) -> String {
    value.replace(' ', "")
}

/// Split a digit string into consecutive groups of `width` characters.
///
/// Groups are taken left to right. A trailing partial group is an error
/// rather than being silently dropped or padded.
pub fn split_groups(digits: &str, width: usize) -> Result<Vec<&str>> {
    if !digits.is_ascii() {
        return Err(Error::InvalidHexDigit(digits.to_string()));
    }
    if width == 0 || digits.len() % width != 0 {
        return Err(Error::RaggedGroups {
            len: digits.len(),
            width,
        });
    }

    Ok((0..digits.len())
        .step_by(width)
        .map(|start| &digits[start..start + width])
        .collect())
}

/// Parse exactly eight hex digits as an unsigned 32-bit word.
///
/// Both upper and lower case digits are accepted. Signs, prefixes and
/// whitespace are rejected.
pub fn parse_hex_u32(digits: &str) -> Result<u32> {
    if digits.len() != WORD_DIGITS {
        return Err(Error::DigitCountMismatch {
            expected: WORD_DIGITS,
            actual: digits.len(),
        });
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidHexDigit(digits.to_string()));
    }

    u32::from_str_radix(digits, 16).map_err(|_| Error::InvalidHexDigit(digits.to_string()))
}

/// Decode a space-separated byte-pair string (`"DB C4 32 3F"`) into bytes.
pub fn decode_byte_pairs(value: &str) -> Result<Vec<u8>> {
    value
        .split_whitespace()
        .map(|pair| {
            if pair.len() != 2 || !pair.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(Error::InvalidHexDigit(pair.to_string()));
            }
            u8::from_str_radix(pair, 16).map_err(|_| Error::InvalidHexDigit(pair.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_word() {
        assert_eq!(reverse_byte_order("0xDBC4323F", 4).unwrap(), "0x3F32C4DB");
        assert_eq!(reverse_byte_order("0x054F8FBE", 4).unwrap(), "0xBE8F4F05");
    }

    #[test]
    fn test_reverse_keeps_prefix_and_pairs() {
        // Pairs move as units: "12" stays "12", it does not become "21"
        assert_eq!(reverse_byte_order("##12345678", 4).unwrap(), "##78563412");
    }

    #[test]
    fn test_reverse_is_involution() {
        for start in 0..=255u8 {
            let digits: String = (0..16u8)
                .map(|i| format!("{:02X}", start.wrapping_add(i.wrapping_mul(17))))
                .collect();
            let input = format!("{HEX_PREFIX}{digits}");

            let once = reverse_byte_order(&input, 16).unwrap();
            let twice = reverse_byte_order(&once, 16).unwrap();
            assert_eq!(twice, input, "start {start:#04x}");
        }
    }

    #[test]
    fn test_reverse_word_involution_all_bytes() {
        for byte in 0..=255u8 {
            let input = format!(
                "{HEX_PREFIX}{byte:02x}{:02X}{:02x}{:02X}",
                !byte,
                byte ^ 0x5A,
                byte.rotate_left(3)
            );
            let once = reverse_byte_order(&input, WORD_BYTES).unwrap();
            assert_eq!(reverse_byte_order(&once, WORD_BYTES).unwrap(), input);
        }
    }

    #[test]
    fn test_reverse_rejects_bad_lengths() {
        assert_eq!(
            reverse_byte_order("0xABC", 4),
            Err(Error::OddDigitCount(3))
        );
        assert_eq!(
            reverse_byte_order("0xABCD", 4),
            Err(Error::DigitCountMismatch {
                expected: 8,
                actual: 4
            })
        );
        assert!(matches!(
            reverse_byte_order("0", 4),
            Err(Error::MissingPrefix(_))
        ));
        assert!(matches!(
            reverse_byte_order("0xé1234567", 4),
            Err(Error::InvalidHexDigit(_))
        ));
    }

    #[test]
    fn test_strip_spaces() {
        assert_eq!(strip_spaces("DB C4 32 3F"), "DBC4323F");
        assert_eq!(strip_spaces(""), "");
    }

    #[test]
    fn test_split_groups() {
        let groups = split_groups("DBC4323FF3E69BBE", 8).unwrap();
        assert_eq!(groups, vec!["DBC4323F", "F3E69BBE"]);

        assert_eq!(
            split_groups("DBC4323FF3E69B", 8),
            Err(Error::RaggedGroups { len: 14, width: 8 })
        );
        assert!(split_groups("", 8).unwrap().is_empty());
    }

    #[test]
    fn test_parse_hex_u32() {
        assert_eq!(parse_hex_u32("3F800000").unwrap(), 0x3F80_0000);
        assert_eq!(parse_hex_u32("bf800000").unwrap(), 0xBF80_0000);
        assert!(parse_hex_u32("+3F80000").is_err());
        assert!(parse_hex_u32("3F8000ZZ").is_err());
        assert!(parse_hex_u32("3F80").is_err());
    }

    #[test]
    fn test_decode_byte_pairs() {
        assert_eq!(
            decode_byte_pairs("DB C4 32 3f").unwrap(),
            vec![0xDB, 0xC4, 0x32, 0x3F]
        );
        assert!(decode_byte_pairs("DB C").is_err());
        assert!(decode_byte_pairs("").unwrap().is_empty());
    }
}
