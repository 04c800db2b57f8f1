//! Key encoding used by search data files.
//!
//! A key is `<encoded-term>_<ordinal>`. The term is the lowercased heading or
//! symbol name with every character outside `[a-z0-9]` (and outside the
//! non-ASCII range) written as `_` plus two lowercase hex digits. The ordinal
//! is the entry's position in its file.
//!
//! ```
//! use blit_search::key::{decode_key, encode_term};
//!
//! assert_eq!(encode_term("rop2.h"), "rop2_2eh");
//! let decoded = decode_key("rop_5frev_5fpolish_11").unwrap();
//! assert_eq!(decoded.term, "rop_rev_polish");
//! assert_eq!(decoded.ordinal, 11);
//! ```

use crate::error::SearchError;

/// A key split into its readable term and ordinal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedKey {
    pub term: String,
    pub ordinal: u32,
}

/// Encode text the way keys are encoded. Input is lowercased first.
pub fn encode_term(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || !c.is_ascii() {
            out.push(c);
        } else {
            out.push_str(&format!("_{:02x}", c as u32));
        }
    }
    out
}

/// Split a key at its final `_` into the encoded term and the ordinal.
pub fn split_key(key: &str) -> Result<(&str, u32), SearchError> {
    let (term, ordinal) = key
        .rsplit_once('_')
        .ok_or_else(|| SearchError::InvalidKey(format!("{key}: missing ordinal")))?;
    if ordinal.is_empty() || !ordinal.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SearchError::InvalidKey(format!(
            "{key}: ordinal '{ordinal}' is not a number"
        )));
    }
    let ordinal = ordinal
        .parse()
        .map_err(|_| SearchError::InvalidKey(format!("{key}: ordinal out of range")))?;
    Ok((term, ordinal))
}

/// Decode an encoded term (without ordinal) back to readable text.
pub fn decode_term(encoded: &str) -> Result<String, SearchError> {
    let mut bytes = Vec::with_capacity(encoded.len());
    let mut chars = encoded.chars();
    while let Some(c) = chars.next() {
        if c != '_' {
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            continue;
        }
        let hex: String = chars.by_ref().take(2).collect();
        if hex.len() != 2 {
            return Err(SearchError::InvalidKey(format!(
                "{encoded}: truncated escape"
            )));
        }
        let byte = u8::from_str_radix(&hex, 16)
            .map_err(|_| SearchError::InvalidKey(format!("{encoded}: bad escape _{hex}")))?;
        bytes.push(byte);
    }
    String::from_utf8(bytes)
        .map_err(|_| SearchError::InvalidKey(format!("{encoded}: escapes are not UTF-8")))
}

/// Decode a full key into term and ordinal.
pub fn decode_key(key: &str) -> Result<DecodedKey, SearchError> {
    let (term, ordinal) = split_key(key)?;
    if term.is_empty() {
        return Err(SearchError::InvalidKey(format!("{key}: empty term")));
    }
    Ok(DecodedKey {
        term: decode_term(term)?,
        ordinal,
    })
}

/// Build a key from readable text and an ordinal.
pub fn make_key(term: &str, ordinal: u32) -> String {
    format!("{}_{}", encode_term(term), ordinal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_spaces_and_punctuation() {
        assert_eq!(encode_term("raster operation"), "raster_20operation");
        assert_eq!(encode_term("rgn1.h"), "rgn1_2eh");
        assert_eq!(encode_term("ROP_REV_POLISH"), "rop_5frev_5fpolish");
    }

    #[test]
    fn test_encode_keeps_non_ascii() {
        assert_eq!(encode_term("32×32"), "32×32");
    }

    #[test]
    fn test_encode_low_control_char_is_two_digits() {
        assert_eq!(encode_term("a\tb"), "a_09b");
    }

    #[test]
    fn test_decode_fixture_keys() {
        let k = decode_key("raster_20operations_20tt_20blit_5frop2_20tt_1").unwrap();
        assert_eq!(k.term, "raster operations tt blit_rop2 tt");
        assert_eq!(k.ordinal, 1);

        let k = decode_key("rop2_2eh_10").unwrap();
        assert_eq!(k.term, "rop2.h");
        assert_eq!(k.ordinal, 10);
    }

    #[test]
    fn test_decode_rejects_missing_ordinal() {
        assert!(decode_key("region").is_err());
        assert!(decode_key("region_x").is_err());
        assert!(decode_key("_4").is_err());
    }

    #[test]
    fn test_decode_rejects_bad_escape() {
        assert!(decode_key("rop_zz_3").is_err());
        assert!(decode_term("rop_2").is_err());
    }

    #[test]
    fn test_make_key_inverts_decode() {
        let key = make_key("Running all tests", 12);
        assert_eq!(key, "running_20all_20tests_12");
        let decoded = decode_key(&key).unwrap();
        assert_eq!(decoded.term, "running all tests");
    }
}
