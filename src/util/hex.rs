//! # Hex Encoding/Decoding Utilities
//!
//! Thin wrappers over the `hex` crate used for command-word display in the
//! CLI and for building test vectors from captured readout data.

use thiserror::Error;

/// Errors that can occur during hex operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HexError {
    #[error("Odd number of hex characters: {0}")]
    OddLength(usize),

    #[error("Empty hex string")]
    EmptyString,

    #[error("Hex decoding error: {0}")]
    DecodeError(String),
}

/// Encode bytes to a lowercase hex string.
pub fn encode_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Decode a hex string to bytes.
///
/// Accepts upper and lowercase characters; whitespace is stripped, so
/// captured dumps like `"aa aa aa aa"` decode directly.
pub fn decode_hex(hex_str: &str) -> Result<Vec<u8>, HexError> {
    if hex_str.is_empty() {
        return Err(HexError::EmptyString);
    }

    let cleaned: String = hex_str.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.len() % 2 != 0 {
        return Err(HexError::OddLength(cleaned.len()));
    }

    hex::decode(&cleaned).map_err(|e| HexError::DecodeError(e.to_string()))
}

/// Format bytes as "00 1a 00 00" with spaces between bytes, for logs and
/// command-word display.
pub fn format_hex_compact(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        let data = vec![0xAA, 0xAA, 0xAA, 0xAA, 0x78, 0x56];
        let encoded = encode_hex(&data);
        assert_eq!(decode_hex(&encoded).unwrap(), data);
    }

    #[test]
    fn test_decode_with_whitespace() {
        let expected = vec![0xAA, 0xAA, 0xAA, 0xAA];
        assert_eq!(decode_hex("aa aa aa aa").unwrap(), expected);
    }

    #[test]
    fn test_decode_rejects_odd_length() {
        assert_eq!(decode_hex("aaa"), Err(HexError::OddLength(3)));
        assert_eq!(decode_hex(""), Err(HexError::EmptyString));
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_hex_compact(&[0x00, 0x1A, 0x00, 0x00]), "00 1a 00 00");
    }
}
