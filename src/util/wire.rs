//! # Wire-Order and Word-File Utilities
//!
//! The command channel of the readout board consumes 32-bit command words
//! in network byte order. Encoders build host-order words and run them
//! through [`words_to_network`] as the final step; the conversion is a pure
//! utility, not protocol logic.
//!
//! [`load_word_file`] reads firmware/configuration word files (one
//! hexadecimal 32-bit word per line) for memory write bursts.

use crate::error::MimosaError;
use bytes::{BufMut, Bytes, BytesMut};
use std::fs;
use std::path::Path;

/// Convert 32-bit host-order words to a network-byte-order byte buffer.
pub fn words_to_network(words: &[u32]) -> Bytes {
    let mut buf = BytesMut::with_capacity(words.len() * 4);
    for &word in words {
        buf.put_u32(word);
    }
    buf.freeze()
}

/// Convert 16-bit host-order words to a network-byte-order byte buffer.
pub fn words16_to_network(words: &[u16]) -> Bytes {
    let mut buf = BytesMut::with_capacity(words.len() * 2);
    for &word in words {
        buf.put_u16(word);
    }
    buf.freeze()
}

/// Load a word file: one hexadecimal 32-bit word per line, with or without
/// a `0x` prefix. Blank lines and `#` comment lines are skipped.
pub fn load_word_file<P: AsRef<Path>>(path: P) -> Result<Vec<u32>, MimosaError> {
    let text = fs::read_to_string(path)?;
    let mut words = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let token = line.trim();
        if token.is_empty() || token.starts_with('#') {
            continue;
        }
        let digits = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token);
        let word =
            u32::from_str_radix(digits, 16).map_err(|_| MimosaError::InvalidWordFile {
                line: idx + 1,
                word: token.to_string(),
            })?;
        words.push(word);
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_words_to_network_is_big_endian() {
        let bytes = words_to_network(&[0x001A_0000, 0x0019_0003]);
        assert_eq!(&bytes[..], &[0x00, 0x1A, 0x00, 0x00, 0x00, 0x19, 0x00, 0x03]);
    }

    #[test]
    fn test_words16_to_network_is_big_endian() {
        let bytes = words16_to_network(&[0x5678, 0x00AA]);
        assert_eq!(&bytes[..], &[0x56, 0x78, 0x00, 0xAA]);
    }

    #[test]
    fn test_load_word_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0x0000AABB").unwrap();
        writeln!(file, "# comment").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "deadbeef").unwrap();
        let words = load_word_file(file.path()).unwrap();
        assert_eq!(words, vec![0x0000_AABB, 0xDEAD_BEEF]);
    }

    #[test]
    fn test_load_word_file_reports_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0x1234").unwrap();
        writeln!(file, "not-a-word").unwrap();
        let err = load_word_file(file.path()).unwrap_err();
        match err {
            MimosaError::InvalidWordFile { line, word } => {
                assert_eq!(line, 2);
                assert_eq!(word, "not-a-word");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
