//! # Utility Modules
//!
//! Common helpers used throughout the mimosa-rs crate: hex encoding and
//! decoding for display and test vectors, and the wire-order conversion plus
//! word-file loading that the command encoders rest on.

pub mod hex;
pub mod wire;

// Re-export commonly used functions
pub use hex::{decode_hex, encode_hex, format_hex_compact};
pub use wire::{load_word_file, words16_to_network, words_to_network};
