//! # MIMOSA Error Handling
//!
//! This module defines the MimosaError enum, which represents the different
//! error types that can occur in the mimosa-rs crate. The frame decoder
//! itself has no error channel: malformed input degrades to clamped reads
//! that are visible in the decode statistics instead.

use thiserror::Error;

/// Represents the different error types that can occur in the MIMOSA crate.
#[derive(Debug, Error)]
pub enum MimosaError {
    /// Indicates invalid pixel grid dimensions were requested.
    #[error("Invalid grid dimensions: {rows}x{cols}")]
    InvalidGridDimensions { rows: usize, cols: usize },

    /// Indicates a memory write command was requested with no data words.
    #[error("Write-memory command requires at least one data word")]
    EmptyWritePayload,

    /// Indicates a command word file could not be parsed.
    #[error("Invalid command word on line {line}: {word:?}")]
    InvalidWordFile { line: usize, word: String },

    /// Indicates an invalid hexadecimal string was provided.
    #[error("Invalid hexadecimal string")]
    InvalidHexString,

    /// Indicates an underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch‑all error for uncategorized cases.
    #[error("Other error: {0}")]
    Other(String),
}
