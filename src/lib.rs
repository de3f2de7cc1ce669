//! # mimosa-rs - A Rust Crate for MIMOSA Pixel-Sensor Readout Decoding
//!
//! The mimosa-rs crate decodes the raw byte stream captured from the
//! readout link of a MIMOSA-family monolithic active-pixel sensor
//! (928×960 matrix) into a per-pixel hit-count map and a periodic
//! telemetry record, and encodes the command words the readout board
//! understands.
//!
//! ## Features
//!
//! - Byte-level synchronization on the `0xAA` marker run, 16-bit word
//!   assembly and the frame state machine, bit-exact with the firmware
//!   protocol (decode lag, double-terminator confirmation)
//! - Double-buffered hit-map accumulation with a configurable
//!   frames-per-commit window
//! - Telemetry extraction: frame counter, latch-up status, temperature and
//!   the four multiplexed sensor channels, with an overcurrent advisory
//! - Command encoders for register, memory, pulse, status and FIFO access
//! - Support for logging and error handling
//!
//! ## Usage
//!
//! ```rust
//! use mimosa_rs::{decode_buffer, HitMap, TelemetryRecord};
//!
//! let capture: Vec<u8> = vec![0; 80_000]; // one raw transfer
//! let mut hits = HitMap::mimosa(10);      // commit every 10 frames
//! let mut telemetry = TelemetryRecord::new();
//!
//! let stats = decode_buffer(&capture, &mut hits, &mut telemetry);
//! println!("{} frames, {} hits", stats.frames_completed, stats.hits_recorded);
//! ```
//!
//! The hit map and telemetry record are caller-owned and persist across
//! buffers; the decoder resets its own scan state on every call.

pub mod constants;
pub mod device;
pub mod error;
pub mod logging;
pub mod readout;
pub mod util;

pub use crate::error::MimosaError;
pub use crate::logging::{init_logger, log_info};

// Core readout types
pub use readout::decoder::{DecodeStats, DecoderConfig, FrameDecoder};
pub use readout::hitmap::{GridDim, HitMap, PixelGrid};
pub use readout::telemetry::{Channel, TelemetryFields, TelemetryRecord};

/// Decode one raw capture buffer with default decoder settings.
///
/// Convenience wrapper around [`FrameDecoder::decode`] for callers that do
/// not keep a decoder around. The accumulators are mutated in place and
/// carry all state that persists across buffers.
pub fn decode_buffer(
    buf: &[u8],
    hits: &mut HitMap,
    telemetry: &mut TelemetryRecord,
) -> DecodeStats {
    FrameDecoder::default().decode(buf, hits, telemetry)
}
