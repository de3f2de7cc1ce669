//! The readout module contains the components that turn raw capture
//! buffers from the sensor link into hit maps and telemetry: the frame
//! decoder (byte synchronization, word assembly, frame state machine), the
//! double-buffered hit-map accumulator, and the telemetry extractor.

pub mod decoder;
pub mod hitmap;
pub mod telemetry;

pub use decoder::{DecodeStats, DecoderConfig, FrameDecoder};
pub use hitmap::{GridDim, HitMap, PixelGrid};
pub use telemetry::{Channel, TelemetryFields, TelemetryRecord};
