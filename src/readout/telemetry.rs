//! # Telemetry Extraction
//!
//! Every frame carries an 8-byte slow-control block right after the sync
//! marker: frame counter, latch-up status, temperature and one of four
//! multiplexed sensor channel readings (ChipVDD, MimosaVDD, ChipI, MimosaI).
//! The block is decoded with `nom` into a [`TelemetryRecord`] that the
//! caller owns; channel slots not addressed by the current frame keep their
//! previous values.
//!
//! The temperature formula is kept bit-for-bit as the firmware computes it
//! (`((b4 << 2) + (b5 >> 6)) >> 2`), although it is algebraically
//! reducible, so readings stay comparable with the legacy tooling.
//!
//! A MimosaI reading above the configured limit raises an overcurrent
//! advisory. The advisory is an observability signal, never a decode
//! failure.

use crate::constants::TELEMETRY_BLOCK_LEN;
use log::warn;
use nom::number::complete::be_u8;
use nom::IResult;
use serde::Serialize;

/// The four multiplexed slow-control channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Channel {
    /// CH 0: chip supply voltage.
    ChipVdd,
    /// CH 1: Mimosa matrix supply voltage.
    MimosaVdd,
    /// CH 2: chip supply current.
    ChipI,
    /// CH 3: Mimosa matrix supply current.
    MimosaI,
}

impl Channel {
    /// Map the 2-bit channel identifier to its channel.
    pub fn from_id(id: u8) -> Channel {
        match id & 0x03 {
            0 => Channel::ChipVdd,
            1 => Channel::MimosaVdd,
            2 => Channel::ChipI,
            _ => Channel::MimosaI,
        }
    }

    pub fn id(&self) -> u8 {
        match self {
            Channel::ChipVdd => 0,
            Channel::MimosaVdd => 1,
            Channel::ChipI => 2,
            Channel::MimosaI => 3,
        }
    }
}

/// Fields decoded from one 8-byte telemetry block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryFields {
    /// 20-bit hardware frame counter.
    pub frame_counter: u32,
    /// 2-bit latch-up status.
    pub latchup: u8,
    /// Temperature reading (raw counts).
    pub temperature: u16,
    /// Channel addressed by this block.
    pub channel: Channel,
    /// 10-bit reading for the addressed channel.
    pub value: u16,
}

/// Uses the `nom` crate to decode one telemetry block.
///
/// The input must hold at least 8 bytes; the decoder always stages a full
/// (zero-padded) block. Extraction is masking and shifting only and cannot
/// fail on any 8-byte input.
pub fn parse_block(input: &[u8]) -> IResult<&[u8], TelemetryFields> {
    let (i, _b0) = be_u8(input)?;
    let (i, b1) = be_u8(i)?;
    let (i, b2) = be_u8(i)?;
    let (i, b3) = be_u8(i)?;
    let (i, b4) = be_u8(i)?;
    let (i, b5) = be_u8(i)?;
    let (i, b6) = be_u8(i)?;
    let (i, b7) = be_u8(i)?;

    let frame_counter =
        (u32::from(b1 & 0x0F) << 16) | (u32::from(b2) << 8) | u32::from(b3);
    let latchup = (b1 & 0x30) >> 4;
    let temperature = ((u16::from(b4) << 2) + (u16::from(b5) >> 6)) >> 2;
    let channel = Channel::from_id((b6 & 0x0C) >> 2);
    let value = (u16::from(b6 & 0x03) << 8) + u16::from(b7);

    Ok((
        i,
        TelemetryFields {
            frame_counter,
            latchup,
            temperature,
            channel,
            value,
        },
    ))
}

impl TelemetryFields {
    /// Decode a fully staged block. `be_u8` only fails on short input, so
    /// a fixed-size block always parses.
    pub fn from_block(block: &[u8; TELEMETRY_BLOCK_LEN]) -> TelemetryFields {
        match parse_block(block) {
            Ok((_, fields)) => fields,
            Err(_) => unreachable!("a full telemetry block always parses"),
        }
    }
}

/// Caller-owned telemetry state, updated in place on every completed frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TelemetryRecord {
    /// 20-bit hardware frame counter of the last completed frame.
    pub frame_counter: u32,
    /// 2-bit latch-up status.
    pub latchup: u8,
    /// Temperature reading (raw counts).
    pub temperature: u16,
    /// CH 0 reading.
    pub chip_vdd: u16,
    /// CH 1 reading.
    pub mimosa_vdd: u16,
    /// CH 2 reading.
    pub chip_i: u16,
    /// CH 3 reading.
    pub mimosa_i: u16,
    /// Channel identifier seen in the last frame (0..3).
    pub channel_id: u8,
    /// Overcurrent advisory for the last frame.
    pub overcurrent: bool,
}

impl TelemetryRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one decoded block into the record and evaluate the overcurrent
    /// advisory against `limit` (raw MimosaI counts). Returns whether the
    /// advisory fired for this frame.
    pub fn apply(&mut self, fields: &TelemetryFields, limit: u16) -> bool {
        self.frame_counter = fields.frame_counter;
        self.latchup = fields.latchup;
        self.temperature = fields.temperature;
        self.channel_id = fields.channel.id();

        match fields.channel {
            Channel::ChipVdd => self.chip_vdd = fields.value,
            Channel::MimosaVdd => self.mimosa_vdd = fields.value,
            Channel::ChipI => self.chip_i = fields.value,
            Channel::MimosaI => self.mimosa_i = fields.value,
        }

        self.overcurrent = fields.channel == Channel::MimosaI && fields.value > limit;
        if self.overcurrent {
            warn!(
                "MimosaI overcurrent advisory: {} > {} (frame {})",
                fields.value, limit, fields.frame_counter
            );
        }
        self.overcurrent
    }
}
