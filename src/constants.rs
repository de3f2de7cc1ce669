//! MIMOSA Readout Protocol Constants
//!
//! This module defines the constants of the sensor readout link protocol
//! and of the command channel toward the readout board. The values are
//! fixed by the firmware; none of them are tunable policy.

/// Synchronization byte; four in a row open a frame.
pub const SYNC_BYTE: u8 = 0xAA;

/// Number of consecutive sync bytes required.
pub const SYNC_RUN_LEN: usize = 4;

/// Frame terminator word; must appear twice consecutively to close a frame.
pub const TERMINATOR_WORD: u16 = 0x5678;

/// Length of the telemetry block staged right after the sync marker.
pub const TELEMETRY_BLOCK_LEN: usize = 8;

/// In-frame word count that must be exceeded before coordinate decoding
/// starts; the first words of a frame carry telemetry and alignment filler.
pub const COORD_DECODE_MIN_WORDS: u32 = 6;

/// Flag bit distinguishing a row word from a column+code word.
pub const ROW_WORD_FLAG: u16 = 0x1000;

/// Mask for the 10-bit coordinate field of a row/column word.
pub const COORD_MASK: u16 = 0x03FF;

/// Mask for the 2-bit multi-column hit code of a column word.
pub const CODE_MASK: u16 = 0x0003;

/// Pixel matrix height of the MIMOSA sensor.
pub const MIMOSA_ROWS: usize = 928;

/// Pixel matrix width of the MIMOSA sensor.
pub const MIMOSA_COLS: usize = 960;

/// Raw capture buffer length delivered by the readout board per transfer.
pub const RAW_BUFFER_LEN: usize = 80_000;

// ----------------------------------------------------------------------------
// MimosaI overcurrent calibration points (raw ADC counts)
// ----------------------------------------------------------------------------

/// MimosaI reading corresponding to 300 mA.
pub const MIMOSA_I_LIMIT_300MA: u16 = 53;

/// MimosaI reading corresponding to 400 mA.
pub const MIMOSA_I_LIMIT_400MA: u16 = 68;

/// MimosaI reading corresponding to 500 mA.
pub const MIMOSA_I_LIMIT_500MA: u16 = 84;

// ----------------------------------------------------------------------------
// Command channel opcodes (high halfword of the 32-bit command word)
// ----------------------------------------------------------------------------

/// Base opcode for a status read; the status address is added to it.
pub const CMD_READ_STATUS_BASE: u32 = 0x8000;

/// Base opcode for a register write; the register address is added to it.
pub const CMD_WRITE_REGISTER_BASE: u32 = 0x0020;

/// Base opcode for a register read; the register address is added to it.
pub const CMD_READ_REGISTER_BASE: u32 = 0x8020;

/// Pulse command opcode.
pub const CMD_SEND_PULSE: u32 = 0x000B;

/// Memory address low halfword.
pub const CMD_MEM_ADDR_LO: u32 = 0x0011;

/// Memory address high halfword.
pub const CMD_MEM_ADDR_HI: u32 = 0x0012;

/// Memory data low halfword.
pub const CMD_MEM_DATA_LO: u32 = 0x0013;

/// Memory data high halfword.
pub const CMD_MEM_DATA_HI: u32 = 0x0014;

/// Memory read word count.
pub const CMD_MEM_READ_COUNT: u32 = 0x0010;

/// Initiate a memory read burst.
pub const CMD_MEM_READ_INITIATE: u32 = 0x8014_0000;

/// Data FIFO read count, high halfword of the 32-bit count.
pub const CMD_FIFO_COUNT_HI: u32 = 0x001A;

/// Data FIFO read count, low halfword of the 32-bit count.
pub const CMD_FIFO_COUNT_LO: u32 = 0x0019;
