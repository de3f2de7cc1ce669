//! # Readout Board Command Encoding
//!
//! Pure, stateless encoders for the 32-bit command words understood by the
//! register-addressed readout board: status/register reads and writes,
//! pulse triggers, memory bursts and data FIFO reads. Commands are built as
//! host-order words and converted to network byte order as the final step;
//! the returned buffer is ready to hand to whatever transport carries it
//! (the transport itself is outside this crate).
//!
//! Encoding never touches the decoder's state; the command channel and the
//! readout stream only meet inside the device.

use crate::constants::{
    CMD_FIFO_COUNT_HI, CMD_FIFO_COUNT_LO, CMD_MEM_ADDR_HI, CMD_MEM_ADDR_LO, CMD_MEM_DATA_HI,
    CMD_MEM_DATA_LO, CMD_MEM_READ_COUNT, CMD_MEM_READ_INITIATE, CMD_READ_REGISTER_BASE,
    CMD_READ_STATUS_BASE, CMD_SEND_PULSE, CMD_WRITE_REGISTER_BASE,
};
use crate::error::MimosaError;
use crate::util::wire::{load_word_file, words_to_network};
use bytes::Bytes;
use std::path::Path;

/// Opcode in the high halfword, payload in the low halfword.
fn command_word(opcode: u32, payload: u32) -> u32 {
    ((opcode & 0xFFFF) << 16) | (payload & 0xFFFF)
}

/// Read a status word.
pub fn read_status(addr: u16) -> Bytes {
    words_to_network(&[command_word(CMD_READ_STATUS_BASE + u32::from(addr), 0)])
}

/// Read a register.
pub fn read_register(addr: u16) -> Bytes {
    words_to_network(&[command_word(CMD_READ_REGISTER_BASE + u32::from(addr), 0)])
}

/// Write a register: address and value packed into one word.
pub fn write_register(addr: u16, val: u16) -> Bytes {
    words_to_network(&[command_word(
        CMD_WRITE_REGISTER_BASE + u32::from(addr),
        u32::from(val),
    )])
}

/// Send a pulse on the lines selected by `mask`.
pub fn send_pulse(mask: u16) -> Bytes {
    words_to_network(&[command_word(CMD_SEND_PULSE, u32::from(mask))])
}

/// Write `values` to memory starting at `addr`. The address and every data
/// word are split across two command words (low halfword first).
pub fn write_memory(addr: u32, values: &[u32]) -> Result<Bytes, MimosaError> {
    if values.is_empty() {
        return Err(MimosaError::EmptyWritePayload);
    }

    let mut words = Vec::with_capacity(values.len() * 2 + 2);
    words.push(command_word(CMD_MEM_ADDR_LO, addr));
    words.push(command_word(CMD_MEM_ADDR_HI, addr >> 16));
    for &val in values {
        words.push(command_word(CMD_MEM_DATA_LO, val));
        words.push(command_word(CMD_MEM_DATA_HI, val >> 16));
    }
    Ok(words_to_network(&words))
}

/// Read `n` words from memory starting at `addr`: address, length, then
/// the initiate-read marker.
pub fn read_memory(addr: u32, n: u32) -> Bytes {
    words_to_network(&[
        command_word(CMD_MEM_ADDR_LO, addr),
        command_word(CMD_MEM_ADDR_HI, addr >> 16),
        command_word(CMD_MEM_READ_COUNT, n),
        CMD_MEM_READ_INITIATE,
    ])
}

/// Read `n` words from the data FIFO; the 32-bit count is split across two
/// command words, high halfword first.
pub fn read_datafifo(n: u32) -> Bytes {
    words_to_network(&[
        command_word(CMD_FIFO_COUNT_HI, n >> 16),
        command_word(CMD_FIFO_COUNT_LO, n),
    ])
}

/// Encode a memory write burst from a word file (one hexadecimal 32-bit
/// word per line), e.g. a JTAG player image.
pub fn write_memory_file<P: AsRef<Path>>(addr: u32, path: P) -> Result<Bytes, MimosaError> {
    let words = load_word_file(path)?;
    write_memory(addr, &words)
}
