//! # Readout Stream Decoding
//!
//! This module implements the stateful decoder for the raw byte stream of
//! the sensor readout link: byte-level synchronization on a run of four
//! `0xAA` bytes, little-endian assembly of byte pairs into 16-bit words,
//! and a frame state machine that turns assembled words into pixel hits and
//! telemetry.
//!
//! ## Protocol quirks preserved bit-exactly
//!
//! Two behaviors of the firmware protocol look odd but protect against hit
//! data that happens to collide with the terminator value, and must not be
//! simplified:
//!
//! 1. **Decode lag** — coordinate words are interpreted one assembled word
//!    behind the current one (`word_lag2` after the history shift), and
//!    only once the in-frame word counter exceeds
//!    [`COORD_DECODE_MIN_WORDS`].
//! 2. **Double terminator** — the `0x5678` terminator closes a frame only
//!    when it appears twice in a row; a single occurrence is provisional
//!    and cancelled by the next non-terminator word.
//!
//! One call to [`FrameDecoder::decode`] processes one raw capture buffer.
//! All scanner/assembler/state-machine state is reset at the start of every
//! call; the hit map and telemetry record are caller-owned accumulators
//! that persist across calls. If buffers are decoded on one thread while
//! another reads the stable map, the caller must serialize access.

use crate::constants::{
    COORD_DECODE_MIN_WORDS, COORD_MASK, CODE_MASK, MIMOSA_I_LIMIT_400MA, ROW_WORD_FLAG,
    SYNC_BYTE, SYNC_RUN_LEN, TELEMETRY_BLOCK_LEN, TERMINATOR_WORD,
};
use crate::readout::hitmap::HitMap;
use crate::readout::telemetry::{TelemetryFields, TelemetryRecord};
use log::{debug, warn};
use serde::Serialize;

/// Decoder settings that are configuration, not protocol.
#[derive(Debug, Clone, Copy)]
pub struct DecoderConfig {
    /// MimosaI reading above which the overcurrent advisory fires
    /// (raw counts; 53/68/84 correspond to 300/400/500 mA).
    pub overcurrent_limit: u16,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        DecoderConfig {
            overcurrent_limit: MIMOSA_I_LIMIT_400MA,
        }
    }
}

/// Statistics for decoding operations.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct DecodeStats {
    pub syncs_found: u64,
    pub words_assembled: u64,
    pub frames_completed: u64,
    pub hits_recorded: u64,
    /// Coordinate words rejected by the grid bounds check.
    pub out_of_range_words: u64,
    /// Sync markers too close to the buffer end for a full telemetry block.
    pub truncated_telemetry: u64,
    pub overcurrent_advisories: u64,
    pub commits: u64,
}

impl DecodeStats {
    fn absorb(&mut self, other: &DecodeStats) {
        self.syncs_found += other.syncs_found;
        self.words_assembled += other.words_assembled;
        self.frames_completed += other.frames_completed;
        self.hits_recorded += other.hits_recorded;
        self.out_of_range_words += other.out_of_range_words;
        self.truncated_telemetry += other.truncated_telemetry;
        self.overcurrent_advisories += other.overcurrent_advisories;
        self.commits += other.commits;
    }
}

/// Word assembly phase within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    LowByteNext,
    HighByteNext,
}

/// Stateful decoder for raw readout capture buffers.
///
/// The decoder itself holds no cross-buffer protocol state; it can be
/// reused across captures and only its cumulative [`DecodeStats`] survive
/// between calls.
#[derive(Debug)]
pub struct FrameDecoder {
    config: DecoderConfig,
    /// Rolling history of the last 4 bytes, for sync detection.
    sync_window: [u8; SYNC_RUN_LEN],
    phase: Phase,
    pending_low: u8,
    word_lag1: u16,
    word_lag2: u16,
    /// Provisional terminator seen, awaiting confirmation.
    tailer_pending: bool,
    /// Assembled words in the current frame; 0 means seeking sync.
    words_in_frame: u32,
    /// Row selected by the last row word; column words reuse it.
    row: usize,
    staging: [u8; TELEMETRY_BLOCK_LEN],
    stats: DecodeStats,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new(DecoderConfig::default())
    }
}

impl FrameDecoder {
    pub fn new(config: DecoderConfig) -> Self {
        FrameDecoder {
            config,
            sync_window: [0; SYNC_RUN_LEN],
            phase: Phase::LowByteNext,
            pending_low: 0,
            word_lag1: 0,
            word_lag2: 0,
            tailer_pending: false,
            words_in_frame: 0,
            row: 0,
            staging: [0; TELEMETRY_BLOCK_LEN],
            stats: DecodeStats::default(),
        }
    }

    /// Cumulative statistics across all calls to [`decode`](Self::decode).
    pub fn stats(&self) -> DecodeStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = DecodeStats::default();
    }

    fn reset_scan_state(&mut self) {
        self.sync_window = [0; SYNC_RUN_LEN];
        self.phase = Phase::LowByteNext;
        self.pending_low = 0;
        self.word_lag1 = 0;
        self.word_lag2 = 0;
        self.tailer_pending = false;
        self.words_in_frame = 0;
        self.row = 0;
        self.staging = [0; TELEMETRY_BLOCK_LEN];
    }

    /// Decode one raw capture buffer into the caller-owned accumulators.
    ///
    /// Returns the statistics for this invocation only; cumulative
    /// statistics are available through [`stats`](Self::stats).
    pub fn decode(
        &mut self,
        buf: &[u8],
        hits: &mut HitMap,
        telemetry: &mut TelemetryRecord,
    ) -> DecodeStats {
        self.reset_scan_state();
        let mut stats = DecodeStats::default();

        for (offset, &byte) in buf.iter().enumerate() {
            self.sync_window.rotate_left(1);
            self.sync_window[SYNC_RUN_LEN - 1] = byte;

            if self.words_in_frame != 0 {
                self.feed_frame_byte(byte, hits, telemetry, &mut stats);
            } else {
                // Seeking sync: word phase is pinned so the first in-frame
                // byte lands as a low byte.
                self.phase = Phase::LowByteNext;
                if self.sync_window == [SYNC_BYTE; SYNC_RUN_LEN] {
                    self.begin_frame(buf, offset, &mut stats);
                }
            }
        }

        self.stats.absorb(&stats);
        stats
    }

    /// Open a frame at the sync marker ending at `offset` and stage the
    /// telemetry block from the following bytes, clamped to the buffer.
    fn begin_frame(&mut self, buf: &[u8], offset: usize, stats: &mut DecodeStats) {
        self.words_in_frame = 1;
        self.tailer_pending = false;
        stats.syncs_found += 1;

        self.staging = [0; TELEMETRY_BLOCK_LEN];
        let start = offset + 1;
        let available = buf.len().saturating_sub(start).min(TELEMETRY_BLOCK_LEN);
        self.staging[..available].copy_from_slice(&buf[start..start + available]);
        if available < TELEMETRY_BLOCK_LEN {
            stats.truncated_telemetry += 1;
            warn!(
                "sync marker at offset {offset} leaves only {available} telemetry bytes; \
                 frame is truncated"
            );
        }
        debug!("sync marker found at offset {offset}");
    }

    fn feed_frame_byte(
        &mut self,
        byte: u8,
        hits: &mut HitMap,
        telemetry: &mut TelemetryRecord,
        stats: &mut DecodeStats,
    ) {
        match self.phase {
            Phase::LowByteNext => {
                self.pending_low = byte;
                self.phase = Phase::HighByteNext;
            }
            Phase::HighByteNext => {
                let word = u16::from(self.pending_low) | (u16::from(byte) << 8);
                self.phase = Phase::LowByteNext;
                self.word_lag2 = self.word_lag1;
                self.word_lag1 = word;
                self.words_in_frame += 1;
                stats.words_assembled += 1;
                self.on_word(word, hits, telemetry, stats);
            }
        }
    }

    fn on_word(
        &mut self,
        word: u16,
        hits: &mut HitMap,
        telemetry: &mut TelemetryRecord,
        stats: &mut DecodeStats,
    ) {
        if word == TERMINATOR_WORD {
            if !self.tailer_pending {
                self.tailer_pending = true;
                return;
            }
            self.finish_frame(hits, telemetry, stats);
            return;
        }

        // A lone terminator was hit data after all.
        self.tailer_pending = false;

        if self.words_in_frame > COORD_DECODE_MIN_WORDS {
            self.decode_coordinate_word(self.word_lag2, hits, stats);
        }
    }

    fn decode_coordinate_word(&mut self, word: u16, hits: &mut HitMap, stats: &mut DecodeStats) {
        if word & ROW_WORD_FLAG != 0 {
            self.row = usize::from((word >> 2) & COORD_MASK);
        } else {
            let column = usize::from((word >> 2) & COORD_MASK);
            let code = usize::from(word & CODE_MASK);
            if hits.record_hit(self.row, column, code) {
                stats.hits_recorded += 1;
            } else {
                stats.out_of_range_words += 1;
            }
        }
    }

    fn finish_frame(
        &mut self,
        hits: &mut HitMap,
        telemetry: &mut TelemetryRecord,
        stats: &mut DecodeStats,
    ) {
        self.tailer_pending = false;
        self.words_in_frame = 0;
        stats.frames_completed += 1;
        hits.complete_frame();

        let fields = TelemetryFields::from_block(&self.staging);
        if telemetry.apply(&fields, self.config.overcurrent_limit) {
            stats.overcurrent_advisories += 1;
        }

        if hits.commit_if_due() {
            stats.commits += 1;
            debug!(
                "hit map committed after {} frames, {} cells occupied",
                hits.frames_per_commit(),
                hits.stable().occupied()
            );
        }
        debug!(
            "frame {} complete ({} words so far this buffer)",
            telemetry.frame_counter, stats.words_assembled
        );
    }
}
