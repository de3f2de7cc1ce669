//! Golden readout-stream vectors: complete frames as they appear on the
//! wire, decoded end to end through the public API.

use mimosa_rs::util::decode_hex;
use mimosa_rs::{decode_buffer, FrameDecoder, HitMap, TelemetryRecord};

// sync run | telemetry block 00 01 02 03 04 05 0a 0b | row 10 | col 20
// code 1 | row 10 filler | doubled terminator (0x5678 low byte first).
const ONE_HIT_FRAME_HEX: &str = "aaaaaaaa0001020304050a0b28105100281078567856";

// Same frame preceded by link noise, including a broken three-byte sync run.
const NOISY_FRAME_HEX: &str = "00ff13aaaaab00aaaaaaaa0001020304050a0b28105100281078567856";

// Telemetry-only frame addressing channel 3 (MimosaI) with value 70.
const OVERCURRENT_FRAME_HEX: &str = "aaaaaaaa0000000000000c4678567856";

fn bytes(hex: &str) -> Vec<u8> {
    decode_hex(hex).expect("invalid hex in test vector")
}

#[test]
fn test_one_hit_frame() {
    let data = bytes(ONE_HIT_FRAME_HEX);
    let mut hits = HitMap::mimosa(1);
    let mut telemetry = TelemetryRecord::new();

    let stats = decode_buffer(&data, &mut hits, &mut telemetry);

    assert_eq!(stats.syncs_found, 1);
    assert_eq!(stats.frames_completed, 1);
    assert_eq!(stats.hits_recorded, 1);
    assert_eq!(stats.commits, 1);

    assert_eq!(telemetry.frame_counter, 0x10203);
    assert_eq!(telemetry.latchup, 0);
    assert_eq!(telemetry.channel_id, 2);
    assert_eq!(telemetry.chip_i, 0x20B);

    assert_eq!(hits.stable().get(10, 20), 1);
    assert_eq!(hits.stable().get(10, 21), 1);
    assert_eq!(hits.stable().total(), 2);
}

#[test]
fn test_noise_before_sync_is_skipped() {
    let data = bytes(NOISY_FRAME_HEX);
    let mut hits = HitMap::mimosa(1);
    let mut telemetry = TelemetryRecord::new();

    let stats = decode_buffer(&data, &mut hits, &mut telemetry);

    assert_eq!(stats.syncs_found, 1);
    assert_eq!(stats.frames_completed, 1);
    assert_eq!(hits.stable().get(10, 20), 1);
}

#[test]
fn test_overcurrent_frame() {
    let data = bytes(OVERCURRENT_FRAME_HEX);
    let mut hits = HitMap::mimosa(1);
    let mut telemetry = TelemetryRecord::new();

    let stats = decode_buffer(&data, &mut hits, &mut telemetry);

    assert_eq!(stats.frames_completed, 1);
    assert_eq!(stats.overcurrent_advisories, 1);
    assert!(telemetry.overcurrent);
    assert_eq!(telemetry.mimosa_i, 70);
    assert_eq!(telemetry.channel_id, 3);
}

#[test]
fn test_commit_window_across_buffers() {
    // The same frame decoded from three separate capture buffers with a
    // three-frame commit window: stable stays empty until the third frame,
    // then holds the accumulated counts.
    let data = bytes(ONE_HIT_FRAME_HEX);
    let mut hits = HitMap::mimosa(3);
    let mut telemetry = TelemetryRecord::new();
    let mut decoder = FrameDecoder::default();

    for expected_before in [0u64, 0, 0] {
        assert_eq!(hits.stable().total(), expected_before);
        decoder.decode(&data, &mut hits, &mut telemetry);
    }

    assert_eq!(hits.stable().get(10, 20), 3);
    assert_eq!(hits.stable().get(10, 21), 3);
    assert_eq!(hits.temp().total(), 0);
    assert_eq!(hits.frames_seen(), 0);
    assert_eq!(decoder.stats().commits, 1);
}

#[test]
fn test_two_frames_in_one_buffer() {
    let mut data = bytes(ONE_HIT_FRAME_HEX);
    data.extend(bytes(OVERCURRENT_FRAME_HEX));

    let mut hits = HitMap::mimosa(2);
    let mut telemetry = TelemetryRecord::new();
    let stats = decode_buffer(&data, &mut hits, &mut telemetry);

    assert_eq!(stats.syncs_found, 2);
    assert_eq!(stats.frames_completed, 2);
    assert_eq!(stats.commits, 1);
    // Last frame's telemetry wins; the ChipI slot from the first frame
    // survives because the record is updated in place.
    assert_eq!(telemetry.channel_id, 3);
    assert_eq!(telemetry.chip_i, 0x20B);
    assert_eq!(telemetry.mimosa_i, 70);
}

#[test]
fn test_telemetry_extraction_is_deterministic() {
    let data = bytes(ONE_HIT_FRAME_HEX);
    let mut first = TelemetryRecord::new();
    let mut second = TelemetryRecord::new();
    let mut hits = HitMap::mimosa(1);

    decode_buffer(&data, &mut hits, &mut first);
    let mut hits2 = HitMap::mimosa(1);
    decode_buffer(&data, &mut hits2, &mut second);

    assert_eq!(first, second);
}
