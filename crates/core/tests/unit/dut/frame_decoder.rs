//! # Frame Decoder Model Tests
//!
//! The decoder acknowledges each complete frame with `+` or `-` and latches
//! four-digit payloads as the synthesizer setting.

use pretty_assertions::assert_eq;
use serial_bench_core::dut::{Dut, FrameDecoderDut, FrequencySetting};
use serial_bench_core::protocol::frequency_packet;

use super::{cycle, exchange};
use crate::common::harness::{bench_with, quick_config, run_ticks};

#[test]
fn valid_frame_is_acknowledged_and_latched() {
    let mut dut = FrameDecoderDut::new();
    assert_eq!(exchange(&mut dut, b"$0200#c2"), b"+");
    assert_eq!(
        dut.setting(),
        Some(FrequencySetting {
            multiplier: 3,
            divider: 1
        })
    );
    assert_eq!(dut.frames_ok(), 1);
    assert_eq!(dut.frames_bad(), 0);
}

#[test]
fn bad_checksum_is_rejected() {
    let mut dut = FrameDecoderDut::new();
    assert_eq!(exchange(&mut dut, b"$0200#00"), b"-");
    assert_eq!(dut.setting(), None);
    assert_eq!(dut.frames_bad(), 1);
}

#[test]
fn non_setting_payload_is_acknowledged_without_latching() {
    let mut dut = FrameDecoderDut::new();
    assert_eq!(exchange(&mut dut, b"$#00"), b"+");
    assert_eq!(dut.setting(), None);
}

#[test]
fn reset_discards_partial_frame() {
    let mut dut = FrameDecoderDut::new();
    let _ = exchange(&mut dut, b"$02");
    cycle(&mut dut, false, true, 0);
    assert!(exchange(&mut dut, b"00#c2").is_empty());
    assert_eq!(dut.frames_ok(), 0);
}

#[test]
fn decodes_host_packets_through_the_bench() {
    let input = format!(
        "{}{}",
        frequency_packet(3, 2).unwrap(),
        frequency_packet(5, 4).unwrap()
    );
    let mut bench = bench_with(FrameDecoderDut::new(), input.as_bytes(), &quick_config());

    run_ticks(&mut bench, 60);

    assert_eq!(bench.output().as_slice(), b"++");
    assert_eq!(bench.dut().frames_ok(), 2);
    assert_eq!(
        bench.dut().setting(),
        Some(FrequencySetting {
            multiplier: 5,
            divider: 4
        })
    );
    assert_eq!(bench.dut().name(), "serial_decode");
}

#[test]
fn finish_request_is_reported() {
    let mut dut = FrameDecoderDut::new();
    assert!(!dut.finished());
    dut.request_finish();
    assert!(dut.finished());
}
