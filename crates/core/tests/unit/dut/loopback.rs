//! Echo model tests.

use serial_bench_core::dut::{Dut, LoopbackDut};

use super::{cycle, exchange};
use crate::common::harness::{bench_with, quick_config, run_ticks};

#[test]
fn echoes_offered_bytes() {
    let mut dut = LoopbackDut::new();
    assert_eq!(exchange(&mut dut, b"hey"), b"hey");
    assert_eq!(dut.echoed(), 3);
}

#[test]
fn idle_when_channel_empty() {
    let mut dut = LoopbackDut::new();
    for _ in 0..4 {
        cycle(&mut dut, true, true, 0);
        assert!(!dut.rd_en());
        assert!(!dut.wr_en());
    }
}

#[test]
fn reset_clears_outputs() {
    let mut dut = LoopbackDut::new();
    cycle(&mut dut, true, false, 0);
    assert!(dut.rd_en());

    cycle(&mut dut, false, false, b'x');
    assert!(!dut.rd_en());
    assert!(!dut.wr_en());
    assert_eq!(dut.wr_data(), 0);

    // The request made before reset is dropped.
    cycle(&mut dut, true, true, b'x');
    assert!(!dut.wr_en());
    assert_eq!(dut.echoed(), 0);
}

#[test]
fn registers_only_change_on_rising_edges() {
    let mut dut = LoopbackDut::new();
    cycle(&mut dut, true, false, 0);
    assert!(dut.rd_en());

    dut.set_rd_empty(true);
    dut.set_clk(false);
    dut.eval();
    assert!(dut.rd_en());
}

#[test]
fn snapshot_reflects_io() {
    let mut dut = LoopbackDut::new();
    cycle(&mut dut, true, false, 7);
    let snap = dut.snapshot();
    assert!(snap.clk);
    assert!(snap.reset_n);
    assert!(snap.rd_en);
    assert!(!snap.rd_empty);
    assert_eq!(snap.rd_data, 7);
}

#[test]
fn echoes_through_the_bench() {
    let mut bench = bench_with(LoopbackDut::new(), b"ping\n", &quick_config());
    run_ticks(&mut bench, 30);
    assert_eq!(bench.output().as_slice(), b"ping\n");
    assert_eq!(bench.dut().name(), "loopback");
}
