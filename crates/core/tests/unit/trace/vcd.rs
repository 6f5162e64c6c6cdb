//! # VCD Writer Tests
//!
//! Checks the header layout, the initial `$dumpvars` block, change-only
//! emission, and the ordering and close rules of the sink.

use std::io::ErrorKind;

use pretty_assertions::assert_eq;
use serial_bench_core::Signals;
use serial_bench_core::trace::{TraceSink, VcdTrace};

fn text(trace: &VcdTrace<Vec<u8>>) -> String {
    String::from_utf8(trace.get_ref().unwrap().clone()).unwrap()
}

fn fresh() -> VcdTrace<Vec<u8>> {
    VcdTrace::new(Vec::new(), "1ns", "tb").unwrap()
}

#[test]
fn header_declares_every_signal() {
    let trace = fresh();
    let header = text(&trace);

    assert!(header.starts_with("$version\n"));
    assert!(header.contains("$timescale 1ns $end\n"));
    assert!(header.contains("$scope module tb $end\n"));
    assert!(header.contains("$var wire 1 ! clk $end\n"));
    assert!(header.contains("$var wire 1 \" reset_n $end\n"));
    assert!(header.contains("$var wire 1 # rd_en $end\n"));
    assert!(header.contains("$var wire 1 $ rd_empty $end\n"));
    assert!(header.contains("$var wire 8 % rd_data [7:0] $end\n"));
    assert!(header.contains("$var wire 1 & wr_en $end\n"));
    assert!(header.contains("$var wire 8 ' wr_data [7:0] $end\n"));
    assert!(header.ends_with("$upscope $end\n$enddefinitions $end\n"));
}

#[test]
fn first_record_dumps_all_values() {
    let mut trace = fresh();
    let header_len = text(&trace).len();

    trace
        .record(
            0,
            &Signals {
                clk: true,
                rd_empty: true,
                rd_data: 0x41,
                ..Signals::default()
            },
        )
        .unwrap();

    let body = &text(&trace)[header_len..];
    assert_eq!(
        body,
        "#0\n$dumpvars\n1!\n0\"\n0#\n1$\nb1000001 %\n0&\nb0 '\n$end\n"
    );
}

#[test]
fn later_records_emit_only_changes() {
    let mut trace = fresh();
    let mut signals = Signals::default();
    trace.record(0, &signals).unwrap();
    let before = text(&trace).len();

    signals.clk = true;
    signals.wr_data = 0xff;
    trace.record(1, &signals).unwrap();
    trace.record(2, &signals).unwrap();

    let body = &text(&trace)[before..];
    assert_eq!(body, "#1\n1!\nb11111111 '\n#2\n");
}

#[test]
fn non_increasing_time_is_rejected() {
    let mut trace = fresh();
    trace.record(5, &Signals::default()).unwrap();

    let same = trace.record(5, &Signals::default()).unwrap_err();
    assert_eq!(same.kind(), ErrorKind::InvalidInput);
    let earlier = trace.record(3, &Signals::default()).unwrap_err();
    assert_eq!(earlier.kind(), ErrorKind::InvalidInput);
    trace.record(6, &Signals::default()).unwrap();
}

#[test]
fn close_is_idempotent_and_final() {
    let mut trace = fresh();
    trace.record(0, &Signals::default()).unwrap();
    trace.close().unwrap();
    trace.close().unwrap();

    assert!(trace.get_ref().is_none());
    let err = trace.record(1, &Signals::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BrokenPipe);
    assert!(trace.flush().is_err());
}

#[test]
fn into_inner_returns_written_bytes() {
    let mut trace = fresh();
    trace.record(0, &Signals::default()).unwrap();
    trace.flush().unwrap();

    let bytes = trace.into_inner().unwrap();
    assert!(String::from_utf8(bytes).unwrap().contains("#0\n"));
}
