//! Scripted source tests.

use std::fs;

use serial_bench_core::console::{ByteSource, ScriptedSource};
use tempfile::tempdir;

#[test]
fn hands_out_bytes_in_order() {
    let mut source = ScriptedSource::new("ab");
    assert!(source.has_pending());
    assert_eq!(source.try_read_byte(), Some(b'a'));
    assert_eq!(source.try_read_byte(), Some(b'b'));
    assert_eq!(source.try_read_byte(), None);
    assert!(!source.has_pending());
    assert_eq!(source.delivered(), 2);
}

#[test]
fn open_source_is_never_exhausted() {
    let mut source = ScriptedSource::new("");
    assert!(!source.is_exhausted());
    source.push_bytes("x");
    source.close();
    assert!(!source.is_exhausted());
    assert_eq!(source.try_read_byte(), Some(b'x'));
    assert!(source.is_exhausted());
}

#[test]
fn read_line_strips_terminators() {
    let mut source = ScriptedSource::new("one\r\ntwo\nthree");
    assert_eq!(source.read_line(), Some(b"one".to_vec()));
    assert_eq!(source.read_line(), Some(b"two".to_vec()));
    assert_eq!(source.read_line(), Some(b"three".to_vec()));
    assert_eq!(source.read_line(), None);
}

#[test]
fn blank_line_is_empty_not_none() {
    let mut source = ScriptedSource::new("\n");
    assert_eq!(source.read_line(), Some(Vec::new()));
    assert_eq!(source.remaining(), 0);
}

#[test]
fn from_file_is_closed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("input.txt");
    fs::write(&path, "$0200#c2").unwrap();

    let mut source = ScriptedSource::from_file(&path).unwrap();
    assert_eq!(source.remaining(), 8);
    while source.try_read_byte().is_some() {}
    assert!(source.is_exhausted());
}

#[test]
fn from_missing_file_fails() {
    let dir = tempdir().unwrap();
    assert!(ScriptedSource::from_file(dir.path().join("absent")).is_err());
}
