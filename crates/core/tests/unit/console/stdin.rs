//! Background reader source tests.
//!
//! The reader thread runs concurrently, so these tests wait for bytes with a
//! bounded spin instead of assuming they are already queued.

use std::collections::VecDeque;
use std::io::{self, Cursor, ErrorKind, Read};
use std::thread;
use std::time::{Duration, Instant};

use serial_bench_core::console::{ByteSource, ConsoleSource};

/// Reader that replays a fixed list of read results, then reports end of file.
struct FlakyReader {
    steps: VecDeque<io::Result<Vec<u8>>>,
}

impl FlakyReader {
    fn new(steps: Vec<io::Result<Vec<u8>>>) -> Self {
        Self {
            steps: steps.into(),
        }
    }
}

impl Read for FlakyReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.steps.pop_front() {
            Some(Ok(bytes)) => {
                buf[..bytes.len()].copy_from_slice(&bytes);
                Ok(bytes.len())
            }
            Some(Err(e)) => Err(e),
            None => Ok(0),
        }
    }
}

fn wait_for<F: FnMut() -> bool>(mut done: F) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if done() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    false
}

fn drain(source: &mut ConsoleSource) -> Vec<u8> {
    let mut bytes = Vec::new();
    assert!(wait_for(|| {
        while let Some(byte) = source.try_read_byte() {
            bytes.push(byte);
        }
        source.is_exhausted()
    }));
    bytes
}

#[test]
fn delivers_reader_bytes_then_exhausts() {
    let mut source = ConsoleSource::from_reader(Cursor::new(b"serial".to_vec()));
    assert_eq!(drain(&mut source), b"serial");
    assert!(!source.has_pending());
}

#[test]
fn peeked_byte_is_not_lost() {
    let mut source = ConsoleSource::from_reader(Cursor::new(b"ab".to_vec()));
    assert!(wait_for(|| source.has_pending()));
    assert!(source.has_pending());
    assert_eq!(drain(&mut source), b"ab");
}

#[test]
fn read_line_waits_for_the_terminator() {
    let mut source = ConsoleSource::from_reader(Cursor::new(b"first\r\nsecond\nrest".to_vec()));
    assert_eq!(source.read_line(), Some(b"first".to_vec()));
    assert_eq!(source.read_line(), Some(b"second".to_vec()));
    assert_eq!(source.read_line(), Some(b"rest".to_vec()));
    assert_eq!(source.read_line(), None);
    assert!(source.is_exhausted());
}

#[test]
fn empty_reader_is_exhausted() {
    let mut source = ConsoleSource::from_reader(Cursor::new(Vec::new()));
    assert!(drain(&mut source).is_empty());
}

#[test]
fn would_block_is_retried() {
    let reader = FlakyReader::new(vec![
        Err(ErrorKind::WouldBlock.into()),
        Ok(b"k".to_vec()),
    ]);
    let mut source = ConsoleSource::from_reader(reader);
    assert_eq!(drain(&mut source), b"k");
}

#[test]
fn transient_failures_do_not_end_input() {
    let reader = FlakyReader::new(vec![
        Ok(b"a".to_vec()),
        Err(io::Error::other("glitch")),
        Err(ErrorKind::Interrupted.into()),
        Err(io::Error::other("glitch")),
        Ok(b"b".to_vec()),
    ]);
    let mut source = ConsoleSource::from_reader(reader);
    assert_eq!(drain(&mut source), b"ab");
}

#[test]
fn persistent_failure_ends_input() {
    let steps = (0..64).map(|_| Err(io::Error::other("gone"))).collect();
    let mut source = ConsoleSource::from_reader(FlakyReader::new(steps));
    assert!(drain(&mut source).is_empty());
    assert!(source.is_exhausted());
}

#[test]
fn nul_bytes_are_dropped() {
    let mut source = ConsoleSource::from_reader(Cursor::new(b"\0A\0\0B\0".to_vec()));
    assert_eq!(drain(&mut source), b"AB");
}
