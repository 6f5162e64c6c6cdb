//! Standard input source.
//!
//! A background thread performs the blocking reads and forwards bytes over a
//! channel, so polling from the simulation loop is a plain `try_recv`. NUL
//! bytes are dropped on the reader thread, and a failed read is retried; only
//! end of file or a run of consecutive failures ends the input.

use std::io::{self, ErrorKind, Read};
use std::sync::mpsc::{Receiver, TryRecvError, channel};
use std::thread;
use std::time::Duration;

use tracing::debug;

use super::{ByteSource, NEWLINE};

/// Size of each blocking read on the reader thread.
const READ_CHUNK: usize = 64;

/// Back-off before retrying a read that failed or would block.
const RETRY_DELAY: Duration = Duration::from_millis(1);

/// Consecutive failed reads after which the input is treated as gone.
const MAX_CONSECUTIVE_FAILURES: u32 = 16;

/// Console bytes from standard input or any other blocking reader.
#[derive(Debug)]
pub struct ConsoleSource {
    rx: Receiver<u8>,
    /// Byte taken by `has_pending` but not yet handed out.
    peeked: Option<u8>,
    disconnected: bool,
}

impl ConsoleSource {
    /// Starts reading standard input.
    pub fn stdin() -> Self {
        Self::from_reader(io::stdin())
    }

    /// Starts reading an arbitrary blocking reader on a background thread.
    pub fn from_reader<R: Read + Send + 'static>(mut reader: R) -> Self {
        let (tx, rx) = channel();

        let _ = thread::spawn(move || {
            let mut buffer = [0u8; READ_CHUNK];
            let mut failures = 0;
            loop {
                match reader.read(&mut buffer) {
                    Ok(0) => break,
                    Ok(n) => {
                        failures = 0;
                        let mut bytes = buffer[..n].iter().copied().filter(|&b| b != 0);
                        if bytes.any(|b| tx.send(b).is_err()) {
                            break;
                        }
                    }
                    Err(e) if e.kind() == ErrorKind::Interrupted => {}
                    Err(e) if e.kind() == ErrorKind::WouldBlock => thread::sleep(RETRY_DELAY),
                    Err(e) => {
                        failures += 1;
                        if failures >= MAX_CONSECUTIVE_FAILURES {
                            debug!(error = %e, failures, "console read keeps failing; end of input");
                            break;
                        }
                        debug!(error = %e, "console read failed; retrying");
                        thread::sleep(RETRY_DELAY);
                    }
                }
            }
        });

        Self {
            rx,
            peeked: None,
            disconnected: false,
        }
    }
}

impl ByteSource for ConsoleSource {
    fn try_read_byte(&mut self) -> Option<u8> {
        if let Some(byte) = self.peeked.take() {
            return Some(byte);
        }
        match self.rx.try_recv() {
            Ok(byte) => Some(byte),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.disconnected = true;
                None
            }
        }
    }

    fn has_pending(&mut self) -> bool {
        if self.peeked.is_none() {
            self.peeked = self.try_read_byte();
        }
        self.peeked.is_some()
    }

    fn read_line(&mut self) -> Option<Vec<u8>> {
        let mut line = Vec::new();
        let mut got_any = false;
        loop {
            let byte = match self.peeked.take() {
                Some(byte) => byte,
                None => match self.rx.recv() {
                    Ok(byte) => byte,
                    Err(_) => {
                        self.disconnected = true;
                        break;
                    }
                },
            };
            got_any = true;
            if byte == NEWLINE {
                break;
            }
            line.push(byte);
        }
        if line.last() == Some(&b'\r') {
            let _ = line.pop();
        }
        got_any.then_some(line)
    }

    fn is_exhausted(&self) -> bool {
        self.disconnected && self.peeked.is_none()
    }
}
