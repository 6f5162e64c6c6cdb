//! Byte sources feeding the channel.
//!
//! The bench only ever asks a source for bytes that are already available, so a
//! source must never block in [`ByteSource::try_read_byte`]. This module provides:
//! 1. **`ByteSource`:** The non-blocking capability the bench polls every tick.
//! 2. **`ConsoleSource`:** Standard input, read by a background thread.
//! 3. **`ScriptedSource`:** A deterministic in-memory source for tests and replayed input.
//! 4. **`RawTerminal`:** Guard that puts an interactive terminal in byte-at-a-time mode.

/// Raw terminal mode guard.
pub mod raw;

/// In-memory source.
pub mod scripted;

/// Standard input source.
pub mod stdin;

pub use raw::RawTerminal;
pub use scripted::ScriptedSource;
pub use stdin::ConsoleSource;

/// Line terminator stripped by [`ByteSource::read_line`].
pub const NEWLINE: u8 = b'\n';

/// Source of console bytes.
pub trait ByteSource {
    /// Returns the next available byte without waiting, or `None`.
    ///
    /// Read failures are reported as `None`.
    fn try_read_byte(&mut self) -> Option<u8>;

    /// True if at least one byte can be read right now.
    fn has_pending(&mut self) -> bool;

    /// Reads one line, without its terminator.
    ///
    /// May wait for the rest of the line; only call it after
    /// [`has_pending`](ByteSource::has_pending) returned true. Returns `None`
    /// when nothing could be read.
    fn read_line(&mut self) -> Option<Vec<u8>> {
        let mut line = Vec::new();
        let mut got_any = false;
        while let Some(byte) = self.try_read_byte() {
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

    /// True once the source will never produce another byte.
    fn is_exhausted(&self) -> bool {
        false
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn try_read_byte(&mut self) -> Option<u8> {
        (**self).try_read_byte()
    }

    fn has_pending(&mut self) -> bool {
        (**self).has_pending()
    }

    fn read_line(&mut self) -> Option<Vec<u8>> {
        (**self).read_line()
    }

    fn is_exhausted(&self) -> bool {
        (**self).is_exhausted()
    }
}
