//! In-memory source.

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::Path;

use super::ByteSource;

/// A source that hands out a fixed script of bytes.
///
/// Bytes can be appended while the bench runs through
/// [`Testbench::source_mut`](crate::sim::Testbench::source_mut). The source
/// reports itself exhausted once it is closed and empty.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    bytes: VecDeque<u8>,
    closed: bool,
    delivered: u64,
}

impl ScriptedSource {
    /// Creates an open source preloaded with `bytes`.
    pub fn new(bytes: impl AsRef<[u8]>) -> Self {
        Self {
            bytes: bytes.as_ref().iter().copied().collect(),
            closed: false,
            delivered: 0,
        }
    }

    /// Creates a closed source holding the contents of a file.
    pub fn from_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let mut source = Self::new(fs::read(path)?);
        source.close();
        Ok(source)
    }

    /// Appends more bytes.
    pub fn push_bytes(&mut self, bytes: impl AsRef<[u8]>) {
        self.bytes.extend(bytes.as_ref().iter().copied());
    }

    /// Declares that no more bytes will be appended.
    pub const fn close(&mut self) {
        self.closed = true;
    }

    /// Bytes still waiting to be read.
    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }

    /// Bytes handed out so far.
    pub const fn delivered(&self) -> u64 {
        self.delivered
    }
}

impl ByteSource for ScriptedSource {
    fn try_read_byte(&mut self) -> Option<u8> {
        let byte = self.bytes.pop_front()?;
        self.delivered += 1;
        Some(byte)
    }

    fn has_pending(&mut self) -> bool {
        !self.bytes.is_empty()
    }

    fn is_exhausted(&self) -> bool {
        self.closed && self.bytes.is_empty()
    }
}
