//! Console-to-device byte queue.
//!
//! The channel presents a simple asynchronous serial port to the device's read
//! handshake: bytes are appended in arrival order and removed oldest first, one
//! per serviced read. A read against an empty channel is zero-filled and leaves
//! the queue untouched; the device must treat `rd_empty` as authoritative.

use std::collections::VecDeque;

/// What a serviced read delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadService {
    /// The oldest queued byte.
    Delivered(u8),
    /// The channel was empty; `rd_data` carries zero.
    ZeroFill,
}

impl ReadService {
    /// Value to drive onto `rd_data`.
    #[inline]
    pub const fn data(self) -> u8 {
        match self {
            Self::Delivered(byte) => byte,
            Self::ZeroFill => 0,
        }
    }
}

/// Activity of the channel during the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelPhase {
    /// Nothing happened this tick.
    #[default]
    Idle,
    /// Console input was appended this tick.
    Draining,
    /// A read or write was serviced on this tick's rising edge.
    Servicing,
}

/// Ordered, unbounded byte FIFO owned by the bench.
#[derive(Debug, Clone, Default)]
pub struct ByteChannel {
    queue: VecDeque<u8>,
    phase: ChannelPhase,
}

impl ByteChannel {
    /// Creates an empty channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one byte.
    pub fn push(&mut self, byte: u8) {
        self.queue.push_back(byte);
        self.phase = ChannelPhase::Draining;
    }

    /// Appends a batch in order; returns the number of bytes added.
    pub fn extend<I: IntoIterator<Item = u8>>(&mut self, bytes: I) -> usize {
        let before = self.queue.len();
        self.queue.extend(bytes);
        let added = self.queue.len() - before;
        if added > 0 {
            self.phase = ChannelPhase::Draining;
        }
        added
    }

    /// Services one read request: pops the oldest byte, or zero-fills when empty.
    pub fn service_read(&mut self) -> ReadService {
        self.phase = ChannelPhase::Servicing;
        self.queue
            .pop_front()
            .map_or(ReadService::ZeroFill, ReadService::Delivered)
    }

    /// Marks a serviced write; the channel itself carries no write data.
    pub const fn note_write(&mut self) {
        self.phase = ChannelPhase::Servicing;
    }

    /// Oldest queued byte, if any.
    pub fn front(&self) -> Option<u8> {
        self.queue.front().copied()
    }

    /// Number of queued bytes.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True when no bytes are queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Activity recorded since the last [`settle`](Self::settle).
    pub const fn phase(&self) -> ChannelPhase {
        self.phase
    }

    /// Returns to [`ChannelPhase::Idle`] at the start of a tick.
    pub const fn settle(&mut self) {
        self.phase = ChannelPhase::Idle;
    }

    /// Iterates queued bytes oldest first.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.queue.iter().copied()
    }
}
