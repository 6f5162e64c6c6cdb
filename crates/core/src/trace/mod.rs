//! Waveform trace sinks.
//!
//! The bench hands every post-evaluation signal snapshot to a [`TraceSink`]
//! together with its simulated time, flushes once per tick, and closes the
//! sink exactly once at shutdown.

use std::io;

use crate::common::{Result, Signals};
use crate::config::TraceConfig;

/// Value Change Dump writer.
pub mod vcd;

pub use vcd::VcdTrace;

/// Receiver of `(time, snapshot)` pairs.
pub trait TraceSink {
    /// Records the bundle state at `time`. Times must be strictly increasing.
    fn record(&mut self, time: u64, signals: &Signals) -> io::Result<()>;

    /// Pushes buffered output to its destination.
    fn flush(&mut self) -> io::Result<()>;

    /// Flushes and releases the destination.
    fn close(&mut self) -> io::Result<()>;
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn record(&mut self, _time: u64, _signals: &Signals) -> io::Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Opens the sink described by the trace configuration.
///
/// Returns [`NullTrace`] when tracing is disabled.
pub fn open(config: &TraceConfig) -> Result<Box<dyn TraceSink>> {
    if config.enabled {
        Ok(Box::new(VcdTrace::create(config)?))
    } else {
        Ok(Box::new(NullTrace))
    }
}
