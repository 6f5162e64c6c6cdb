//! Cycle-driven simulation engine.
//!
//! This module turns a raw toggling clock into clean rising-edge events and
//! bridges an asynchronous byte stream into the device's FIFO handshake. It provides:
//! 1. **Edge detection:** One-sample-history classifier for the clock line.
//! 2. **Sequencing:** Clock and reset values as a pure function of simulated time.
//! 3. **Byte channel:** The ordered, unbounded queue behind `rd_*`/`wr_*`.
//! 4. **Bench:** The driver loop that owns all of the above plus the device and trace sink.

/// Driver loop and simulation context.
pub mod bench;

/// Console-to-device byte queue.
pub mod channel;

/// Rising/falling edge classification.
pub mod edge;

/// Clock and reset schedule.
pub mod sequencer;

pub use bench::{RunOutcome, Testbench};
pub use channel::{ByteChannel, ChannelPhase, ReadService};
pub use edge::EdgeDetector;
pub use sequencer::{ClockResetSequencer, TickInputs};
