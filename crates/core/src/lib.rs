//! Cycle-driven test bench for a serial decoder.
//!
//! This crate drives a synchronous device through a FIFO-style serial handshake:
//! 1. **Sequencing:** Reset and clock generated as a function of simulated time.
//! 2. **Edge detection:** Rising edges derived from a remembered previous clock sample.
//! 3. **Byte bridging:** Console bytes queued in arrival order and served one per edge
//!    on `rd_*`; device writes on `wr_*` copied to the output stream unbuffered.
//! 4. **Tracing:** Every post-evaluation snapshot recorded to a VCD waveform.
//! 5. **Models:** Reference devices (echo, framed decoder) and the host-side frame protocol.
//!
//! The device itself is opaque: anything implementing [`dut::Dut`] can be benched.

/// Common types (signal bundle, errors).
pub mod common;
/// Bench configuration (defaults, JSON loading, validation).
pub mod config;
/// Byte sources (console, scripted) and raw terminal handling.
pub mod console;
/// Device capability trait and reference models.
pub mod dut;
/// Frame codec and frequency synthesizer helpers.
pub mod protocol;
/// Edge detector, sequencer, byte channel, and the driver loop.
pub mod sim;
/// Run statistics.
pub mod stats;
/// Waveform trace sinks.
pub mod trace;

/// Crate-wide error and result types.
pub use crate::common::{BenchError, Result, Signals};
/// Root configuration type; use `Config::default()` or load JSON with `Config::from_file`.
pub use crate::config::Config;
/// The driver loop and its stop reasons.
pub use crate::sim::{RunOutcome, Testbench};
/// Run statistics returned by [`Testbench::finish`].
pub use crate::stats::RunStats;
