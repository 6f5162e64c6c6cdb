//! Common types shared by every part of the test bench.
//!
//! This module provides the small vocabulary the rest of the crate is built on:
//! 1. **Signals:** The seven-signal bundle exchanged with the device under test.
//! 2. **Errors:** The crate-wide error enum and `Result` alias.

/// Error types for startup, trace, output, and configuration failures.
pub mod error;

/// The device signal bundle snapshot.
pub mod signals;

pub use error::{BenchError, Result};
pub use signals::Signals;
