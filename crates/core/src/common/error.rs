//! Error definitions for the test bench.
//!
//! Console read failures never surface here; the sources fold them into
//! "no byte available".

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::protocol::FrameError;

/// Errors reported by the bench and its collaborators.
#[derive(Debug, Error)]
pub enum BenchError {
    /// The waveform trace file could not be created.
    #[error("cannot open trace file {}: {source}", path.display())]
    TraceOpen {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing or flushing the trace sink failed mid-run.
    #[error("trace write failed: {0}")]
    Trace(#[source] io::Error),

    /// Writing device output to the console stream failed.
    #[error("console output failed: {0}")]
    Output(#[source] io::Error),

    /// A replayed input file could not be read.
    #[error("cannot read input {}: {source}", path.display())]
    InputRead {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A configuration file could not be read.
    #[error("cannot read config {}: {source}", path.display())]
    ConfigRead {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A configuration document was not valid JSON for [`Config`](crate::Config).
    #[error("invalid config document: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Frame construction failed.
    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, BenchError>;
