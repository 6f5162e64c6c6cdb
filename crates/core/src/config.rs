//! Configuration system for the test bench.
//!
//! This module defines the configuration structures used to parameterize a run.
//! It provides:
//! 1. **Defaults:** Baseline timing constants (reset settle time, clock divisor, console polling).
//! 2. **Structures:** Hierarchical config for clock, console, trace, and run limits.
//! 3. **Loading:** JSON deserialization from a string or file, plus range validation.
//!
//! Every field has a default, so `{}` is a valid document and `Config::default()`
//! reproduces the classic bench: reset held for 320 time units, clock toggling
//! every unit, console polled every tick, trace written to `trace.vcd`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::{BenchError, Result};

/// Default configuration constants for the bench.
mod defaults {
    /// Time units reset is held low after startup.
    ///
    /// `reset_n` rises on the first tick whose time is strictly greater than this.
    pub const RESET_TICKS: u64 = 320;

    /// Time units per clock phase (one toggle every `HALF_PERIOD` units).
    pub const HALF_PERIOD: u64 = 1;

    /// Clock level at time zero.
    ///
    /// The bench models an initially-low clock that toggles at `t = 0`,
    /// so the first sampled value is high.
    pub const START_HIGH: bool = true;

    /// Ticks between non-blocking console polls.
    pub const POLL_INTERVAL: u64 = 1;

    /// Text written to the output stream before a line-mode read.
    pub const PROMPT: &str = "> \n";

    /// Waveform trace file.
    pub const TRACE_PATH: &str = "trace.vcd";

    /// VCD timescale declaration.
    pub const TIMESCALE: &str = "1ns";

    /// VCD module scope holding the bundle signals.
    pub const SCOPE: &str = "tb";

    /// Idle ticks tolerated after input is exhausted before a drained stop.
    pub const DRAIN_GRACE: u64 = 64;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use serial_bench_core::config::Config;
///
/// let json = r#"{
///     "clock": { "reset_ticks": 10 },
///     "trace": { "enabled": false },
///     "run": { "max_time": 1000 }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.clock.reset_ticks, 10);
/// assert_eq!(config.clock.half_period, 1);
/// assert!(!config.trace.enabled);
/// assert_eq!(config.run.max_time, Some(1000));
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Clock and reset sequencing.
    #[serde(default)]
    pub clock: ClockConfig,
    /// Console polling and refill behaviour.
    #[serde(default)]
    pub console: ConsoleConfig,
    /// Waveform trace output.
    #[serde(default)]
    pub trace: TraceConfig,
    /// Run termination limits.
    #[serde(default)]
    pub run: RunConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| BenchError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Checks value ranges that the type system cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.clock.half_period == 0 {
            return Err(BenchError::InvalidConfig(
                "clock.half_period must be at least 1".into(),
            ));
        }
        if self.console.poll_interval == 0 {
            return Err(BenchError::InvalidConfig(
                "console.poll_interval must be at least 1".into(),
            ));
        }
        if self.trace.enabled && self.trace.path.trim().is_empty() {
            return Err(BenchError::InvalidConfig(
                "trace.path must not be empty when tracing is enabled".into(),
            ));
        }
        Ok(())
    }
}

/// Clock and reset sequencing.
#[derive(Debug, Clone, Deserialize)]
pub struct ClockConfig {
    /// Reset settle threshold; `reset_n` is 1 once time exceeds this value.
    #[serde(default = "ClockConfig::default_reset_ticks")]
    pub reset_ticks: u64,

    /// Time units per clock phase; the period is twice this.
    #[serde(default = "ClockConfig::default_half_period")]
    pub half_period: u64,

    /// Clock level at time zero.
    #[serde(default = "ClockConfig::default_start_high")]
    pub start_high: bool,
}

impl ClockConfig {
    fn default_reset_ticks() -> u64 {
        defaults::RESET_TICKS
    }

    fn default_half_period() -> u64 {
        defaults::HALF_PERIOD
    }

    fn default_start_high() -> bool {
        defaults::START_HIGH
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            reset_ticks: defaults::RESET_TICKS,
            half_period: defaults::HALF_PERIOD,
            start_high: defaults::START_HIGH,
        }
    }
}

/// Console polling and refill behaviour.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    /// Ticks between non-blocking polls of the byte source.
    #[serde(default = "ConsoleConfig::default_poll_interval")]
    pub poll_interval: u64,

    /// Refill with a whole prompted line instead of the raw pending bytes.
    #[serde(default)]
    pub line_mode: bool,

    /// Prompt written to the output stream before a line-mode read.
    #[serde(default = "ConsoleConfig::default_prompt")]
    pub prompt: String,

    /// Switch an interactive stdin to non-canonical, no-echo mode for the run.
    #[serde(default)]
    pub raw_terminal: bool,
}

impl ConsoleConfig {
    fn default_poll_interval() -> u64 {
        defaults::POLL_INTERVAL
    }

    fn default_prompt() -> String {
        defaults::PROMPT.to_string()
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            poll_interval: defaults::POLL_INTERVAL,
            line_mode: false,
            prompt: defaults::PROMPT.to_string(),
            raw_terminal: false,
        }
    }
}

/// Waveform trace output.
#[derive(Debug, Clone, Deserialize)]
pub struct TraceConfig {
    /// Record a VCD trace.
    #[serde(default = "TraceConfig::default_enabled")]
    pub enabled: bool,

    /// Output file.
    #[serde(default = "TraceConfig::default_path")]
    pub path: String,

    /// `$timescale` value, e.g. `"1ns"`.
    #[serde(default = "TraceConfig::default_timescale")]
    pub timescale: String,

    /// Module scope the bundle signals are declared in.
    #[serde(default = "TraceConfig::default_scope")]
    pub scope: String,
}

impl TraceConfig {
    fn default_enabled() -> bool {
        true
    }

    fn default_path() -> String {
        defaults::TRACE_PATH.to_string()
    }

    fn default_timescale() -> String {
        defaults::TIMESCALE.to_string()
    }

    fn default_scope() -> String {
        defaults::SCOPE.to_string()
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: defaults::TRACE_PATH.to_string(),
            timescale: defaults::TIMESCALE.to_string(),
            scope: defaults::SCOPE.to_string(),
        }
    }
}

/// Run termination limits.
///
/// With everything at its default the run only ends when the device reports
/// that it has finished.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Stop once simulated time reaches this value.
    #[serde(default)]
    pub max_time: Option<u64>,

    /// Stop once the byte source is exhausted and the bench has gone idle.
    #[serde(default)]
    pub stop_when_drained: bool,

    /// Idle ticks required before a drained stop.
    #[serde(default = "RunConfig::default_drain_grace")]
    pub drain_grace: u64,
}

impl RunConfig {
    fn default_drain_grace() -> u64 {
        defaults::DRAIN_GRACE
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_time: None,
            stop_when_drained: false,
            drain_grace: defaults::DRAIN_GRACE,
        }
    }
}
