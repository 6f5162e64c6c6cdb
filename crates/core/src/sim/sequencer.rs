//! Clock and reset schedule.
//!
//! Both signals are pure functions of simulated time. Reset is held low until
//! time exceeds the settle threshold and is never reasserted; the clock has a
//! 50% duty cycle with a period of `2 * half_period` time units.

use crate::config::ClockConfig;

/// Inputs the bench drives into the device for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickInputs {
    /// Clock level.
    pub clk: bool,
    /// Active-low reset level.
    pub reset_n: bool,
}

/// Computes clock and reset levels for any simulated time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockResetSequencer {
    reset_ticks: u64,
    half_period: u64,
    start_high: bool,
}

impl ClockResetSequencer {
    /// Creates a sequencer.
    ///
    /// A `half_period` of zero is treated as one.
    pub const fn new(reset_ticks: u64, half_period: u64, start_high: bool) -> Self {
        Self {
            reset_ticks,
            half_period: if half_period == 0 { 1 } else { half_period },
            start_high,
        }
    }

    /// Creates a sequencer from the clock section of the configuration.
    pub const fn from_config(config: &ClockConfig) -> Self {
        Self::new(config.reset_ticks, config.half_period, config.start_high)
    }

    /// Clock level at time `t`.
    #[inline]
    pub const fn clk(&self, t: u64) -> bool {
        let odd_phase = (t / self.half_period) % 2 == 1;
        odd_phase != self.start_high
    }

    /// Reset level at time `t`: low through the settle threshold, then high forever.
    #[inline]
    pub const fn reset_n(&self, t: u64) -> bool {
        t > self.reset_ticks
    }

    /// Both levels at time `t`.
    #[inline]
    pub const fn at(&self, t: u64) -> TickInputs {
        TickInputs {
            clk: self.clk(t),
            reset_n: self.reset_n(t),
        }
    }

    /// First time at which `reset_n` is high.
    pub const fn reset_release_time(&self) -> u64 {
        self.reset_ticks.saturating_add(1)
    }

    /// Clock period in time units.
    pub const fn period(&self) -> u64 {
        self.half_period * 2
    }
}

impl Default for ClockResetSequencer {
    fn default() -> Self {
        Self::from_config(&ClockConfig::default())
    }
}
