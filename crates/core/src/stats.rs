//! Run statistics collection and reporting.
//!
//! This module tracks what crossed the serial boundary during a run. It provides:
//! 1. **Time:** Ticks simulated, rising edges seen, and when reset was released.
//! 2. **Read side:** Console bytes accepted, bytes delivered, and zero-filled reads.
//! 3. **Write side:** Bytes the device wrote to the output stream.

use std::fmt;
use std::time::Instant;

/// Counters for one bench run.
#[derive(Debug, Clone)]
pub struct RunStats {
    start_time: Instant,
    /// Loop iterations executed.
    pub ticks: u64,
    /// Rising clock edges detected.
    pub rising_edges: u64,
    /// Simulated time at which `reset_n` was first seen high.
    pub reset_released_at: Option<u64>,
    /// Console bytes accepted into the channel.
    pub bytes_enqueued: u64,
    /// Bytes delivered to the device on `rd_data`.
    pub bytes_read: u64,
    /// Reads serviced while the channel was empty.
    pub empty_reads: u64,
    /// Bytes the device wrote to the output stream.
    pub bytes_written: u64,
    /// Refill batches taken from the console.
    pub refills: u64,
}

impl Default for RunStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            ticks: 0,
            rising_edges: 0,
            reset_released_at: None,
            bytes_enqueued: 0,
            bytes_read: 0,
            empty_reads: 0,
            bytes_written: 0,
            refills: 0,
        }
    }
}

impl RunStats {
    /// Host seconds since the counters were created.
    pub fn host_seconds(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Simulated ticks per host second.
    pub fn ticks_per_second(&self) -> f64 {
        let seconds = self.host_seconds();
        if seconds > 0.0 {
            self.ticks as f64 / seconds
        } else {
            0.0
        }
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========================================================")?;
        writeln!(f, "SERIAL BENCH STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "host_seconds             {:.4} s", self.host_seconds())?;
        writeln!(f, "sim_ticks                {}", self.ticks)?;
        writeln!(f, "sim_rate                 {:.0} ticks/s", self.ticks_per_second())?;
        writeln!(f, "rising_edges             {}", self.rising_edges)?;
        match self.reset_released_at {
            Some(t) => writeln!(f, "reset_released_at        {t}")?,
            None => writeln!(f, "reset_released_at        -")?,
        }
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "bytes_enqueued           {}", self.bytes_enqueued)?;
        writeln!(f, "refills                  {}", self.refills)?;
        writeln!(f, "bytes_read               {}", self.bytes_read)?;
        writeln!(f, "empty_reads              {}", self.empty_reads)?;
        writeln!(f, "bytes_written            {}", self.bytes_written)?;
        write!(f, "==========================================================")
    }
}
