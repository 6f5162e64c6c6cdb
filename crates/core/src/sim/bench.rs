//! Driver loop: owns the device and every piece of simulation state.
//!
//! One call to [`Testbench::tick`] is one simulated time unit:
//! 1. Poll the byte source and queue whatever is available (bytes that arrive
//!    during reset are kept, NUL bytes are dropped).
//! 2. Drive `clk`, `reset_n`, and `rd_empty` from the sequencer and channel.
//! 3. Feed the clock level to the edge detector.
//! 4. Evaluate the device.
//! 5. Record the post-evaluation bundle to the trace sink.
//! 6. On a rising edge, service one read and then one write.
//! 7. With the channel empty and reset released, refill from the console.
//! 8. Advance time by exactly one.

use std::fmt;
use std::io::Write;

use tracing::{debug, info, trace};

use crate::common::{BenchError, Result};
use crate::config::{Config, ConsoleConfig, RunConfig};
use crate::console::ByteSource;
use crate::dut::Dut;
use crate::sim::channel::{ByteChannel, ReadService};
use crate::sim::edge::EdgeDetector;
use crate::sim::sequencer::ClockResetSequencer;
use crate::stats::RunStats;
use crate::trace::TraceSink;

/// Why [`Testbench::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The device or evaluator reported that simulation should end.
    Finished,
    /// Simulated time reached the configured limit.
    TimeLimit,
    /// Input was exhausted and the bench went idle.
    InputDrained,
}

/// Simulation context: device, byte source, output stream, and trace sink.
///
/// Nothing here is global, so independent benches can run side by side.
pub struct Testbench<D, S, O> {
    dut: D,
    source: S,
    output: O,
    trace: Box<dyn TraceSink>,
    channel: ByteChannel,
    clk_edge: EdgeDetector,
    sequencer: ClockResetSequencer,
    console: ConsoleConfig,
    limits: RunConfig,
    time: u64,
    idle_ticks: u64,
    stats: RunStats,
}

impl<D: Dut, S: ByteSource, O: Write> Testbench<D, S, O> {
    /// Builds a bench and settles the device with reset asserted.
    pub fn new(dut: D, source: S, output: O, trace: Box<dyn TraceSink>, config: &Config) -> Self {
        let mut bench = Self {
            dut,
            source,
            output,
            trace,
            channel: ByteChannel::new(),
            clk_edge: EdgeDetector::new(),
            sequencer: ClockResetSequencer::from_config(&config.clock),
            console: config.console.clone(),
            limits: config.run.clone(),
            time: 0,
            idle_ticks: 0,
            stats: RunStats::default(),
        };

        bench.dut.set_reset_n(false);
        bench.dut.set_rd_empty(true);
        bench.dut.eval();
        debug!(dut = bench.dut.name(), "device instantiated, reset asserted");
        bench
    }

    /// Runs until the device finishes or a configured limit is hit.
    pub fn run(&mut self) -> Result<RunOutcome> {
        loop {
            if let Some(outcome) = self.stop_reason() {
                return Ok(outcome);
            }
            self.tick()?;
        }
    }

    /// Runs at most `ticks` iterations, stopping early on any run outcome.
    ///
    /// Returns `None` if all `ticks` iterations executed without a stop.
    pub fn run_for(&mut self, ticks: u64) -> Result<Option<RunOutcome>> {
        for _ in 0..ticks {
            if let Some(outcome) = self.stop_reason() {
                return Ok(Some(outcome));
            }
            self.tick()?;
        }
        Ok(None)
    }

    fn stop_reason(&self) -> Option<RunOutcome> {
        if self.dut.finished() {
            return Some(RunOutcome::Finished);
        }
        if self.limits.max_time.is_some_and(|max| self.time >= max) {
            return Some(RunOutcome::TimeLimit);
        }
        if self.limits.stop_when_drained
            && self.sequencer.reset_n(self.time)
            && self.channel.is_empty()
            && self.idle_ticks >= self.limits.drain_grace
            && self.source.is_exhausted()
        {
            return Some(RunOutcome::InputDrained);
        }
        None
    }

    /// Advances simulated time by one unit.
    pub fn tick(&mut self) -> Result<()> {
        let time = self.time;
        let mut active = false;
        self.channel.settle();

        if time % self.console.poll_interval.max(1) == 0 {
            active |= self.poll_source() > 0;
        }

        let inputs = self.sequencer.at(time);
        self.dut.set_reset_n(inputs.reset_n);
        self.dut.set_clk(inputs.clk);
        self.dut.set_rd_empty(self.channel.is_empty());
        if inputs.reset_n && self.stats.reset_released_at.is_none() {
            self.stats.reset_released_at = Some(time);
            debug!(time, "reset deasserted");
        }

        self.clk_edge.update(inputs.clk);

        self.dut.eval();

        self.trace
            .record(time, &self.dut.snapshot())
            .map_err(BenchError::Trace)?;

        if self.clk_edge.pos_edge() {
            self.stats.rising_edges += 1;
            active |= self.service_edge()?;
        }

        if self.channel.is_empty() && inputs.reset_n {
            active |= self.refill()? > 0;
        }

        self.trace.flush().map_err(BenchError::Trace)?;

        self.idle_ticks = if active { 0 } else { self.idle_ticks + 1 };
        self.stats.ticks += 1;
        self.time += 1;
        Ok(())
    }

    /// Queues every byte the source has ready; returns how many were queued.
    ///
    /// NUL bytes are dropped so a delivered byte is never zero, which keeps a
    /// zero-filled read distinguishable from data.
    fn poll_source(&mut self) -> usize {
        let mut queued = 0;
        while let Some(byte) = self.source.try_read_byte() {
            if byte == 0 {
                trace!(time = self.time, "NUL from console dropped");
                continue;
            }
            self.channel.push(byte);
            queued += 1;
        }
        self.stats.bytes_enqueued += queued as u64;
        queued
    }

    /// One read service followed by one write service; true if a byte moved.
    fn service_edge(&mut self) -> Result<bool> {
        let mut moved = false;

        if self.dut.rd_en() {
            let service = self.channel.service_read();
            match service {
                ReadService::Delivered(byte) => {
                    self.stats.bytes_read += 1;
                    moved = true;
                    trace!(time = self.time, byte, "read serviced");
                }
                ReadService::ZeroFill => {
                    self.stats.empty_reads += 1;
                    trace!(time = self.time, "read while empty, zero-filled");
                }
            }
            self.dut.set_rd_data(service.data());
        }

        if self.dut.wr_en() {
            let byte = self.dut.wr_data();
            self.output
                .write_all(&[byte])
                .and_then(|()| self.output.flush())
                .map_err(BenchError::Output)?;
            self.channel.note_write();
            self.stats.bytes_written += 1;
            moved = true;
            trace!(time = self.time, byte, "write serviced");
        }

        Ok(moved)
    }

    /// Moves pending console input into the empty channel as one batch.
    fn refill(&mut self) -> Result<usize> {
        if !self.source.has_pending() {
            return Ok(0);
        }

        let batch = if self.console.line_mode {
            self.output
                .write_all(self.console.prompt.as_bytes())
                .and_then(|()| self.output.flush())
                .map_err(BenchError::Output)?;
            self.source.read_line().unwrap_or_default()
        } else {
            std::iter::from_fn(|| self.source.try_read_byte()).collect()
        };

        let added = self.channel.extend(batch.into_iter().filter(|&b| b != 0));
        if added > 0 {
            self.stats.refills += 1;
            self.stats.bytes_enqueued += added as u64;
            debug!(time = self.time, bytes = added, "channel refilled from console");
        }
        Ok(added)
    }

    /// Finalizes the device and closes the trace sink.
    pub fn finish(mut self) -> Result<(D, O, RunStats)> {
        self.dut.finalize();
        self.trace.close().map_err(BenchError::Trace)?;
        self.output.flush().map_err(BenchError::Output)?;
        info!(
            ticks = self.stats.ticks,
            bytes_read = self.stats.bytes_read,
            bytes_written = self.stats.bytes_written,
            "simulation finished"
        );
        Ok((self.dut, self.output, self.stats))
    }

    /// Current simulated time: the time the next tick will run at.
    pub const fn time(&self) -> u64 {
        self.time
    }

    /// The byte channel.
    pub const fn channel(&self) -> &ByteChannel {
        &self.channel
    }

    /// The device.
    pub const fn dut(&self) -> &D {
        &self.dut
    }

    /// Mutable access to the device.
    pub const fn dut_mut(&mut self) -> &mut D {
        &mut self.dut
    }

    /// Mutable access to the byte source.
    pub const fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// The output stream.
    pub const fn output(&self) -> &O {
        &self.output
    }

    /// Clock edge detector state after the last tick.
    pub const fn clock_edge(&self) -> &EdgeDetector {
        &self.clk_edge
    }

    /// The clock and reset schedule.
    pub const fn sequencer(&self) -> &ClockResetSequencer {
        &self.sequencer
    }

    /// Counters so far.
    pub const fn stats(&self) -> &RunStats {
        &self.stats
    }
}

impl<D, S, O> fmt::Debug for Testbench<D, S, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Testbench")
            .field("time", &self.time)
            .field("queued", &self.channel.len())
            .field("sequencer", &self.sequencer)
            .finish_non_exhaustive()
    }
}
