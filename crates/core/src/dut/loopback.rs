//! Echo device.
//!
//! Reads every byte offered on the read handshake and writes it back one clock
//! later. Registers change only on rising clock edges, and everything clears
//! while reset is asserted.

use crate::common::Signals;
use crate::dut::Dut;
use crate::sim::EdgeDetector;

/// Loopback model of a serial device.
#[derive(Debug, Default)]
pub struct LoopbackDut {
    io: Signals,
    clk_edge: EdgeDetector,
    /// `rd_en` was asserted on the previous edge, so `rd_data` now holds a byte.
    read_pending: bool,
    finish_requested: bool,
    echoed: u64,
}

impl LoopbackDut {
    /// Creates a device held in reset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes echoed so far.
    pub const fn echoed(&self) -> u64 {
        self.echoed
    }

    /// Makes [`Dut::finished`] report true from now on.
    pub const fn request_finish(&mut self) {
        self.finish_requested = true;
    }

    fn on_rising_edge(&mut self) {
        if !self.io.reset_n {
            self.io.rd_en = false;
            self.io.wr_en = false;
            self.io.wr_data = 0;
            self.read_pending = false;
            return;
        }

        if self.read_pending {
            self.io.wr_en = true;
            self.io.wr_data = self.io.rd_data;
            self.echoed += 1;
        } else {
            self.io.wr_en = false;
        }

        self.io.rd_en = !self.io.rd_empty;
        self.read_pending = self.io.rd_en;
    }
}

impl Dut for LoopbackDut {
    fn name(&self) -> &str {
        "loopback"
    }

    fn set_clk(&mut self, level: bool) {
        self.io.clk = level;
    }

    fn set_reset_n(&mut self, level: bool) {
        self.io.reset_n = level;
    }

    fn set_rd_empty(&mut self, empty: bool) {
        self.io.rd_empty = empty;
    }

    fn set_rd_data(&mut self, data: u8) {
        self.io.rd_data = data;
    }

    fn clk(&self) -> bool {
        self.io.clk
    }

    fn reset_n(&self) -> bool {
        self.io.reset_n
    }

    fn rd_empty(&self) -> bool {
        self.io.rd_empty
    }

    fn rd_data(&self) -> u8 {
        self.io.rd_data
    }

    fn rd_en(&self) -> bool {
        self.io.rd_en
    }

    fn wr_en(&self) -> bool {
        self.io.wr_en
    }

    fn wr_data(&self) -> u8 {
        self.io.wr_data
    }

    fn eval(&mut self) {
        self.clk_edge.update(self.io.clk);
        if self.clk_edge.pos_edge() {
            self.on_rising_edge();
        }
    }

    fn finished(&self) -> bool {
        self.finish_requested
    }

    fn snapshot(&self) -> Signals {
        self.io
    }
}
