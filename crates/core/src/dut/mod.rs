//! Device-under-test capability.
//!
//! The bench never looks inside the device. It drives inputs, asks the logic
//! evaluator to propagate them, and reads outputs back. This module provides:
//! 1. **`Dut`:** The capability trait every evaluator implements.
//! 2. **Reference models:** A loopback echo device and a framed serial decoder,
//!    used by the CLI and as realistic devices in tests.

use crate::common::Signals;

/// Framed serial decoder model.
pub mod frame_decoder;

/// Echo model.
pub mod loopback;

pub use frame_decoder::{FrameDecoderDut, FrequencySetting};
pub use loopback::LoopbackDut;

/// Capability interface of a device under test.
///
/// Setters stage input values; nothing propagates until [`eval`](Dut::eval).
/// Getters report outputs as of the most recent evaluation.
pub trait Dut {
    /// Short name used in logs and trace headers.
    fn name(&self) -> &str;

    /// Drives the clock line.
    fn set_clk(&mut self, level: bool);
    /// Drives the active-low reset.
    fn set_reset_n(&mut self, level: bool);
    /// Drives the channel-empty flag.
    fn set_rd_empty(&mut self, empty: bool);
    /// Drives the read data byte.
    fn set_rd_data(&mut self, data: u8);

    /// Current clock input.
    fn clk(&self) -> bool;
    /// Current reset input.
    fn reset_n(&self) -> bool;
    /// Current channel-empty input.
    fn rd_empty(&self) -> bool;
    /// Current read data input.
    fn rd_data(&self) -> u8;
    /// Read request output.
    fn rd_en(&self) -> bool;
    /// Write strobe output.
    fn wr_en(&self) -> bool;
    /// Write data output.
    fn wr_data(&self) -> u8;

    /// Propagates the staged inputs through the device logic.
    fn eval(&mut self);

    /// True once the device or evaluator has requested the end of simulation.
    fn finished(&self) -> bool {
        false
    }

    /// Final evaluation hook, called once at shutdown.
    fn finalize(&mut self) {}

    /// Copies every signal of the bundle.
    fn snapshot(&self) -> Signals {
        Signals {
            clk: self.clk(),
            reset_n: self.reset_n(),
            rd_en: self.rd_en(),
            rd_empty: self.rd_empty(),
            rd_data: self.rd_data(),
            wr_en: self.wr_en(),
            wr_data: self.wr_data(),
        }
    }
}

impl<D: Dut + ?Sized> Dut for Box<D> {
    fn name(&self) -> &str {
        (**self).name()
    }
    fn set_clk(&mut self, level: bool) {
        (**self).set_clk(level);
    }
    fn set_reset_n(&mut self, level: bool) {
        (**self).set_reset_n(level);
    }
    fn set_rd_empty(&mut self, empty: bool) {
        (**self).set_rd_empty(empty);
    }
    fn set_rd_data(&mut self, data: u8) {
        (**self).set_rd_data(data);
    }
    fn clk(&self) -> bool {
        (**self).clk()
    }
    fn reset_n(&self) -> bool {
        (**self).reset_n()
    }
    fn rd_empty(&self) -> bool {
        (**self).rd_empty()
    }
    fn rd_data(&self) -> u8 {
        (**self).rd_data()
    }
    fn rd_en(&self) -> bool {
        (**self).rd_en()
    }
    fn wr_en(&self) -> bool {
        (**self).wr_en()
    }
    fn wr_data(&self) -> u8 {
        (**self).wr_data()
    }
    fn eval(&mut self) {
        (**self).eval();
    }
    fn finished(&self) -> bool {
        (**self).finished()
    }
    fn finalize(&mut self) {
        (**self).finalize();
    }
    fn snapshot(&self) -> Signals {
        (**self).snapshot()
    }
}
