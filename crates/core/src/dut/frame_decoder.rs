//! Framed serial decoder.
//!
//! Consumes bytes through the read handshake, decodes `$<payload>#<cc>`
//! frames, and answers each one on the write handshake with `+` (checksum
//! matched) or `-` (mismatch). A valid four-hex-digit payload is latched as the
//! synthesizer setting.

use std::collections::VecDeque;

use tracing::debug;

use crate::common::Signals;
use crate::dut::Dut;
use crate::protocol::{FrameEvent, FrameParser};
use crate::sim::EdgeDetector;

pub use crate::protocol::FrequencySetting;

/// Acknowledgement for a frame whose checksum matched.
pub const ACK: u8 = b'+';
/// Acknowledgement for a frame whose checksum did not match.
pub const NAK: u8 = b'-';

/// Decoder model of the serial device.
#[derive(Debug, Default)]
pub struct FrameDecoderDut {
    io: Signals,
    clk_edge: EdgeDetector,
    read_pending: bool,
    parser: FrameParser,
    tx: VecDeque<u8>,
    setting: Option<FrequencySetting>,
    frames_ok: u64,
    frames_bad: u64,
    finish_requested: bool,
}

impl FrameDecoderDut {
    /// Creates a device held in reset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last synthesizer setting received in a valid frame.
    pub const fn setting(&self) -> Option<FrequencySetting> {
        self.setting
    }

    /// Frames acknowledged with `+`.
    pub const fn frames_ok(&self) -> u64 {
        self.frames_ok
    }

    /// Frames answered with `-`.
    pub const fn frames_bad(&self) -> u64 {
        self.frames_bad
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
            self.parser.reset();
            self.tx.clear();
            return;
        }

        if self.read_pending {
            self.receive(self.io.rd_data);
        }

        match self.tx.pop_front() {
            Some(byte) => {
                self.io.wr_en = true;
                self.io.wr_data = byte;
            }
            None => self.io.wr_en = false,
        }

        self.io.rd_en = !self.io.rd_empty;
        self.read_pending = self.io.rd_en;
    }

    fn receive(&mut self, byte: u8) {
        match self.parser.feed(byte) {
            Some(FrameEvent::Frame(payload)) => {
                self.frames_ok += 1;
                if let Some(setting) = FrequencySetting::from_payload(&payload) {
                    debug!(
                        multiplier = setting.multiplier,
                        divider = setting.divider,
                        "synthesizer setting latched"
                    );
                    self.setting = Some(setting);
                }
                self.tx.push_back(ACK);
            }
            Some(FrameEvent::BadChecksum {
                expected, received, ..
            }) => {
                self.frames_bad += 1;
                debug!(expected, ?received, "frame checksum mismatch");
                self.tx.push_back(NAK);
            }
            None => {}
        }
    }
}

impl Dut for FrameDecoderDut {
    fn name(&self) -> &str {
        "serial_decode"
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
