//! Device signal bundle.
//!
//! The bench talks to the device under test exclusively through these seven
//! single-cycle signals. Direction is fixed by the FIFO handshake:
//!
//! | Signal     | Direction      |
//! |------------|----------------|
//! | `clk`      | bench → device |
//! | `reset_n`  | bench → device |
//! | `rd_en`    | device → bench |
//! | `rd_empty` | bench → device |
//! | `rd_data`  | bench → device |
//! | `wr_en`    | device → bench |
//! | `wr_data`  | device → bench |

/// Point-in-time copy of every signal in the bundle.
///
/// Used for trace capture and for assertions in tests; the live values are
/// always owned by the device model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Signals {
    /// Clock line.
    pub clk: bool,
    /// Active-low reset.
    pub reset_n: bool,
    /// Device requests one byte this edge.
    pub rd_en: bool,
    /// Byte channel holds no data.
    pub rd_empty: bool,
    /// Byte delivered on a serviced read, zero otherwise.
    pub rd_data: u8,
    /// Device presents one byte this edge.
    pub wr_en: bool,
    /// Byte presented for writing.
    pub wr_data: u8,
}

impl Signals {
    /// Number of signals in the bundle.
    pub const COUNT: usize = 7;

    /// Returns `(name, width, value)` for each signal in declaration order.
    pub fn fields(&self) -> [(&'static str, u32, u8); Self::COUNT] {
        [
            ("clk", 1, u8::from(self.clk)),
            ("reset_n", 1, u8::from(self.reset_n)),
            ("rd_en", 1, u8::from(self.rd_en)),
            ("rd_empty", 1, u8::from(self.rd_empty)),
            ("rd_data", 8, self.rd_data),
            ("wr_en", 1, u8::from(self.wr_en)),
            ("wr_data", 8, self.wr_data),
        ]
    }
}
