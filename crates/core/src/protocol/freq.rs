//! Multiplier/divider search for the frequency synthesizer.
//!
//! The synthesizer produces `xtal * M / D` with `M` and `D` in `1..=255`.

use super::frame::{FrameError, encode_frame, hex_value};

/// Reference crystal, in hertz.
pub const DEFAULT_XTAL_HZ: f64 = 32e6;

/// Acceptable distance from the requested frequency, in hertz.
pub const DEFAULT_TOLERANCE_HZ: f64 = 1e4;

/// A synthesizer multiplier/divider pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencySetting {
    /// Multiplier `M`, at least 1.
    pub multiplier: u8,
    /// Divider `D`, at least 1.
    pub divider: u8,
}

impl FrequencySetting {
    /// Synthesized frequency for the given crystal.
    pub fn frequency(&self, xtal_hz: f64) -> f64 {
        xtal_hz * f64::from(self.multiplier) / f64::from(self.divider)
    }

    /// Four-hex-digit payload, each field sent minus one.
    pub fn payload(&self) -> Result<String, FrameError> {
        if self.multiplier == 0 {
            return Err(FrameError::ZeroField("multiplier"));
        }
        if self.divider == 0 {
            return Err(FrameError::ZeroField("divider"));
        }
        Ok(format!("{:02x}{:02x}", self.multiplier - 1, self.divider - 1))
    }

    /// Decodes a four-hex-digit payload.
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        let [m1, m0, d1, d0] = payload else {
            return None;
        };
        let m = (hex_value(*m1)? << 4) | hex_value(*m0)?;
        let d = (hex_value(*d1)? << 4) | hex_value(*d0)?;
        Some(Self {
            multiplier: m.checked_add(1)?,
            divider: d.checked_add(1)?,
        })
    }
}

/// Finds the first `(M, D)` whose output is within `tolerance_hz` of the target.
///
/// `M` is the outer loop and `D` the inner one, both ascending. Since the
/// output only falls as `D` grows, the inner loop stops once it drops below
/// the target.
pub fn find_multiplier_divider(
    target_hz: f64,
    xtal_hz: f64,
    tolerance_hz: f64,
) -> Option<FrequencySetting> {
    for multiplier in 1..=u8::MAX {
        for divider in 1..=u8::MAX {
            let setting = FrequencySetting {
                multiplier,
                divider,
            };
            let result = setting.frequency(xtal_hz);
            if (result - target_hz).abs() < tolerance_hz {
                return Some(setting);
            }
            if result < target_hz {
                break;
            }
        }
    }
    None
}

/// Framed synthesizer packet for `(M, D)`, e.g. `$0200#c2` for `M = 3, D = 1`.
pub fn frequency_packet(multiplier: u8, divider: u8) -> Result<String, FrameError> {
    let payload = FrequencySetting {
        multiplier,
        divider,
    }
    .payload()?;
    encode_frame(&payload)
}
