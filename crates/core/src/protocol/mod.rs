//! Host-side serial protocol spoken to the decoder.
//!
//! Frames look like `$<payload>#<cc>`, where `cc` is the byte sum of the
//! payload modulo 256 in two lowercase hex digits. The frequency synthesizer
//! payload is four hex digits: multiplier minus one, then divider minus one.

/// Frame encoding and incremental decoding.
pub mod frame;

/// Multiplier/divider search for the frequency synthesizer.
pub mod freq;

pub use frame::{FrameError, FrameEvent, FrameParser, checksum, encode_frame};
pub use freq::{
    DEFAULT_TOLERANCE_HZ, DEFAULT_XTAL_HZ, FrequencySetting, find_multiplier_divider,
    frequency_packet,
};
