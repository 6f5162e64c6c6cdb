//! Frame encoding and incremental decoding.

use thiserror::Error;

/// Start-of-frame marker.
pub const FRAME_START: u8 = b'$';
/// Payload terminator; two checksum digits follow.
pub const FRAME_END: u8 = b'#';

/// Errors building a frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// The payload contains a byte reserved for framing.
    #[error("payload contains reserved byte {0:#04x}")]
    ReservedByte(u8),
    /// A synthesizer field was zero; fields are sent minus one.
    #[error("{0} must be between 1 and 255")]
    ZeroField(&'static str),
}

/// Byte sum of the payload modulo 256.
pub fn checksum(payload: &[u8]) -> u8 {
    payload.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Wraps a payload as `$<payload>#<cc>`.
pub fn encode_frame(payload: &str) -> Result<String, FrameError> {
    if let Some(&b) = payload
        .as_bytes()
        .iter()
        .find(|&&b| b == FRAME_START || b == FRAME_END)
    {
        return Err(FrameError::ReservedByte(b));
    }
    Ok(format!(
        "{}{payload}{}{:02x}",
        FRAME_START as char,
        FRAME_END as char,
        checksum(payload.as_bytes())
    ))
}

/// Result of feeding the byte that completes a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameEvent {
    /// A frame whose checksum matched.
    Frame(Vec<u8>),
    /// A frame whose checksum did not match or was not hex.
    BadChecksum {
        /// Received payload.
        payload: Vec<u8>,
        /// Checksum computed over the payload.
        expected: u8,
        /// Checksum sent by the peer, `None` if the digits were malformed.
        received: Option<u8>,
    },
}

#[derive(Debug, Clone, Default)]
enum State {
    #[default]
    Hunt,
    Payload,
    Checksum { high: Option<u8> },
}

/// Byte-at-a-time frame decoder.
///
/// Bytes outside a frame are ignored. A start marker inside a frame discards
/// the partial frame and starts over.
#[derive(Debug, Clone, Default)]
pub struct FrameParser {
    state: State,
    payload: Vec<u8>,
}

impl FrameParser {
    /// Creates a parser hunting for a start marker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards any partial frame.
    pub fn reset(&mut self) {
        self.state = State::Hunt;
        self.payload.clear();
    }

    /// True while a frame is partially received.
    pub const fn in_frame(&self) -> bool {
        !matches!(self.state, State::Hunt)
    }

    /// Feeds one byte; returns an event when it completes a frame.
    pub fn feed(&mut self, byte: u8) -> Option<FrameEvent> {
        if byte == FRAME_START {
            self.payload.clear();
            self.state = State::Payload;
            return None;
        }

        match self.state {
            State::Hunt => None,
            State::Payload => {
                if byte == FRAME_END {
                    self.state = State::Checksum { high: None };
                } else {
                    self.payload.push(byte);
                }
                None
            }
            State::Checksum { high: None } => {
                match hex_value(byte) {
                    Some(v) => self.state = State::Checksum { high: Some(v) },
                    None => return Some(self.complete(None)),
                }
                None
            }
            State::Checksum { high: Some(high) } => {
                let received = hex_value(byte).map(|low| (high << 4) | low);
                Some(self.complete(received))
            }
        }
    }

    fn complete(&mut self, received: Option<u8>) -> FrameEvent {
        let payload = std::mem::take(&mut self.payload);
        self.state = State::Hunt;
        let expected = checksum(&payload);
        if received == Some(expected) {
            FrameEvent::Frame(payload)
        } else {
            FrameEvent::BadChecksum {
                payload,
                expected,
                received,
            }
        }
    }
}

/// Value of one ASCII hex digit, either case.
pub(crate) const fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
