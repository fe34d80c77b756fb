//! Decode the 6-byte scroll device packet.
//!
//! ```text
//! byte0  1 0 c c c c c c   c = weight (capacitance)
//! byte1  0 0 0 0 a a a a   a = position, high nibble
//! byte2  a a a a a a a a   a = position, low byte
//! byte3  1 1 0 0 0 0 0 0   framing marker
//! byte4  . . . p . . . .   p = press (wheel center / sensor bezel spot)
//! byte5  0 0 0 0 0 0 0 0
//! ```

use crate::error::Error;

/// Size of one packet on the wire.
pub const FRAME_SIZE: usize = 6;

/// Highest position value the 12-bit field can carry.
pub const MAX_POSITION: u16 = 0x0FFF;

pub const HEADER_MASK: u8 = 0xC0;
pub const HEADER_MARKER: u8 = 0x80;
pub const TRAILER_MARKER: u8 = 0xC0;

pub type RawFrame = [u8; FRAME_SIZE];

/// Fields extracted from one packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sample {
    /// 0..=4095, angle on the wheel or offset along the sensor.
    pub position: u16,
    /// 0..=63, touch intensity.
    pub weight: u8,
    pub pressed: bool,
}

/// Decode one packet. Only the length is checked; every bit pattern maps
/// to some sample.
pub fn decode(buf: &[u8]) -> Result<Sample, Error> {
    let frame: &RawFrame = buf
        .try_into()
        .map_err(|_| Error::MalformedFrame { len: buf.len() })?;
    Ok(decode_frame(frame))
}

pub fn decode_frame(frame: &RawFrame) -> Sample {
    let position = (((frame[1] & 0x0F) as u16) << 8) | frame[2] as u16;
    let weight = frame[0] & 0x3F;
    let pressed = frame[4] != 0;

    Sample {
        position,
        weight,
        pressed,
    }
}

/// True when bytes 0 and 3 carry the packet markers. Used by the reader to
/// find packet boundaries; the decoder itself never looks at them.
pub fn has_markers(frame: &RawFrame) -> bool {
    frame[0] & HEADER_MASK == HEADER_MARKER && frame[3] & HEADER_MASK == TRAILER_MARKER
}
