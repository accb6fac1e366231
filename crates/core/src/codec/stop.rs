//! Stop-bit counts.
//!
//! Field `00` is one stop bit, `01` one and a half, `10` two. `11` is reserved and
//! decodes to `InvalidEncoding`.

use std::fmt;

use crate::common::error::{Result, VerifError};

/// Control register encoding of [`StopBits::One`].
pub const STOP_ONE: u8 = 0b00;
/// Control register encoding of [`StopBits::OneAndHalf`].
pub const STOP_ONE_AND_HALF: u8 = 0b01;
/// Control register encoding of [`StopBits::Two`].
pub const STOP_TWO: u8 = 0b10;

/// Number of stop bits closing a serial frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopBits {
    /// One stop bit.
    One,
    /// One and a half stop bits.
    OneAndHalf,
    /// Two stop bits.
    Two,
}

impl StopBits {
    /// Every representable stop-bit count.
    pub const ALL: [Self; 3] = [Self::One, Self::OneAndHalf, Self::Two];

    /// Returns the count in half-bit units (2, 3 or 4), so it can be compared exactly.
    pub const fn half_bits(self) -> u8 {
        match self {
            Self::One => 2,
            Self::OneAndHalf => 3,
            Self::Two => 4,
        }
    }

    /// Returns the count as a number of bit times.
    pub fn as_f32(self) -> f32 {
        f32::from(self.half_bits()) / 2.0
    }
}

impl fmt::Display for StopBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::One => "1",
            Self::OneAndHalf => "1.5",
            Self::Two => "2",
        };
        f.write_str(text)
    }
}

/// Encodes a stop-bit count into its 2-bit control register field.
pub const fn encode_stop(count: StopBits) -> u8 {
    match count {
        StopBits::One => STOP_ONE,
        StopBits::OneAndHalf => STOP_ONE_AND_HALF,
        StopBits::Two => STOP_TWO,
    }
}

/// Decodes a 2-bit control register field into a stop-bit count.
///
/// # Errors
///
/// `InvalidEncoding` for `11` or any value wider than two bits.
pub fn decode_stop(field: u8) -> Result<StopBits> {
    match field {
        STOP_ONE => Ok(StopBits::One),
        STOP_ONE_AND_HALF => Ok(StopBits::OneAndHalf),
        STOP_TWO => Ok(StopBits::Two),
        _ => Err(VerifError::invalid_encoding("stop bits", field as u16)),
    }
}
