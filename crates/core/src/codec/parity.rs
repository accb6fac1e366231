//! Parity modes.
//!
//! The serializer side understands all five modes; the control register only has room for
//! NONE (`00`), ODD (`01`) and EVEN (`10`). Asking the codec to encode MARK or SPACE is an
//! `UnsupportedField` error, and `11` never decodes.

use std::fmt;

use crate::common::error::{Result, VerifError};

/// Control register encoding of [`Parity::None`].
pub const PARITY_NONE: u8 = 0b00;
/// Control register encoding of [`Parity::Odd`].
pub const PARITY_ODD: u8 = 0b01;
/// Control register encoding of [`Parity::Even`].
pub const PARITY_EVEN: u8 = 0b10;

/// Parity mode of a serial frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parity {
    /// No parity bit.
    None,
    /// Parity bit makes the count of ones odd.
    Odd,
    /// Parity bit makes the count of ones even.
    Even,
    /// Parity bit always 1.
    Mark,
    /// Parity bit always 0.
    Space,
}

impl Parity {
    /// Every parity mode the serializer understands.
    pub const ALL: [Self; 5] = [Self::None, Self::Odd, Self::Even, Self::Mark, Self::Space];

    /// Modes with a control register encoding.
    pub const ENCODABLE: [Self; 3] = [Self::None, Self::Odd, Self::Even];

    /// Returns `true` if the mode has a control register encoding.
    pub const fn is_encodable(self) -> bool {
        matches!(self, Self::None | Self::Odd | Self::Even)
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "NONE",
            Self::Odd => "ODD",
            Self::Even => "EVEN",
            Self::Mark => "MARK",
            Self::Space => "SPACE",
        };
        f.write_str(name)
    }
}

/// Encodes a parity mode into its 2-bit control register field.
///
/// # Errors
///
/// `UnsupportedField` for [`Parity::Mark`] and [`Parity::Space`].
pub fn encode_parity(mode: Parity) -> Result<u8> {
    match mode {
        Parity::None => Ok(PARITY_NONE),
        Parity::Odd => Ok(PARITY_ODD),
        Parity::Even => Ok(PARITY_EVEN),
        Parity::Mark | Parity::Space => Err(VerifError::unsupported_field("parity", mode)),
    }
}

/// Decodes a 2-bit control register field into a parity mode.
///
/// # Errors
///
/// `InvalidEncoding` for any value other than `00`, `01` and `10`.
pub fn decode_parity(field: u8) -> Result<Parity> {
    match field {
        PARITY_NONE => Ok(Parity::None),
        PARITY_ODD => Ok(Parity::Odd),
        PARITY_EVEN => Ok(Parity::Even),
        _ => Err(VerifError::invalid_encoding("parity", field as u16)),
    }
}
