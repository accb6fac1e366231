//! Control register framing subfields.
//!
//! Layout of the 16-bit control register:
//!
//! ```text
//!  15        10 9 ....... 5 4    3 2    1 0
//! +------------+-----------+------+------+---+
//! |   other    |   width   |parity| stop | o |
//! +------------+-----------+------+------+---+
//! ```
//!
//! The width subfield is five bits wide in [`ControlLayout::Raw5Bit`] and three bits wide
//! in [`ControlLayout::Offset3Bit`]. Bits outside the framing subfields belong to other
//! functions and are preserved by [`ControlFields::merge_into`].

use crate::common::constants::{
    CTRL_PARITY_MASK, CTRL_PARITY_SHIFT, CTRL_STOP_MASK, CTRL_STOP_SHIFT, CTRL_WIDTH_SHIFT,
};
use crate::common::error::Result;

use super::parity::{Parity, decode_parity, encode_parity};
use super::stop::{StopBits, decode_stop, encode_stop};
use super::width::{ControlLayout, DataWidth, decode_width, encode_width};

/// Framing subfields held by the control register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlFields {
    /// Stop-bit count.
    pub stop: StopBits,
    /// Parity mode; must be one of the encodable modes to be packed.
    pub parity: Parity,
    /// Character width.
    pub width: DataWidth,
}

impl ControlFields {
    /// Creates a field set.
    pub const fn new(stop: StopBits, parity: Parity, width: DataWidth) -> Self {
        Self {
            stop,
            parity,
            width,
        }
    }

    /// Returns the mask of every control register bit owned by the framing subfields.
    pub const fn framing_mask(layout: ControlLayout) -> u16 {
        (CTRL_STOP_MASK << CTRL_STOP_SHIFT)
            | (CTRL_PARITY_MASK << CTRL_PARITY_SHIFT)
            | layout.width_field()
    }

    /// Packs the subfields into a control word with every other bit clear.
    ///
    /// # Errors
    ///
    /// `UnsupportedField` if the parity mode has no control register encoding.
    pub fn pack(&self, layout: ControlLayout) -> Result<u16> {
        let parity = encode_parity(self.parity)? as u16;
        let stop = encode_stop(self.stop) as u16;
        let width = encode_width(self.width, layout);
        Ok((stop << CTRL_STOP_SHIFT) | (parity << CTRL_PARITY_SHIFT) | (width << CTRL_WIDTH_SHIFT))
    }

    /// Replaces the framing subfields of `raw` and keeps every other bit.
    ///
    /// # Errors
    ///
    /// `UnsupportedField` if the parity mode has no control register encoding.
    pub fn merge_into(&self, raw: u16, layout: ControlLayout) -> Result<u16> {
        Ok((raw & !Self::framing_mask(layout)) | self.pack(layout)?)
    }

    /// Extracts and decodes the framing subfields of a raw control word.
    ///
    /// # Errors
    ///
    /// `InvalidEncoding` if any subfield holds an unassigned pattern.
    pub fn unpack(raw: u16, layout: ControlLayout) -> Result<Self> {
        let stop = decode_stop(((raw >> CTRL_STOP_SHIFT) & CTRL_STOP_MASK) as u8)?;
        let parity = decode_parity(((raw >> CTRL_PARITY_SHIFT) & CTRL_PARITY_MASK) as u8)?;
        let width = decode_width((raw >> CTRL_WIDTH_SHIFT) & layout.width_mask(), layout)?;
        Ok(Self {
            stop,
            parity,
            width,
        })
    }
}
