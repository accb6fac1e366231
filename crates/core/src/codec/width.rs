//! Character width and the two control register layouts for it.
//!
//! The data-width subfield starts at bit 5 of the control register. Two harness
//! generations disagree on its shape:
//! 1. **Raw5Bit** (canonical): bits 9:5 hold the width itself (5..=8).
//! 2. **Offset3Bit**: bits 7:5 hold `width - 4` (1..=4).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::constants::{CTRL_WIDTH_SHIFT, MAX_DATA_WIDTH, MIN_DATA_WIDTH};
use crate::common::error::{Result, VerifError};

/// Number of data bits per character, always within `5..=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DataWidth(u8);

impl DataWidth {
    /// Every supported width, narrowest first.
    pub const ALL: [Self; 4] = [Self(5), Self(6), Self(7), Self(8)];

    /// Eight data bits.
    pub const EIGHT: Self = Self(8);

    /// Creates a width, rejecting anything outside `5..=8`.
    ///
    /// # Errors
    ///
    /// `WidthOutOfRange` if `bits` is not a supported character width.
    pub fn new(bits: u8) -> Result<Self> {
        if (MIN_DATA_WIDTH..=MAX_DATA_WIDTH).contains(&bits) {
            Ok(Self(bits))
        } else {
            Err(VerifError::WidthOutOfRange {
                bits,
                min: MIN_DATA_WIDTH,
                max: MAX_DATA_WIDTH,
            })
        }
    }

    /// Returns the width in bits.
    #[inline(always)]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns a mask covering the low `bits()` bits.
    #[inline]
    pub const fn mask(self) -> u32 {
        (1u32 << self.0) - 1
    }
}

impl fmt::Display for DataWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shape of the data-width subfield in the control register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum ControlLayout {
    /// Bits 9:5 carry the width unchanged.
    #[default]
    #[serde(alias = "raw5bit", alias = "raw")]
    Raw5Bit,
    /// Bits 7:5 carry `width - 4`.
    #[serde(alias = "offset3bit", alias = "offset")]
    Offset3Bit,
}

impl ControlLayout {
    /// Unshifted mask of the data-width subfield.
    pub const fn width_mask(self) -> u16 {
        match self {
            Self::Raw5Bit => 0b1_1111,
            Self::Offset3Bit => 0b111,
        }
    }

    /// Shifted mask of the data-width subfield inside the control word.
    pub const fn width_field(self) -> u16 {
        self.width_mask() << CTRL_WIDTH_SHIFT
    }
}

/// Encodes a character width into the unshifted data-width subfield.
pub const fn encode_width(width: DataWidth, layout: ControlLayout) -> u16 {
    match layout {
        ControlLayout::Raw5Bit => width.0 as u16,
        ControlLayout::Offset3Bit => (width.0 - 4) as u16,
    }
}

/// Decodes the unshifted data-width subfield.
///
/// # Errors
///
/// `InvalidEncoding` if the field does not map to a width within `5..=8`.
pub fn decode_width(field: u16, layout: ControlLayout) -> Result<DataWidth> {
    let bits = match layout {
        ControlLayout::Raw5Bit => field,
        ControlLayout::Offset3Bit => field.saturating_add(4),
    };
    u8::try_from(bits)
        .ok()
        .and_then(|b| DataWidth::new(b).ok())
        .ok_or_else(|| VerifError::invalid_encoding("data width", field))
}
