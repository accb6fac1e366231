//! Register descriptors.
//!
//! A descriptor pins a register to the aligned bus word that contains it: the word address,
//! the byte offset inside the word and the register width. Construction rejects registers
//! that would straddle two words, so every access needs exactly one aligned transfer.

use std::fmt;

use crate::common::addr::BusAddr;
use crate::common::error::{Result, VerifError};
use crate::config::BusWidth;

/// Location and width of one sub-word register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegisterDescriptor {
    base: BusAddr,
    offset: u8,
    width: u8,
}

impl RegisterDescriptor {
    /// Creates a descriptor from an aligned word address and a byte offset within it.
    ///
    /// # Errors
    ///
    /// - `UnsupportedField` if `width` is not 1, 2 or 4 bytes.
    /// - `RegisterStraddle` if `base` is not word-aligned or `offset + width` exceeds the bus
    ///   width.
    pub fn new(base: BusAddr, offset: u8, width: u8, bus: BusWidth) -> Result<Self> {
        if !matches!(width, 1 | 2 | 4) {
            return Err(VerifError::unsupported_field("register width", width));
        }
        if !base.is_aligned(bus.bytes()) || u64::from(offset) + u64::from(width) > bus.bytes() {
            return Err(VerifError::RegisterStraddle {
                address: base.checked_offset(u64::from(offset)).unwrap_or(base),
                width,
                bus_width: bus.bytes(),
            });
        }
        Ok(Self {
            base,
            offset,
            width,
        })
    }

    /// Creates a descriptor for a register at an absolute address.
    ///
    /// # Errors
    ///
    /// Same as [`RegisterDescriptor::new`].
    pub fn at(address: BusAddr, width: u8, bus: BusWidth) -> Result<Self> {
        let base = address.align_down(bus.bytes());
        let offset = address.offset_in_word(bus.bytes()) as u8;
        Self::new(base, offset, width, bus)
    }

    /// Returns the aligned word address containing the register.
    #[inline(always)]
    pub const fn base(&self) -> BusAddr {
        self.base
    }

    /// Returns the byte offset of the register within its word.
    #[inline(always)]
    pub const fn offset(&self) -> u8 {
        self.offset
    }

    /// Returns the register width in bytes.
    #[inline(always)]
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Returns the absolute register address.
    #[inline]
    pub const fn address(&self) -> BusAddr {
        // The offset lies inside the aligned word.
        BusAddr::new(self.base.val() | self.offset as u64)
    }

    /// Returns the register width in bits.
    #[inline]
    pub const fn bits(&self) -> u32 {
        self.width as u32 * 8
    }

    /// Returns a mask covering `width` bytes, unshifted.
    #[inline]
    pub const fn value_mask(&self) -> u32 {
        match self.width {
            4 => u32::MAX,
            w => (1u32 << (w as u32 * 8)) - 1,
        }
    }
}

impl fmt::Display for RegisterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{} ({}B)", self.base, self.offset, self.width)
    }
}
