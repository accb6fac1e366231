//! Bus address type.
//!
//! This module defines a strong type for addresses in the peripheral register space so
//! that raw integers, byte offsets and aligned word addresses are not mixed up. It provides:
//! 1. **Type Safety:** Register offsets stay `u64`, absolute bus addresses are `BusAddr`.
//! 2. **Alignment:** Rounding down to the bus transfer width and the byte offset within it.

use std::fmt;

/// An absolute address on the register bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BusAddr(pub u64);

impl BusAddr {
    /// Creates a new bus address from a raw 64-bit value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }

    /// Returns this address advanced by `offset` bytes, or `None` past the end of the
    /// address space.
    #[inline]
    pub const fn checked_offset(&self, offset: u64) -> Option<Self> {
        match self.0.checked_add(offset) {
            Some(addr) => Some(Self(addr)),
            None => None,
        }
    }

    /// Rounds the address down to a multiple of `width` bytes.
    ///
    /// # Arguments
    ///
    /// * `width` - Transfer width in bytes; must be a power of two.
    ///
    /// # Returns
    ///
    /// The aligned word address that contains this address.
    #[inline]
    pub const fn align_down(&self, width: u64) -> Self {
        Self(self.0 & !(width - 1))
    }

    /// Returns the byte offset of this address inside its aligned `width`-byte word.
    #[inline]
    pub const fn offset_in_word(&self, width: u64) -> u64 {
        self.0 & (width - 1)
    }

    /// Returns `true` if the address is a multiple of `width` bytes.
    #[inline]
    pub const fn is_aligned(&self, width: u64) -> bool {
        self.offset_in_word(width) == 0
    }
}

impl fmt::Display for BusAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::LowerHex for BusAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl From<u64> for BusAddr {
    fn from(addr: u64) -> Self {
        Self(addr)
    }
}
