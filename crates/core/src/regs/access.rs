//! Read-modify-write register access over a fixed-width bus.
//!
//! The bus only moves whole aligned words (8 bytes, or 4 on the narrow variant). Every
//! sub-word access follows the same protocol:
//! 1. **Align:** Round the register address down to the bus width.
//! 2. **Read:** Fetch the full aligned word.
//! 3. **Extract / Merge:** Shift by `offset * 8` and mask to the register width, or clear
//!    those bits and OR in the new value.
//! 4. **Write:** Store the full word back (writes only).
//!
//! The read always completes before the write is issued and nothing else is sent to the
//! word in between. Concurrent agents are not accounted for here; see
//! [`SharedRegisterAccess`](super::SharedRegisterAccess) for serializing callers.

use tracing::debug;

use crate::common::addr::BusAddr;
use crate::common::error::{Result, TransportError, VerifError};
use crate::config::BusWidth;
use crate::soc::traits::{BurstKind, RawTransport};

use super::descriptor::RegisterDescriptor;

/// Sub-word register access layer bound to one raw transport.
#[derive(Debug)]
pub struct RegisterAccess<T> {
    transport: T,
    bus: BusWidth,
}

impl<T: RawTransport> RegisterAccess<T> {
    /// Wraps a transport; the word size is taken from its native width.
    pub fn new(transport: T) -> Self {
        let bus = transport.native_width();
        Self { transport, bus }
    }

    /// Returns the bus word size used for every transfer.
    pub const fn bus_width(&self) -> BusWidth {
        self.bus
    }

    /// Returns the underlying transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the underlying transport mutably.
    pub const fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Releases the underlying transport.
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Reads the full aligned word containing `address`.
    ///
    /// # Errors
    ///
    /// `Transport` if the transfer fails or returns the wrong number of bytes.
    pub fn read_word(&mut self, address: BusAddr) -> Result<u64> {
        let len = self.bus.bytes() as usize;
        let aligned = address.align_down(self.bus.bytes());
        debug!("Reading {len}-byte word from aligned address {aligned}");
        let data = self
            .transport
            .read(aligned, len, BurstKind::Incr, self.bus.axi_size())?;
        if data.len() != len {
            return Err(TransportError::LengthMismatch {
                expected: len,
                actual: data.len(),
            }
            .into());
        }
        Ok(data
            .iter()
            .rev()
            .fold(0u64, |word, &byte| (word << 8) | u64::from(byte)))
    }

    /// Writes a full aligned word at the word containing `address`.
    ///
    /// Bits above the bus width are dropped.
    ///
    /// # Errors
    ///
    /// `Transport` if the transfer fails.
    pub fn write_word(&mut self, address: BusAddr, word: u64) -> Result<()> {
        let len = self.bus.bytes() as usize;
        let aligned = address.align_down(self.bus.bytes());
        debug!("Writing {len}-byte word to aligned address {aligned}: {word:#x}");
        let bytes = word.to_le_bytes();
        self.transport
            .write(aligned, &bytes[..len], BurstKind::Incr, self.bus.axi_size())?;
        Ok(())
    }

    /// Reads a register.
    ///
    /// # Errors
    ///
    /// `RegisterStraddle` if the register does not fit one bus word, `Transport` on bus failure.
    pub fn read(&mut self, reg: &RegisterDescriptor) -> Result<u32> {
        let (aligned, shift) = self.locate(reg)?;
        let word = self.read_word(aligned)?;
        let value = ((word >> shift) as u32) & reg.value_mask();
        debug!("Read {value:#x} from addr {}", reg.address());
        Ok(value)
    }

    /// Writes a register, leaving every other bit of the containing word unchanged.
    ///
    /// # Errors
    ///
    /// `ValueOutOfRange` if `value` is wider than the register (nothing is written),
    /// `RegisterStraddle` if the register does not fit one bus word, `Transport` on bus failure.
    pub fn write(&mut self, reg: &RegisterDescriptor, value: u32) -> Result<()> {
        if value & !reg.value_mask() != 0 {
            return Err(VerifError::out_of_range(u64::from(value), reg.bits()));
        }
        self.modify(reg, |_| Ok(value)).map(|_| ())
    }

    /// Writes the low `width` bytes of `value`, discarding the rest on the caller's request.
    ///
    /// # Errors
    ///
    /// `RegisterStraddle` if the register does not fit one bus word, `Transport` on bus failure.
    pub fn write_masked(&mut self, reg: &RegisterDescriptor, value: u32) -> Result<()> {
        let mask = reg.value_mask();
        self.modify(reg, |_| Ok(value & mask)).map(|_| ())
    }

    /// Applies `update` to a register inside a single read-modify-write.
    ///
    /// `update` receives the current register value and returns the new one. One aligned
    /// read and one aligned write are issued; if `update` fails nothing is written.
    ///
    /// # Returns
    ///
    /// The value written.
    ///
    /// # Errors
    ///
    /// Whatever `update` returns, `ValueOutOfRange` if its result is wider than the register,
    /// `RegisterStraddle` or `Transport` as for [`RegisterAccess::read`].
    pub fn modify<F>(&mut self, reg: &RegisterDescriptor, update: F) -> Result<u32>
    where
        F: FnOnce(u32) -> Result<u32>,
    {
        let (aligned, shift) = self.locate(reg)?;
        let mut word = self.read_word(aligned)?;
        let current = ((word >> shift) as u32) & reg.value_mask();
        let value = update(current)?;
        if value & !reg.value_mask() != 0 {
            return Err(VerifError::out_of_range(u64::from(value), reg.bits()));
        }
        let field = u64::from(reg.value_mask()) << shift;
        word &= !field;
        word |= u64::from(value) << shift;
        self.write_word(aligned, word)?;
        debug!("Wrote {value:#x} to addr {}", reg.address());
        Ok(value)
    }

    /// Resolves the aligned word and bit shift of a register on this bus.
    fn locate(&self, reg: &RegisterDescriptor) -> Result<(BusAddr, u32)> {
        let address = reg.address();
        let offset = address.offset_in_word(self.bus.bytes());
        if offset + u64::from(reg.width()) > self.bus.bytes() {
            return Err(VerifError::RegisterStraddle {
                address,
                width: reg.width(),
                bus_width: self.bus.bytes(),
            });
        }
        Ok((address.align_down(self.bus.bytes()), (offset * 8) as u32))
    }
}
