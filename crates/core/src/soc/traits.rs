//! Collaborator traits at the edge of the harness.
//!
//! This module defines the seams the core layers talk through. It provides:
//! 1. **Raw Transport:** Fixed-width aligned bus reads and writes (`RawTransport`).
//! 2. **Frame Capture:** The serializer oracle watching the UART transmit line (`FrameSource`).
//! 3. **Serial Drive:** An external transmitter feeding the UART receive line (`SerialDriver`).
//!
//! None of these retry or time out; a transfer runs to completion or failure inside the
//! implementor, which is also where any timeout belongs.

use crate::common::addr::BusAddr;
use crate::common::error::TransportError;
use crate::config::BusWidth;
use crate::frame::ObservedFrame;

/// AXI burst type of a raw transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BurstKind {
    /// Every beat targets the same address.
    Fixed,
    /// Address increments by the transfer size each beat.
    #[default]
    Incr,
    /// Incrementing burst wrapping at an aligned boundary.
    Wrap,
}

/// Addressed read/write primitive of the register bus.
///
/// Implementors only accept transfers of exactly their native width at aligned addresses.
/// Data is little-endian: byte `i` of the slice lives at `address + i`.
pub trait RawTransport {
    /// Returns the native transfer width of the bus.
    fn native_width(&self) -> BusWidth;

    /// Reads `length` bytes starting at `address`.
    ///
    /// # Arguments
    ///
    /// * `address` - Aligned start address.
    /// * `length` - Number of bytes to read.
    /// * `burst` - Burst type.
    /// * `size` - AXI size encoding (log2 of bytes per beat).
    fn read(
        &mut self,
        address: BusAddr,
        length: usize,
        burst: BurstKind,
        size: u8,
    ) -> Result<Vec<u8>, TransportError>;

    /// Writes `data` starting at `address`.
    ///
    /// # Arguments
    ///
    /// * `address` - Aligned start address.
    /// * `data` - Bytes to write, lowest address first.
    /// * `burst` - Burst type.
    /// * `size` - AXI size encoding (log2 of bytes per beat).
    fn write(
        &mut self,
        address: BusAddr,
        data: &[u8],
        burst: BurstKind,
        size: u8,
    ) -> Result<(), TransportError>;
}

impl<T: RawTransport + ?Sized> RawTransport for Box<T> {
    fn native_width(&self) -> BusWidth {
        (**self).native_width()
    }

    fn read(
        &mut self,
        address: BusAddr,
        length: usize,
        burst: BurstKind,
        size: u8,
    ) -> Result<Vec<u8>, TransportError> {
        (**self).read(address, length, burst, size)
    }

    fn write(
        &mut self,
        address: BusAddr,
        data: &[u8],
        burst: BurstKind,
        size: u8,
    ) -> Result<(), TransportError> {
        (**self).write(address, data, burst, size)
    }
}

/// Byte-level serializer oracle attached to the UART transmit line.
pub trait FrameSource {
    /// Suspends until a frame has been captured (or the line went idle).
    fn wait(&mut self);

    /// Takes the oldest captured frame, if any.
    fn read_frame(&mut self) -> Option<ObservedFrame>;

    /// Drops every frame captured so far.
    fn discard(&mut self) {
        while self.read_frame().is_some() {}
    }
}

/// External transmitter attached to the UART receive line.
pub trait SerialDriver {
    /// Serializes `data` into the receiver; the receiver keeps as many bits as it is
    /// configured for.
    fn send(&mut self, data: u32);
}
