//! Frames captured on the transmit line.

use crate::codec::{DataWidth, Parity, StopBits};

/// A character captured by the serializer oracle on the UART transmit line.
///
/// Fields are private so a captured frame cannot be edited after the fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedFrame {
    data: u32,
    parity: Parity,
    stop_bits: StopBits,
    bit_width: DataWidth,
}

impl ObservedFrame {
    /// Records a captured frame.
    pub const fn new(data: u32, parity: Parity, stop_bits: StopBits, bit_width: DataWidth) -> Self {
        Self {
            data,
            parity,
            stop_bits,
            bit_width,
        }
    }

    /// Returns the data bits as sampled from the line.
    pub const fn data(&self) -> u32 {
        self.data
    }

    /// Returns the parity mode the serializer measured.
    pub const fn parity(&self) -> Parity {
        self.parity
    }

    /// Returns the stop-bit count the serializer measured.
    pub const fn stop_bits(&self) -> StopBits {
        self.stop_bits
    }

    /// Returns the number of data bits the serializer measured.
    pub const fn bit_width(&self) -> DataWidth {
        self.bit_width
    }
}
