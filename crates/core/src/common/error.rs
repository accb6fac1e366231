//! Error types for the verification harness.
//!
//! This module defines the failure taxonomy of the core layers. It provides:
//! 1. **Codec Errors:** Unrepresentable bit patterns and values the register layout cannot hold.
//! 2. **Register Errors:** Out-of-range write values and descriptors that straddle bus words.
//! 3. **Configuration Errors:** Incomplete framing state, undefined baud rates, registers that
//!    do not hold what was written, bad config files.
//! 4. **Transport Errors:** Raw bus failures, carried through the other layers unchanged.
//!
//! Verification mismatches are not errors; they are reported as
//! [`VerificationResult`](crate::oracle::VerificationResult) values.

use thiserror::Error;

use super::addr::BusAddr;

/// Result type alias for harness operations.
pub type Result<T> = std::result::Result<T, VerifError>;

/// Failures reported by the raw-transfer collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The slave or interconnect answered with an error response.
    #[error("bus error response at {address}")]
    BusError {
        /// Address of the failed transfer
        address: BusAddr,
    },

    /// The transfer never completed.
    #[error("transfer to {address} timed out")]
    Timeout {
        /// Address of the stalled transfer
        address: BusAddr,
    },

    /// The address is not a multiple of the transfer size.
    #[error("transfer address {address} is not aligned to {size} bytes")]
    Misaligned {
        /// Requested address
        address: BusAddr,
        /// Transfer size in bytes
        size: u64,
    },

    /// The transfer size does not match the bus native width.
    #[error("transfer size {size} bytes unsupported (bus native width is {native} bytes)")]
    UnsupportedSize {
        /// Requested size in bytes
        size: u64,
        /// Native bus width in bytes
        native: u64,
    },

    /// Fewer or more bytes were moved than the transfer asked for.
    #[error("transfer moved {actual} bytes, expected {expected}")]
    LengthMismatch {
        /// Requested length
        expected: usize,
        /// Delivered length
        actual: usize,
    },

    /// No device decodes the address.
    #[error("no device mapped at {address}")]
    Unmapped {
        /// Requested address
        address: BusAddr,
    },
}

/// Errors raised by the codec, register, frame and configuration layers.
#[derive(Debug, Error)]
pub enum VerifError {
    /// A bitfield holds a pattern with no meaning in its domain.
    #[error("invalid {field} encoding {value:#04b}")]
    InvalidEncoding {
        /// Field name
        field: &'static str,
        /// Raw field value
        value: u16,
    },

    /// The value is meaningful but cannot be expressed in the control register layout.
    #[error("{field} value {value} is not encodable in the control register")]
    UnsupportedField {
        /// Field name
        field: &'static str,
        /// Offending value
        value: String,
    },

    /// A write value or field value does not fit its destination.
    #[error("value {value:#x} does not fit in {bits} bits")]
    ValueOutOfRange {
        /// Offending value
        value: u64,
        /// Available bits
        bits: u32,
    },

    /// A character width outside the range the UART supports.
    #[error("data width {bits} is outside the supported {min}..={max} bits")]
    WidthOutOfRange {
        /// Requested width
        bits: u8,
        /// Narrowest supported width
        min: u8,
        /// Widest supported width
        max: u8,
    },

    /// A register offset runs past the end of the 64-bit address space.
    #[error("register offset {offset:#x} from {base} overflows the address space")]
    AddressOverflow {
        /// Peripheral base address
        base: BusAddr,
        /// Register offset from the base
        offset: u64,
    },

    /// A register would cross the boundary between two aligned bus words.
    #[error("register at {address} ({width} bytes) straddles a {bus_width}-byte bus word")]
    RegisterStraddle {
        /// Register address
        address: BusAddr,
        /// Register width in bytes
        width: u8,
        /// Bus native width in bytes
        bus_width: u64,
    },

    /// Verification was requested before every framing parameter was set.
    #[error("framing configuration incomplete: {missing} has not been set")]
    ConfigurationIncomplete {
        /// First unset parameter
        missing: &'static str,
    },

    /// The baud rate cannot be derived as a positive integer.
    #[error("baud rate undefined for clock {clock_hz} Hz and divisor {divisor}")]
    DivisionUndefined {
        /// Core clock frequency
        clock_hz: u64,
        /// Programmed divisor
        divisor: u32,
    },

    /// A register did not read back the value just written to it.
    #[error("{register} read back {actual:#x} after writing {expected:#x}")]
    ReadbackMismatch {
        /// Register name
        register: &'static str,
        /// Value written
        expected: u32,
        /// Value read back
        actual: u32,
    },

    /// The raw transport failed; the inner error is passed through unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Configuration could not be loaded or parsed.
    #[error("configuration error: {reason}")]
    Config {
        /// Reason for failure
        reason: String,
    },

    /// I/O error while persisting reports.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error
        #[from]
        source: std::io::Error,
    },
}

impl VerifError {
    /// Creates an invalid-encoding error.
    pub const fn invalid_encoding(field: &'static str, value: u16) -> Self {
        Self::InvalidEncoding { field, value }
    }

    /// Creates an unsupported-field error.
    pub fn unsupported_field(field: &'static str, value: impl ToString) -> Self {
        Self::UnsupportedField {
            field,
            value: value.to_string(),
        }
    }

    /// Creates a value-out-of-range error.
    pub const fn out_of_range(value: u64, bits: u32) -> Self {
        Self::ValueOutOfRange { value, bits }
    }

    /// Creates a configuration error.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Returns `true` if the error came from the raw transport.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
