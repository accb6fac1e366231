//! Common utilities and types shared across the harness.
//!
//! This module provides the fundamental building blocks used by every layer:
//! 1. **Address Types:** A strong type for bus addresses with alignment helpers.
//! 2. **Constants:** Register offsets, widths and clocking defaults of the UART block.
//! 3. **Error Handling:** The crate error taxonomy and the transport error passed through it.

/// Bus address type and alignment arithmetic.
pub mod addr;

/// Register-map and clocking constants.
pub mod constants;

/// Error types for codec, register, configuration and transport failures.
pub mod error;

pub use addr::BusAddr;
pub use error::{Result, TransportError, VerifError};
