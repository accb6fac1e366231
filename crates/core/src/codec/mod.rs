//! Bitfield codec for the UART control register.
//!
//! Pure, side-effect free mappings between logical framing parameters and the bit patterns
//! the hardware stores. It provides:
//! 1. **Parity:** Five-mode enum; only NONE/ODD/EVEN have a control register encoding.
//! 2. **Stop Bits:** 1, 1.5 and 2 stop bits in a 2-bit field.
//! 3. **Data Width:** 5..=8 bit characters in either control layout variant.
//! 4. **Control Word:** Packing, unpacking and merging of all three subfields.
//!
//! Every decoder rejects unknown patterns with `InvalidEncoding` instead of defaulting.

/// Packing of the framing subfields into the 16-bit control register.
pub mod control;
/// Parity modes and their 2-bit encoding.
pub mod parity;
/// Stop-bit counts and their 2-bit encoding.
pub mod stop;
/// Character width and control layout variants.
pub mod width;

pub use control::ControlFields;
pub use parity::{Parity, decode_parity, encode_parity};
pub use stop::{StopBits, decode_stop, encode_stop};
pub use width::{ControlLayout, DataWidth, decode_width, encode_width};
