//! Register-level access to the UART.
//!
//! This module turns sub-word register operations into aligned bus transfers. It provides:
//! 1. **Descriptors:** Location and width of one register (`RegisterDescriptor`).
//! 2. **Register Map:** Every UART register for one base and bus width (`RegisterMap`).
//! 3. **Access Layer:** Read, write, masked write and read-modify-write (`RegisterAccess`).
//! 4. **Sharing:** A lock-holding handle for several owners (`SharedRegisterAccess`).

/// Read-modify-write access layer.
pub mod access;
/// Register descriptors.
pub mod descriptor;
/// UART register map.
pub mod map;
/// Mutex-guarded shared access.
pub mod shared;

pub use access::RegisterAccess;
pub use descriptor::RegisterDescriptor;
pub use map::RegisterMap;
pub use shared::SharedRegisterAccess;
