//! Bus-side collaborators of the harness.
//!
//! This module collects what sits on the far side of the register access layer. It provides:
//! 1. **Traits:** The raw transport, frame capture and serial drive seams.
//! 2. **Devices:** A behavioural UART implementing all three, for running without a simulator.

/// Simulated devices.
pub mod devices;
/// Collaborator traits.
pub mod traits;

pub use devices::{SharedSimUart, SimUart};
pub use traits::{BurstKind, FrameSource, RawTransport, SerialDriver};
