//! Simulated devices attached to the register bus.

/// Behavioural UART model and its shared handle.
pub mod uart;

pub use uart::{FrameOverride, SharedSimUart, SimUart};
