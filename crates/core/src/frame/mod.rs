//! Framing configuration and observed frames.
//!
//! [`FrameConfigState`] collects the framing parameters written across the baud and control
//! registers; once every field has been set it yields a [`FrameConfig`] snapshot for the
//! oracle. [`ObservedFrame`] is what the external serializer captured on the wire.

/// Frames captured by the serializer oracle.
pub mod observed;
/// Accumulated framing configuration and baud derivation.
pub mod state;

pub use observed::ObservedFrame;
pub use state::{FrameConfig, FrameConfigState};
