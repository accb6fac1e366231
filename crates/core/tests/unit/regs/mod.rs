//! # Register Layer Tests

/// Read-modify-write access over both bus widths.
pub mod access;
