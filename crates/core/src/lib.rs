//! UART register-access and framing-verification library.
//!
//! This crate drives a bus-attached UART through its register map and checks that the
//! framing it was configured with shows up in the frames it serializes. It provides:
//! 1. **Codec:** Encoding and decoding of the parity, stop-bit and data-width control subfields.
//! 2. **Registers:** Sub-word read / write / masked write via read-modify-write of the
//!    aligned bus word.
//! 3. **Frame:** Accumulated framing configuration and baud-rate derivation.
//! 4. **Oracle:** Per-field comparison of observed frames against the configuration.
//! 5. **Coverage:** Binned sampling of exercised (data, stop, parity, width) tuples.
//! 6. **SoC / Sim:** Raw transport seam, a behavioural UART model and the testbench driver.

/// Common types (bus addresses, constants, errors).
pub mod common;
/// Harness configuration (defaults, bus and UART variants, run parameters).
pub mod config;
/// Bitfield codec for the control register subfields.
pub mod codec;
/// Coverage sampling and report persistence.
pub mod coverage;
/// Framing configuration state and observed frames.
pub mod frame;
/// Verification oracle producing per-field results.
pub mod oracle;
/// Register descriptors, register map and the read-modify-write access layer.
pub mod regs;
/// Testbench driver, clock and randomized stimulus.
pub mod sim;
/// Raw transport seam and the simulated UART device.
pub mod soc;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Crate-wide error type and result alias.
pub use crate::common::error::{Result, TransportError, VerifError};
/// Testbench driver; construct with `Testbench::new`.
pub use crate::sim::Testbench;
