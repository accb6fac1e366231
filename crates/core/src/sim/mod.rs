//! Testbench driver, clocking and stimulus.
//!
//! [`Testbench`] is generic over the bus, the line oracles and the clock. For runs without an
//! external simulator, [`simulated`] wires one up against a [`SimUart`].

/// Clock abstraction.
pub mod clock;
/// Randomized stimulus.
pub mod stimulus;
/// Testbench driver.
pub mod testbench;

pub use clock::{Clock, SimClock};
pub use stimulus::Stimulus;
pub use testbench::{RunSummary, Testbench, TransferOutcome};

pub use crate::soc::devices::{SharedSimUart, SimUart};

use crate::common::error::Result;
use crate::config::Config;
use crate::regs::RegisterMap;

/// Testbench running against the behavioural UART model.
pub type SimTestbench = Testbench<SharedSimUart, SharedSimUart, SimClock>;

/// Builds a testbench and the simulated UART it drives.
///
/// The returned handle shares state with the testbench, for fault injection and inspection.
///
/// # Errors
///
/// `Config` if the configuration is invalid, `AddressOverflow` or `RegisterStraddle` if the
/// UART base misplaces a register on the configured bus.
pub fn simulated(config: &Config) -> Result<(SimTestbench, SharedSimUart)> {
    config.validate()?;
    let map = RegisterMap::from_config(config)?;
    let uart = SharedSimUart::new(SimUart::from_config(config));
    let bench = Testbench::new(uart.clone(), uart.clone(), SimClock::new(), map, config)?;
    Ok((bench, uart))
}
