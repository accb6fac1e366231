//! Configuration system for the verification harness.
//!
//! This module defines the configuration structures used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline values matching the reference UART integration (base, clock, divisor).
//! 2. **Structures:** Hierarchical config for the bus, the UART under test and the run itself.
//! 3. **Variants:** Native bus width (8 or 4 bytes) and control register width layout.
//!
//! Configuration is supplied as JSON (`Config::from_json` / `Config::from_file`) or via
//! `Config::default()`; every field may be omitted.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codec::ControlLayout;
use crate::common::constants::UART_WINDOW;
use crate::common::error::{Result, VerifError};

/// Default configuration constants for the harness.
mod defaults {
    use crate::common::constants;

    /// Base address of the UART register window.
    pub const UART_BASE: u64 = constants::UART_BASE;

    /// Core clock frequency feeding the baud generator (10 MHz).
    pub const CLOCK_HZ: u64 = constants::CLOCK_HZ;

    /// Baud divisor programmed by default (10 MHz / (16 * 5) = 125 000 baud).
    pub const DIVISOR: u32 = 5;

    /// Clock cycles to wait after configuration before traffic starts.
    ///
    /// Gives the asynchronous FIFOs inside the UART time to settle.
    pub const SETTLE_CYCLES: u64 = 10;

    /// Fixed bus access latency in cycles charged per aligned transfer.
    pub const BUS_LATENCY: u64 = 4;

    /// Number of randomized transmit/receive iterations per run.
    pub const ITERATIONS: u32 = 1;

    /// Seed for the stimulus generator.
    pub const SEED: u64 = 0x5EED_0001_1300;
}

/// Native transfer width of the register bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum BusWidth {
    /// 64-bit bus; every transfer moves 8 bytes (AXI `size` = 3).
    #[default]
    #[serde(alias = "eight", alias = "64")]
    Eight,
    /// 32-bit bus; every transfer moves 4 bytes (AXI `size` = 2).
    #[serde(alias = "four", alias = "32")]
    Four,
}

impl BusWidth {
    /// Returns the transfer width in bytes.
    pub const fn bytes(self) -> u64 {
        match self {
            Self::Eight => 8,
            Self::Four => 4,
        }
    }

    /// Returns the AXI `size` encoding (log2 of the byte count).
    pub const fn axi_size(self) -> u8 {
        match self {
            Self::Eight => 3,
            Self::Four => 2,
        }
    }

    /// Returns a mask covering one full transfer.
    pub const fn word_mask(self) -> u64 {
        match self {
            Self::Eight => u64::MAX,
            Self::Four => 0xFFFF_FFFF,
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Register bus parameters.
    #[serde(default)]
    pub bus: BusConfig,
    /// UART under test.
    #[serde(default)]
    pub uart: UartConfig,
    /// Run control.
    #[serde(default)]
    pub run: RunConfig,
}

impl Config {
    /// Parses a configuration from a JSON string and validates it.
    ///
    /// # Errors
    ///
    /// `Config` if the JSON is malformed or a value fails validation.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| VerifError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// `Config` if the file cannot be read, parsed or validated.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| VerifError::config(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    /// Checks cross-field constraints that serde defaults cannot express.
    ///
    /// # Errors
    ///
    /// `Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.uart.clock_hz == 0 {
            return Err(VerifError::config("uart.clock_hz must be non-zero"));
        }
        if self.uart.divisor == 0 {
            return Err(VerifError::config("uart.divisor must be non-zero"));
        }
        if self.uart.divisor > u32::from(u16::MAX) {
            return Err(VerifError::config("uart.divisor must fit the 16-bit baud register"));
        }
        if self.uart.base.checked_add(UART_WINDOW).is_none() {
            return Err(VerifError::config(format!(
                "uart.base {:#x} leaves no room for the {UART_WINDOW:#x}-byte register window",
                self.uart.base
            )));
        }
        if self.uart.base % self.bus.width.bytes() != 0 {
            return Err(VerifError::config(format!(
                "uart.base {:#x} is not aligned to the {}-byte bus",
                self.uart.base,
                self.bus.width.bytes()
            )));
        }
        Ok(())
    }
}

/// Register bus configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BusConfig {
    /// Native transfer width; every register access is widened to it.
    #[serde(default)]
    pub width: BusWidth,

    /// Access latency in cycles charged per aligned transfer by the simulated bus.
    #[serde(default = "BusConfig::default_latency")]
    pub latency_cycles: u64,
}

impl BusConfig {
    /// Returns the default bus latency.
    fn default_latency() -> u64 {
        defaults::BUS_LATENCY
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            width: BusWidth::default(),
            latency_cycles: defaults::BUS_LATENCY,
        }
    }
}

/// UART under test.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UartConfig {
    /// Register window base address
    #[serde(default = "UartConfig::default_base")]
    pub base: u64,

    /// Core clock feeding the baud generator, in Hz
    #[serde(default = "UartConfig::default_clock_hz")]
    pub clock_hz: u64,

    /// Baud divisor written to the baud register
    #[serde(default = "UartConfig::default_divisor")]
    pub divisor: u32,

    /// Shape of the data-width subfield in the control register
    #[serde(default)]
    pub control_layout: ControlLayout,

    /// Cycles to wait after configuration and before reading received data
    #[serde(default = "UartConfig::default_settle_cycles")]
    pub settle_cycles: u64,
}

impl UartConfig {
    /// Returns the default UART base address.
    fn default_base() -> u64 {
        defaults::UART_BASE
    }

    /// Returns the default core clock.
    fn default_clock_hz() -> u64 {
        defaults::CLOCK_HZ
    }

    /// Returns the default baud divisor.
    fn default_divisor() -> u32 {
        defaults::DIVISOR
    }

    /// Returns the default settle delay.
    fn default_settle_cycles() -> u64 {
        defaults::SETTLE_CYCLES
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            base: defaults::UART_BASE,
            clock_hz: defaults::CLOCK_HZ,
            divisor: defaults::DIVISOR,
            control_layout: ControlLayout::default(),
            settle_cycles: defaults::SETTLE_CYCLES,
        }
    }
}

/// Run control.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunConfig {
    /// Randomized transmit/receive iterations
    #[serde(default = "RunConfig::default_iterations")]
    pub iterations: u32,

    /// Stimulus generator seed
    #[serde(default = "RunConfig::default_seed")]
    pub seed: u64,

    /// Where to write the coverage report, if anywhere
    #[serde(default)]
    pub coverage_path: Option<PathBuf>,
}

impl RunConfig {
    /// Returns the default iteration count.
    fn default_iterations() -> u32 {
        defaults::ITERATIONS
    }

    /// Returns the default stimulus seed.
    fn default_seed() -> u64 {
        defaults::SEED
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            iterations: defaults::ITERATIONS,
            seed: defaults::SEED,
            coverage_path: None,
        }
    }
}
