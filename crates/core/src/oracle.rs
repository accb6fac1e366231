//! Verification oracle.
//!
//! Compares a frame captured on the transmit line against the framing configuration that
//! was in force when the character was written. Each field is checked on its own so a
//! single mismatch never hides the others:
//! 1. **Data:** The observed bits equal the written value masked to the configured width.
//! 2. **Parity:** Same parity mode.
//! 3. **Stop Bits:** Same stop-bit count.
//! 4. **Width:** Same number of data bits.
//!
//! A mismatch is a result, not an error.

use std::fmt;

use tracing::warn;

use crate::codec::{DataWidth, Parity, StopBits};
use crate::frame::{FrameConfig, ObservedFrame};

/// Expected and observed value of one checked field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCheck<T> {
    /// Value derived from the configuration.
    pub expected: T,
    /// Value observed on the device.
    pub actual: T,
}

impl<T: PartialEq> FieldCheck<T> {
    /// Pairs an expected and an observed value.
    pub const fn new(expected: T, actual: T) -> Self {
        Self { expected, actual }
    }

    /// Returns `true` if the observed value is the expected one.
    pub fn matches(&self) -> bool {
        self.expected == self.actual
    }
}

/// Names of the checked fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Character data bits.
    Data,
    /// Parity mode.
    Parity,
    /// Stop-bit count.
    StopBits,
    /// Character width.
    Width,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Data => "data",
            Self::Parity => "parity",
            Self::StopBits => "stop bits",
            Self::Width => "width",
        };
        f.write_str(name)
    }
}

/// Outcome of checking one transmitted frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationResult {
    /// Data bits check.
    pub data: FieldCheck<u32>,
    /// Parity mode check.
    pub parity: FieldCheck<Parity>,
    /// Stop-bit count check.
    pub stop_bits: FieldCheck<StopBits>,
    /// Width check.
    pub width: FieldCheck<DataWidth>,
}

impl VerificationResult {
    /// Returns `true` if all four fields match.
    pub fn all_match(&self) -> bool {
        self.data.matches()
            && self.parity.matches()
            && self.stop_bits.matches()
            && self.width.matches()
    }

    /// Lists the fields that did not match, in check order.
    pub fn mismatches(&self) -> Vec<Field> {
        [
            (Field::Data, self.data.matches()),
            (Field::Parity, self.parity.matches()),
            (Field::StopBits, self.stop_bits.matches()),
            (Field::Width, self.width.matches()),
        ]
        .into_iter()
        .filter_map(|(field, ok)| (!ok).then_some(field))
        .collect()
    }
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = |ok: bool| if ok { "ok" } else { "MISMATCH" };
        write!(
            f,
            "data {:#x}/{:#x} {}, parity {}/{} {}, stop {}/{} {}, width {}/{} {}",
            self.data.expected,
            self.data.actual,
            mark(self.data.matches()),
            self.parity.expected,
            self.parity.actual,
            mark(self.parity.matches()),
            self.stop_bits.expected,
            self.stop_bits.actual,
            mark(self.stop_bits.matches()),
            self.width.expected,
            self.width.actual,
            mark(self.width.matches()),
        )
    }
}

/// Checks a transmitted frame against the configuration it was sent under.
///
/// `written` is the full value stored to the transmit register; only the low
/// `config.data_width` bits are expected on the wire.
pub fn verify_tx(
    config: &FrameConfig,
    written: u32,
    observed: &ObservedFrame,
) -> VerificationResult {
    let result = VerificationResult {
        data: FieldCheck::new(config.mask_data(written), observed.data()),
        parity: FieldCheck::new(config.parity, observed.parity()),
        stop_bits: FieldCheck::new(config.stop_bits, observed.stop_bits()),
        width: FieldCheck::new(config.data_width, observed.bit_width()),
    };
    for field in result.mismatches() {
        warn!("TX {field} mismatch: {result}");
    }
    result
}

/// Checks a character read back through the receive register.
///
/// `driven` is the value put on the receive line; the receiver keeps only the configured width.
pub fn verify_rx(config: &FrameConfig, driven: u32, read_back: u32) -> FieldCheck<u32> {
    let check = FieldCheck::new(config.mask_data(driven), read_back);
    if !check.matches() {
        warn!(
            "RX data mismatch: expected {:#x}, read {:#x}",
            check.expected, check.actual
        );
    }
    check
}
