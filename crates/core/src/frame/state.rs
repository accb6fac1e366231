//! Accumulated framing configuration.
//!
//! The divisor arrives through the baud register and the remaining fields through the
//! control register, possibly in separate writes. Every field stays unset until it is
//! written explicitly; reading an unset field is `ConfigurationIncomplete`, never a default.
//! A snapshot is only handed out while the divisor gives a positive baud rate.

use tracing::debug;

use crate::codec::{ControlFields, ControlLayout, DataWidth, Parity, StopBits};
use crate::common::constants::BAUD_OVERSAMPLE;
use crate::common::error::{Result, VerifError};

/// Baud rate for `clock_hz` and `divisor`: `clock_hz / (16 * divisor)`, rounded down.
///
/// # Errors
///
/// `DivisionUndefined` if `divisor` is zero or the quotient is zero.
pub fn baud_rate(clock_hz: u64, divisor: u32) -> Result<u64> {
    let denominator = BAUD_OVERSAMPLE * u64::from(divisor);
    match clock_hz.checked_div(denominator) {
        Some(baud) if baud > 0 => Ok(baud),
        _ => Err(VerifError::DivisionUndefined { clock_hz, divisor }),
    }
}

/// Complete framing configuration; every field is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameConfig {
    /// Baud divisor.
    pub divisor: u32,
    /// Parity mode.
    pub parity: Parity,
    /// Stop-bit count.
    pub stop_bits: StopBits,
    /// Character width.
    pub data_width: DataWidth,
}

impl FrameConfig {
    /// Derives the baud rate from the core clock.
    ///
    /// # Errors
    ///
    /// `DivisionUndefined` if the divisor is zero or too large for the clock.
    pub fn baud_rate(&self, clock_hz: u64) -> Result<u64> {
        baud_rate(clock_hz, self.divisor)
    }

    /// Masks `data` to the configured character width.
    pub const fn mask_data(&self, data: u32) -> u32 {
        data & self.data_width.mask()
    }
}

/// Framing parameters as written so far in the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameConfigState {
    divisor: Option<u32>,
    parity: Option<Parity>,
    stop_bits: Option<StopBits>,
    data_width: Option<DataWidth>,
}

impl FrameConfigState {
    /// Creates an empty state with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the divisor written to the baud register.
    pub const fn set_divisor(&mut self, divisor: u32) {
        self.divisor = Some(divisor);
    }

    /// Records a parity mode directly (including the MARK/SPACE modes the control register lacks).
    pub const fn set_parity(&mut self, parity: Parity) {
        self.parity = Some(parity);
    }

    /// Records a stop-bit count directly.
    pub const fn set_stop_bits(&mut self, stop_bits: StopBits) {
        self.stop_bits = Some(stop_bits);
    }

    /// Records a character width directly.
    pub const fn set_data_width(&mut self, data_width: DataWidth) {
        self.data_width = Some(data_width);
    }

    /// Decodes the framing subfields of a control word and records them.
    ///
    /// The divisor is not part of the control word and is left as it was. On a decode
    /// failure nothing is recorded.
    ///
    /// # Errors
    ///
    /// `InvalidEncoding` if any subfield holds an unassigned pattern.
    pub fn apply_control_fields(
        &mut self,
        raw_control: u16,
        layout: ControlLayout,
    ) -> Result<ControlFields> {
        let fields = ControlFields::unpack(raw_control, layout)?;
        self.stop_bits = Some(fields.stop);
        self.parity = Some(fields.parity);
        self.data_width = Some(fields.width);
        debug!(
            "control {:#06x}: stop={} parity={} width={}",
            raw_control, fields.stop, fields.parity, fields.width
        );
        Ok(fields)
    }

    /// Derives the baud rate from the recorded divisor.
    ///
    /// # Errors
    ///
    /// `ConfigurationIncomplete` if no divisor was written, `DivisionUndefined` if it is zero.
    pub fn derive_baud_rate(&self, clock_hz: u64) -> Result<u64> {
        let divisor = self
            .divisor
            .ok_or(VerifError::ConfigurationIncomplete { missing: "baud divisor" })?;
        baud_rate(clock_hz, divisor)
    }

    /// Returns `true` once every field has been set.
    pub const fn is_complete(&self) -> bool {
        self.divisor.is_some()
            && self.parity.is_some()
            && self.stop_bits.is_some()
            && self.data_width.is_some()
    }

    /// Returns the complete configuration, checked against the core clock.
    ///
    /// # Errors
    ///
    /// - `ConfigurationIncomplete` naming the first field that was never set.
    /// - `DivisionUndefined` if the recorded divisor yields no positive baud rate at `clock_hz`.
    pub fn snapshot(&self, clock_hz: u64) -> Result<FrameConfig> {
        let Some(divisor) = self.divisor else {
            return Err(VerifError::ConfigurationIncomplete { missing: "baud divisor" });
        };
        let Some(parity) = self.parity else {
            return Err(VerifError::ConfigurationIncomplete { missing: "parity" });
        };
        let Some(stop_bits) = self.stop_bits else {
            return Err(VerifError::ConfigurationIncomplete { missing: "stop bits" });
        };
        let Some(data_width) = self.data_width else {
            return Err(VerifError::ConfigurationIncomplete { missing: "data width" });
        };
        let _ = baud_rate(clock_hz, divisor)?;
        Ok(FrameConfig {
            divisor,
            parity,
            stop_bits,
            data_width,
        })
    }

    /// Forgets every field, as after a device reset.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
