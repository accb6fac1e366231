//! UART register map.
//!
//! Built once per bus variant and handed to whoever needs register locations. With an
//! 8-byte bus several registers share an aligned word:
//!
//! ```text
//! word +0x00: BAUD[1:0]          TX[7:4]
//! word +0x08: RX[3:0]            STATUS[4]
//! word +0x10: DELAY[1:0]         CONTROL[5:4]
//! word +0x18: INTERRUPT_EN[0]    IQCYC[4]
//! word +0x20: RX_THRESH[0]
//! ```

use crate::common::addr::BusAddr;
use crate::common::constants::{
    BAUD_OFFSET, BAUD_WIDTH, CONTROL_OFFSET, CONTROL_WIDTH, DELAY_OFFSET, DELAY_WIDTH,
    INTERRUPT_EN_OFFSET, INTERRUPT_EN_WIDTH, IQCYC_OFFSET, IQCYC_WIDTH, RX_OFFSET,
    RX_THRESH_OFFSET, RX_THRESH_WIDTH, RX_WIDTH, STATUS_OFFSET, STATUS_WIDTH, TX_OFFSET, TX_WIDTH,
};
use crate::common::error::{Result, VerifError};
use crate::config::{BusWidth, Config};

use super::descriptor::RegisterDescriptor;

/// Descriptors for every register of one UART instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterMap {
    /// Baud divisor (2 bytes).
    pub baud: RegisterDescriptor,
    /// Transmit data (4 bytes).
    pub tx: RegisterDescriptor,
    /// Receive data (4 bytes).
    pub rx: RegisterDescriptor,
    /// Status (1 byte).
    pub status: RegisterDescriptor,
    /// Transmit delay (2 bytes).
    pub delay: RegisterDescriptor,
    /// Control: stop, parity and width subfields (2 bytes).
    pub control: RegisterDescriptor,
    /// Interrupt enable (1 byte).
    pub interrupt_enable: RegisterDescriptor,
    /// Inter-character cycle count (1 byte).
    pub iqcyc: RegisterDescriptor,
    /// Receive threshold (1 byte).
    pub rx_threshold: RegisterDescriptor,
}

impl RegisterMap {
    /// Lays out the UART registers at `base` for a bus of the given width.
    ///
    /// # Errors
    ///
    /// - `AddressOverflow` if a register would lie past the end of the address space.
    /// - `RegisterStraddle` if `base` places a register across two bus words.
    pub fn uart(base: BusAddr, bus: BusWidth) -> Result<Self> {
        let reg = |offset: u64, width: u8| {
            let address = base
                .checked_offset(offset)
                .ok_or(VerifError::AddressOverflow { base, offset })?;
            RegisterDescriptor::at(address, width, bus)
        };
        Ok(Self {
            baud: reg(BAUD_OFFSET, BAUD_WIDTH)?,
            tx: reg(TX_OFFSET, TX_WIDTH)?,
            rx: reg(RX_OFFSET, RX_WIDTH)?,
            status: reg(STATUS_OFFSET, STATUS_WIDTH)?,
            delay: reg(DELAY_OFFSET, DELAY_WIDTH)?,
            control: reg(CONTROL_OFFSET, CONTROL_WIDTH)?,
            interrupt_enable: reg(INTERRUPT_EN_OFFSET, INTERRUPT_EN_WIDTH)?,
            iqcyc: reg(IQCYC_OFFSET, IQCYC_WIDTH)?,
            rx_threshold: reg(RX_THRESH_OFFSET, RX_THRESH_WIDTH)?,
        })
    }

    /// Lays out the UART described by `config`.
    ///
    /// # Errors
    ///
    /// `AddressOverflow` or `RegisterStraddle` if the configured base misplaces a register.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::uart(BusAddr::new(config.uart.base), config.bus.width)
    }

    /// Returns every register with its name, in address order.
    pub const fn entries(&self) -> [(&'static str, RegisterDescriptor); 9] {
        [
            ("BAUD", self.baud),
            ("TX", self.tx),
            ("RX", self.rx),
            ("STATUS", self.status),
            ("DELAY", self.delay),
            ("CONTROL", self.control),
            ("INTERRUPT_EN", self.interrupt_enable),
            ("IQCYC", self.iqcyc),
            ("RX_THRESH", self.rx_threshold),
        ]
    }
}
