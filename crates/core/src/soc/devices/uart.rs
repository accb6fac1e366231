//! Behavioural model of the UART under test.
//!
//! Implements the register block behind a word-granular bus port and stands in for the
//! serializer / deserializer oracles around it:
//! - **Bus port (`RawTransport`):** Only aligned transfers of the native width are accepted.
//!   Every write strobes all byte lanes of the word.
//! - **Transmit (`FrameSource`):** A write touching the TX lanes serializes a character with
//!   the framing currently held in the BAUD and CONTROL registers and queues the captured frame.
//! - **Receive (`SerialDriver`):** A driven character lands in RX masked to the configured width
//!   and stays valid until RX is read. Without decodable framing it is dropped, as on transmit.
//!
//! Negative tests can make chosen words answer with a bus error, or force fields of the
//! captured frames to disagree with the configuration.

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace, warn};

use crate::codec::{ControlFields, ControlLayout, DataWidth, Parity, StopBits};
use crate::common::addr::BusAddr;
use crate::common::constants::{
    BAUD_OFFSET, BAUD_OVERSAMPLE, CONTROL_OFFSET, RX_OFFSET, RX_WIDTH, STATUS_OFFSET,
    STATUS_RX_VALID, STATUS_TX_EMPTY, TX_OFFSET, TX_WIDTH, UART_WINDOW,
};
use crate::common::error::TransportError;
use crate::config::{BusWidth, Config};
use crate::frame::ObservedFrame;
use crate::soc::traits::{BurstKind, FrameSource, RawTransport, SerialDriver};

/// Fields forced onto every captured frame, replacing what the serializer measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameOverride {
    /// Parity reported instead of the configured one.
    pub parity: Option<Parity>,
    /// Stop-bit count reported instead of the configured one.
    pub stop_bits: Option<StopBits>,
    /// Width reported instead of the configured one.
    pub bit_width: Option<DataWidth>,
    /// XOR applied to the captured data bits.
    pub data_flip: u32,
}

/// Simulated UART register block with attached line oracles.
#[derive(Debug)]
pub struct SimUart {
    base: BusAddr,
    bus: BusWidth,
    layout: ControlLayout,
    latency: u64,
    regs: [u8; UART_WINDOW as usize],
    rx_valid: bool,
    frames: VecDeque<ObservedFrame>,
    faults: HashSet<BusAddr>,
    frame_override: FrameOverride,
    transfers: u64,
    cycles: u64,
}

impl SimUart {
    /// Creates a UART at `base` behind a bus of width `bus`.
    pub fn new(base: BusAddr, bus: BusWidth, layout: ControlLayout) -> Self {
        Self {
            base,
            bus,
            layout,
            latency: 1,
            regs: [0; UART_WINDOW as usize],
            rx_valid: false,
            frames: VecDeque::new(),
            faults: HashSet::new(),
            frame_override: FrameOverride::default(),
            transfers: 0,
            cycles: 0,
        }
    }

    /// Creates the UART described by `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            BusAddr::new(config.uart.base),
            config.bus.width,
            config.uart.control_layout,
        )
        .with_latency(config.bus.latency_cycles)
    }

    /// Sets the bus cycles charged per transfer.
    #[must_use]
    pub const fn with_latency(mut self, cycles: u64) -> Self {
        self.latency = cycles;
        self
    }

    /// Makes every transfer to the word containing `address` fail with a bus error.
    pub fn inject_fault(&mut self, address: BusAddr) {
        let _ = self.faults.insert(address.align_down(self.bus.bytes()));
    }

    /// Removes every injected bus fault.
    pub fn clear_faults(&mut self) {
        self.faults.clear();
    }

    /// Forces fields of subsequently captured frames.
    pub const fn force_observed(&mut self, frame_override: FrameOverride) {
        self.frame_override = frame_override;
    }

    /// Stops forcing captured frame fields.
    pub fn clear_override(&mut self) {
        self.frame_override = FrameOverride::default();
    }

    /// Returns the number of bus transfers served.
    pub const fn transfers(&self) -> u64 {
        self.transfers
    }

    /// Returns the bus and line cycles consumed so far.
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Returns the number of captured frames not yet read.
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Reads a register straight from the register file, bypassing the bus.
    pub fn peek(&self, offset: u64, width: u8) -> u32 {
        (0..u64::from(width))
            .rev()
            .fold(0u32, |acc, i| (acc << 8) | u32::from(self.reg_byte(offset + i)))
    }

    /// Clears the register file, the receive flag and every queued frame.
    pub fn reset(&mut self) {
        self.regs = [0; UART_WINDOW as usize];
        self.rx_valid = false;
        self.frames.clear();
        debug!("UART at {} reset", self.base);
    }

    fn reg_byte(&self, offset: u64) -> u8 {
        self.regs.get(offset as usize).copied().unwrap_or(0)
    }

    fn status(&self) -> u8 {
        let mut status = STATUS_TX_EMPTY;
        if self.rx_valid {
            status |= STATUS_RX_VALID;
        }
        status
    }

    /// Validates a transfer and returns the register offset of its first byte.
    fn check(&self, address: BusAddr, length: usize, size: u8) -> Result<u64, TransportError> {
        let native = self.bus.bytes();
        if size != self.bus.axi_size() || length as u64 != native {
            return Err(TransportError::UnsupportedSize {
                size: length as u64,
                native,
            });
        }
        if !address.is_aligned(native) {
            return Err(TransportError::Misaligned {
                address,
                size: native,
            });
        }
        let end = address.val().checked_add(native);
        let window_end = self.base.val().saturating_add(UART_WINDOW);
        if address < self.base || end.is_none_or(|end| end > window_end) {
            return Err(TransportError::Unmapped { address });
        }
        if self.faults.contains(&address) {
            warn!("Injected bus error at {address}");
            return Err(TransportError::BusError { address });
        }
        Ok(address.val() - self.base.val())
    }

    fn charge(&mut self) {
        self.transfers += 1;
        self.cycles += self.latency;
    }

    fn control_fields(&self) -> Option<ControlFields> {
        let raw = self.peek(CONTROL_OFFSET, 2) as u16;
        ControlFields::unpack(raw, self.layout)
            .inspect_err(|e| debug!("UART control {raw:#06x} undecodable: {e}"))
            .ok()
    }

    /// Serializes one character with the current framing.
    fn transmit(&mut self, data: u32) {
        let divisor = self.peek(BAUD_OFFSET, 2);
        if divisor == 0 {
            debug!("UART TX {data:#x} dropped: baud divisor is zero");
            return;
        }
        let Some(fields) = self.control_fields() else {
            return;
        };
        let forced = self.frame_override;
        let width = forced.bit_width.unwrap_or(fields.width);
        let frame = ObservedFrame::new(
            (data ^ forced.data_flip) & width.mask(),
            forced.parity.unwrap_or(fields.parity),
            forced.stop_bits.unwrap_or(fields.stop),
            width,
        );
        // Line time in half bits: start, data, parity, stop.
        let half_bits = 2 * (1 + u64::from(fields.width.bits()))
            + 2 * u64::from(fields.parity != Parity::None)
            + u64::from(fields.stop.half_bits());
        self.cycles += half_bits * BAUD_OVERSAMPLE * u64::from(divisor) / 2;
        debug!(
            "UART TX {:#x}: parity={} stop={} width={}",
            frame.data(),
            frame.parity(),
            frame.stop_bits(),
            frame.bit_width()
        );
        self.frames.push_back(frame);
    }
}

impl RawTransport for SimUart {
    fn native_width(&self) -> BusWidth {
        self.bus
    }

    fn read(
        &mut self,
        address: BusAddr,
        length: usize,
        _burst: BurstKind,
        size: u8,
    ) -> Result<Vec<u8>, TransportError> {
        let start = self.check(address, length, size)?;
        self.charge();
        let lanes = start..start + length as u64;
        let data = lanes
            .clone()
            .map(|offset| match offset {
                STATUS_OFFSET => self.status(),
                o if (TX_OFFSET..TX_OFFSET + u64::from(TX_WIDTH)).contains(&o) => 0,
                o => self.reg_byte(o),
            })
            .collect();
        trace!("UART read {address}: {data:02x?}");
        // Reading RX consumes the character; STATUS in the same word still shows it.
        if self.rx_valid && lanes.contains(&RX_OFFSET) {
            self.rx_valid = false;
            debug!("UART RX consumed");
        }
        Ok(data)
    }

    fn write(
        &mut self,
        address: BusAddr,
        data: &[u8],
        _burst: BurstKind,
        size: u8,
    ) -> Result<(), TransportError> {
        let start = self.check(address, data.len(), size)?;
        self.charge();
        trace!("UART write {address}: {data:02x?}");
        let mut tx = None;
        for (offset, &byte) in (start..).zip(data) {
            match offset {
                STATUS_OFFSET => {}
                o if (TX_OFFSET..TX_OFFSET + u64::from(TX_WIDTH)).contains(&o) => {
                    let lane = (o - TX_OFFSET) * 8;
                    *tx.get_or_insert(0u32) |= u32::from(byte) << lane;
                }
                o => {
                    if let Some(reg) = self.regs.get_mut(o as usize) {
                        *reg = byte;
                    }
                }
            }
        }
        if let Some(value) = tx {
            self.transmit(value);
        }
        Ok(())
    }
}

impl FrameSource for SimUart {
    fn wait(&mut self) {
        // Frames are complete by the time the TX write returns.
    }

    fn read_frame(&mut self) -> Option<ObservedFrame> {
        self.frames.pop_front()
    }
}

impl SerialDriver for SimUart {
    fn send(&mut self, data: u32) {
        let Some(fields) = self.control_fields() else {
            debug!("UART RX {data:#x} dropped: control word undecodable");
            return;
        };
        let width = fields.width;
        let value = data & width.mask();
        for i in 0..u64::from(RX_WIDTH) {
            if let Some(reg) = self.regs.get_mut((RX_OFFSET + i) as usize) {
                *reg = (value >> (i * 8)) as u8;
            }
        }
        self.rx_valid = true;
        debug!("UART RX {value:#x} (driven {data:#x}, width {width})");
    }
}

/// Cloneable handle to one [`SimUart`], so the bus port and the line oracles can be owned
/// by different parts of a testbench.
#[derive(Debug, Clone)]
pub struct SharedSimUart {
    inner: Arc<Mutex<SimUart>>,
}

impl SharedSimUart {
    /// Wraps a UART for sharing.
    pub fn new(uart: SimUart) -> Self {
        Self {
            inner: Arc::new(Mutex::new(uart)),
        }
    }

    /// Runs `f` with exclusive access to the UART.
    pub fn with<R>(&self, f: impl FnOnce(&mut SimUart) -> R) -> R {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, SimUart> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RawTransport for SharedSimUart {
    fn native_width(&self) -> BusWidth {
        self.lock().native_width()
    }

    fn read(
        &mut self,
        address: BusAddr,
        length: usize,
        burst: BurstKind,
        size: u8,
    ) -> Result<Vec<u8>, TransportError> {
        self.lock().read(address, length, burst, size)
    }

    fn write(
        &mut self,
        address: BusAddr,
        data: &[u8],
        burst: BurstKind,
        size: u8,
    ) -> Result<(), TransportError> {
        self.lock().write(address, data, burst, size)
    }
}

impl FrameSource for SharedSimUart {
    fn wait(&mut self) {
        self.lock().wait();
    }

    fn read_frame(&mut self) -> Option<ObservedFrame> {
        self.lock().read_frame()
    }
}

impl SerialDriver for SharedSimUart {
    fn send(&mut self, data: u32) {
        self.lock().send(data);
    }
}
