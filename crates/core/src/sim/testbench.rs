//! UART testbench driver.
//!
//! Sequences register accesses, waits and oracle checks the way a directed UART test does:
//! 1. **Initialize:** Clear delay, inter-character cycles, RX threshold and interrupt enable.
//! 2. **Baud:** Write the divisor and read it back.
//! 3. **Configure:** Merge stop, parity and width into the control register, read it back
//!    and record the decoded fields.
//! 4. **Transmit:** Sample coverage, write TX, wait for the serializer and check the frame.
//! 5. **Receive:** Drive a character into RX, let it settle, read it back and check it.

use std::fmt;

use tracing::{debug, info, warn};

use crate::codec::{ControlFields, ControlLayout};
use crate::common::error::{Result, VerifError};
use crate::config::Config;
use crate::coverage::{CoverageSample, CoverageSampler};
use crate::frame::FrameConfigState;
use crate::frame::state::baud_rate;
use crate::oracle::{FieldCheck, VerificationResult, verify_rx, verify_tx};
use crate::regs::{RegisterAccess, RegisterMap};
use crate::soc::traits::{FrameSource, RawTransport, SerialDriver};

use super::clock::Clock;
use super::stimulus::Stimulus;

/// Result of one transmit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    /// A frame was captured and checked.
    Verified(VerificationResult),
    /// The serializer captured nothing although a character was written.
    NoFrame,
}

impl TransferOutcome {
    /// Returns `true` if a frame was captured and every field matched.
    pub fn passed(&self) -> bool {
        matches!(self, Self::Verified(result) if result.all_match())
    }

    /// Returns the per-field result, if a frame was captured.
    pub const fn result(&self) -> Option<&VerificationResult> {
        match self {
            Self::Verified(result) => Some(result),
            Self::NoFrame => None,
        }
    }
}

/// Tally of a randomized run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Cycles executed.
    pub iterations: u32,
    /// Transmitted characters whose frame matched on every field.
    pub tx_passed: u32,
    /// Transmitted characters with at least one field mismatch.
    pub tx_failed: u32,
    /// Transmitted characters for which no frame was captured.
    pub no_frame: u32,
    /// Received characters read back correctly.
    pub rx_passed: u32,
    /// Received characters read back wrong.
    pub rx_failed: u32,
}

impl RunSummary {
    /// Returns `true` if nothing failed.
    pub const fn passed(&self) -> bool {
        self.tx_failed == 0 && self.no_frame == 0 && self.rx_failed == 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} iterations: tx {} passed / {} failed / {} no frame, rx {} passed / {} failed",
            self.iterations,
            self.tx_passed,
            self.tx_failed,
            self.no_frame,
            self.rx_passed,
            self.rx_failed
        )
    }
}

/// Drives one UART through its registers and checks what it puts on the line.
///
/// `T` is the bus, `S` the serializer / deserializer oracle pair and `C` the clock.
#[derive(Debug)]
pub struct Testbench<T, S, C> {
    regs: RegisterAccess<T>,
    map: RegisterMap,
    state: FrameConfigState,
    layout: ControlLayout,
    clock_hz: u64,
    settle_cycles: u64,
    clock: C,
    source: S,
    coverage: CoverageSampler,
}

impl<T, S, C> Testbench<T, S, C>
where
    T: RawTransport,
    S: FrameSource + SerialDriver,
    C: Clock,
{
    /// Assembles a testbench.
    ///
    /// # Errors
    ///
    /// `Config` if the transport's native width differs from the configured bus width.
    pub fn new(
        transport: T,
        source: S,
        clock: C,
        map: RegisterMap,
        config: &Config,
    ) -> Result<Self> {
        let regs = RegisterAccess::new(transport);
        if regs.bus_width() != config.bus.width {
            return Err(VerifError::config(format!(
                "transport is {} bytes wide, configuration expects {}",
                regs.bus_width().bytes(),
                config.bus.width.bytes()
            )));
        }
        Ok(Self {
            regs,
            map,
            state: FrameConfigState::new(),
            layout: config.uart.control_layout,
            clock_hz: config.uart.clock_hz,
            settle_cycles: config.uart.settle_cycles,
            clock,
            source,
            coverage: CoverageSampler::new(),
        })
    }

    /// Returns the register access layer.
    pub const fn registers(&mut self) -> &mut RegisterAccess<T> {
        &mut self.regs
    }

    /// Returns the register map.
    pub const fn map(&self) -> &RegisterMap {
        &self.map
    }

    /// Returns the framing configuration recorded so far.
    pub const fn frame_state(&self) -> &FrameConfigState {
        &self.state
    }

    /// Returns the framing configuration mutably, for directed tests.
    pub const fn frame_state_mut(&mut self) -> &mut FrameConfigState {
        &mut self.state
    }

    /// Returns the coverage bins.
    pub const fn coverage(&self) -> &CoverageSampler {
        &self.coverage
    }

    /// Returns the line oracles.
    pub const fn source(&mut self) -> &mut S {
        &mut self.source
    }

    /// Returns the clock.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Clears the auxiliary registers and forgets the recorded framing.
    ///
    /// # Errors
    ///
    /// `Transport` on bus failure.
    pub fn initialize(&mut self) -> Result<()> {
        let steps = [
            ("DELAY", self.map.delay),
            ("IQCYC", self.map.iqcyc),
            ("RX_THRESH", self.map.rx_threshold),
            ("INTERRUPT_EN", self.map.interrupt_enable),
        ];
        for (name, reg) in steps {
            self.regs.write(&reg, 0)?;
            info!("{name} register initialized");
        }
        self.state.reset();
        Ok(())
    }

    /// Writes the baud divisor, reads it back and records it.
    ///
    /// # Returns
    ///
    /// The derived baud rate.
    ///
    /// # Errors
    ///
    /// - `ValueOutOfRange` if `divisor` does not fit the baud register.
    /// - `ReadbackMismatch` if the register reads back a different value.
    /// - `DivisionUndefined` if no positive baud rate results; the divisor is not recorded.
    /// - `Transport` on bus failure.
    pub fn program_baud(&mut self, divisor: u32) -> Result<u64> {
        self.regs.write(&self.map.baud, divisor)?;
        let actual = self.regs.read(&self.map.baud)?;
        if actual != divisor {
            return Err(VerifError::ReadbackMismatch {
                register: "BAUD",
                expected: divisor,
                actual,
            });
        }
        let baud = baud_rate(self.clock_hz, divisor)?;
        self.state.set_divisor(divisor);
        self.clock.wait_cycles(self.settle_cycles);
        info!("Baud divisor {divisor} programmed ({baud} baud)");
        Ok(baud)
    }

    /// Merges framing fields into the control register and verifies the read-back.
    ///
    /// Bits of the control register outside the framing subfields are preserved.
    ///
    /// # Returns
    ///
    /// The raw control value written.
    ///
    /// # Errors
    ///
    /// - `UnsupportedField` if the parity mode has no control register encoding.
    /// - `ReadbackMismatch` if the register reads back a different value.
    /// - `Transport` on bus failure.
    pub fn configure(&mut self, fields: ControlFields) -> Result<u16> {
        let layout = self.layout;
        let written = self.regs.modify(&self.map.control, |current| {
            debug!("Initial CTRL value: {current:#06x}");
            fields.merge_into(current as u16, layout).map(u32::from)
        })?;
        let actual = self.regs.read(&self.map.control)?;
        if actual != written {
            return Err(VerifError::ReadbackMismatch {
                register: "CONTROL",
                expected: written,
                actual,
            });
        }
        let _ = self.state.apply_control_fields(actual as u16, layout)?;
        self.clock.wait_cycles(self.settle_cycles);
        info!(
            "Configured stop={} parity={} width={} (CTRL {actual:#06x})",
            fields.stop, fields.parity, fields.width
        );
        Ok(actual as u16)
    }

    /// Sends one character and checks the captured frame.
    ///
    /// # Errors
    ///
    /// - `ConfigurationIncomplete` if any framing field is unset.
    /// - `DivisionUndefined` if the recorded divisor gives no positive baud rate.
    /// - `Transport` on bus failure.
    pub fn transmit(&mut self, data: u32) -> Result<TransferOutcome> {
        let config = self.state.snapshot(self.clock_hz)?;
        let fields = ControlFields::new(config.stop_bits, config.parity, config.data_width);
        match CoverageSample::new(data, &fields) {
            Ok(sample) => self.coverage.sample(sample),
            Err(e) => debug!("Coverage not sampled: {e}"),
        }

        let status = self.read_status()?;
        debug!("Status before TX: {status:#04x}");
        self.source.discard();
        self.regs.write(&self.map.tx, data)?;
        self.source.wait();

        let outcome = match self.source.read_frame() {
            Some(frame) => {
                let result = verify_tx(&config, data, &frame);
                info!("TX {data:#x}: {result}");
                TransferOutcome::Verified(result)
            }
            None => {
                warn!("No frame captured for TX {data:#x}");
                TransferOutcome::NoFrame
            }
        };
        let status = self.read_status()?;
        debug!("Status after TX: {status:#04x}");
        Ok(outcome)
    }

    /// Drives one character into the receiver and checks the RX register.
    ///
    /// # Errors
    ///
    /// - `ConfigurationIncomplete` if any framing field is unset.
    /// - `DivisionUndefined` if the recorded divisor gives no positive baud rate.
    /// - `Transport` on bus failure.
    pub fn receive(&mut self, data: u32) -> Result<FieldCheck<u32>> {
        let config = self.state.snapshot(self.clock_hz)?;
        self.source.send(data);
        self.clock.wait_cycles(self.settle_cycles);
        let read_back = self.regs.read(&self.map.rx)?;
        let check = verify_rx(&config, data, read_back);
        info!("RX {data:#x}: read {read_back:#x}");
        Ok(check)
    }

    /// Reads the status register.
    ///
    /// # Errors
    ///
    /// `Transport` on bus failure.
    pub fn read_status(&mut self) -> Result<u8> {
        Ok(self.regs.read(&self.map.status)? as u8)
    }

    /// Runs `iterations` randomized configure / transmit / receive cycles.
    ///
    /// The baud divisor must already be programmed. Mismatches are tallied, not raised.
    ///
    /// # Errors
    ///
    /// The first register, configuration or transport error aborts the run.
    pub fn run_random(&mut self, stimulus: &mut Stimulus, iterations: u32) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        for i in 0..iterations {
            let fields = stimulus.control_fields();
            let _ = self.configure(fields)?;

            match self.transmit(stimulus.data())? {
                TransferOutcome::NoFrame => summary.no_frame += 1,
                outcome if outcome.passed() => summary.tx_passed += 1,
                TransferOutcome::Verified(_) => summary.tx_failed += 1,
            }
            if self.receive(stimulus.data())?.matches() {
                summary.rx_passed += 1;
            } else {
                summary.rx_failed += 1;
            }
            summary.iterations += 1;
            debug!("Iteration {i} done at cycle {}", self.clock.now());
        }
        info!("Run complete: {summary}");
        Ok(summary)
    }
}
