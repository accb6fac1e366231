//! Register-map and clocking constants for the UART block.
//!
//! Offsets are relative to the peripheral base; widths are in bytes. The layout is
//! bit-exact with the hardware and shared by the 8-byte and 4-byte bus variants.

/// Default peripheral base address of UART0.
pub const UART_BASE: u64 = 0x0001_1300;

/// Default core clock driving the UART (10 MHz, 100 ns period).
pub const CLOCK_HZ: u64 = 10_000_000;

/// Oversampling factor between the baud clock and the bit rate.
pub const BAUD_OVERSAMPLE: u64 = 16;

/// Baud divisor register offset.
pub const BAUD_OFFSET: u64 = 0x00;
/// Baud divisor register width.
pub const BAUD_WIDTH: u8 = 2;

/// Transmit data register offset.
pub const TX_OFFSET: u64 = 0x04;
/// Transmit data register width.
pub const TX_WIDTH: u8 = 4;

/// Receive data register offset.
pub const RX_OFFSET: u64 = 0x08;
/// Receive data register width.
pub const RX_WIDTH: u8 = 4;

/// Status register offset.
pub const STATUS_OFFSET: u64 = 0x0C;
/// Status register width.
pub const STATUS_WIDTH: u8 = 1;

/// Transmit delay register offset.
pub const DELAY_OFFSET: u64 = 0x10;
/// Transmit delay register width.
pub const DELAY_WIDTH: u8 = 2;

/// Control register offset.
pub const CONTROL_OFFSET: u64 = 0x14;
/// Control register width.
pub const CONTROL_WIDTH: u8 = 2;

/// Interrupt enable register offset.
pub const INTERRUPT_EN_OFFSET: u64 = 0x18;
/// Interrupt enable register width.
pub const INTERRUPT_EN_WIDTH: u8 = 1;

/// Inter-character cycle register offset.
pub const IQCYC_OFFSET: u64 = 0x1C;
/// Inter-character cycle register width.
pub const IQCYC_WIDTH: u8 = 1;

/// Receive FIFO threshold register offset.
pub const RX_THRESH_OFFSET: u64 = 0x20;
/// Receive FIFO threshold register width.
pub const RX_THRESH_WIDTH: u8 = 1;

/// Size of the register window claimed by the UART.
pub const UART_WINDOW: u64 = 0x28;

/// Control register: stop-bit field shift (bits 2:1).
pub const CTRL_STOP_SHIFT: u32 = 1;
/// Control register: stop-bit field mask (unshifted).
pub const CTRL_STOP_MASK: u16 = 0b11;
/// Control register: parity field shift (bits 4:3).
pub const CTRL_PARITY_SHIFT: u32 = 3;
/// Control register: parity field mask (unshifted).
pub const CTRL_PARITY_MASK: u16 = 0b11;
/// Control register: data-width field shift (bit 5 upwards).
pub const CTRL_WIDTH_SHIFT: u32 = 5;

/// Status register: transmitter idle and holding register empty.
pub const STATUS_TX_EMPTY: u8 = 0x01;
/// Status register: receive register holds valid data.
pub const STATUS_RX_VALID: u8 = 0x02;

/// Smallest supported character width in bits.
pub const MIN_DATA_WIDTH: u8 = 5;
/// Largest supported character width in bits.
pub const MAX_DATA_WIDTH: u8 = 8;
