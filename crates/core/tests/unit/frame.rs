//! # Frame Configuration Tests
//!
//! Accumulation of framing fields and baud rate derivation.

use pretty_assertions::assert_eq;
use uartverif_core::VerifError;
use uartverif_core::codec::{ControlLayout, DataWidth, Parity, StopBits};
use uartverif_core::frame::state::baud_rate;
use uartverif_core::frame::{FrameConfig, FrameConfigState};

const CLOCK_HZ: u64 = 10_000_000;

#[test]
fn baud_10mhz_divisor_5_is_125000() {
    let mut state = FrameConfigState::new();
    state.set_divisor(5);
    assert_eq!(state.derive_baud_rate(10_000_000).unwrap(), 125_000);
}

#[test]
fn baud_rounds_down() {
    assert_eq!(baud_rate(10_000_000, 3).unwrap(), 208_333);
}

#[test]
fn baud_zero_divisor_is_undefined() {
    let mut state = FrameConfigState::new();
    state.set_divisor(0);
    assert!(matches!(
        state.derive_baud_rate(10_000_000),
        Err(VerifError::DivisionUndefined { divisor: 0, .. })
    ));
}

#[test]
fn baud_below_one_is_undefined() {
    assert!(matches!(baud_rate(15, 1), Err(VerifError::DivisionUndefined { .. })));
}

#[test]
fn baud_without_divisor_is_incomplete() {
    let state = FrameConfigState::new();
    assert!(matches!(
        state.derive_baud_rate(10_000_000),
        Err(VerifError::ConfigurationIncomplete { missing: "baud divisor" })
    ));
}

#[test]
fn control_fields_leave_divisor_alone() {
    let mut state = FrameConfigState::new();
    state.set_divisor(9);
    let _ = state.apply_control_fields(0x114, ControlLayout::Raw5Bit).unwrap();
    let config = state.snapshot(CLOCK_HZ).unwrap();
    assert_eq!(
        config,
        FrameConfig {
            divisor: 9,
            parity: Parity::Even,
            stop_bits: StopBits::Two,
            data_width: DataWidth::EIGHT,
        }
    );
}

#[test]
fn control_decode_failure_records_nothing() {
    let mut state = FrameConfigState::new();
    // Stop field 11.
    assert!(state.apply_control_fields(0x0106, ControlLayout::Raw5Bit).is_err());
    assert_eq!(state, FrameConfigState::new());
}

#[test]
fn snapshot_names_first_missing_field() {
    let mut state = FrameConfigState::new();
    assert!(!state.is_complete());
    state.set_divisor(5);
    assert!(matches!(
        state.snapshot(CLOCK_HZ),
        Err(VerifError::ConfigurationIncomplete { missing: "parity" })
    ));
    state.set_parity(Parity::Mark);
    state.set_stop_bits(StopBits::One);
    assert!(matches!(
        state.snapshot(CLOCK_HZ),
        Err(VerifError::ConfigurationIncomplete { missing: "data width" })
    ));
    state.set_data_width(DataWidth::new(6).unwrap());
    assert!(state.is_complete());
    assert_eq!(state.snapshot(CLOCK_HZ).unwrap().parity, Parity::Mark);
}

#[test]
fn snapshot_rejects_zero_divisor() {
    let mut state = FrameConfigState::new();
    state.set_divisor(0);
    let _ = state.apply_control_fields(0x114, ControlLayout::Raw5Bit).unwrap();
    assert!(state.is_complete());
    assert!(matches!(
        state.snapshot(CLOCK_HZ),
        Err(VerifError::DivisionUndefined { divisor: 0, clock_hz: CLOCK_HZ })
    ));
}

#[test]
fn snapshot_rejects_divisor_too_large_for_clock() {
    let mut state = FrameConfigState::new();
    state.set_divisor(2);
    let _ = state.apply_control_fields(0x114, ControlLayout::Raw5Bit).unwrap();
    assert!(state.snapshot(16).is_err());
    assert_eq!(state.snapshot(32).unwrap().divisor, 2);
}

#[test]
fn reset_forgets_everything() {
    let mut state = FrameConfigState::new();
    state.set_divisor(5);
    let _ = state.apply_control_fields(0x94, ControlLayout::Offset3Bit).unwrap();
    assert!(state.is_complete());
    state.reset();
    assert!(!state.is_complete());
    assert!(state.snapshot(CLOCK_HZ).is_err());
}

#[test]
fn frame_config_masks_data() {
    let config = FrameConfig {
        divisor: 5,
        parity: Parity::None,
        stop_bits: StopBits::One,
        data_width: DataWidth::new(5).unwrap(),
    };
    assert_eq!(config.mask_data(0x1FF), 0x1F);
    assert_eq!(config.baud_rate(10_000_000).unwrap(), 125_000);
}
