//! # Verification Oracle Tests
//!
//! Field-by-field comparison of captured frames against the configuration.

use pretty_assertions::assert_eq;
use uartverif_core::codec::{DataWidth, Parity, StopBits};
use uartverif_core::frame::{FrameConfig, ObservedFrame};
use uartverif_core::oracle::{Field, verify_rx, verify_tx};

fn config(parity: Parity, stop_bits: StopBits, width: u8) -> FrameConfig {
    FrameConfig {
        divisor: 5,
        parity,
        stop_bits,
        data_width: DataWidth::new(width).unwrap(),
    }
}

#[test]
fn full_cycle_all_fields_match() {
    let cfg = config(Parity::None, StopBits::One, 8);
    let observed = ObservedFrame::new(0xA5, Parity::None, StopBits::One, DataWidth::EIGHT);
    let result = verify_tx(&cfg, 0xA5, &observed);
    assert!(result.data.matches());
    assert!(result.parity.matches());
    assert!(result.stop_bits.matches());
    assert!(result.width.matches());
    assert!(result.all_match());
    assert!(result.mismatches().is_empty());
}

#[test]
fn wide_write_is_checked_against_masked_value() {
    let cfg = config(Parity::None, StopBits::One, 5);
    let width = DataWidth::new(5).unwrap();

    let truncated = ObservedFrame::new(0x1F, Parity::None, StopBits::One, width);
    let result = verify_tx(&cfg, 0x1FF, &truncated);
    assert_eq!(result.data.expected, 0x1FF & 0x1F);
    assert!(result.all_match());

    // Hardware that failed to truncate is caught.
    let raw = ObservedFrame::new(0x1FF, Parity::None, StopBits::One, width);
    assert_eq!(verify_tx(&cfg, 0x1FF, &raw).mismatches(), vec![Field::Data]);
}

#[test]
fn stop_mismatch_reported_on_stop_only() {
    let cfg = config(Parity::None, StopBits::One, 8);
    let observed = ObservedFrame::new(0xA5, Parity::None, StopBits::Two, DataWidth::EIGHT);
    let result = verify_tx(&cfg, 0xA5, &observed);
    assert!(result.data.matches());
    assert!(result.parity.matches());
    assert!(result.width.matches());
    assert!(!result.stop_bits.matches());
    assert_eq!(result.stop_bits.expected, StopBits::One);
    assert_eq!(result.stop_bits.actual, StopBits::Two);
    assert_eq!(result.mismatches(), vec![Field::StopBits]);
}

#[test]
fn serializer_only_parity_modes_compare_directly() {
    let cfg = config(Parity::Space, StopBits::OneAndHalf, 7);
    let width = DataWidth::new(7).unwrap();
    let ok = ObservedFrame::new(0x55, Parity::Space, StopBits::OneAndHalf, width);
    assert!(verify_tx(&cfg, 0x55, &ok).all_match());
    let wrong = ObservedFrame::new(0x55, Parity::Mark, StopBits::OneAndHalf, width);
    assert_eq!(verify_tx(&cfg, 0x55, &wrong).mismatches(), vec![Field::Parity]);
}

#[test]
fn every_field_wrong_lists_all_four() {
    let cfg = config(Parity::Odd, StopBits::One, 8);
    let seven = DataWidth::new(7).unwrap();
    let observed = ObservedFrame::new(0x00, Parity::Even, StopBits::Two, seven);
    let result = verify_tx(&cfg, 0xFF, &observed);
    assert_eq!(
        result.mismatches(),
        vec![Field::Data, Field::Parity, Field::StopBits, Field::Width]
    );
    let text = result.to_string();
    assert!(text.contains("MISMATCH"));
    assert!(!text.contains("ok"));
}

#[test]
fn rx_read_back_is_masked() {
    let cfg = config(Parity::Even, StopBits::Two, 6);
    let check = verify_rx(&cfg, 0xDEAD_BEEF, 0x2F);
    assert_eq!(check.expected, 0x2F);
    assert!(check.matches());
    assert!(!verify_rx(&cfg, 0xDEAD_BEEF, 0xEF).matches());
}

#[test]
fn observed_frame_is_left_untouched() {
    let observed = ObservedFrame::new(0x15, Parity::Odd, StopBits::One, DataWidth::new(5).unwrap());
    let before = observed.clone();
    assert!(verify_tx(&config(Parity::Odd, StopBits::One, 5), 0x15, &observed).all_match());
    assert_eq!(
        verify_tx(&config(Parity::Odd, StopBits::Two, 5), 0x15, &observed).mismatches(),
        vec![Field::StopBits]
    );
    assert_eq!(observed, before);
}
