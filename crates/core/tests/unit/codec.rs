//! # Codec Tests
//!
//! Encoding and decoding of the control register framing subfields.

use pretty_assertions::assert_eq;
use rstest::rstest;
use uartverif_core::VerifError;
use uartverif_core::codec::*;

// ══════════════════════════════════════════════════════════
// 1. Parity
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(Parity::None, 0b00)]
#[case(Parity::Odd, 0b01)]
#[case(Parity::Even, 0b10)]
fn parity_encodes_to_register_field(#[case] mode: Parity, #[case] field: u8) {
    assert_eq!(encode_parity(mode).unwrap(), field);
    assert_eq!(decode_parity(field).unwrap(), mode);
}

#[rstest]
#[case(Parity::Mark)]
#[case(Parity::Space)]
fn parity_mark_and_space_are_unsupported(#[case] mode: Parity) {
    assert!(matches!(
        encode_parity(mode),
        Err(VerifError::UnsupportedField { field: "parity", .. })
    ));
}

#[test]
fn parity_field_11_is_invalid() {
    assert!(matches!(
        decode_parity(0b11),
        Err(VerifError::InvalidEncoding { field: "parity", value: 0b11 })
    ));
}

// ══════════════════════════════════════════════════════════
// 2. Stop bits
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(0b00, StopBits::One, 1.0)]
#[case(0b01, StopBits::OneAndHalf, 1.5)]
#[case(0b10, StopBits::Two, 2.0)]
fn stop_field_decodes_to_count(#[case] field: u8, #[case] count: StopBits, #[case] bits: f32) {
    let decoded = decode_stop(field).unwrap();
    assert_eq!(decoded, count);
    assert!((decoded.as_f32() - bits).abs() < f32::EPSILON);
    assert_eq!(encode_stop(decoded), field);
}

#[test]
fn stop_field_11_is_invalid() {
    assert!(matches!(
        decode_stop(0b11),
        Err(VerifError::InvalidEncoding { field: "stop bits", .. })
    ));
}

// ══════════════════════════════════════════════════════════
// 3. Data width
// ══════════════════════════════════════════════════════════

#[test]
fn width_outside_5_to_8_is_rejected() {
    for bits in [0, 4, 9, 31] {
        assert!(matches!(
            DataWidth::new(bits),
            Err(VerifError::WidthOutOfRange { min: 5, max: 8, .. })
        ));
    }
    for bits in 5..=8 {
        assert_eq!(DataWidth::new(bits).unwrap().bits(), bits);
    }
}

#[test]
fn width_error_states_supported_range() {
    let err = DataWidth::new(4).unwrap_err();
    assert_eq!(err.to_string(), "data width 4 is outside the supported 5..=8 bits");
}

#[test]
fn width_mask_covers_low_bits() {
    assert_eq!(DataWidth::new(5).unwrap().mask(), 0x1F);
    assert_eq!(DataWidth::EIGHT.mask(), 0xFF);
}

#[rstest]
#[case(ControlLayout::Raw5Bit, 8, 0b01000)]
#[case(ControlLayout::Raw5Bit, 5, 0b00101)]
#[case(ControlLayout::Offset3Bit, 8, 0b100)]
#[case(ControlLayout::Offset3Bit, 5, 0b001)]
fn width_field_per_layout(#[case] layout: ControlLayout, #[case] bits: u8, #[case] field: u16) {
    let width = DataWidth::new(bits).unwrap();
    assert_eq!(encode_width(width, layout), field);
    assert_eq!(decode_width(field, layout).unwrap(), width);
}

#[test]
fn width_field_zero_is_invalid_in_both_layouts() {
    assert!(decode_width(0, ControlLayout::Raw5Bit).is_err());
    assert!(decode_width(0, ControlLayout::Offset3Bit).is_err());
}

// ══════════════════════════════════════════════════════════
// 4. Control word
// ══════════════════════════════════════════════════════════

#[test]
fn control_even_two_stop_eight_bits_offset_layout_is_0x94() {
    let fields = ControlFields::new(StopBits::Two, Parity::Even, DataWidth::EIGHT);
    assert_eq!(fields.pack(ControlLayout::Offset3Bit).unwrap(), 0x94);
    assert_eq!(ControlFields::unpack(0x94, ControlLayout::Offset3Bit).unwrap(), fields);
}

#[test]
fn control_even_two_stop_eight_bits_raw_layout_is_0x114() {
    let fields = ControlFields::new(StopBits::Two, Parity::Even, DataWidth::EIGHT);
    assert_eq!(fields.pack(ControlLayout::Raw5Bit).unwrap(), 0x114);
    assert_eq!(ControlFields::unpack(0x114, ControlLayout::Raw5Bit).unwrap(), fields);
}

#[test]
fn control_merge_keeps_unrelated_bits() {
    let fields = ControlFields::new(StopBits::One, Parity::Odd, DataWidth::new(7).unwrap());
    let merged = fields.merge_into(0xFFFF, ControlLayout::Raw5Bit).unwrap();
    assert_eq!(merged & !ControlFields::framing_mask(ControlLayout::Raw5Bit), 0xFFFF & !0x3FE);
    assert_eq!(ControlFields::unpack(merged, ControlLayout::Raw5Bit).unwrap(), fields);
}

#[test]
fn control_pack_rejects_mark_parity() {
    let fields = ControlFields::new(StopBits::One, Parity::Mark, DataWidth::EIGHT);
    assert!(fields.pack(ControlLayout::Raw5Bit).is_err());
}

#[test]
fn control_unpack_every_encodable_combination() {
    for layout in [ControlLayout::Raw5Bit, ControlLayout::Offset3Bit] {
        for stop in StopBits::ALL {
            for parity in Parity::ENCODABLE {
                for width in DataWidth::ALL {
                    let fields = ControlFields::new(stop, parity, width);
                    let raw = fields.pack(layout).unwrap();
                    assert_eq!(ControlFields::unpack(raw, layout).unwrap(), fields);
                }
            }
        }
    }
}
