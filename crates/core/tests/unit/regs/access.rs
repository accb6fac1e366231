//! # Register Access Tests
//!
//! Read-modify-write behaviour over the byte-store transport, transfer ordering and error
//! propagation through the `mockall` transport, and round-trip properties.

use mockall::Sequence;
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use uartverif_core::common::addr::BusAddr;
use uartverif_core::common::error::{TransportError, VerifError};
use uartverif_core::config::BusWidth;
use uartverif_core::regs::{RegisterAccess, RegisterDescriptor};
use uartverif_core::soc::traits::BurstKind;

use crate::common::mocks::memory::{MemoryTransport, Transfer};
use crate::common::mocks::transport::mock_with_width;

const WORD: u64 = 0x11310;

fn reg(offset: u8, width: u8, bus: BusWidth) -> RegisterDescriptor {
    RegisterDescriptor::new(BusAddr::new(WORD), offset, width, bus).unwrap()
}

// ══════════════════════════════════════════════════════════
// 1. Byte-store transport
// ══════════════════════════════════════════════════════════

#[test]
fn read_extracts_field_at_offset() {
    let mut mem = MemoryTransport::new(BusWidth::Eight);
    mem.preload(WORD, 0x1122_3344_5566_7788);
    let mut regs = RegisterAccess::new(mem);
    assert_eq!(regs.read(&reg(0, 2, BusWidth::Eight)).unwrap(), 0x7788);
    assert_eq!(regs.read(&reg(4, 2, BusWidth::Eight)).unwrap(), 0x3344);
    assert_eq!(regs.read(&reg(4, 4, BusWidth::Eight)).unwrap(), 0x1122_3344);
    assert_eq!(regs.read(&reg(7, 1, BusWidth::Eight)).unwrap(), 0x11);
}

#[test]
fn write_preserves_neighbours() {
    let mut mem = MemoryTransport::new(BusWidth::Eight);
    mem.preload(WORD, 0xFFFF_FFFF_FFFF_FFFF);
    let mut regs = RegisterAccess::new(mem);
    regs.write(&reg(4, 2, BusWidth::Eight), 0x0094).unwrap();
    assert_eq!(regs.transport().peek_word(WORD), 0xFFFF_0094_FFFF_FFFF);
}

#[test]
fn write_issues_one_aligned_read_then_one_aligned_write() {
    let mut regs = RegisterAccess::new(MemoryTransport::new(BusWidth::Eight));
    regs.write(&reg(4, 2, BusWidth::Eight), 0x114).unwrap();
    assert_eq!(
        regs.transport().log,
        vec![
            Transfer::Read { address: WORD, length: 8, size: 3 },
            Transfer::Write {
                address: WORD,
                data: vec![0, 0, 0, 0, 0x14, 0x01, 0, 0],
                size: 3,
            },
        ]
    );
}

#[test]
fn four_byte_bus_uses_size_2() {
    let mut regs = RegisterAccess::new(MemoryTransport::new(BusWidth::Four));
    let ctrl = RegisterDescriptor::at(BusAddr::new(0x11314), 2, BusWidth::Four).unwrap();
    regs.write(&ctrl, 0x94).unwrap();
    assert_eq!(regs.read(&ctrl).unwrap(), 0x94);
    assert!(regs.transport().log.iter().all(|t| match t {
        Transfer::Read { length, size, .. } => *length == 4 && *size == 2,
        Transfer::Write { data, size, .. } => data.len() == 4 && *size == 2,
    }));
    assert_eq!(regs.transport().peek_word(0x11314), 0x94);
}

#[test]
fn oversized_value_is_rejected_before_any_transfer() {
    let mut regs = RegisterAccess::new(MemoryTransport::new(BusWidth::Eight));
    let err = regs.write(&reg(0, 1, BusWidth::Eight), 0x100).unwrap_err();
    assert!(matches!(err, VerifError::ValueOutOfRange { value: 0x100, bits: 8 }));
    assert!(regs.transport().log.is_empty());
}

#[test]
fn masked_write_truncates_on_request() {
    let mut mem = MemoryTransport::new(BusWidth::Eight);
    mem.preload(WORD, 0xAAAA_AAAA_AAAA_AAAA);
    let mut regs = RegisterAccess::new(mem);
    regs.write_masked(&reg(2, 1, BusWidth::Eight), 0x1FF).unwrap();
    assert_eq!(regs.transport().peek_word(WORD), 0xAAAA_AAAA_AAFF_AAAA);
}

#[test]
fn modify_sees_current_value() {
    let mut mem = MemoryTransport::new(BusWidth::Eight);
    mem.preload(WORD, 0x0000_0401_0000_0000);
    let mut regs = RegisterAccess::new(mem);
    let written = regs
        .modify(&reg(4, 2, BusWidth::Eight), |v| Ok(v | 0x10))
        .unwrap();
    assert_eq!(written, 0x411);
    assert_eq!(regs.transport().log.len(), 2);
}

#[test]
fn modify_failure_writes_nothing() {
    let mut regs = RegisterAccess::new(MemoryTransport::new(BusWidth::Eight));
    let result = regs.modify(&reg(4, 2, BusWidth::Eight), |_| {
        Err(VerifError::invalid_encoding("test", 3))
    });
    assert!(result.is_err());
    assert_eq!(regs.transport().log.len(), 1);
}

#[test]
fn eight_byte_descriptor_on_four_byte_bus_straddles() {
    let mut regs = RegisterAccess::new(MemoryTransport::new(BusWidth::Four));
    // 0x11314 starts a word on the narrow bus.
    assert!(regs.read(&reg(4, 4, BusWidth::Eight)).is_ok());
    let wide = RegisterDescriptor::new(BusAddr::new(WORD), 2, 4, BusWidth::Eight).unwrap();
    assert!(matches!(regs.read(&wide), Err(VerifError::RegisterStraddle { .. })));
}

// ══════════════════════════════════════════════════════════
// 2. Mock transport
// ══════════════════════════════════════════════════════════

#[test]
fn read_precedes_write_with_expected_arguments() {
    let mut mock = mock_with_width(BusWidth::Eight);
    let mut seq = Sequence::new();
    let _ = mock.expect_read()
        .with(eq(BusAddr::new(WORD)), eq(8usize), eq(BurstKind::Incr), eq(3u8))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _, _| Ok(vec![0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88]));
    let _ = mock.expect_write()
        .withf(|addr, data, burst, size| {
            *addr == BusAddr::new(WORD)
                && data == [0x11, 0x22, 0xAB, 0x44, 0x55, 0x66, 0x77, 0x88]
                && *burst == BurstKind::Incr
                && *size == 3
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _, _| Ok(()));

    let mut regs = RegisterAccess::new(mock);
    regs.write(&reg(2, 1, BusWidth::Eight), 0xAB).unwrap();
}

#[test]
fn read_error_propagates_unchanged_and_skips_write() {
    let mut mock = mock_with_width(BusWidth::Eight);
    let _ = mock.expect_read()
        .returning(|address, _, _, _| Err(TransportError::Timeout { address }));
    let _ = mock.expect_write().never();

    let mut regs = RegisterAccess::new(mock);
    let err = regs.write(&reg(0, 2, BusWidth::Eight), 5).unwrap_err();
    assert!(err.is_transport());
    assert!(matches!(
        err,
        VerifError::Transport(TransportError::Timeout { address }) if address == BusAddr::new(WORD)
    ));
}

#[test]
fn write_error_propagates_unchanged() {
    let mut mock = mock_with_width(BusWidth::Four);
    let _ = mock.expect_read().returning(|_, _, _, _| Ok(vec![0; 4]));
    let _ = mock.expect_write()
        .times(1)
        .returning(|address, _, _, _| Err(TransportError::BusError { address }));

    let mut regs = RegisterAccess::new(mock);
    let err = regs.write(&reg(0, 1, BusWidth::Four), 1).unwrap_err();
    assert!(matches!(err, VerifError::Transport(TransportError::BusError { .. })));
}

#[test]
fn short_read_is_length_mismatch() {
    let mut mock = mock_with_width(BusWidth::Eight);
    let _ = mock.expect_read().returning(|_, _, _, _| Ok(vec![0; 4]));
    let mut regs = RegisterAccess::new(mock);
    assert!(matches!(
        regs.read(&reg(0, 2, BusWidth::Eight)),
        Err(VerifError::Transport(TransportError::LengthMismatch { expected: 8, actual: 4 }))
    ));
}

// ══════════════════════════════════════════════════════════
// 3. Properties
// ══════════════════════════════════════════════════════════

fn layout() -> impl Strategy<Value = (u8, u8)> {
    prop_oneof![
        (0u8..8).prop_map(|o| (o, 1u8)),
        (0u8..4).prop_map(|o| (o * 2, 2u8)),
        (0u8..2).prop_map(|o| (o * 4, 4u8)),
    ]
}

proptest! {
    #[test]
    fn round_trip_preserves_value_and_neighbours(
        (offset, width) in layout(),
        initial in any::<u64>(),
        value in any::<u32>(),
    ) {
        let value = if width == 4 { value } else { value & ((1u32 << (width * 8)) - 1) };
        let mut mem = MemoryTransport::new(BusWidth::Eight);
        mem.preload(WORD, initial);
        let mut regs = RegisterAccess::new(mem);
        let desc = reg(offset, width, BusWidth::Eight);

        regs.write(&desc, value).unwrap();
        prop_assert_eq!(regs.read(&desc).unwrap(), value);

        let field = (u64::from(desc.value_mask())) << (offset * 8);
        let after = regs.transport().peek_word(WORD);
        prop_assert_eq!(after & !field, initial & !field);
    }

    #[test]
    fn narrow_bus_round_trip(offset_sel in 0u8..3, initial in any::<u32>(), value in any::<u32>()) {
        let (offset, width) = [(0u8, 4u8), (2, 2), (3, 1)][offset_sel as usize];
        let value = if width == 4 { value } else { value & ((1u32 << (width * 8)) - 1) };
        let mut mem = MemoryTransport::new(BusWidth::Four);
        mem.preload(WORD, u64::from(initial));
        let mut regs = RegisterAccess::new(mem);
        let desc = reg(offset, width, BusWidth::Four);

        regs.write(&desc, value).unwrap();
        prop_assert_eq!(regs.read(&desc).unwrap(), value);
        let field = u64::from(desc.value_mask()) << (offset * 8);
        prop_assert_eq!(regs.transport().peek_word(WORD) & !field, u64::from(initial) & !field);
    }
}
