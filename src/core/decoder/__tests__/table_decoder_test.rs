//! 압축 테이블 판독 단위 테스트

use crate::core::decoder::decode;
use crate::core::encoder::{encode, TableEncoder};
use crate::core::types::{EncodedTable, Quantizer, TableLayout};

fn hand_built() -> EncodedTable {
    EncodedTable {
        layout: TableLayout::default(),
        abs: vec![10; 16],
        diff_index: vec![0x01; 16],
        dictionary: vec![0b0101_0101, 0b1000_0001],
        rounding_bits: None,
    }
}

#[test]
fn test_decode_walks_both_halves() {
    let t = hand_built();
    let layout = TableLayout::default();

    let expected = [10, 11, 11, 12, 12, 13, 13, 14, 15, 15, 15, 15, 15, 15, 15, 16];
    for (sub, &want) in expected.iter().enumerate() {
        assert_eq!(
            decode(&layout, &t.abs, &t.diff_index, &t.dictionary, 0, sub),
            want,
            "sub {}",
            sub
        );
    }
}

#[test]
fn test_low_nibble_selects_second_half() {
    let mut t = hand_built();
    // 첫 하프 = 1번 패턴, 둘째 하프 = 0번 패턴
    t.diff_index[3] = 0x10;

    assert_eq!(t.decode(3, 0), 11);
    assert_eq!(t.decode(3, 7), 12);
    assert_eq!(t.decode(3, 8), 12);
    assert_eq!(t.decode(3, 15), 16);
}

#[test]
fn test_level_at_splits_position() {
    let t = hand_built();
    assert_eq!(t.level_at(0), 10);
    assert_eq!(t.level_at(16 * 4 + 7), 14);
    assert_eq!(t.level_at(255), 16);
    assert_eq!(t.decode_all().len(), 256);
}

#[test]
#[should_panic(expected = "anchor 16 out of range")]
fn test_anchor_out_of_range_panics() {
    hand_built().decode(16, 0);
}

#[test]
#[should_panic(expected = "sub-sample 16 out of range")]
fn test_sub_index_out_of_range_panics() {
    hand_built().decode(0, 16);
}

#[test]
fn 펌웨어_십분위_복원_테스트() {
    // EV = i/16 을 1/8 레벨로, 반올림 비트는 1/10 단위
    let source = |i: u8| i as f64 / 16.0;
    let table = TableEncoder::new(TableLayout::default(), Quantizer::new(8.0, 0.0))
        .with_rounding_bits(10)
        .unwrap()
        .encode(&source)
        .unwrap();
    let bits = table.rounding_bits.as_ref().unwrap();

    for p in 0..=255u8 {
        let e = table.level_at(p) & 0b111;
        let firmware = e + (e > 3) as u8 + bits.bit(p as usize) as u8;
        assert_eq!(table.subunits_at(p, 8), Some(firmware), "position {}", p);
    }
}

#[test]
fn test_subunits_without_rounding_bits() {
    let table = encode(&|i: u8| i as f64 / 4.0, TableLayout::default(), Quantizer::default()).unwrap();
    assert_eq!(table.subunits_at(10, 8), None);
}

#[test]
fn 팔분위_위치의_십분위_자릿수_테스트() {
    // 짝수 위치는 정확한 1/8 EV: m/8 → round_half_up(m * 10 / 8)
    let source = |i: u8| i as f64 / 16.0;
    let table = TableEncoder::new(TableLayout::default(), Quantizer::new(8.0, 0.0))
        .with_rounding_bits(10)
        .unwrap()
        .encode(&source)
        .unwrap();

    let expected = [0u8, 1, 3, 4, 5, 6, 8, 9];
    for p in (0..=255u8).step_by(2) {
        let m = (p as usize / 2) % 8;
        assert_eq!(table.subunits_at(p, 8), Some(expected[m]), "EV {}", source(p));
    }
    // EV 2.5 는 2.5 로 표시
    assert_eq!(table.level_at(40), 20);
    assert_eq!(table.subunits_at(40, 8), Some(5));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "exceeds 255")]
fn test_malformed_table_overflow_panics_in_debug() {
    let mut t = hand_built();
    t.abs[0] = 250;
    // 250 + 4 + 2 = 256
    t.decode(0, 15);
}
