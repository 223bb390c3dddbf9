//! 공개 API 로 본 테이블 코덱 통합 테스트

use lightmeter_tables::{
    decode, encode, reference_levels, CalibrationCurve, DomainMapping, InputAxis, MappedCurve,
    Quantizer, TableEncoder, TableError, TableLayout, MAX_DICTIONARY_LEN,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 첫 하프에 쓸 수 있는 패턴 (최상위 비트 0)
const FIRST_HALF_PALETTE: [u8; 5] = [0b0000_0000, 0b0101_0101, 0b0010_0010, 0b0001_0000, 0b0111_1111];
/// 둘째 하프 패턴
const SECOND_HALF_PALETTE: [u8; 4] = [0b0000_0000, 0b1000_1000, 0b1111_1111, 0b0100_0000];

/// 팔레트에서 무작위로 고른 패턴으로 단조 블록들을 만든다
fn random_levels(rng: &mut StdRng) -> Vec<u8> {
    let mut levels = Vec::with_capacity(256);
    for _ in 0..16 {
        let mut level: u8 = rng.gen_range(0..=200);
        let first = FIRST_HALF_PALETTE[rng.gen_range(0..FIRST_HALF_PALETTE.len())];
        let second = SECOND_HALF_PALETTE[rng.gen_range(0..SECOND_HALF_PALETTE.len())];
        for pattern in [first, second] {
            for k in 0..8 {
                level += (pattern >> (7 - k)) & 1;
                levels.push(level);
            }
        }
    }
    levels
}

#[test]
fn test_random_monotone_blocks_roundtrip() {
    let mut rng = StdRng::seed_from_u64(0x5EED);

    for round in 0..50 {
        let levels = random_levels(&mut rng);
        let source = |i: u8| levels[i as usize] as f64;

        let table = encode(&source, TableLayout::default(), Quantizer::default())
            .unwrap_or_else(|e| panic!("round {}: {}", round, e));

        assert!(table.dictionary.len() <= FIRST_HALF_PALETTE.len() + SECOND_HALF_PALETTE.len());
        assert!(table.dictionary.len() <= MAX_DICTIONARY_LEN);
        for (p, &level) in levels.iter().enumerate() {
            let (anchor, sub) = table.layout.split_position(p);
            let decoded = decode(
                &table.layout,
                &table.abs,
                &table.diff_index,
                &table.dictionary,
                anchor,
                sub,
            );
            assert_eq!(decoded, level, "round {} position {}", round, p);
        }
    }
}

#[test]
fn test_random_single_decrease_is_located() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..50 {
        let mut levels = random_levels(&mut rng);
        // 앵커 위치(세부 0)는 항상 자기 자신과 비교되므로 세부 1..16 에서 고른다
        let anchor = rng.gen_range(0..16);
        let sub = rng.gen_range(1..16);
        let position = anchor * 16 + sub;
        let previous = levels[position - 1];
        if previous == 0 {
            continue;
        }
        levels[position] = previous - 1;
        let source = |i: u8| levels[i as usize] as f64;

        match encode(&source, TableLayout::default(), Quantizer::default()) {
            Err(TableError::MonotonicityViolation { anchor: a, sub_index: s, previous: p, observed: o }) => {
                assert_eq!((a, s), (anchor, sub));
                assert_eq!((p, o), (previous, previous - 1));
            }
            other => panic!("expected violation at {}/{}, got {:?}", anchor, sub, other),
        }
    }
}

#[test]
fn test_photodiode_like_curve_with_log_axis() {
    // 전압(mV)의 log10 에 대해 EV 가 선형인 곡선, 150mV 오프셋
    let curve = CalibrationCurve::new(&[(100.0, 2.0), (10000.0, 5.0)], InputAxis::Log10).unwrap();
    let source = MappedCurve::new(DomainMapping::new(5000.0 / 256.0, 150.0), curve);
    let quantizer = Quantizer::new(8.0, 5.0);

    let table = TableEncoder::new(TableLayout::default(), quantizer)
        .with_rounding_bits(10)
        .unwrap()
        .encode(&source)
        .unwrap();

    assert_eq!(table.decode_all(), reference_levels(&source, &quantizer));
    assert!(table.abs.windows(2).all(|w| w[0] <= w[1]));
    assert!(table.rounding_bits.is_some());
    println!(
        "사전 {}개, 총 {} bytes (무압축 256 bytes)",
        table.dictionary.len(),
        table.byte_size()
    );
}

#[test]
fn test_layout_errors_surface_before_sampling() {
    assert!(TableLayout::new(10, 8).is_err());
    assert!(TableLayout::new(64, 2).is_ok());
}
