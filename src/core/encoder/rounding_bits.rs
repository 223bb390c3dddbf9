//! 정수 레벨보다 고운 표시 정밀도(1/10, 1/3 단위 등)를 위한 반올림 방향 비트

use crate::core::curve::SampleSource;
use crate::core::types::{Quantizer, RoundingBits, DOMAIN_SIZE};

/// 격자점 판정 허용 오차 (`frac(5.7) * 10 = 7.000000000000002` 같은 부동소수점 잡음)
const BOUNDARY_EPSILON: f64 = 1e-9;

/// `t` 에 가장 가까운 정수, `t` 가 그 정수 위에 있다고 볼 수 있을 때만
fn snap(t: f64) -> Option<f64> {
    let nearest = t.round();
    ((t - nearest).abs() < BOUNDARY_EPSILON).then_some(nearest)
}

/// 반올림(중간값은 위로), 격자점 잡음은 격자점으로
fn round_half_up(t: f64) -> i64 {
    snap(t).unwrap_or_else(|| (t + 0.5).floor()) as i64
}

/// `value` 의 소수부가 1/`subdivisions` 격자의 위/아래 중 어느 쪽으로 반올림되는지
///
/// 격자점 사이에 있으면 가까운 쪽을 고르고, 정확히 중간이면 위(1)를 고른다.
/// 격자점 위에 놓인 값은 단위의 위쪽 절반에 있을 때 1이다.
/// 정수부와 부호는 결과에 영향을 주지 않는다.
pub fn rounding_bit(value: f64, subdivisions: u8) -> bool {
    let x = subdivisions as f64;
    let t = (value - value.floor()) * x;

    if let Some(boundary) = snap(t) {
        // 소수부가 1 에 붙은 값은 다음 단위의 0 격자점
        let boundary = if boundary >= x { 0.0 } else { boundary };
        return 2.0 * boundary >= x;
    }

    let lower = t.floor();
    (lower + 1.0 - t) <= (t - lower)
}

/// 양자화된 레벨만 보고 펌웨어가 계산하는 기본 자릿수에 더할 비트
///
/// 펌웨어는 `e = level % L` 에서 `floor(e * X / L) + bit` 로 1/X 자릿수를 만든다.
/// 비트는 그 값이 `(value + offset)` 을 1/X 단위로 반올림한 값에 맞도록 고른다.
fn level_relative_bit(value: f64, quantizer: &Quantizer, subdivisions: u8) -> bool {
    let x = subdivisions as i64;
    let levels_per_unit = (quantizer.scale as i64).max(1);

    let level = quantizer.level(value) as i64;
    let base = (level / levels_per_unit) * x + (level % levels_per_unit) * x / levels_per_unit;
    let target = round_half_up((value + quantizer.offset) * subdivisions as f64);
    target > base
}

/// 도메인 전체의 반올림 비트를 8개씩 바이트로 묶는다 (LSB 먼저)
///
/// 양자화기의 `scale` 은 단위당 정수 레벨 수여야 한다 (`TableEncoder::with_rounding_bits` 에서 검증).
pub fn pack_rounding_bits<S>(source: &S, quantizer: &Quantizer, subdivisions: u8) -> RoundingBits
where
    S: SampleSource + ?Sized,
{
    let mut bytes = vec![0u8; DOMAIN_SIZE / 8];
    for position in 0..DOMAIN_SIZE {
        let value = source.sample(position as u8);
        if level_relative_bit(value, quantizer, subdivisions) {
            bytes[position >> 3] |= 1 << (position & 7);
        }
    }
    RoundingBits { subdivisions, bytes }
}
