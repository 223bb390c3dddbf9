//! 테이블 코덱 오류 타입

use thiserror::Error;

/// 인코딩 실패
///
/// 두 경우 모두 물리 모델의 샘플링 해상도나 보정 상수가 잘못되었다는 뜻이므로
/// 자동으로 재시도하지 않고 호출자에게 그대로 전달한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// 인접한 세부 샘플 사이의 레벨 차이가 {0, 1} 밖에 있음
    #[error(
        "monotonicity violation at anchor {anchor}, sub-sample {sub_index}: level {previous} -> {observed}"
    )]
    MonotonicityViolation {
        anchor: usize,
        sub_index: usize,
        previous: u8,
        observed: u8,
    },

    /// 서로 다른 델타 비트 패턴이 16개를 넘음 (4비트 인덱스 공간 초과)
    #[error("dictionary overflow at anchor {anchor}: more than 16 distinct delta patterns")]
    DictionaryOverflow { anchor: usize },
}

/// 잘못된 테이블 레이아웃
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("anchor count {0} does not evenly divide the 256-entry domain")]
    UnevenAnchors(usize),

    #[error("anchor stride {stride} cannot be split into two half-blocks of {sub_block_bits} bits")]
    HalfBlockMismatch { stride: usize, sub_block_bits: usize },

    #[error("half-block of {0} bits does not fit in one pattern byte")]
    PatternTooWide(usize),

    #[error("rounding bits need at least 2 subdivisions per unit, got {0}")]
    TooFewSubdivisions(u8),

    /// 펌웨어는 `level % scale` 로 단위 안의 위치를 구하므로 정수 scale 이 필요
    #[error("rounding bits need an integer quantizer scale between 1 and 255 levels per unit")]
    FractionalLevelsPerUnit,
}

/// 잘못된 보정 곡선
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    #[error("calibration curve needs at least one point")]
    Empty,

    #[error("calibration inputs must be strictly increasing (point {index}: {input})")]
    NotIncreasing { index: usize, input: f64 },

    #[error("calibration point {index} is not finite")]
    NonFinite { index: usize },
}
