//! 테이블 코덱 기본 타입들

use serde::{Deserialize, Serialize};

use super::error::LayoutError;

/// 8비트 입력 도메인 크기
pub const DOMAIN_SIZE: usize = 256;

/// 사전 최대 크기 (4비트 인덱스)
pub const MAX_DICTIONARY_LEN: usize = 16;

/// 앵커 배치와 하프 블록 폭
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    num_anchors: usize,
    sub_block_bits: usize,
}

impl TableLayout {
    /// 레이아웃 검증 후 생성
    ///
    /// `256 / num_anchors` 이 앵커 간격이고, 이 간격은 정확히 두 개의
    /// `sub_block_bits` 폭 하프 블록으로 나뉘어야 한다.
    pub fn new(num_anchors: usize, sub_block_bits: usize) -> Result<Self, LayoutError> {
        if num_anchors == 0 || num_anchors > DOMAIN_SIZE || DOMAIN_SIZE % num_anchors != 0 {
            return Err(LayoutError::UnevenAnchors(num_anchors));
        }
        let stride = DOMAIN_SIZE / num_anchors;
        if sub_block_bits == 0 || stride != 2 * sub_block_bits {
            return Err(LayoutError::HalfBlockMismatch { stride, sub_block_bits });
        }
        if sub_block_bits > 8 {
            return Err(LayoutError::PatternTooWide(sub_block_bits));
        }
        Ok(Self { num_anchors, sub_block_bits })
    }

    pub fn num_anchors(&self) -> usize {
        self.num_anchors
    }

    pub fn sub_block_bits(&self) -> usize {
        self.sub_block_bits
    }

    /// 앵커 사이의 도메인 간격 (= 블록당 세부 샘플 수)
    pub fn anchor_stride(&self) -> usize {
        2 * self.sub_block_bits
    }

    /// 앵커 `anchor` 의 `sub_index` 번째 세부 샘플의 도메인 위치
    pub fn position(&self, anchor: usize, sub_index: usize) -> usize {
        anchor * self.anchor_stride() + sub_index
    }

    /// 도메인 위치 → (앵커, 세부 인덱스)
    pub fn split_position(&self, position: usize) -> (usize, usize) {
        (position / self.anchor_stride(), position % self.anchor_stride())
    }
}

impl Default for TableLayout {
    /// 펌웨어가 쓰는 16 앵커 × (8 + 8) 비트 배치
    fn default() -> Self {
        Self { num_anchors: 16, sub_block_bits: 8 }
    }
}

/// 실수 샘플 → 정수 레벨 변환
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantizer {
    pub scale: f64,
    #[serde(default)]
    pub offset: f64,
    #[serde(default)]
    pub min_level: u8,
    #[serde(default = "default_max_level")]
    pub max_level: u8,
}

fn default_max_level() -> u8 {
    u8::MAX
}

impl Quantizer {
    pub fn new(scale: f64, offset: f64) -> Self {
        Self {
            scale,
            offset,
            min_level: 0,
            max_level: u8::MAX,
        }
    }

    /// `round((value + offset) * scale)` 을 [min_level, max_level] 로 클램프
    pub fn level(&self, value: f64) -> u8 {
        // NaN 은 max() 에서 min_level 로 떨어진다
        ((value + self.offset) * self.scale)
            .round()
            .max(self.min_level as f64)
            .min(self.max_level as f64) as u8
    }
}

impl Default for Quantizer {
    fn default() -> Self {
        Self::new(1.0, 0.0)
    }
}

/// 세부 샘플마다 1비트씩 담은 반올림 방향 비트열
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundingBits {
    /// 한 단위를 몇 등분하는지 (예: 10 → 1/10 단위)
    pub subdivisions: u8,
    /// 위치 p 는 바이트 p / 8 의 비트 p % 8
    pub bytes: Vec<u8>,
}

impl RoundingBits {
    pub fn bit(&self, position: usize) -> bool {
        (self.bytes[position >> 3] >> (position & 7)) & 1 == 1
    }
}

/// 압축된 룩업 테이블
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedTable {
    pub layout: TableLayout,
    /// 앵커마다 절대 레벨 1바이트
    pub abs: Vec<u8>,
    /// 앵커마다 `첫 하프 << 4 | 둘째 하프` 사전 인덱스
    pub diff_index: Vec<u8>,
    /// 처음 등장한 순서대로 쌓인 델타 비트 패턴 (MSB 먼저)
    pub dictionary: Vec<u8>,
    pub rounding_bits: Option<RoundingBits>,
}

impl EncodedTable {
    /// 출력되는 배열들의 총 바이트 수
    pub fn byte_size(&self) -> usize {
        self.abs.len()
            + self.diff_index.len()
            + self.dictionary.len()
            + self.rounding_bits.as_ref().map_or(0, |bits| bits.bytes.len())
    }
}
