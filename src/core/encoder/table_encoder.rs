//! 단조 응답 곡선 → 절대값 / 사전 인덱스 / 델타 패턴 사전 테이블

use super::dictionary::PatternDictionary;
use super::rounding_bits::pack_rounding_bits;
use crate::core::curve::SampleSource;
use crate::core::error::{LayoutError, TableError};
use crate::core::types::{EncodedTable, Quantizer, TableLayout, DOMAIN_SIZE, MAX_DICTIONARY_LEN};

/// 테이블 인코더
///
/// 한 번의 `encode` 호출이 자신의 사전과 출력 배열을 모두 소유하므로
/// 호출 사이에 남는 상태는 없다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableEncoder {
    layout: TableLayout,
    quantizer: Quantizer,
    /// `Some(x)` 이면 1/x 단위 반올림 비트열도 만든다
    rounding_subdivisions: Option<u8>,
}

impl TableEncoder {
    pub fn new(layout: TableLayout, quantizer: Quantizer) -> Self {
        Self {
            layout,
            quantizer,
            rounding_subdivisions: None,
        }
    }

    /// 1/`subdivisions` 단위 반올림 비트열도 만들도록 설정
    ///
    /// 양자화기의 `scale` 이 단위당 레벨 수(정수)로 쓰이므로 함께 검증한다.
    pub fn with_rounding_bits(mut self, subdivisions: u8) -> Result<Self, LayoutError> {
        if subdivisions < 2 {
            return Err(LayoutError::TooFewSubdivisions(subdivisions));
        }
        let scale = self.quantizer.scale;
        if !(1.0..=u8::MAX as f64).contains(&scale) || scale.fract() != 0.0 {
            return Err(LayoutError::FractionalLevelsPerUnit);
        }
        self.rounding_subdivisions = Some(subdivisions);
        Ok(self)
    }

    fn level_at<S: SampleSource + ?Sized>(&self, source: &S, position: usize) -> u8 {
        self.quantizer.level(source.sample(position as u8))
    }

    /// 전체 도메인을 샘플링해서 압축 테이블을 만든다
    pub fn encode<S: SampleSource + ?Sized>(&self, source: &S) -> Result<EncodedTable, TableError> {
        let layout = self.layout;
        let half = layout.sub_block_bits();

        let mut dictionary = PatternDictionary::new();
        let mut abs = Vec::with_capacity(layout.num_anchors());
        let mut diff_index = Vec::with_capacity(layout.num_anchors());

        for anchor in 0..layout.num_anchors() {
            let abs_level = self.level_at(source, layout.position(anchor, 0));

            // 둘째 하프 블록은 첫째 하프 블록의 마지막 레벨에서 이어진다
            let mut prev = abs_level;
            let mut indices = [0u8; 2];
            for (j, slot) in indices.iter_mut().enumerate() {
                let mut pattern = 0u8;
                for k in 0..half {
                    let sub_index = j * half + k;
                    let level = self.level_at(source, layout.position(anchor, sub_index));
                    match level.checked_sub(prev) {
                        Some(0) => {}
                        Some(1) => pattern |= 0x80 >> k,
                        _ => {
                            return Err(TableError::MonotonicityViolation {
                                anchor,
                                sub_index,
                                previous: prev,
                                observed: level,
                            })
                        }
                    }
                    prev = level;
                }
                *slot = dictionary
                    .intern(pattern)
                    .ok_or(TableError::DictionaryOverflow { anchor })?;
            }

            abs.push(abs_level);
            diff_index.push(indices[0] << 4 | indices[1]);
        }

        if dictionary.len() == MAX_DICTIONARY_LEN {
            log::warn!("델타 패턴 사전이 가득 참 ({} / {})", dictionary.len(), MAX_DICTIONARY_LEN);
        }
        log::debug!(
            "인코딩 완료: 앵커 {}개, 패턴 {}개",
            abs.len(),
            dictionary.len()
        );

        let rounding_bits = self
            .rounding_subdivisions
            .map(|x| pack_rounding_bits(source, &self.quantizer, x));

        Ok(EncodedTable {
            layout,
            abs,
            diff_index,
            dictionary: dictionary.into_vec(),
            rounding_bits,
        })
    }

    /// 압축 없이 양자화한 도메인 전체 레벨 (펌웨어 자체 검사용 기준 배열)
    pub fn reference_levels<S: SampleSource + ?Sized>(&self, source: &S) -> Vec<u8> {
        reference_levels(source, &self.quantizer)
    }
}

/// 도메인의 모든 위치를 그대로 양자화
pub fn reference_levels<S: SampleSource + ?Sized>(source: &S, quantizer: &Quantizer) -> Vec<u8> {
    (0..DOMAIN_SIZE)
        .map(|position| quantizer.level(source.sample(position as u8)))
        .collect()
}

/// 단발성 인코딩 편의 함수
pub fn encode<S: SampleSource + ?Sized>(
    source: &S,
    layout: TableLayout,
    quantizer: Quantizer,
) -> Result<EncodedTable, TableError> {
    TableEncoder::new(layout, quantizer).encode(source)
}
