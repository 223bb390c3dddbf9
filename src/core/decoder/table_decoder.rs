//! 압축 테이블에서 레벨 복원
//!
//! 펌웨어의 비트 시프트 판독 루틴과 같은 방식이다: 앵커의 절대값에서 시작해
//! 첫 하프 패턴의 상위 비트들을, 필요하면 둘째 하프 패턴의 상위 비트들까지 더한다.

use crate::core::types::{EncodedTable, TableLayout, DOMAIN_SIZE};

/// 상위 `n` 비트 마스크 (n = 0..=8)
#[inline]
fn top_bits(n: usize) -> u8 {
    (0xFF00u16 >> n) as u8
}

/// 배열 세 개에서 (앵커, 세부 인덱스) 레벨을 복원
///
/// 범위를 벗어난 인덱스는 호출자 오류이므로 패닉한다.
pub fn decode(
    layout: &TableLayout,
    abs: &[u8],
    diff_index: &[u8],
    dictionary: &[u8],
    anchor: usize,
    sub_index: usize,
) -> u8 {
    assert!(anchor < layout.num_anchors(), "anchor {} out of range", anchor);
    assert!(sub_index < layout.anchor_stride(), "sub-sample {} out of range", sub_index);

    let half = layout.sub_block_bits();
    let indices = diff_index[anchor];
    let first = dictionary[(indices >> 4) as usize];
    let second = dictionary[(indices & 0x0F) as usize];

    let bits_to_add = sub_index + 1;
    let mut level = abs[anchor] as u32;
    level += (first & top_bits(bits_to_add.min(half))).count_ones();
    if bits_to_add > half {
        level += (second & top_bits(bits_to_add - half)).count_ones();
    }
    debug_assert!(level <= u8::MAX as u32, "decoded level {} exceeds 255", level);
    level as u8
}

impl EncodedTable {
    pub fn decode(&self, anchor: usize, sub_index: usize) -> u8 {
        decode(
            &self.layout,
            &self.abs,
            &self.diff_index,
            &self.dictionary,
            anchor,
            sub_index,
        )
    }

    /// 도메인 위치로 바로 조회
    pub fn level_at(&self, position: u8) -> u8 {
        let (anchor, sub_index) = self.layout.split_position(position as usize);
        self.decode(anchor, sub_index)
    }

    pub fn decode_all(&self) -> Vec<u8> {
        (0..DOMAIN_SIZE).map(|p| self.level_at(p as u8)).collect()
    }

    /// 레벨과 반올림 비트로 더 고운 표시 자릿수를 복원 (예: 1/8 레벨 → 1/10 단위)
    ///
    /// `e = level % levels_per_unit` 일 때 `floor(e * x / levels_per_unit) + bit`.
    /// 반올림 비트가 없는 테이블이면 `None`.
    pub fn subunits_at(&self, position: u8, levels_per_unit: u8) -> Option<u8> {
        let bits = self.rounding_bits.as_ref()?;
        if levels_per_unit == 0 {
            return None;
        }
        let e = (self.level_at(position) % levels_per_unit) as u32;
        let base = e * bits.subdivisions as u32 / levels_per_unit as u32;
        Some(base as u8 + bits.bit(position as usize) as u8)
    }
}
