//! 델타 비트 패턴 사전

use crate::core::types::MAX_DICTIONARY_LEN;

/// 처음 등장한 순서를 유지하는 패턴 사전
///
/// 항목이 최대 16개라 선형 탐색으로 충분하다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternDictionary {
    patterns: Vec<u8>,
}

impl PatternDictionary {
    pub fn new() -> Self {
        Self { patterns: Vec::with_capacity(MAX_DICTIONARY_LEN) }
    }

    /// 패턴의 인덱스를 돌려주고, 없으면 추가한다.
    /// 17번째 패턴이면 `None`.
    pub fn intern(&mut self, pattern: u8) -> Option<u8> {
        if let Some(index) = self.lookup(pattern) {
            return Some(index);
        }
        if self.patterns.len() >= MAX_DICTIONARY_LEN {
            return None;
        }
        self.patterns.push(pattern);
        log::debug!(
            "새 델타 패턴 {:#010b} → 인덱스 {}",
            pattern,
            self.patterns.len() - 1
        );
        Some((self.patterns.len() - 1) as u8)
    }

    pub fn lookup(&self, pattern: u8) -> Option<u8> {
        self.patterns
            .iter()
            .position(|&p| p == pattern)
            .map(|index| index as u8)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.patterns
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.patterns
    }
}
