//! 도메인 인덱스 → 물리값 샘플 함수

/// 코덱이 블랙박스로 취급하는 단조 샘플 함수
///
/// 같은 인덱스에는 항상 같은 값을 돌려주는 순수 함수여야 한다.
pub trait SampleSource {
    fn sample(&self, index: u8) -> f64;
}

impl<F> SampleSource for F
where
    F: Fn(u8) -> f64,
{
    fn sample(&self, index: u8) -> f64 {
        self(index)
    }
}

/// 8비트 인덱스를 물리 입력값(예: mV)으로 옮기는 선형 매핑
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainMapping {
    /// 인덱스 1 당 입력 증가량
    pub step: f64,
    /// 인덱스 0 의 입력값
    pub origin: f64,
}

impl DomainMapping {
    pub fn new(step: f64, origin: f64) -> Self {
        Self { step, origin }
    }

    pub fn input(&self, index: u8) -> f64 {
        self.origin + index as f64 * self.step
    }

    /// 원점이 인덱스 몇 칸에 해당하는지 (펌웨어가 읽기 전에 빼는 값)
    pub fn abs_offset(&self) -> u8 {
        if self.step <= 0.0 {
            return 0;
        }
        (self.origin / self.step).round().max(0.0).min(u8::MAX as f64) as u8
    }
}

impl Default for DomainMapping {
    fn default() -> Self {
        Self::new(1.0, 0.0)
    }
}
