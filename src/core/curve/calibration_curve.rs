//! 보정점 기반 구간 선형 곡선

use serde::{Deserialize, Serialize};

use super::sample_source::{DomainMapping, SampleSource};
use crate::core::error::CurveError;

/// log10 축에서 입력의 하한
const LOG_INPUT_FLOOR: f64 = 1e-6;

/// 보정점 입력축의 스케일
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputAxis {
    #[default]
    Linear,
    /// 보정점 입력과 평가 입력 모두 log10 으로 변환한 뒤 보간
    Log10,
}

impl InputAxis {
    fn transform(self, x: f64) -> f64 {
        match self {
            InputAxis::Linear => x,
            InputAxis::Log10 => x.max(LOG_INPUT_FLOOR).log10(),
        }
    }
}

/// (입력, 출력) 보정점 사이를 선형 보간하고 양 끝에서는 포화
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationCurve {
    axis: InputAxis,
    /// 변환된 입력축 기준으로 정렬된 점들
    points: Vec<(f64, f64)>,
}

impl CalibrationCurve {
    pub fn new(points: &[(f64, f64)], axis: InputAxis) -> Result<Self, CurveError> {
        if points.is_empty() {
            return Err(CurveError::Empty);
        }

        let mut transformed = Vec::with_capacity(points.len());
        for (index, &(input, output)) in points.iter().enumerate() {
            if !input.is_finite() || !output.is_finite() {
                return Err(CurveError::NonFinite { index });
            }
            let x = axis.transform(input);
            if let Some(&(prev, _)) = transformed.last() {
                if x <= prev {
                    return Err(CurveError::NotIncreasing { index, input });
                }
            }
            transformed.push((x, output));
        }

        Ok(Self { axis, points: transformed })
    }

    pub fn linear(points: &[(f64, f64)]) -> Result<Self, CurveError> {
        Self::new(points, InputAxis::Linear)
    }

    pub fn evaluate(&self, input: f64) -> f64 {
        let x = self.axis.transform(input);

        // points 는 비어있지 않음이 보장됨
        let (first_x, first_y) = self.points[0];
        if x <= first_x {
            return first_y;
        }
        let (last_x, last_y) = self.points[self.points.len() - 1];
        if x >= last_x {
            return last_y;
        }

        let upper = self.points.partition_point(|&(px, _)| px <= x);
        let (x0, y0) = self.points[upper - 1];
        let (x1, y1) = self.points[upper];
        let d = (x - x0) / (x1 - x0);
        y0 + d * (y1 - y0)
    }
}

/// 도메인 매핑과 보정 곡선을 묶은 샘플 함수
#[derive(Debug, Clone, PartialEq)]
pub struct MappedCurve {
    pub mapping: DomainMapping,
    pub curve: CalibrationCurve,
}

impl MappedCurve {
    pub fn new(mapping: DomainMapping, curve: CalibrationCurve) -> Self {
        Self { mapping, curve }
    }
}

impl SampleSource for MappedCurve {
    fn sample(&self, index: u8) -> f64 {
        self.curve.evaluate(self.mapping.input(index))
    }
}
