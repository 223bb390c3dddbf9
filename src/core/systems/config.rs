//! # 테이블 생성 설정
//!
//! 보정 상수, 레이아웃, 출력 형식을 하나의 JSON 파일로 받는다.
//! 로드한 설정은 `build()` 로 검증된 런타임 타입(`TableJob`)이 된다.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::curve::{CalibrationCurve, DomainMapping, InputAxis, MappedCurve};
use crate::core::encoder::TableEncoder;
use crate::core::types::{Quantizer, TableLayout};

/// 전체 생성 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_header_guard")]
    pub header_guard: String,
    /// `null` 이면 속성 없이 선언
    #[serde(default = "default_storage_attribute")]
    pub storage_attribute: Option<String>,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    pub tables: Vec<TableConfig>,
}

fn default_header_guard() -> String {
    "TABLES_H".to_string()
}

fn default_storage_attribute() -> Option<String> {
    Some("PROGMEM".to_string())
}

fn default_includes() -> Vec<String> {
    vec!["stdint.h".to_string()]
}

/// 테이블 하나의 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    /// C 배열 이름 접두어
    pub name: String,
    #[serde(default)]
    pub layout: LayoutConfig,
    pub quantizer: Quantizer,
    #[serde(default)]
    pub domain: DomainConfig,
    pub curve: CurveConfig,
    /// 예: 10 → 1/10 단위 반올림 비트
    #[serde(default)]
    pub rounding_subdivisions: Option<u8>,
    #[serde(default)]
    pub emit_test_table: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub num_anchors: usize,
    pub sub_block_bits: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let layout = TableLayout::default();
        Self {
            num_anchors: layout.num_anchors(),
            sub_block_bits: layout.sub_block_bits(),
        }
    }
}

/// 인덱스 → 물리 입력 매핑
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainConfig {
    pub step: f64,
    #[serde(default)]
    pub origin: f64,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self { step: 1.0, origin: 0.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveConfig {
    /// (입력, 출력) 보정점
    pub points: Vec<(f64, f64)>,
    #[serde(default)]
    pub input_axis: InputAxis,
}

/// 검증을 마친 테이블 작업 단위
#[derive(Debug, Clone)]
pub struct TableJob {
    pub name: String,
    pub encoder: TableEncoder,
    pub source: MappedCurve,
    pub abs_offset: u8,
    pub emit_test_table: bool,
}

fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl GeneratorConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("설정 JSON 파싱 실패")
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("설정 파일을 읽을 수 없음: {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("설정 파일: {}", path.display()))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).with_context(|| format!("설정 파일 저장 실패: {}", path.display()))
    }

    /// 모든 테이블 설정을 검증하고 작업 단위로 변환
    pub fn build(&self) -> Result<Vec<TableJob>> {
        if !is_c_identifier(&self.header_guard) {
            bail!("헤더 가드 '{}' 가 C 식별자가 아님", self.header_guard);
        }
        if self.tables.is_empty() {
            bail!("생성할 테이블이 없음");
        }

        let mut seen = HashSet::new();
        let mut jobs = Vec::with_capacity(self.tables.len());
        for table in &self.tables {
            if !seen.insert(table.name.as_str()) {
                bail!("테이블 이름 중복: {}", table.name);
            }
            jobs.push(table.build().with_context(|| format!("테이블 {}", table.name))?);
        }
        Ok(jobs)
    }
}

impl TableConfig {
    pub fn build(&self) -> Result<TableJob> {
        if !is_c_identifier(&self.name) {
            bail!("'{}' 는 C 식별자가 아님", self.name);
        }

        let layout = TableLayout::new(self.layout.num_anchors, self.layout.sub_block_bits)?;

        let q = &self.quantizer;
        if !q.scale.is_finite() || q.scale <= 0.0 || !q.offset.is_finite() {
            bail!("양자화 scale/offset 이 잘못됨 (scale={}, offset={})", q.scale, q.offset);
        }
        if q.min_level > q.max_level {
            bail!("min_level {} > max_level {}", q.min_level, q.max_level);
        }

        if !self.domain.step.is_finite() || self.domain.step <= 0.0 || !self.domain.origin.is_finite() {
            bail!("도메인 step/origin 이 잘못됨");
        }
        let mapping = DomainMapping::new(self.domain.step, self.domain.origin);
        let curve = CalibrationCurve::new(&self.curve.points, self.curve.input_axis)?;

        let mut encoder = TableEncoder::new(layout, *q);
        if let Some(x) = self.rounding_subdivisions {
            encoder = encoder.with_rounding_bits(x)?;
        }

        Ok(TableJob {
            name: self.name.clone(),
            encoder,
            source: MappedCurve::new(mapping, curve),
            abs_offset: mapping.abs_offset(),
            emit_test_table: self.emit_test_table,
        })
    }
}
