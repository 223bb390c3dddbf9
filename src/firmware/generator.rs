//! 설정 → 인코딩 → C 소스 생성 파이프라인

use anyhow::{Context, Result};

use super::c_source::{CSourceEmitter, EmitOptions, TableSection};
use crate::core::systems::{GeneratorConfig, TableJob};
use crate::core::types::EncodedTable;

/// 인코딩된 테이블과 부가 정보
#[derive(Debug, Clone)]
pub struct GeneratedTable {
    pub name: String,
    pub table: EncodedTable,
    /// 압축 없이 양자화한 256개 레벨
    pub reference: Vec<u8>,
    pub abs_offset: u8,
    pub emit_test_table: bool,
}

impl GeneratedTable {
    /// 복원값이 기준 레벨과 다른 위치 수 (정상이면 0)
    pub fn mismatches(&self) -> usize {
        self.table
            .decode_all()
            .iter()
            .zip(&self.reference)
            .filter(|(decoded, expected)| decoded != expected)
            .count()
    }
}

/// 테이블별 요약
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReport {
    pub name: String,
    pub anchors: usize,
    pub dictionary_len: usize,
    pub byte_size: usize,
    pub mismatches: usize,
}

pub fn encode_job(job: &TableJob) -> Result<GeneratedTable> {
    let table = job
        .encoder
        .encode(&job.source)
        .with_context(|| format!("테이블 {} 인코딩 실패", job.name))?;
    let reference = job.encoder.reference_levels(&job.source);

    log::debug!(
        "{}: 앵커 {}개, 패턴 {}개, {} bytes",
        job.name,
        table.abs.len(),
        table.dictionary.len(),
        table.byte_size()
    );

    Ok(GeneratedTable {
        name: job.name.clone(),
        table,
        reference,
        abs_offset: job.abs_offset,
        emit_test_table: job.emit_test_table,
    })
}

/// 설정의 모든 테이블을 인코딩. 하나라도 실패하면 전체 실패
pub fn encode_all(config: &GeneratorConfig) -> Result<Vec<GeneratedTable>> {
    config.build()?.iter().map(encode_job).collect()
}

pub fn render(config: &GeneratorConfig, tables: &[GeneratedTable]) -> Result<String> {
    let emitter = CSourceEmitter::new(EmitOptions {
        storage_attribute: config.storage_attribute.clone(),
        header_guard: config.header_guard.clone(),
        includes: config.includes.clone(),
    });

    let sections: Vec<TableSection<'_>> = tables
        .iter()
        .map(|t| TableSection {
            name: &t.name,
            table: &t.table,
            abs_offset: t.abs_offset,
            reference: t.emit_test_table.then_some(t.reference.as_slice()),
        })
        .collect();

    emitter.render(&sections).context("C 소스 포맷 실패")
}

/// 설정 하나로 헤더 전체 생성
pub fn generate(config: &GeneratorConfig) -> Result<String> {
    let tables = encode_all(config)?;
    let source = render(config, &tables)?;
    log::info!("테이블 {}개 생성, {} bytes 소스", tables.len(), source.len());
    Ok(source)
}

pub fn inspect(config: &GeneratorConfig) -> Result<Vec<TableReport>> {
    Ok(encode_all(config)?
        .iter()
        .map(|t| TableReport {
            name: t.name.clone(),
            anchors: t.table.abs.len(),
            dictionary_len: t.table.dictionary.len(),
            byte_size: t.table.byte_size(),
            mismatches: t.mismatches(),
        })
        .collect())
}
