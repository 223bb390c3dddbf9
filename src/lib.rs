//! 노출계 펌웨어용 룩업 테이블 생성 라이브러리
//!
//! 센서 응답 곡선을 8비트 절대값, 4비트 사전 인덱스, 1비트 델타 패턴 사전으로
//! 압축하고 펌웨어에 넣을 C 배열로 출력한다.

pub mod core;
pub mod firmware;

// 핵심 모듈들 재수출
pub use crate::core::{
    // 테이블 타입
    EncodedTable, TableLayout, Quantizer, RoundingBits, DOMAIN_SIZE, MAX_DICTIONARY_LEN,
    // 오류
    TableError, LayoutError, CurveError,
    // 샘플 함수
    SampleSource, DomainMapping, CalibrationCurve, InputAxis, MappedCurve,
    // 인코더
    TableEncoder, PatternDictionary, encode, reference_levels, rounding_bit,
    // 설정
    GeneratorConfig, TableConfig,
};
pub use crate::core::decoder::decode;
