//! # 룩업 테이블 코덱 핵심 모듈
//!
//! 단조 증가하는 응답 곡선을 앵커 절대값 + 1비트 델타 패턴 사전으로 압축한다.

pub mod types;
pub mod error;
pub mod curve;
pub mod encoder;
pub mod decoder;
pub mod systems;

// 주요 타입들 재수출
pub use types::*;
pub use error::{TableError, LayoutError, CurveError};
pub use curve::*;
pub use encoder::*;
pub use systems::*;
