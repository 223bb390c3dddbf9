pub mod dictionary;
pub mod rounding_bits;
pub mod table_encoder;

// 테스트 모듈
#[cfg(test)]
mod __tests__;

// 재수출
pub use dictionary::PatternDictionary;
pub use rounding_bits::{rounding_bit, pack_rounding_bits};
pub use table_encoder::{TableEncoder, encode, reference_levels};
