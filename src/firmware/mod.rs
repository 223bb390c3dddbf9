//! 펌웨어 소스 출력

pub mod c_source;
pub mod generator;

pub use c_source::{CSourceEmitter, EmitOptions, TableSection};
pub use generator::{generate, inspect, encode_all, GeneratedTable, TableReport};
