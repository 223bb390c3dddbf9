//! 설정 시스템

pub mod config;

pub use config::{GeneratorConfig, TableConfig, LayoutConfig, DomainConfig, CurveConfig, TableJob};

#[cfg(test)]
mod __tests__;
