pub mod table_decoder;

pub use table_decoder::decode;

#[cfg(test)]
pub mod __tests__;
