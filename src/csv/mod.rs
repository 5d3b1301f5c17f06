//! CSV utilities for reading measurement exports

mod parser;

pub use parser::CsvParser;
