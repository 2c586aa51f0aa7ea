//! Input handling: delimited-text parsing and source metadata.

mod parser;

pub use parser::{Parser, ParserConfig, SourceMetadata};
