//! Parser layer: CSV text into [`Table`]

mod csv;

use std::io::Read;
use std::path::Path;

use crate::error::ParseResult;
use crate::model::Table;

pub use self::csv::{delimiter_for_path, CsvParser};

/// Parse comma-separated text
pub fn parse_str(text: &str) -> ParseResult<Table> {
    CsvParser::new().parse_bytes(text.as_bytes())
}

/// Parse comma-separated bytes (must be UTF-8, an optional BOM is skipped)
pub fn parse_bytes(bytes: &[u8]) -> ParseResult<Table> {
    CsvParser::new().parse_bytes(bytes)
}

/// Parse everything a reader yields
pub fn parse_reader<R: Read>(reader: R) -> ParseResult<Table> {
    CsvParser::new().parse_reader(reader)
}

/// Parse a file; `.tsv` files are read tab-separated
pub fn parse_path(path: &Path) -> ParseResult<Table> {
    CsvParser::for_path(path).parse_path(path)
}
