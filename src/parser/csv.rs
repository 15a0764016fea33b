//! CSV parser

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{ParseError, ParseResult};
use crate::model::Table;
use crate::output::UTF8_BOM;

/// Byte offsets where each physical line starts.
///
/// `\n`, `\r\n` and a lone `\r` each end a line, including line breaks
/// inside quoted fields.
struct LineIndex<'a> {
    bytes: &'a [u8],
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        let mut starts = vec![0];
        for (i, &b) in bytes.iter().enumerate() {
            match b {
                b'\n' => starts.push(i + 1),
                b'\r' if bytes.get(i + 1) != Some(&b'\n') => starts.push(i + 1),
                _ => {}
            }
        }
        Self { bytes, starts }
    }

    /// 1-based line of the record whose position is `offset`.
    ///
    /// The decoder reports a record's position before the terminator and
    /// blank lines preceding it, so those are skipped first.
    fn record_line(&self, offset: u64) -> usize {
        let mut start = (offset as usize).min(self.bytes.len());
        while matches!(self.bytes.get(start), Some(b'\r' | b'\n')) {
            start += 1;
        }
        self.starts.partition_point(|&s| s <= start)
    }
}

/// Field delimiter implied by a file's extension (`.tsv` is tab-separated)
pub fn delimiter_for_path(path: &Path) -> u8 {
    let is_tsv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("tsv"));
    if is_tsv {
        b'\t'
    } else {
        b','
    }
}

/// Parser for delimited text.
///
/// The first record is the header. Every later record must have exactly as
/// many fields as the header; the first one that does not aborts the parse
/// with [`ParseError::Structural`]. Fields are kept as literal text: nothing
/// is trimmed, typed or unquoted beyond the RFC 4180 quoting rules.
#[derive(Debug, Clone, Copy)]
pub struct CsvParser {
    delimiter: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvParser {
    /// Comma-separated parser
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Parser suited to a file's extension, see [`delimiter_for_path`]
    pub fn for_path(path: &Path) -> Self {
        Self::new().with_delimiter(delimiter_for_path(path))
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse a file
    pub fn parse_path(&self, path: &Path) -> ParseResult<Table> {
        let file = File::open(path).map_err(|e| {
            ParseError::generic(format!("failed to open {}: {}", path.display(), e))
        })?;
        self.parse_reader(BufReader::new(file))
    }

    /// Parse everything a reader yields
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> ParseResult<Table> {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        self.parse_bytes(&buffer)
    }

    /// Parse UTF-8 bytes, skipping a leading byte-order mark
    pub fn parse_bytes(&self, bytes: &[u8]) -> ParseResult<Table> {
        let bytes = bytes.strip_prefix(UTF8_BOM.as_slice()).unwrap_or(bytes);

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(false)
            .from_reader(bytes);

        let headers = csv_reader
            .headers()
            .map_err(|e| ParseError::from_csv(e, 1))?
            .clone();

        if headers.is_empty() {
            return Err(ParseError::generic("no columns to parse from input"));
        }

        let (mut table, renames) = Table::with_renames(headers.iter());
        for rename in &renames {
            warn!(
                index = rename.index,
                original = %rename.original,
                renamed = %rename.renamed,
                "renamed header column"
            );
        }

        let lines = LineIndex::new(bytes);
        for (index, result) in csv_reader.records().enumerate() {
            // +2 for 1-indexing and header
            let record = result.map_err(|e| {
                let line = e
                    .position()
                    .map_or(index + 2, |p| lines.record_line(p.byte()));
                ParseError::from_csv(e, line)
            })?;
            let line = record
                .position()
                .map_or(index + 2, |p| lines.record_line(p.byte()));
            table.add_row(record.iter().map(str::to_string).collect(), line);
        }

        debug!(
            rows = table.row_count(),
            columns = table.column_count(),
            "parsed CSV"
        );

        Ok(table)
    }
}
