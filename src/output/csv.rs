//! BOM-prefixed CSV encoding

use std::io::Write;

use tracing::trace;

use crate::error::OutputError;
use crate::model::Table;

/// UTF-8 byte-order mark; spreadsheet tools use it to detect the encoding
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// MIME type to advertise for serialized tables
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Write `table` as a BOM followed by comma-separated UTF-8 text.
///
/// The header comes first, then rows in table order. Fields containing a
/// comma, quote or line break are quoted, with embedded quotes doubled.
/// Records end with `\n`.
pub fn write_csv<W: Write>(table: &Table, mut writer: W) -> Result<(), OutputError> {
    writer.write_all(&UTF8_BOM)?;

    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(b',')
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .flexible(true)
        .from_writer(writer);

    csv_writer.write_record(table.columns())?;
    for row in table.rows() {
        csv_writer.write_record(&row.cells)?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Encode `table` in memory; see [`write_csv`] for the layout
pub fn serialize(table: &Table) -> Vec<u8> {
    let mut buffer = Vec::new();
    // A flexible writer over a Vec has no failure path.
    if let Err(e) = write_csv(table, &mut buffer) {
        unreachable!("in-memory CSV encoding failed: {}", e);
    }
    trace!(bytes = buffer.len(), rows = table.row_count(), "serialized table");
    buffer
}
