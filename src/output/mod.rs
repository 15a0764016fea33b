//! Output: CSV serialization, result files and run summaries

mod csv;
mod files;
mod json;
mod terminal;

use anyhow::Result;
use serde::Serialize;
use termcolor::WriteColor;

use crate::config::OutputFormat;
use crate::diff::PartitionStats;

pub use self::csv::{serialize, write_csv, CSV_MIME_TYPE, UTF8_BOM};
pub use files::{
    file_timestamp, partition_file_name, write_partitions, BaseNames, WrittenFile,
    TIMESTAMP_FORMAT,
};
pub use json::JsonOutput;
pub use terminal::{render_preview, TerminalOutput};

/// What a run compared and produced
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub input_a: String,
    pub input_b: String,
    pub key_a: String,
    pub key_b: String,
    pub stats: PartitionStats,
    /// Empty when nothing was written
    pub files: Vec<WrittenFile>,
}

/// Trait for summary formatters
pub trait SummaryFormatter {
    /// Render a run report to a writer
    fn render(&self, report: &Report, writer: &mut dyn WriteColor) -> Result<()>;
}

/// Factory for creating summary formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create a formatter based on format type
    pub fn create(format: OutputFormat) -> Box<dyn SummaryFormatter> {
        match format {
            OutputFormat::Terminal => Box::new(TerminalOutput::new()),
            OutputFormat::Json => Box::new(JsonOutput::new()),
        }
    }
}
