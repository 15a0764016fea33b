//! Result file naming and writing

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use serde::Serialize;
use tracing::info;

use crate::diff::{Partition, PartitionResult};
use crate::error::OutputError;
use crate::model::Side;

use super::csv::write_csv;

/// Timestamp format embedded in output file names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Format a point in time for output file names
pub fn file_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// File name for one partition.
///
/// `base` is the stem of the input the partition's rows come from.
pub fn partition_file_name(partition: Partition, base: &str, timestamp: &str) -> String {
    if partition.is_exclusive() {
        format!("[only_exists]{}_{}.csv", base, timestamp)
    } else {
        format!("[merge_data]Format={}_{}.csv", base, timestamp)
    }
}

/// A partition written to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFile {
    pub partition: Partition,
    pub path: PathBuf,
    pub rows: usize,
}

/// Base names of the two inputs, used to name their partitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseNames {
    pub a: String,
    pub b: String,
}

impl BaseNames {
    /// Identical names get `_1` / `_2` suffixes so the two sides never
    /// write to the same file.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a == b {
            Self {
                a: format!("{}_1", a),
                b: format!("{}_2", b),
            }
        } else {
            Self { a, b }
        }
    }

    fn for_partition(&self, partition: Partition) -> &str {
        match partition.side() {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }
}

/// Write all four partitions into `dir` as BOM-prefixed CSV files
pub fn write_partitions(
    result: &PartitionResult,
    dir: &Path,
    names: &BaseNames,
    timestamp: &str,
) -> Result<Vec<WrittenFile>, OutputError> {
    let mut written = Vec::with_capacity(4);

    for (partition, table) in result.partitions() {
        let file_name = partition_file_name(partition, names.for_partition(partition), timestamp);
        let path = dir.join(file_name);

        let file = File::create(&path)?;
        write_csv(table, BufWriter::new(file))?;

        info!(path = %path.display(), rows = table.row_count(), %partition, "wrote partition");
        written.push(WrittenFile {
            partition,
            path,
            rows: table.row_count(),
        });
    }

    Ok(written)
}
