//! Key-column value sets

use rustc_hash::FxHashSet;

use super::table::Table;

/// The set of distinct values found in one key column.
///
/// Values are compared as exact text: no trimming, case folding or numeric
/// normalization, and the empty string is a value like any other.
pub struct KeySet<'a> {
    values: FxHashSet<&'a str>,
}

impl<'a> KeySet<'a> {
    /// Collect the values of column `column` across every row of `table`
    pub fn from_column(table: &'a Table, column: usize) -> Self {
        let values = table
            .rows()
            .iter()
            .map(|row| row.get(column).unwrap_or(""))
            .collect();
        Self { values }
    }

    /// Whether `key` occurs at least once in the column
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains(key)
    }

    /// Number of distinct values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the column had no rows
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
