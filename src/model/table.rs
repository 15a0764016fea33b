//! Table and Row data structures

use indexmap::IndexSet;

use super::schema::{normalize_headers, HeaderRename};

/// A row in the table
///
/// Every cell is kept as the literal source text. A missing value is an
/// empty string, never a null marker.
#[derive(Debug, Clone)]
pub struct Row {
    /// Cell values in column order
    pub cells: Vec<String>,
    /// Original line number in the source text (1-indexed, 0 when built in memory)
    pub source_line: usize,
}

impl Row {
    /// Create a new row
    pub fn new(cells: Vec<String>, source_line: usize) -> Self {
        Self { cells, source_line }
    }

    /// Get a cell value by column index
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }
}

// Rows compare by content only; where a row came from is provenance.
impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for Row {}

/// A table of text cells over an ordered set of uniquely named columns
#[derive(Debug, Clone)]
pub struct Table {
    columns: IndexSet<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table with the given column names.
    ///
    /// Names are normalized with [`normalize_headers`] so the column set is
    /// always unique.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_renames(columns).0
    }

    /// Like [`Table::new`], also reporting which header cells were renamed
    pub fn with_renames<I, S>(columns: I) -> (Self, Vec<HeaderRename>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (names, renames) = normalize_headers(columns);
        let table = Self {
            columns: names.into_iter().collect(),
            rows: Vec::new(),
        };
        (table, renames)
    }

    /// An empty table sharing this table's column layout
    pub fn empty_like(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: Vec::new(),
        }
    }

    /// Add a row to the table.
    ///
    /// Missing trailing cells are filled with empty strings; cells beyond the
    /// column count are dropped.
    pub fn add_row(&mut self, mut cells: Vec<String>, source_line: usize) {
        cells.resize(self.columns.len(), String::new());
        self.rows.push(Row::new(cells, source_line));
    }

    /// Append a row already shaped for this table's layout
    pub(crate) fn push_row(&mut self, row: Row) {
        debug_assert_eq!(row.cells.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Column names in order
    pub fn columns(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.columns.iter().map(String::as_str)
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name)
    }

    /// All rows in source order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Cell text at a row index and column name
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col)
    }

    /// Values of one column in row order
    pub fn column_values(&self, name: &str) -> Option<impl Iterator<Item = &str> + '_> {
        let col = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| row.get(col).unwrap_or("")))
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// True when the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// IndexSet equality ignores order, but column order is part of a table's identity.
impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.columns.iter().eq(other.columns.iter()) && self.rows == other.rows
    }
}

impl Eq for Table {}
