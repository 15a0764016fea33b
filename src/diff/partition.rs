//! Single-pass row partitioning

use crate::model::{KeySet, Table};

/// Split `table` into rows whose key is absent from `other_keys` and rows
/// whose key is present, both in `table`'s layout and source order.
///
/// Returns `(absent, present)`.
pub fn split_by_membership(
    table: &Table,
    key_column: usize,
    other_keys: &KeySet<'_>,
) -> (Table, Table) {
    let mut absent = table.empty_like();
    let mut present = table.empty_like();

    for row in table.rows() {
        let key = row.get(key_column).unwrap_or("");
        if other_keys.contains(key) {
            present.push_row(row.clone());
        } else {
            absent.push_row(row.clone());
        }
    }

    (absent, present)
}
