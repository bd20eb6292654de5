//! Shallow row/column flattening for the table view
//!
//! Nested objects and arrays stay as references under their own key; depth is
//! explored through drill-down instead of dotted sub-columns.

use crate::value::DecodedValue;
use std::borrow::Cow;
use std::collections::HashSet;

/// One table row: column name to value, in the element's own key order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlattenedRow<'a> {
    cells: Vec<(Cow<'a, str>, &'a DecodedValue)>,
}

impl<'a> FlattenedRow<'a> {
    fn from_value(value: &'a DecodedValue) -> Self {
        let cells = match value {
            DecodedValue::Object(entries) => entries
                .iter()
                .map(|(key, v)| (Cow::Borrowed(key.as_str()), v))
                .collect(),
            DecodedValue::Array(items) => items
                .iter()
                .enumerate()
                .map(|(idx, v)| (Cow::Owned(idx.to_string()), v))
                .collect(),
            // scalar elements contribute no keys
            _ => Vec::new(),
        };
        Self { cells }
    }

    /// Value under `column`, or `None` when this row never had that key
    pub fn get(&self, column: &str) -> Option<&'a DecodedValue> {
        self.cells
            .iter()
            .find(|(key, _)| key == column)
            .map(|(_, value)| *value)
    }
}

/// Rows plus the derived column set
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Flattened<'a> {
    pub columns: Vec<String>,
    pub rows: Vec<FlattenedRow<'a>>,
}

impl<'a> Flattened<'a> {
    /// Value at (row, column index)
    pub fn cell(&self, row: usize, col: usize) -> Option<&'a DecodedValue> {
        let column = self.columns.get(col)?;
        self.rows.get(row)?.get(column)
    }
}

/// Flatten a composite value: one row per array element, or one row for an object.
///
/// Scalars are not tabular and yield an empty result.
pub fn flatten(value: &DecodedValue) -> Flattened<'_> {
    let rows: Vec<FlattenedRow> = match value {
        DecodedValue::Array(items) => items.iter().map(FlattenedRow::from_value).collect(),
        DecodedValue::Object(_) => vec![FlattenedRow::from_value(value)],
        _ => Vec::new(),
    };

    let columns = column_set(&rows);
    Flattened { columns, rows }
}

/// Ordered union of keys across rows, first-seen order
fn column_set(rows: &[FlattenedRow]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut columns = Vec::new();
    for row in rows {
        for (key, _) in &row.cells {
            if seen.insert(key.as_ref()) {
                columns.push(key.to_string());
            }
        }
    }
    columns
}
