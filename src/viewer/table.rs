//! Table view model and the nested drill-down stack

use super::classify::{classify, inline_list, scalar_kind, Category, ScalarKind};
use super::flatten::{flatten, Flattened};
use crate::value::DecodedValue;
use std::collections::HashSet;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Scalar cells wider than this many terminal columns start truncated
pub const TRUNCATE_AT: usize = 40;

/// Cursor and per-cell expansion for one table instance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableState {
    pub selected_row: usize,
    pub selected_col: usize,
    expanded_cells: HashSet<(usize, String)>,
}

impl TableState {
    pub fn is_cell_expanded(&self, row: usize, column: &str) -> bool {
        self.expanded_cells.contains(&(row, column.to_string()))
    }

    pub fn toggle_cell(&mut self, row: usize, column: &str) {
        let key = (row, column.to_string());
        if !self.expanded_cells.remove(&key) {
            self.expanded_cells.insert(key);
        }
    }
}

/// What a single table cell shows
#[derive(Debug, Clone, PartialEq)]
pub enum CellView {
    /// The row has no value for this column
    Absent,
    Text {
        text: String,
        kind: ScalarKind,
        /// `Some(expanded)` when the text is long enough to toggle
        expandable: Option<bool>,
    },
    /// Array of scalars, e.g. `[1, 2, 3]`
    Inline(String),
    /// Composite value opening a nested view
    Trigger { label: String, title: String },
}

/// Header plus body rows, ready for drawing
#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellView>>,
}

/// Render `value` as a table; `None` when the value has no tabular shape
pub fn render_table(value: &DecodedValue, state: &TableState) -> Option<TableModel> {
    if !value.is_composite() {
        return None;
    }

    let flat = flatten(value);
    let rows = (0..flat.rows.len())
        .map(|row| {
            flat.columns
                .iter()
                .enumerate()
                .map(|(col, column)| cell_view(flat.cell(row, col), row, column, state))
                .collect()
        })
        .collect();

    Some(TableModel {
        columns: flat.columns.clone(),
        rows,
    })
}

fn cell_view(
    value: Option<&DecodedValue>,
    row: usize,
    column: &str,
    state: &TableState,
) -> CellView {
    let Some(value) = value else {
        return CellView::Absent;
    };

    match (classify(value), value) {
        (Category::ArrayOfObjects, DecodedValue::Array(items)) => CellView::Trigger {
            label: format!("[..] {}", counted(items.len(), "item", "items")),
            title: format!("Array: {column}"),
        },
        (Category::PlainObject, DecodedValue::Object(entries)) => CellView::Trigger {
            label: counted(entries.len(), "property", "properties"),
            title: format!("Object: {column}"),
        },
        (Category::ArrayOfScalars, DecodedValue::Array(items)) => {
            CellView::Inline(inline_list(items))
        }
        _ => {
            let full = value.plain_text();
            let kind = scalar_kind(value);
            if !is_long(&full) {
                CellView::Text {
                    text: full,
                    kind,
                    expandable: None,
                }
            } else if state.is_cell_expanded(row, column) {
                CellView::Text {
                    text: full,
                    kind,
                    expandable: Some(true),
                }
            } else {
                CellView::Text {
                    text: ellipsize(&full, TRUNCATE_AT),
                    kind,
                    expandable: Some(false),
                }
            }
        }
    }
}

/// `"1 item"`, `"3 items"`
pub fn counted(n: usize, one: &str, many: &str) -> String {
    format!("{n} {}", if n == 1 { one } else { many })
}

/// Whether a scalar's text is wide enough to start truncated
pub fn is_long(text: &str) -> bool {
    text.width() > TRUNCATE_AT
}

/// Single-line form of `text` cut to `max_width` terminal columns, ellipsis included
pub fn ellipsize(text: &str, max_width: usize) -> String {
    let single_line: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if single_line.width() <= max_width {
        return single_line;
    }

    let budget = max_width.saturating_sub(1);
    let mut kept = String::new();
    let mut used = 0;
    for c in single_line.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        kept.push(c);
        used += w;
    }
    format!("{kept}…")
}

/// A drill-down opened from a table cell
#[derive(Debug, Clone, PartialEq)]
pub struct NestedView {
    pub data: DecodedValue,
    pub title: String,
    pub table: TableState,
}

impl NestedView {
    /// Build the nested view for the cell at (row, col) if it is a drill-down trigger
    pub fn from_cell(value: &DecodedValue, row: usize, col: usize) -> Option<Self> {
        let flat: Flattened = flatten(value);
        let column = flat.columns.get(col)?;
        let cell = flat.cell(row, col)?;

        let title = match classify(cell) {
            Category::ArrayOfObjects => format!("Array: {column}"),
            Category::PlainObject => format!("Object: {column}"),
            _ => return None,
        };

        Some(Self {
            data: cell.clone(),
            title,
            table: TableState::default(),
        })
    }
}

/// Stack of open drill-downs; only the top entry is ever pushed or popped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NestedViewStack {
    views: Vec<NestedView>,
}

impl NestedViewStack {
    pub fn push(&mut self, view: NestedView) {
        self.views.push(view);
    }

    pub fn pop(&mut self) -> Option<NestedView> {
        self.views.pop()
    }

    pub fn top(&self) -> Option<&NestedView> {
        self.views.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut NestedView> {
        self.views.last_mut()
    }

    pub fn depth(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Titles from the first opened view to the top, joined for a modal title
    pub fn breadcrumb(&self) -> String {
        self.views
            .iter()
            .map(|view| view.title.as_str())
            .collect::<Vec<_>>()
            .join(" › ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::parse_json;

    fn is_trigger(cell: &CellView) -> bool {
        matches!(cell, CellView::Trigger { .. })
    }

    fn model(json: &str) -> TableModel {
        render_table(&parse_json(json).unwrap(), &TableState::default()).unwrap()
    }

    #[test]
    fn test_users_array_has_no_triggers() {
        let body = parse_json(r#"{"users":[{"id":1,"name":"Ann"},{"id":2,"name":"Bo"}]}"#).unwrap();
        let users = body.get("users").unwrap();
        let table = render_table(users, &TableState::default()).unwrap();

        assert_eq!(table.columns, vec!["id", "name"]);
        assert_eq!(table.rows.len(), 2);
        assert!(!table.rows.iter().flatten().any(is_trigger));
    }

    #[test]
    fn test_object_root_is_one_row_with_trigger() {
        let table = model(r#"{"users":[{"id":1}],"count":1}"#);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(
            table.rows[0][0],
            CellView::Trigger {
                label: "[..] 1 item".to_string(),
                title: "Array: users".to_string(),
            }
        );
    }

    #[test]
    fn test_nested_object_cell_is_trigger() {
        let table = model(r#"{"a": {"x":1,"y":2}, "b": 3}"#);
        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(
            table.rows[0][0],
            CellView::Trigger {
                label: "2 properties".to_string(),
                title: "Object: a".to_string(),
            }
        );
        assert!(!is_trigger(&table.rows[0][1]));
    }

    #[test]
    fn test_array_cells_by_classification() {
        let table = model(r#"[{"tags":[1,2,3],"mixed":[1,2,{"x":1}]}]"#);
        assert_eq!(table.rows[0][0], CellView::Inline("[1, 2, 3]".to_string()));
        assert!(is_trigger(&table.rows[0][1]));
    }

    #[test]
    fn test_absent_cells() {
        let table = model(r#"[{"a":1},{"b":2}]"#);
        assert_eq!(table.rows[0][1], CellView::Absent);
        assert_eq!(table.rows[1][0], CellView::Absent);
    }

    #[test]
    fn test_null_renders_as_text() {
        let table = model(r#"[{"a":null}]"#);
        assert_eq!(
            table.rows[0][0],
            CellView::Text {
                text: "null".to_string(),
                kind: ScalarKind::Null,
                expandable: None,
            }
        );
    }

    #[test]
    fn test_long_cell_toggle_is_per_cell() {
        let long = "x".repeat(TRUNCATE_AT + 10);
        let value = parse_json(&format!(r#"[{{"a":"{long}","b":"{long}"}}]"#)).unwrap();
        let mut state = TableState::default();
        state.toggle_cell(0, "a");

        let table = render_table(&value, &state).unwrap();
        match (&table.rows[0][0], &table.rows[0][1]) {
            (
                CellView::Text { text: a, expandable: Some(true), .. },
                CellView::Text { text: b, expandable: Some(false), .. },
            ) => {
                assert_eq!(a, &long);
                assert_eq!(b.width(), TRUNCATE_AT);
                assert!(b.ends_with('…'));
            }
            other => panic!("unexpected cells {other:?}"),
        }

        state.toggle_cell(0, "a");
        assert!(!state.is_cell_expanded(0, "a"));
    }

    #[test]
    fn test_scalar_root_has_no_table() {
        assert!(render_table(&parse_json("42").unwrap(), &TableState::default()).is_none());
    }

    #[test]
    fn test_trigger_labels_pluralise() {
        let table = model(r#"{"one":[{"a":1}],"two":[{"a":1},{"a":2}],"obj":{"k":1}}"#);
        let labels: Vec<&str> = table.rows[0]
            .iter()
            .map(|cell| match cell {
                CellView::Trigger { label, .. } => label.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(labels, vec!["[..] 1 item", "[..] 2 items", "1 property"]);
    }

    #[test]
    fn test_ellipsize_flattens_newlines() {
        assert_eq!(ellipsize("a\nb", 10), "a b");
        assert_eq!(ellipsize("abcdef", 4), "abc…");
    }

    #[test]
    fn test_ellipsize_counts_wide_chars_twice() {
        let cut = ellipsize("日本語テキスト", 6);
        assert_eq!(cut, "日本…");
        assert!(cut.width() <= 6);
        assert_eq!(ellipsize("日本", 4), "日本");
    }

    #[test]
    fn test_wide_text_truncates_by_columns() {
        // 24 chars but 48 columns
        let wide = "山田太郎".repeat(6);
        let table = model(&format!(r#"[{{"name":"{wide}"}}]"#));
        match &table.rows[0][0] {
            CellView::Text { text, expandable: Some(false), .. } => {
                assert!(text.width() <= TRUNCATE_AT);
                assert!(text.ends_with('…'));
            }
            other => panic!("unexpected cell {other:?}"),
        }
    }

    #[test]
    fn test_nested_view_only_for_composites() {
        let value = parse_json(r#"{"a":{"x":1},"b":2}"#).unwrap();
        let nested = NestedView::from_cell(&value, 0, 0).unwrap();
        assert_eq!(nested.title, "Object: a");
        assert_eq!(nested.data, parse_json(r#"{"x":1}"#).unwrap());
        assert!(NestedView::from_cell(&value, 0, 1).is_none());
        assert!(NestedView::from_cell(&value, 4, 0).is_none());
    }

    #[test]
    fn test_stack_pops_only_the_top() {
        let value = parse_json(r#"{"a":{"b":{"c":1}}}"#).unwrap();
        let mut stack = NestedViewStack::default();

        let first = NestedView::from_cell(&value, 0, 0).unwrap();
        let second = NestedView::from_cell(&first.data, 0, 0).unwrap();
        stack.push(first.clone());
        stack.push(second);
        assert_eq!(stack.breadcrumb(), "Object: a › Object: b");

        stack.pop();
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.top(), Some(&first));
    }
}
