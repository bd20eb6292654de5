//! Response rendering and exploration
//!
//! A `ResponseViewer` owns one immutable `ResponseSnapshot` plus the `ViewState`
//! the user builds up while exploring it. Replacing the response means building
//! a new viewer, which resets every dependent piece of state at once.
//!
//! Submodules:
//! - `classify`: rendering category of a value
//! - `flatten`: shallow rows/columns for the table
//! - `tree`: expandable tree lines
//! - `table`: table cells and the nested drill-down stack
//! - `raw`: pretty JSON with syntax tags
//! - `html`: HTML text rendition and sandbox document

pub mod classify;
pub mod flatten;
pub mod html;
pub mod raw;
pub mod table;
pub mod tree;

use crate::export::{self, ExportArtifact};
use crate::types::ResponseSnapshot;
use crate::value::DecodedValue;
use classify::classify;
use flatten::flatten;
use html::{render_html, HtmlDocument};
use raw::{format_raw, RawDocument};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use table::{is_long, render_table, NestedView, NestedViewStack, TableModel, TableState};
use tree::{render_tree, ExpandPath, PathSegment, TreeLine, TreeNode, TreeState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Tree,
    Table,
    Raw,
    Html,
}

impl ViewMode {
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Tree => "Tree",
            ViewMode::Table => "Table",
            ViewMode::Raw => "Raw",
            ViewMode::Html => "HTML",
        }
    }
}

const DATA_MODES: [ViewMode; 3] = [ViewMode::Tree, ViewMode::Table, ViewMode::Raw];
const HTML_MODES: [ViewMode; 1] = [ViewMode::Html];

/// Everything the user changes while exploring one response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub mode: ViewMode,
    pub tree: TreeState,
    pub table: TableState,
    pub nested: NestedViewStack,
    /// First visible line in the raw and HTML views
    pub scroll: usize,
}

/// Overlay shown on top of the base table while drill-downs are open
#[derive(Debug, Clone, PartialEq)]
pub struct NestedOverlay {
    pub breadcrumb: String,
    pub depth: usize,
    pub model: Option<TableModel>,
    pub selected_row: usize,
    pub selected_col: usize,
}

/// Presentation model for the current mode
#[derive(Debug, Clone, PartialEq)]
pub enum ViewContent {
    Error(String),
    Tree {
        lines: Vec<TreeLine>,
        cursor: usize,
    },
    Table {
        base: Option<TableModel>,
        selected_row: usize,
        selected_col: usize,
        overlay: Option<NestedOverlay>,
    },
    Raw {
        document: RawDocument,
        scroll: usize,
    },
    Html {
        document: HtmlDocument,
        scroll: usize,
    },
}

/// What an activation (Enter/Space) did
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    ToggledNode(String),
    OpenedNested(String),
    ToggledCell,
    Nothing,
}

/// Pure render of `value` for the mode held in `state`
pub fn render(value: &DecodedValue, state: &ViewState) -> ViewContent {
    match state.mode {
        ViewMode::Tree => ViewContent::Tree {
            lines: render_tree(value, &state.tree),
            cursor: state.tree.cursor,
        },
        ViewMode::Table => {
            let overlay = state.nested.top().map(|top| NestedOverlay {
                breadcrumb: state.nested.breadcrumb(),
                depth: state.nested.depth(),
                model: render_table(&top.data, &top.table),
                selected_row: top.table.selected_row,
                selected_col: top.table.selected_col,
            });
            ViewContent::Table {
                base: render_table(value, &state.table),
                selected_row: state.table.selected_row,
                selected_col: state.table.selected_col,
                overlay,
            }
        }
        ViewMode::Raw => ViewContent::Raw {
            document: format_raw(value),
            scroll: state.scroll,
        },
        ViewMode::Html => {
            let document = match value {
                DecodedValue::String(source) => render_html(source),
                other => render_html(&other.plain_text()),
            };
            ViewContent::Html {
                document,
                scroll: state.scroll,
            }
        }
    }
}

/// Follow `path` from `value` down to the node it names
pub fn lookup<'a>(value: &'a DecodedValue, path: &ExpandPath) -> Option<&'a DecodedValue> {
    path.segments()
        .iter()
        .try_fold(value, |node, segment| match (node, segment) {
            (DecodedValue::Object(_), PathSegment::Key(key)) => node.get(key),
            (DecodedValue::Array(items), PathSegment::Index(idx)) => items.get(*idx),
            _ => None,
        })
}

/// Text placed on the clipboard for a selected value
fn copy_text(value: &DecodedValue) -> String {
    if value.is_composite() {
        value.pretty()
    } else {
        value.plain_text()
    }
}

#[derive(Debug, Clone)]
pub struct ResponseViewer {
    snapshot: Arc<ResponseSnapshot>,
    pub state: ViewState,
}

impl ResponseViewer {
    /// Bind a fresh viewer to `snapshot`; HTML responses always open in the HTML view
    pub fn new(snapshot: ResponseSnapshot, default_mode: ViewMode) -> Self {
        let snapshot = Arc::new(snapshot);
        let mode = if snapshot.is_html() {
            ViewMode::Html
        } else if default_mode == ViewMode::Html {
            ViewMode::Tree
        } else {
            default_mode
        };

        Self {
            snapshot,
            state: ViewState {
                mode,
                ..ViewState::default()
            },
        }
    }

    pub fn snapshot(&self) -> &ResponseSnapshot {
        &self.snapshot
    }

    pub fn mode(&self) -> ViewMode {
        self.state.mode
    }

    pub fn available_modes(&self) -> &'static [ViewMode] {
        if self.snapshot.is_html() {
            &HTML_MODES
        } else {
            &DATA_MODES
        }
    }

    /// Switch modes; modes not offered for this response are ignored
    pub fn set_mode(&mut self, mode: ViewMode) -> bool {
        if self.available_modes().contains(&mode) {
            tracing::debug!("View mode {:?} -> {:?}", self.state.mode, mode);
            self.state.mode = mode;
            true
        } else {
            false
        }
    }

    pub fn cycle_mode(&mut self) {
        let modes = self.available_modes();
        let current = modes.iter().position(|m| *m == self.state.mode).unwrap_or(0);
        self.state.mode = modes[(current + 1) % modes.len()];
    }

    pub fn render(&self) -> ViewContent {
        match self.snapshot.error_message() {
            Some(error) => ViewContent::Error(error.to_string()),
            None => render(&self.snapshot.body, &self.state),
        }
    }

    /// Data shown by the active table: the top drill-down, or the body
    pub fn table_data(&self) -> &DecodedValue {
        self.state
            .nested
            .top()
            .map(|view| &view.data)
            .unwrap_or(&self.snapshot.body)
    }

    fn active_table(&self) -> &TableState {
        self.state
            .nested
            .top()
            .map(|view| &view.table)
            .unwrap_or(&self.state.table)
    }

    fn active_table_mut(&mut self) -> &mut TableState {
        match self.state.nested.top_mut() {
            Some(view) => &mut view.table,
            None => &mut self.state.table,
        }
    }

    fn line_count(&self) -> usize {
        match self.render() {
            ViewContent::Tree { lines, .. } => lines.len(),
            ViewContent::Raw { document, .. } => document.line_count(),
            ViewContent::Html { document, .. } => document.lines.len(),
            ViewContent::Table { .. } | ViewContent::Error(_) => 0,
        }
    }

    /// Move the row/line cursor by `delta`
    pub fn move_cursor(&mut self, delta: isize) {
        match self.state.mode {
            ViewMode::Tree => {
                let max = self.line_count().saturating_sub(1);
                self.state.tree.cursor = offset(self.state.tree.cursor, delta, max);
            }
            ViewMode::Table => {
                let rows = flatten(self.table_data()).rows.len();
                let table = self.active_table_mut();
                table.selected_row = offset(table.selected_row, delta, rows.saturating_sub(1));
            }
            ViewMode::Raw | ViewMode::Html => {
                let max = self.line_count().saturating_sub(1);
                self.state.scroll = offset(self.state.scroll, delta, max);
            }
        }
    }

    /// Move the table column cursor by `delta`
    pub fn move_column(&mut self, delta: isize) {
        if self.state.mode != ViewMode::Table {
            return;
        }
        let cols = flatten(self.table_data()).columns.len();
        let table = self.active_table_mut();
        table.selected_col = offset(table.selected_col, delta, cols.saturating_sub(1));
    }

    /// Enter/Space on the current selection
    pub fn activate(&mut self) -> Activation {
        if self.snapshot.error_message().is_some() {
            return Activation::Nothing;
        }
        match self.state.mode {
            ViewMode::Tree => self.toggle_tree_node(),
            ViewMode::Table => self.activate_cell(),
            ViewMode::Raw | ViewMode::Html => Activation::Nothing,
        }
    }

    fn toggle_tree_node(&mut self) -> Activation {
        let lines = render_tree(&self.snapshot.body, &self.state.tree);
        match lines.get(self.state.tree.cursor) {
            Some(line) if line.is_branch() => {
                let path = line.path.clone();
                self.state.tree.toggle(&path);
                Activation::ToggledNode(path.to_string())
            }
            _ => Activation::Nothing,
        }
    }

    fn activate_cell(&mut self) -> Activation {
        let (row, col) = {
            let table = self.active_table();
            (table.selected_row, table.selected_col)
        };

        if let Some(view) = NestedView::from_cell(self.table_data(), row, col) {
            let title = view.title.clone();
            self.state.nested.push(view);
            tracing::debug!(
                "Opened nested view '{}' (depth {})",
                title,
                self.state.nested.depth()
            );
            return Activation::OpenedNested(title);
        }

        let long_column = {
            let flat = flatten(self.table_data());
            flat.cell(row, col)
                .filter(|value| !value.is_composite())
                .filter(|value| is_long(&value.plain_text()))
                .and_then(|_| flat.columns.get(col).cloned())
        };

        match long_column {
            Some(column) => {
                self.active_table_mut().toggle_cell(row, &column);
                Activation::ToggledCell
            }
            None => Activation::Nothing,
        }
    }

    /// Close the most recently opened nested view
    pub fn close_nested(&mut self) -> bool {
        match self.state.nested.pop() {
            Some(view) => {
                tracing::debug!("Closed nested view '{}'", view.title);
                true
            }
            None => false,
        }
    }

    pub fn has_nested(&self) -> bool {
        !self.state.nested.is_empty()
    }

    /// The drill-down stack is only drawn over the table view
    pub fn nested_visible(&self) -> bool {
        self.state.mode == ViewMode::Table && self.has_nested()
    }

    /// Artifact for the data currently on screen
    pub fn export(&self) -> ExportArtifact {
        match self.state.mode {
            ViewMode::Table => export::export(self.table_data(), ViewMode::Table),
            mode => export::export(&self.snapshot.body, mode),
        }
    }

    /// Clipboard text for the current selection
    pub fn selection_text(&self) -> Option<String> {
        if let Some(error) = self.snapshot.error_message() {
            return Some(error.to_string());
        }
        let body = &self.snapshot.body;
        match self.state.mode {
            ViewMode::Tree => {
                let lines = render_tree(body, &self.state.tree);
                let line = lines.get(self.state.tree.cursor)?;
                lookup(body, &line.path).map(copy_text)
            }
            ViewMode::Table => {
                let table = self.active_table();
                flatten(self.table_data())
                    .cell(table.selected_row, table.selected_col)
                    .map(copy_text)
            }
            ViewMode::Raw => format_raw(body)
                .line_text(self.state.scroll)
                .map(|line| extract_json_value(&line)),
            ViewMode::Html => Some(body.plain_text()),
        }
    }

    /// Kind of a tree leaf under the cursor, used by the footer hint
    pub fn cursor_on_branch(&self) -> bool {
        if self.state.mode != ViewMode::Tree {
            return false;
        }
        render_tree(&self.snapshot.body, &self.state.tree)
            .get(self.state.tree.cursor)
            .is_some_and(|line| matches!(line.node, TreeNode::Branch { .. }))
    }

    /// Whether the selected table cell opens a drill-down
    pub fn cursor_on_trigger(&self) -> bool {
        if self.state.mode != ViewMode::Table {
            return false;
        }
        let table = self.active_table();
        flatten(self.table_data())
            .cell(table.selected_row, table.selected_col)
            .is_some_and(|value| classify(value).is_drill_down())
    }
}

fn offset(current: usize, delta: isize, max: usize) -> usize {
    current.saturating_add_signed(delta).min(max)
}

/// Value portion of a pretty-printed JSON line
///
///   `  "access_token": "abc123",` -> `abc123`
///   `  123` -> `123`
fn extract_json_value(line: &str) -> String {
    let trimmed = line.trim();

    match trimmed.find("\": ") {
        Some(pos) if trimmed.starts_with('"') => trimmed[pos + 3..]
            .trim()
            .trim_end_matches(',')
            .trim()
            .trim_matches('"')
            .to_string(),
        _ => trimmed
            .trim_matches(|c| c == '{' || c == '}' || c == '[' || c == ']' || c == ',')
            .trim()
            .trim_matches('"')
            .to_string(),
    }
}
