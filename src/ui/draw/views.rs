//! Response body views
//!
//! Each view draws a `ViewContent` produced by the viewer; nothing here
//! inspects the decoded body directly.

use super::modals::render_nested_modal;
use super::styling::Palette;
use crate::viewer::html::HtmlDocument;
use crate::viewer::raw::RawDocument;
use crate::viewer::table::{counted, CellView, TableModel, TRUNCATE_AT};
use crate::viewer::tree::{BranchKind, TreeLine, TreeNode};
use crate::viewer::{ResponseViewer, ViewContent};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Cell, Paragraph, Row, Table, Wrap},
    Frame,
};
use std::ops::Range;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a column grows when none of its cells is expanded
const MAX_COLUMN_WIDTH: u16 = TRUNCATE_AT as u16 + 2;
/// Widest a column grows around an expanded cell
const MAX_EXPANDED_WIDTH: u16 = 60;
const COLUMN_SPACING: u16 = 1;

/// Render the body of the current response in its active view
pub fn render_view(
    frame: &mut Frame,
    area: Rect,
    viewer: &ResponseViewer,
    palette: &Palette,
    flash: bool,
) {
    match viewer.render() {
        ViewContent::Error(message) => render_error_banner(frame, area, &message, palette),
        ViewContent::Tree { lines, cursor } => {
            render_tree(frame, area, &lines, cursor, palette, flash)
        }
        ViewContent::Table {
            base,
            selected_row,
            selected_col,
            overlay,
        } => {
            // The base selection is only highlighted while it is the active table
            let active = overlay.is_none();
            match base {
                Some(model) => render_table(
                    frame,
                    area,
                    &model,
                    (selected_row, selected_col),
                    active,
                    palette,
                    flash && active,
                ),
                None => render_placeholder(frame, area, "Scalar value has no table view", palette),
            }
            if let Some(overlay) = overlay {
                render_nested_modal(frame, &overlay, palette, flash);
            }
        }
        ViewContent::Raw { document, scroll } => {
            render_raw(frame, area, &document, scroll, palette, flash)
        }
        ViewContent::Html { document, scroll } => {
            render_html(frame, area, &document, scroll, palette)
        }
    }
}

fn render_error_banner(frame: &mut Frame, area: Rect, message: &str, palette: &Palette) {
    let style = Style::default().fg(palette.error);
    let mut lines = vec![
        Line::from(Span::styled(
            "✗ Request failed",
            style.add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(
        message
            .lines()
            .map(|line| Line::from(Span::styled(line.to_string(), style))),
    );

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

pub fn render_placeholder(frame: &mut Frame, area: Rect, text: &str, palette: &Palette) {
    frame.render_widget(
        Paragraph::new(Span::styled(
            text.to_string(),
            Style::default().fg(palette.dim),
        )),
        area,
    );
}

/// First index of a `height`-line window that keeps `cursor` visible
fn window_start(cursor: usize, height: usize) -> usize {
    cursor.saturating_sub(height.saturating_sub(1))
}

fn render_tree(
    frame: &mut Frame,
    area: Rect,
    lines: &[TreeLine],
    cursor: usize,
    palette: &Palette,
    flash: bool,
) {
    if lines.is_empty() {
        render_placeholder(frame, area, "(empty)", palette);
        return;
    }

    let start = window_start(cursor, area.height as usize);
    let visible: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(start)
        .take(area.height as usize)
        .map(|(idx, line)| {
            let rendered = tree_line(line, palette);
            if idx == cursor {
                rendered.style(palette.selected(flash))
            } else {
                rendered
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(visible), area);
}

fn tree_line<'a>(line: &'a TreeLine, palette: &Palette) -> Line<'a> {
    let mut spans = vec![Span::raw("  ".repeat(line.depth))];

    match &line.node {
        TreeNode::Branch {
            kind,
            len,
            expanded,
        } => {
            spans.push(Span::styled(
                if *expanded { "▼ " } else { "▶ " },
                Style::default().fg(palette.accent),
            ));
            if let Some(label) = &line.label {
                spans.push(Span::styled(label.as_str(), Style::default().fg(palette.key)));
                spans.push(Span::raw(": "));
            }
            let summary = match kind {
                BranchKind::Object if *expanded => format!("{{{len}}}"),
                BranchKind::Array if *expanded => format!("[{len}]"),
                BranchKind::Object => format!("{{…}} {}", counted(*len, "key", "keys")),
                BranchKind::Array => format!("[…] {}", counted(*len, "item", "items")),
            };
            spans.push(Span::styled(summary, Style::default().fg(palette.dim)));
        }
        TreeNode::Leaf { text, kind } => {
            spans.push(Span::raw("  "));
            if let Some(label) = &line.label {
                spans.push(Span::styled(label.as_str(), Style::default().fg(palette.key)));
                spans.push(Span::raw(": "));
            }
            spans.push(Span::styled(text.as_str(), palette.scalar(*kind)));
        }
    }

    Line::from(spans)
}

/// Draw a table model with the selected cell highlighted.
///
/// Only the columns that fit around the selected one are drawn, so wide
/// tables scroll horizontally as the column cursor moves.
pub fn render_table(
    frame: &mut Frame,
    area: Rect,
    model: &TableModel,
    (selected_row, selected_col): (usize, usize),
    active: bool,
    palette: &Palette,
    flash: bool,
) {
    if model.columns.is_empty() {
        render_placeholder(frame, area, "(empty)", palette);
        return;
    }

    let widths = column_widths(model);
    let visible = visible_columns(&widths, selected_col, area.width);

    let header = Row::new(model.columns[visible.clone()].iter().map(|column| {
        Cell::from(column.as_str()).style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let body_height = area.height.saturating_sub(1) as usize;
    let start = window_start(selected_row, body_height);
    let rows: Vec<Row> = model
        .rows
        .iter()
        .enumerate()
        .skip(start)
        .take(body_height)
        .map(|(row_idx, cells)| {
            let mut height = 1;
            let cells: Vec<Cell> = visible
                .clone()
                .map(|col| {
                    let (text, lines) = cell_text(&cells[col], widths[col], palette);
                    height = height.max(lines);
                    let cell = Cell::from(text);
                    if active && row_idx == selected_row && col == selected_col {
                        cell.style(palette.selected(flash).add_modifier(Modifier::REVERSED))
                    } else {
                        cell
                    }
                })
                .collect();

            let row = Row::new(cells).height(height);
            if active && row_idx == selected_row {
                row.style(Style::default().bg(palette.selection_bg))
            } else {
                row
            }
        })
        .collect();

    let constraints: Vec<Constraint> = visible.map(|col| Constraint::Length(widths[col])).collect();
    let table = Table::new(rows, constraints)
        .header(header)
        .column_spacing(COLUMN_SPACING);

    frame.render_widget(table, area);
}

/// Display text of one cell, wrapped to `width`, and its height in lines
fn cell_text<'a>(cell: &'a CellView, width: u16, palette: &Palette) -> (Text<'a>, u16) {
    match cell {
        CellView::Absent => (
            Text::styled(
                "undefined",
                Style::default()
                    .fg(palette.dim)
                    .add_modifier(Modifier::ITALIC),
            ),
            1,
        ),
        CellView::Text {
            text,
            kind,
            expandable: Some(true),
        } => {
            let lines: Vec<Line> = wrap_chars(text, width.max(1) as usize)
                .into_iter()
                .map(|chunk| Line::styled(chunk, palette.scalar(*kind)))
                .collect();
            let height = lines.len().max(1) as u16;
            (Text::from(lines), height)
        }
        CellView::Text { text, kind, .. } => (Text::styled(text.as_str(), palette.scalar(*kind)), 1),
        CellView::Inline(text) => (Text::styled(text.as_str(), Style::default().fg(palette.text)), 1),
        CellView::Trigger { label, .. } => (
            Text::styled(
                label.as_str(),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::UNDERLINED),
            ),
            1,
        ),
    }
}

/// Split `text` into chunks no wider than `width` terminal columns
fn wrap_chars(text: &str, width: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    let mut chunk_width = 0;

    for c in text.chars().filter(|c| *c != '\n') {
        let w = c.width().unwrap_or(0);
        // a char wider than the column still gets a chunk of its own
        if chunk_width + w > width && !chunk.is_empty() {
            chunks.push(std::mem::take(&mut chunk));
            chunk_width = 0;
        }
        chunk.push(c);
        chunk_width += w;
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}

fn display_width(cell: &CellView) -> (u16, bool) {
    let (len, expanded) = match cell {
        CellView::Absent => ("undefined".width(), false),
        CellView::Text {
            text, expandable, ..
        } => (text.width(), *expandable == Some(true)),
        CellView::Inline(text) => (text.width(), false),
        CellView::Trigger { label, .. } => (label.width(), false),
    };
    (len.min(u16::MAX as usize) as u16, expanded)
}

fn column_widths(model: &TableModel) -> Vec<u16> {
    model
        .columns
        .iter()
        .enumerate()
        .map(|(col, name)| {
            let mut width = name.width().min(u16::MAX as usize) as u16;
            let mut limit = MAX_COLUMN_WIDTH;
            for row in &model.rows {
                let (len, expanded) = display_width(&row[col]);
                width = width.max(len);
                if expanded {
                    limit = MAX_EXPANDED_WIDTH;
                }
            }
            width.clamp(3, limit)
        })
        .collect()
}

/// Columns to draw so that `selected` is visible within `available` cells
fn visible_columns(widths: &[u16], selected: usize, available: u16) -> Range<usize> {
    if widths.is_empty() {
        return 0..0;
    }
    let selected = selected.min(widths.len() - 1);
    let span = |range: Range<usize>| -> u32 {
        range
            .map(|col| widths[col] as u32 + COLUMN_SPACING as u32)
            .sum()
    };

    let mut start = 0;
    while start < selected && span(start..selected + 1) > available as u32 {
        start += 1;
    }

    let mut end = selected + 1;
    while end < widths.len() && span(start..end + 1) <= available as u32 {
        end += 1;
    }
    start..end
}

fn render_raw(
    frame: &mut Frame,
    area: Rect,
    document: &RawDocument,
    scroll: usize,
    palette: &Palette,
    flash: bool,
) {
    let gutter = document.gutter_width();
    let lines: Vec<Line> = document
        .lines
        .iter()
        .enumerate()
        .skip(scroll)
        .take(area.height as usize)
        .map(|(idx, tokens)| {
            let mut spans = vec![Span::styled(
                format!("{:>gutter$} ", idx + 1),
                Style::default().fg(palette.dim),
            )];
            spans.extend(
                tokens
                    .iter()
                    .map(|token| Span::styled(token.text.as_str(), palette.token(token.kind))),
            );
            let line = Line::from(spans);
            if idx == scroll {
                line.style(palette.selected(flash))
            } else {
                line
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_html(
    frame: &mut Frame,
    area: Rect,
    document: &HtmlDocument,
    scroll: usize,
    palette: &Palette,
) {
    let mut lines = Vec::new();
    if let Some(title) = &document.title {
        lines.push(Line::from(Span::styled(
            title.as_str(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }
    lines.extend(
        document
            .lines
            .iter()
            .skip(scroll)
            .map(|line| Line::from(Span::styled(line.as_str(), Style::default().fg(palette.text)))),
    );
    if document.lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "(no text content; press o to open in a browser)",
            Style::default().fg(palette.dim),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::parse_json;
    use crate::viewer::table::{render_table, TableState};

    #[test]
    fn test_visible_columns_follow_selection() {
        let widths = [10, 10, 10, 10];
        assert_eq!(visible_columns(&widths, 0, 25), 0..2);
        assert_eq!(visible_columns(&widths, 3, 25), 2..4);
        // a column wider than the area is still shown on its own
        assert_eq!(visible_columns(&[50, 5], 0, 20), 0..1);
        assert_eq!(visible_columns(&[], 0, 20), 0..0);
    }

    #[test]
    fn test_window_start_keeps_cursor_visible() {
        assert_eq!(window_start(0, 10), 0);
        assert_eq!(window_start(9, 10), 0);
        assert_eq!(window_start(15, 10), 6);
        assert_eq!(window_start(3, 0), 3);
    }

    #[test]
    fn test_wrap_chars() {
        assert_eq!(wrap_chars("abcdef", 4), vec!["abcd", "ef"]);
        assert!(wrap_chars("", 4).is_empty());
    }

    #[test]
    fn test_wrap_chars_respects_wide_chars() {
        let chunks = wrap_chars("日本語日本語テキスト", 4);
        assert_eq!(chunks, vec!["日本", "語日", "本語", "テキ", "スト"]);
        assert!(chunks.iter().all(|chunk| chunk.width() <= 4));
        // a single wide char in a one-column cell is not dropped
        assert_eq!(wrap_chars("日本", 1), vec!["日", "本"]);
    }

    #[test]
    fn test_column_widths_use_display_width() {
        let value = parse_json(r#"[{"名前":"山田太郎山田太郎","id":1}]"#).unwrap();
        let model = render_table(&value, &TableState::default()).unwrap();
        assert_eq!(column_widths(&model), vec![16, 3]);
    }
}
