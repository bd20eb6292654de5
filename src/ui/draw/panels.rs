//! Main panel rendering
//!
//! - Request panel (left side): the request form
//! - Response panel (right side): status, headers, view tabs and body

use super::components::SPINNER;
use super::styling::{get_method_color, Palette};
use super::views::{render_placeholder, render_view};
use crate::state::AppState;
use crate::types::{InputMode, PanelFocus, RequestField};
use crate::viewer::ResponseViewer;
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const LABEL_WIDTH: u16 = 15;
const HEADERS_HEIGHT: u16 = 4;
const MAX_HEADER_LINES: usize = 8;

/// Render the left panel with the request form
pub fn render_request_panel(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let focused = state.ui.panel_focus == PanelFocus::Request;
    let block = Block::default()
        .title("[1] Request")
        .borders(Borders::ALL)
        .border_style(palette.border(focused));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let fields = state.request.config.visible_fields();
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|field| match field {
            RequestField::Body => Constraint::Min(3),
            RequestField::Headers => Constraint::Length(HEADERS_HEIGHT),
            _ => Constraint::Length(1),
        })
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let selected = state.selected_field();
    for (idx, field) in fields.iter().enumerate() {
        render_field(
            frame,
            rows[idx],
            state,
            *field,
            focused && *field == selected,
            palette,
        );
    }
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    field: RequestField,
    selected: bool,
    palette: &Palette,
) {
    let [label_area, value_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(LABEL_WIDTH), Constraint::Min(0)])
        .areas(area);

    let label_style = if selected {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.dim)
    };
    let marker = if selected { "► " } else { "  " };
    frame.render_widget(
        Paragraph::new(Span::styled(format!("{marker}{}", field.label()), label_style)),
        label_area,
    );

    if state.ui.input_mode == InputMode::Editing(field) {
        render_editor(frame, value_area, state, palette);
        return;
    }

    let config = &state.request.config;
    let value = match field {
        RequestField::Method => Line::from(Span::styled(
            format!("◂ {} ▸", config.method.as_str()),
            Style::default()
                .fg(get_method_color(config.method))
                .add_modifier(Modifier::BOLD),
        )),
        RequestField::Auth => selector(config.auth.label(), palette),
        RequestField::ContentType => selector(config.content_type.mime(), palette),
        RequestField::Password if !config.password.is_empty() => Line::from(Span::styled(
            "•".repeat(config.password.chars().count()),
            Style::default().fg(palette.text),
        )),
        text_field => {
            let text = config.text(text_field).unwrap_or_default();
            if text.is_empty() {
                Line::from(Span::styled(
                    placeholder(text_field),
                    Style::default().fg(palette.dim),
                ))
            } else if text_field.is_multiline() {
                // shown in full below
                Line::default()
            } else {
                Line::from(Span::styled(text, Style::default().fg(palette.text)))
            }
        }
    };

    let multiline_text = config
        .text(field)
        .filter(|text| field.is_multiline() && !text.is_empty());
    let paragraph = match multiline_text {
        Some(text) => Paragraph::new(
            text.lines()
                .map(|line| Line::from(Span::styled(line, Style::default().fg(palette.text))))
                .collect::<Vec<_>>(),
        ),
        None => Paragraph::new(value),
    };
    frame.render_widget(paragraph, value_area);
}

fn selector<'a>(label: &'a str, palette: &Palette) -> Line<'a> {
    Line::from(Span::styled(
        format!("◂ {label} ▸"),
        Style::default().fg(palette.accent),
    ))
}

fn placeholder(field: RequestField) -> &'static str {
    match field {
        RequestField::Url => "https://api.example.com/users",
        RequestField::Headers => "Key: Value, one per line",
        RequestField::Body => "request body",
        _ => "",
    }
}

/// Draw the field being edited, scrolled so the cursor stays visible
fn render_editor(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let editor = &state.request.editor;
    let (line, col) = editor.cursor_line_col();
    let height = area.height.max(1) as usize;
    let width = area.width.max(1) as usize;
    let top = line.saturating_sub(height - 1);
    let left = col.saturating_sub(width - 1);

    let lines: Vec<Line> = editor
        .content()
        .split('\n')
        .skip(top)
        .take(height)
        .map(|text| {
            let visible: String = text.chars().skip(left).collect();
            Line::from(Span::styled(
                visible,
                Style::default()
                    .fg(palette.number)
                    .add_modifier(Modifier::BOLD),
            ))
        })
        .collect();

    // cursor sits after the visible prefix, measured in terminal columns
    let cursor_x = editor
        .content()
        .split('\n')
        .nth(line)
        .map(|text| text.chars().skip(left).take(col - left).collect::<String>().width())
        .unwrap_or(0)
        .min(width - 1);

    frame.render_widget(Paragraph::new(lines), area);
    frame.set_cursor_position(Position::new(
        area.x + cursor_x as u16,
        area.y + (line - top) as u16,
    ));
}

/// Render the right panel with the current response
pub fn render_response_panel(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    palette: &Palette,
    spinner_index: usize,
) {
    let focused = state.ui.panel_focus == PanelFocus::Response;
    let block = Block::default()
        .title("[2] Response")
        .borders(Borders::ALL)
        .border_style(palette.border(focused));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.response.executing {
        let loading = Paragraph::new(format!(
            "{} Sending request...",
            SPINNER[spinner_index % SPINNER.len()]
        ))
        .style(Style::default().fg(palette.number));
        frame.render_widget(loading, inner);
        return;
    }

    let Some(viewer) = state.viewer() else {
        render_placeholder(frame, inner, "Press [s] to send the request", palette);
        return;
    };

    let header_lines = if state.ui.show_headers {
        viewer.snapshot().headers.len().clamp(1, MAX_HEADER_LINES) as u16
    } else {
        0
    };

    let [status_area, headers_area, tabs_area, body_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(header_lines),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

    render_status(frame, status_area, viewer, palette);
    if state.ui.show_headers {
        render_headers(frame, headers_area, state, viewer, palette);
    }
    render_mode_tabs(frame, tabs_area, viewer, palette);
    render_view(frame, body_area, viewer, palette, state.ui.yank_flash);
}

fn render_status(frame: &mut Frame, area: Rect, viewer: &ResponseViewer, palette: &Palette) {
    let snapshot = viewer.snapshot();
    let millis = snapshot.duration.as_millis();
    let line = if snapshot.error_message().is_some() && snapshot.status == 0 {
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(palette.accent)),
            Span::styled("no response", palette.status(snapshot.status_class())),
            Span::raw(format!("  {millis}ms")),
        ])
    } else {
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(palette.accent)),
            Span::styled(
                format!("{} {}", snapshot.status, snapshot.status_text),
                palette.status(snapshot.status_class()),
            ),
            Span::raw("  "),
            Span::styled("Duration: ", Style::default().fg(palette.accent)),
            Span::raw(format!("{millis}ms")),
            Span::raw("  "),
            Span::styled(
                snapshot.content_type().unwrap_or("").to_string(),
                Style::default().fg(palette.dim),
            ),
        ])
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_headers(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    viewer: &ResponseViewer,
    palette: &Palette,
) {
    let headers = &viewer.snapshot().headers;
    let mut lines: Vec<Line> = headers
        .iter()
        .skip(state.response.headers_scroll)
        .take(area.height as usize)
        .map(|(key, value)| {
            Line::from(vec![
                Span::styled(format!("{key}: "), Style::default().fg(palette.key)),
                Span::styled(value.as_str(), Style::default().fg(palette.text)),
            ])
        })
        .collect();
    if headers.is_empty() {
        lines.push(Line::from(Span::styled(
            "(no headers)",
            Style::default().fg(palette.dim),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_mode_tabs(frame: &mut Frame, area: Rect, viewer: &ResponseViewer, palette: &Palette) {
    let mut spans = Vec::new();
    for (idx, mode) in viewer.available_modes().iter().enumerate() {
        let label = format!(" {} {} ", idx + 1, mode.label());
        let style = if *mode == viewer.mode() {
            Style::default()
                .fg(palette.modal_bg)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.dim)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
