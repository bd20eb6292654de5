//! Reusable UI components
//!
//! - Header (method, URL, request progress)
//! - Status line (last request outcome or error)
//! - Footer (command help for the current context)

use super::styling::{get_method_color, Palette};
use crate::state::AppState;
use crate::types::{InputMode, PanelFocus, RequestField};
use crate::viewer::ViewMode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

/// Render the application header with the request line and progress
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    palette: &Palette,
    spinner_index: usize,
) {
    let config = &state.request.config;
    let url = if config.url.is_empty() {
        Span::styled("no URL set", Style::default().fg(palette.dim))
    } else {
        Span::styled(config.url.clone(), Style::default().fg(palette.text))
    };

    let mut spans = vec![
        Span::styled(
            "reqscope ",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("| "),
        Span::styled(
            config.method.as_str(),
            Style::default()
                .fg(get_method_color(config.method))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        url,
    ];

    if state.response.executing {
        spans.push(Span::styled(
            format!("  {} sending...", SPINNER[spinner_index % SPINNER.len()]),
            Style::default().fg(palette.number),
        ));
    }

    let theme = if state.ui.dark_mode { "dark" } else { "light" };
    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.unfocused_border))
            .title_bottom(Line::from(format!(" theme: {theme} ")).right_aligned()),
    );

    frame.render_widget(header, area);
}

/// Render the one-line status message
pub fn render_status_line(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let Some(status) = &state.ui.status else {
        return;
    };
    let style = if status.is_error {
        Style::default()
            .fg(palette.error)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.string)
    };
    let marker = if status.is_error { "✗ " } else { "✓ " };
    frame.render_widget(
        Paragraph::new(Span::styled(format!("{marker}{}", status.text), style)),
        area,
    );
}

/// Render the footer with command help
pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let footer = Paragraph::new(footer_text(state))
        .style(Style::default().fg(palette.number))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.unfocused_border))
                .title("Commands"),
        );

    frame.render_widget(footer, area);
}

fn footer_text(state: &AppState) -> String {
    match state.ui.input_mode {
        InputMode::Editing(RequestField::Body) => {
            "Esc:Save Enter:Newline Ctrl+F:Format JSON Ctrl+L:Clear Ctrl+D:Discard".to_string()
        }
        InputMode::Editing(field) if field.is_multiline() => {
            "Esc:Save Enter:Newline Ctrl+L:Clear Ctrl+D:Discard".to_string()
        }
        InputMode::Editing(_) => "Enter/Esc:Save Ctrl+L:Clear Ctrl+D:Discard".to_string(),
        InputMode::History => "j/k:Move Enter:Use URL Esc:Close".to_string(),
        InputMode::Normal => match state.ui.panel_focus {
            PanelFocus::Request => {
                "Tab:Panel j/k:Field Enter:Edit/Cycle m:Method s:Send r:Recent t:Theme q:Quit"
                    .to_string()
            }
            PanelFocus::Response => response_help(state),
        },
    }
}

fn response_help(state: &AppState) -> String {
    let Some(viewer) = state.viewer() else {
        return "Tab:Panel s:Send t:Theme q:Quit".to_string();
    };

    let mut help = match viewer.mode() {
        ViewMode::Tree => {
            let toggle = if viewer.cursor_on_branch() {
                " Enter:Toggle"
            } else {
                ""
            };
            format!("1/2/3:View j/k:Move{toggle} y:Copy e:Export")
        }
        ViewMode::Table => {
            let open = if viewer.cursor_on_trigger() {
                " Enter:Open"
            } else {
                " Enter:Expand"
            };
            let close = if viewer.nested_visible() {
                " Esc:Close"
            } else {
                ""
            };
            format!("1/2/3:View j/k/h/l:Move{open}{close} y:Copy e:Export")
        }
        ViewMode::Raw => "1/2/3:View j/k:Scroll y:Copy line e:Export".to_string(),
        ViewMode::Html => "j/k:Scroll o:Open in browser y:Copy e:Export".to_string(),
    };
    help.push_str(" i:Headers Tab:Panel s:Send q:Quit");
    help
}
