//! Modal dialog rendering
//!
//! - Nested drill-down table, drawn over the base table
//! - Recent URL picker

use super::styling::{history_modal_area, modal_area, Palette};
use super::views::{render_placeholder, render_table};
use crate::state::AppState;
use crate::viewer::NestedOverlay;
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

/// Render the top nested view as a modal; its title is the full breadcrumb
pub fn render_nested_modal(frame: &mut Frame, overlay: &NestedOverlay, palette: &Palette, flash: bool) {
    let area = modal_area(frame.area());

    // Clear the background behind the modal
    frame.render_widget(Clear, area);

    let title = if overlay.depth > 1 {
        format!(" {} ({}) ", overlay.breadcrumb, overlay.depth)
    } else {
        format!(" {} ", overlay.breadcrumb)
    };

    let block = Block::default()
        .title(title)
        .title_bottom(
            Line::from(" Esc or click outside: close ").alignment(Alignment::Center),
        )
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(palette.focused_border)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(palette.modal_bg).fg(palette.text));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &overlay.model {
        Some(model) => render_table(
            frame,
            inner,
            model,
            (overlay.selected_row, overlay.selected_col),
            true,
            palette,
            flash,
        ),
        None => render_placeholder(frame, inner, "(empty)", palette),
    }
}

/// Render the recent URL picker
pub fn render_history_modal(frame: &mut Frame, state: &AppState, palette: &Palette) {
    let area = history_modal_area(frame.area());
    frame.render_widget(Clear, area);

    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let items: Vec<ListItem> = state
        .history
        .entries()
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled(entry.url.as_str(), Style::default().fg(palette.text)),
                Span::styled(
                    format!("  {}", format_age(now.saturating_sub(entry.timestamp))),
                    Style::default().fg(palette.dim),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Recent URLs ")
                .borders(Borders::ALL)
                .border_style(
                    Style::default()
                        .fg(palette.focused_border)
                        .add_modifier(Modifier::BOLD),
                )
                .style(Style::default().bg(palette.modal_bg)),
        )
        .highlight_style(palette.selected(false).add_modifier(Modifier::BOLD))
        .highlight_symbol("► ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.ui.history_selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Coarse "how long ago" label for a history entry
fn format_age(secs: u64) -> String {
    match secs {
        0..=59 => "just now".to_string(),
        60..=3599 => format!("{}m ago", secs / 60),
        3600..=86_399 => format!("{}h ago", secs / 3600),
        _ => format!("{}d ago", secs / 86_400),
    }
}
