//! UI drawing module
//!
//! This module is organized into focused submodules:
//! - `components`: header, status line, footer
//! - `modals`: nested drill-down and recent URL modals
//! - `panels`: request form and response panel
//! - `views`: tree, table, raw and HTML renderings of a response
//! - `styling`: color palettes and layout helpers

mod components;
mod modals;
mod panels;
pub mod styling;
mod views;

use crate::state::AppState;
use crate::types::InputMode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Screen regions of the main layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainLayout {
    pub header: Rect,
    pub request: Rect,
    pub response: Rect,
    pub status: Rect,
    pub footer: Rect,
}

/// Split the screen; also used to map mouse clicks onto panels
pub fn main_layout(area: Rect) -> MainLayout {
    let [header, body, status, footer] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .areas(area);

    let [request, response] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .areas(body);

    MainLayout {
        header,
        request,
        response,
        status,
        footer,
    }
}

/// Draw the whole application for one frame
pub fn render(frame: &mut Frame, state: &AppState, spinner_index: usize) {
    let palette = styling::palette(state.ui.dark_mode);
    let layout = main_layout(frame.area());

    components::render_header(frame, layout.header, state, &palette, spinner_index);
    panels::render_request_panel(frame, layout.request, state, &palette);
    panels::render_response_panel(frame, layout.response, state, &palette, spinner_index);
    components::render_status_line(frame, layout.status, state, &palette);
    components::render_footer(frame, layout.footer, state, &palette);

    if state.ui.input_mode == InputMode::History {
        modals::render_history_modal(frame, state, &palette);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{apply_action, AppAction};
    use crate::types::{PanelFocus, ResponseSnapshot, StatusMessage};
    use crate::value::parse_json;
    use crate::viewer::ViewMode;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn screen_text(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, state, 0)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn state_with_response(body: &str) -> AppState {
        let mut state = AppState::default();
        apply_action(
            AppAction::ResponseReceived {
                snapshot: ResponseSnapshot {
                    status: 200,
                    status_text: "OK".to_string(),
                    headers: vec![("content-type".to_string(), "application/json".to_string())],
                    body: parse_json(body).unwrap(),
                    error: None,
                    duration: Duration::from_millis(42),
                },
                url: "https://api.test/users".to_string(),
            },
            &mut state,
        );
        state.ui.panel_focus = PanelFocus::Response;
        state
    }

    #[test]
    fn test_main_layout_splits_panels() {
        let layout = main_layout(Rect::new(0, 0, 100, 40));
        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.footer.height, 3);
        assert_eq!(layout.request.width + layout.response.width, 100);
        assert_eq!(layout.request.y, 3);
    }

    #[test]
    fn test_render_empty_state() {
        let text = screen_text(&AppState::default());
        assert!(text.contains("[1] Request"));
        assert!(text.contains("[2] Response"));
        assert!(text.contains("Press [s] to send the request"));
    }

    #[test]
    fn test_render_tree_and_table() {
        let mut state = state_with_response(r#"{"users":[{"id":1,"name":"Ann"}],"total":1}"#);
        let text = screen_text(&state);
        assert!(text.contains("200 OK"));
        assert!(text.contains("users"));
        assert!(text.contains("total"));

        apply_action(AppAction::SetViewMode(ViewMode::Table), &mut state);
        let text = screen_text(&state);
        assert!(text.contains("[..] 1 item"));
        assert!(!text.contains("1 items"));
    }

    #[test]
    fn test_render_nested_modal_breadcrumb() {
        let mut state = state_with_response(r#"{"users":[{"id":1,"name":"Ann"}],"total":1}"#);
        apply_action(AppAction::SetViewMode(ViewMode::Table), &mut state);
        apply_action(AppAction::Activate, &mut state);

        let text = screen_text(&state);
        assert!(text.contains("Array: users"));
        assert!(text.contains("Ann"));
    }

    #[test]
    fn test_render_absent_cells_and_errors() {
        let mut state = state_with_response(r#"[{"a":1},{"b":2}]"#);
        apply_action(AppAction::SetViewMode(ViewMode::Table), &mut state);
        assert!(screen_text(&state).contains("undefined"));

        apply_action(
            AppAction::ResponseReceived {
                snapshot: ResponseSnapshot::error(
                    "Connection failed: api.test".to_string(),
                    Duration::ZERO,
                ),
                url: "https://api.test".to_string(),
            },
            &mut state,
        );
        apply_action(
            AppAction::SetStatus(StatusMessage::error("Connection failed: api.test")),
            &mut state,
        );
        let text = screen_text(&state);
        assert!(text.contains("Request failed"));
        assert!(text.contains("Connection failed: api.test"));
    }

    #[test]
    fn test_render_history_modal() {
        let mut state = AppState::default();
        state.history.record("https://api.test/recent");
        apply_action(AppAction::OpenHistory, &mut state);
        let text = screen_text(&state);
        assert!(text.contains("Recent URLs"));
        assert!(text.contains("https://api.test/recent"));
    }

    #[test]
    fn test_table_shows_whole_wide_cell() {
        let mut state = state_with_response(r#"[{"名前":"山田太郎山田太郎","id":1}]"#);
        apply_action(AppAction::SetViewMode(ViewMode::Table), &mut state);
        let text = screen_text(&state);
        assert_eq!(text.matches('郎').count(), 2);
    }
}
