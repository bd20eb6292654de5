use crate::editor::FieldEditor;
use crate::state::AppState;
use crate::types::{InputMode, PanelFocus, RequestField, ResponseSnapshot, StatusMessage};
use crate::viewer::{ResponseViewer, ViewMode};

/// Represents all possible state-changing actions in the application
/// This pattern separates input handling from state mutations, making the code
/// more testable
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Navigation actions
    NavigateToPanel(PanelFocus),
    TogglePanel,
    NextField,
    PrevField,

    // Request form actions
    /// Enter on the selected field: cycle a selector or start editing text
    ActivateField,
    CycleMethod,
    CommitEdit,
    CancelEdit,
    FormatBody,

    // History modal actions
    OpenHistory,
    CloseHistory,
    HistoryUp,
    HistoryDown,
    SelectHistory,

    // Request lifecycle
    RequestStarted,
    ResponseReceived {
        snapshot: ResponseSnapshot,
        url: String,
    },

    // Response viewer actions
    SetViewMode(ViewMode),
    CycleViewMode,
    MoveCursor(isize),
    MoveColumn(isize),
    Activate,
    CloseNested,
    ToggleHeaders,
    ScrollHeaders(isize),

    // Misc
    ToggleTheme,
    SetStatus(StatusMessage),
    ClearStatus,
    SetYankFlash(bool),
}

/// Apply an action to the application state
/// All state mutations should go through this function to maintain consistency
pub fn apply_action(action: AppAction, state: &mut AppState) {
    match action {
        // Navigation
        AppAction::NavigateToPanel(panel) => {
            state.ui.panel_focus = panel;
        }
        AppAction::TogglePanel => {
            state.ui.panel_focus = match state.ui.panel_focus {
                PanelFocus::Request => PanelFocus::Response,
                PanelFocus::Response => PanelFocus::Request,
            };
        }
        AppAction::NextField => {
            let count = state.request.config.visible_fields().len();
            state.request.selected_field = (state.request.selected_field + 1).min(count - 1);
        }
        AppAction::PrevField => {
            state.request.selected_field = state.request.selected_field.saturating_sub(1);
        }

        // Request form
        AppAction::ActivateField => {
            let field = state.selected_field();
            let config = &mut state.request.config;
            match field {
                RequestField::Method => config.method = config.method.next(),
                RequestField::Auth => config.auth = config.auth.next(),
                RequestField::ContentType => {
                    config.content_type = config.content_type.next()
                }
                text_field => {
                    let current = config.text(text_field).unwrap_or_default();
                    state.request.editor = FieldEditor::open(current, text_field.is_multiline());
                    state.ui.input_mode = InputMode::Editing(text_field);
                }
            }
            clamp_selected_field(state);
        }
        AppAction::CycleMethod => {
            state.request.config.method = state.request.config.method.next();
            clamp_selected_field(state);
        }
        AppAction::CommitEdit => {
            if let InputMode::Editing(field) = state.ui.input_mode {
                let text = std::mem::take(&mut state.request.editor).into_content();
                state.request.config.set_text(field, text);
            }
            state.ui.input_mode = InputMode::Normal;
        }
        AppAction::CancelEdit => {
            state.request.editor = FieldEditor::default();
            state.ui.input_mode = InputMode::Normal;
        }
        AppAction::FormatBody => {
            if state.ui.input_mode == InputMode::Editing(RequestField::Body) {
                if let Err(e) = state.request.editor.format_json() {
                    state.ui.status = Some(StatusMessage::error(e));
                }
            }
        }

        // History
        AppAction::OpenHistory => {
            if state.history.is_empty() {
                state.ui.status = Some(StatusMessage::info("No recent URLs yet"));
            } else {
                state.ui.history_selected = 0;
                state.ui.input_mode = InputMode::History;
            }
        }
        AppAction::CloseHistory => {
            state.ui.input_mode = InputMode::Normal;
        }
        AppAction::HistoryUp => {
            state.ui.history_selected = state.ui.history_selected.saturating_sub(1);
        }
        AppAction::HistoryDown => {
            let max = state.history.len().saturating_sub(1);
            state.ui.history_selected = (state.ui.history_selected + 1).min(max);
        }
        AppAction::SelectHistory => {
            if let Some(entry) = state.history.entries().get(state.ui.history_selected) {
                state.request.config.url = entry.url.clone();
            }
            state.ui.input_mode = InputMode::Normal;
        }

        // Request lifecycle
        AppAction::RequestStarted => {
            state.response.executing = true;
            state.ui.status = None;
        }
        AppAction::ResponseReceived { snapshot, url } => {
            state.ui.status = Some(match snapshot.error_message() {
                Some(error) => StatusMessage::error(error.to_string()),
                None => StatusMessage::info(format!(
                    "{} {} in {}ms",
                    snapshot.status,
                    snapshot.status_text,
                    snapshot.duration.as_millis()
                )),
            });
            state.history.record(&url);
            state.response.viewer = Some(ResponseViewer::new(snapshot, state.response.default_view));
            state.response.executing = false;
            state.response.headers_scroll = 0;
            tracing::debug!("Response viewer replaced for {}", url);
        }

        // Viewer
        AppAction::SetViewMode(mode) => {
            if let Some(viewer) = state.viewer_mut() {
                viewer.set_mode(mode);
            }
        }
        AppAction::CycleViewMode => {
            if let Some(viewer) = state.viewer_mut() {
                viewer.cycle_mode();
            }
        }
        AppAction::MoveCursor(delta) => {
            if let Some(viewer) = state.viewer_mut() {
                viewer.move_cursor(delta);
            }
        }
        AppAction::MoveColumn(delta) => {
            if let Some(viewer) = state.viewer_mut() {
                viewer.move_column(delta);
            }
        }
        AppAction::Activate => {
            if let Some(viewer) = state.viewer_mut() {
                viewer.activate();
            }
        }
        AppAction::CloseNested => {
            if let Some(viewer) = state.viewer_mut() {
                viewer.close_nested();
            }
        }
        AppAction::ToggleHeaders => {
            state.ui.show_headers = !state.ui.show_headers;
            state.response.headers_scroll = 0;
        }
        AppAction::ScrollHeaders(delta) => {
            let max = state
                .viewer()
                .map(|v| v.snapshot().headers.len().saturating_sub(1))
                .unwrap_or(0);
            state.response.headers_scroll =
                state.response.headers_scroll.saturating_add_signed(delta).min(max);
        }

        // Misc
        AppAction::ToggleTheme => {
            state.ui.dark_mode = !state.ui.dark_mode;
        }
        AppAction::SetStatus(message) => {
            state.ui.status = Some(message);
        }
        AppAction::ClearStatus => {
            state.ui.status = None;
        }
        AppAction::SetYankFlash(flash) => {
            state.ui.yank_flash = flash;
        }
    }
}

/// Keep the field cursor on a visible field after the form shape changes
fn clamp_selected_field(state: &mut AppState) {
    let count = state.request.config.visible_fields().len();
    state.request.selected_field = state.request.selected_field.min(count - 1);
}
