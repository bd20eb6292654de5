//! Modal input handlers
//!
//! - Field editing: text goes to the shared `FieldEditor`
//! - Recent URL picker

use super::helpers::{apply, apply_many};
use crate::actions::AppAction;
use crate::state::AppState;
use crate::types::{PanelFocus, RequestField};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::{Arc, RwLock};

/// Keys while a request field is being edited
///
/// Esc saves every field; Enter saves single-line fields and inserts a
/// newline in multi-line ones. Ctrl+D throws the edit away.
pub fn handle_editing_key(key: KeyEvent, field: RequestField, state: &Arc<RwLock<AppState>>) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => apply(state, AppAction::CommitEdit),
        KeyCode::Enter if !field.is_multiline() => apply(state, AppAction::CommitEdit),
        KeyCode::Char('d') if ctrl => apply(state, AppAction::CancelEdit),
        KeyCode::Char('f') if ctrl => apply(state, AppAction::FormatBody),
        _ => {
            let mut s = state.write().unwrap();
            s.request.editor.handle_key_event(key);
        }
    }
}

/// Keys while the recent URL picker is open
pub fn handle_history_key(key: KeyEvent, state: &Arc<RwLock<AppState>>) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => apply(state, AppAction::HistoryDown),
        KeyCode::Char('k') | KeyCode::Up => apply(state, AppAction::HistoryUp),
        KeyCode::Enter => apply_many(
            state,
            vec![
                AppAction::SelectHistory,
                AppAction::NavigateToPanel(PanelFocus::Request),
            ],
        ),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('r') => {
            apply(state, AppAction::CloseHistory)
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::apply_action;
    use crate::types::{HttpMethod, InputMode};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn editing(field: RequestField, text: &str) -> Arc<RwLock<AppState>> {
        let mut state = AppState::default();
        state.request.config.method = HttpMethod::Post;
        state.request.config.set_text(field, text.to_string());
        let idx = state
            .request
            .config
            .visible_fields()
            .iter()
            .position(|f| *f == field)
            .unwrap();
        state.request.selected_field = idx;
        apply_action(AppAction::ActivateField, &mut state);
        Arc::new(RwLock::new(state))
    }

    #[test]
    fn test_enter_commits_single_line_field() {
        let state = editing(RequestField::Url, "https://a.test");
        handle_editing_key(key(KeyCode::Backspace), RequestField::Url, &state);
        handle_editing_key(key(KeyCode::Enter), RequestField::Url, &state);

        let s = state.read().unwrap();
        assert_eq!(s.ui.input_mode, InputMode::Normal);
        assert_eq!(s.request.config.url, "https://a.tes");
    }

    #[test]
    fn test_enter_inserts_newline_in_body() {
        let state = editing(RequestField::Body, "{}");
        handle_editing_key(key(KeyCode::Left), RequestField::Body, &state);
        handle_editing_key(key(KeyCode::Enter), RequestField::Body, &state);
        assert_eq!(
            state.read().unwrap().ui.input_mode,
            InputMode::Editing(RequestField::Body)
        );

        handle_editing_key(key(KeyCode::Esc), RequestField::Body, &state);
        assert_eq!(state.read().unwrap().request.config.body, "{\n}");
    }

    #[test]
    fn test_ctrl_f_formats_and_ctrl_d_discards() {
        let state = editing(RequestField::Body, r#"{"a":1}"#);
        handle_editing_key(ctrl('f'), RequestField::Body, &state);
        assert_eq!(
            state.read().unwrap().request.editor.content(),
            "{\n  \"a\": 1\n}"
        );

        handle_editing_key(ctrl('d'), RequestField::Body, &state);
        let s = state.read().unwrap();
        assert_eq!(s.ui.input_mode, InputMode::Normal);
        assert_eq!(s.request.config.body, r#"{"a":1}"#);
    }

    #[test]
    fn test_history_picker_keys() {
        let mut state = AppState::default();
        state.history.record("https://one.test");
        state.history.record("https://two.test");
        state.ui.panel_focus = PanelFocus::Response;
        apply_action(AppAction::OpenHistory, &mut state);
        let state = Arc::new(RwLock::new(state));

        handle_history_key(key(KeyCode::Char('j')), &state);
        handle_history_key(key(KeyCode::Enter), &state);

        let s = state.read().unwrap();
        assert_eq!(s.request.config.url, "https://one.test");
        assert_eq!(s.ui.input_mode, InputMode::Normal);
        assert_eq!(s.ui.panel_focus, PanelFocus::Request);
    }
}
