//! Navigation handlers
//!
//! - Request form: field cursor, selectors, starting an edit
//! - Response panel: view modes, cursor movement, drill-downs, copy/export

use super::helpers::apply;
use super::yank::handle_yank;
use super::AppCommand;
use crate::actions::AppAction;
use crate::state::AppState;
use crate::ui::draw::styling::SCROLL_LINES_PER_ACTION;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::{Arc, RwLock};

/// Keys for the focused request form
pub fn handle_request_key(key: KeyEvent, state: &Arc<RwLock<AppState>>) {
    let action = match key.code {
        KeyCode::Char('j') | KeyCode::Down => AppAction::NextField,
        KeyCode::Char('k') | KeyCode::Up => AppAction::PrevField,
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('e') => AppAction::ActivateField,
        KeyCode::Char('m') => AppAction::CycleMethod,
        _ => return,
    };
    apply(state, action);
}

/// Keys for the focused response panel
pub fn handle_response_key(key: KeyEvent, state: &Arc<RwLock<AppState>>) -> Option<AppCommand> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    let action = match key.code {
        KeyCode::Char('d') if ctrl => AppAction::MoveCursor(SCROLL_LINES_PER_ACTION),
        KeyCode::Char('u') if ctrl => AppAction::MoveCursor(-SCROLL_LINES_PER_ACTION),
        KeyCode::Char(c @ '1'..='9') => {
            let idx = c as usize - '1' as usize;
            let mode = {
                let s = state.read().unwrap();
                s.viewer()
                    .and_then(|viewer| viewer.available_modes().get(idx).copied())
            };
            AppAction::SetViewMode(mode?)
        }
        KeyCode::Char('m') => AppAction::CycleViewMode,
        KeyCode::Char('j') | KeyCode::Down => AppAction::MoveCursor(1),
        KeyCode::Char('k') | KeyCode::Up => AppAction::MoveCursor(-1),
        KeyCode::PageDown => AppAction::MoveCursor(SCROLL_LINES_PER_ACTION),
        KeyCode::PageUp => AppAction::MoveCursor(-SCROLL_LINES_PER_ACTION),
        KeyCode::Char('g') | KeyCode::Home => AppAction::MoveCursor(isize::MIN),
        KeyCode::Char('G') | KeyCode::End => AppAction::MoveCursor(isize::MAX),
        KeyCode::Char('h') | KeyCode::Left => AppAction::MoveColumn(-1),
        KeyCode::Char('l') | KeyCode::Right => AppAction::MoveColumn(1),
        KeyCode::Enter | KeyCode::Char(' ') => AppAction::Activate,
        KeyCode::Esc => AppAction::CloseNested,
        KeyCode::Char('i') => AppAction::ToggleHeaders,
        KeyCode::Char('J') => AppAction::ScrollHeaders(1),
        KeyCode::Char('K') => AppAction::ScrollHeaders(-1),
        KeyCode::Char('y') => {
            handle_yank(state);
            return None;
        }
        KeyCode::Char('e') => return Some(AppCommand::Export),
        KeyCode::Char('o') => return Some(AppCommand::OpenHtml),
        _ => return None,
    };

    apply(state, action);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::apply_action;
    use crate::types::{HttpMethod, InputMode, RequestField, ResponseSnapshot};
    use crate::value::parse_json;
    use crate::viewer::ViewMode;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn shared_state(body: &str) -> Arc<RwLock<AppState>> {
        let mut state = AppState::default();
        apply_action(
            AppAction::ResponseReceived {
                snapshot: ResponseSnapshot {
                    status: 200,
                    status_text: "OK".to_string(),
                    headers: vec![("content-type".to_string(), "application/json".to_string())],
                    body: parse_json(body).unwrap(),
                    error: None,
                    duration: Duration::ZERO,
                },
                url: "https://api.test".to_string(),
            },
            &mut state,
        );
        Arc::new(RwLock::new(state))
    }

    #[test]
    fn test_request_keys() {
        let state = shared_state("{}");
        handle_request_key(key(KeyCode::Char('m')), &state);
        assert_eq!(state.read().unwrap().request.config.method, HttpMethod::Post);

        handle_request_key(key(KeyCode::Char('j')), &state);
        handle_request_key(key(KeyCode::Enter), &state);
        let s = state.read().unwrap();
        assert_eq!(s.ui.input_mode, InputMode::Editing(RequestField::Url));
    }

    #[test]
    fn test_number_keys_pick_offered_modes() {
        let state = shared_state(r#"{"a":1}"#);
        assert_eq!(handle_response_key(key(KeyCode::Char('2')), &state), None);
        assert_eq!(state.read().unwrap().viewer().unwrap().mode(), ViewMode::Table);

        handle_response_key(key(KeyCode::Char('3')), &state);
        assert_eq!(state.read().unwrap().viewer().unwrap().mode(), ViewMode::Raw);

        // there is no fourth mode for a JSON response
        handle_response_key(key(KeyCode::Char('4')), &state);
        assert_eq!(state.read().unwrap().viewer().unwrap().mode(), ViewMode::Raw);
    }

    #[test]
    fn test_enter_and_escape_drive_nested_views() {
        let state = shared_state(r#"{"a":{"b":{"c":1}}}"#);
        handle_response_key(key(KeyCode::Char('2')), &state);
        handle_response_key(key(KeyCode::Enter), &state);
        handle_response_key(key(KeyCode::Enter), &state);
        assert_eq!(state.read().unwrap().viewer().unwrap().state.nested.depth(), 2);

        handle_response_key(key(KeyCode::Esc), &state);
        assert_eq!(state.read().unwrap().viewer().unwrap().state.nested.depth(), 1);
        handle_response_key(key(KeyCode::Esc), &state);
        handle_response_key(key(KeyCode::Esc), &state);
        assert!(!state.read().unwrap().viewer().unwrap().has_nested());
    }

    #[test]
    fn test_jump_keys_clamp() {
        let state = shared_state(r#"{"a":1,"b":2,"c":3}"#);
        handle_response_key(key(KeyCode::Char('G')), &state);
        assert_eq!(state.read().unwrap().viewer().unwrap().state.tree.cursor, 2);
        handle_response_key(key(KeyCode::Char('g')), &state);
        assert_eq!(state.read().unwrap().viewer().unwrap().state.tree.cursor, 0);
    }

    #[test]
    fn test_commands_are_returned() {
        let state = shared_state("[]");
        assert_eq!(
            handle_response_key(key(KeyCode::Char('e')), &state),
            Some(AppCommand::Export)
        );
        assert_eq!(
            handle_response_key(key(KeyCode::Char('o')), &state),
            Some(AppCommand::OpenHtml)
        );
    }
}
