//! Mouse handling
//!
//! Clicks focus a panel; while a nested view is open, a click outside the
//! modal closes the top view and a click inside it is left alone. The wheel
//! moves the cursor of whichever panel is under the pointer.

use super::helpers::apply;
use crate::actions::AppAction;
use crate::state::AppState;
use crate::types::{InputMode, PanelFocus};
use crate::ui::draw::main_layout;
use crate::ui::draw::styling::modal_area;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use std::sync::{Arc, RwLock};

pub fn handle_mouse(mouse: MouseEvent, screen: Rect, state: &Arc<RwLock<AppState>>) {
    let (input_mode, nested_visible) = {
        let s = state.read().unwrap();
        (
            s.ui.input_mode,
            s.viewer().is_some_and(|viewer| viewer.nested_visible()),
        )
    };
    if input_mode != InputMode::Normal {
        return;
    }

    let position = Position::new(mouse.column, mouse.row);
    let layout = main_layout(screen);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if nested_visible {
                if !modal_area(screen).contains(position) {
                    apply(state, AppAction::CloseNested);
                }
            } else if layout.request.contains(position) {
                apply(state, AppAction::NavigateToPanel(PanelFocus::Request));
            } else if layout.response.contains(position) {
                apply(state, AppAction::NavigateToPanel(PanelFocus::Response));
            }
        }
        MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
            let down = mouse.kind == MouseEventKind::ScrollDown;
            let action = if nested_visible || layout.response.contains(position) {
                AppAction::MoveCursor(if down { 1 } else { -1 })
            } else if layout.request.contains(position) {
                if down {
                    AppAction::NextField
                } else {
                    AppAction::PrevField
                }
            } else {
                return;
            };
            apply(state, action);
        }
        _ => {}
    }
}
