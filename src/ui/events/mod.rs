//! Event handling
//!
//! This module processes user input and translates it into state-changing actions.
//! It handles each input mode:
//! - Normal: panel navigation, response exploration, global commands
//! - Editing: typing into a request field
//! - History: picking a recent URL
//!
//! # Architecture
//!
//! Input events become `AppAction`s applied through `apply_action`. Work that
//! needs the app's resources (HTTP client, config, filesystem) is handed back
//! to the run loop as an `AppCommand`.
//!
//! # Lock Management
//!
//! Handlers take `Arc<RwLock<AppState>>` and hold a lock only for the span of a
//! single read or apply, never across a call into another handler.

mod helpers;
mod modals;
mod mouse;
mod navigation;
mod yank;

pub use helpers::apply;

use crate::actions::AppAction;
use crate::state::AppState;
use crate::types::{InputMode, PanelFocus};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;
use std::sync::{Arc, RwLock};

/// Work the run loop performs on behalf of a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    SendRequest,
    Export,
    OpenHtml,
    SaveTheme,
}

/// Event handler for managing user input and state updates
#[derive(Debug, Default)]
pub struct EventHandler {
    pub should_quit: bool,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait briefly for one input event and dispatch it
    pub fn handle_events(&mut self, state: &Arc<RwLock<AppState>>) -> Result<Option<AppCommand>> {
        if !event::poll(std::time::Duration::from_millis(50))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(self.handle_key(key, state)),
            Event::Mouse(mouse) => {
                let (width, height) = crossterm::terminal::size()?;
                mouse::handle_mouse(mouse, Rect::new(0, 0, width, height), state);
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    /// Dispatch a key press according to the input mode
    pub fn handle_key(&mut self, key: KeyEvent, state: &Arc<RwLock<AppState>>) -> Option<AppCommand> {
        let input_mode = state.read().unwrap().ui.input_mode;

        match input_mode {
            InputMode::Editing(field) => {
                modals::handle_editing_key(key, field, state);
                None
            }
            InputMode::History => {
                modals::handle_history_key(key, state);
                None
            }
            InputMode::Normal => self.handle_normal_key(key, state),
        }
    }

    fn handle_normal_key(
        &mut self,
        key: KeyEvent,
        state: &Arc<RwLock<AppState>>,
    ) -> Option<AppCommand> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                None
            }
            KeyCode::Tab | KeyCode::BackTab => {
                apply(state, AppAction::TogglePanel);
                None
            }
            KeyCode::Char('s') | KeyCode::F(5) => Some(AppCommand::SendRequest),
            KeyCode::Char('t') => {
                apply(state, AppAction::ToggleTheme);
                Some(AppCommand::SaveTheme)
            }
            KeyCode::Char('r') => {
                apply(state, AppAction::OpenHistory);
                None
            }
            _ => {
                let panel = state.read().unwrap().ui.panel_focus;
                match panel {
                    PanelFocus::Request => {
                        navigation::handle_request_key(key, state);
                        None
                    }
                    PanelFocus::Response => navigation::handle_response_key(key, state),
                }
            }
        }
    }
}
