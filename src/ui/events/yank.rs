//! Yank (copy) handler
//!
//! Copies the current selection of the response viewer to the system
//! clipboard: the tree node or table cell under the cursor, the value on the
//! top raw line, or the HTML text.

use super::helpers::{apply, apply_many};
use crate::actions::AppAction;
use crate::state::AppState;
use crate::types::StatusMessage;
use crate::viewer::table::ellipsize;
use arboard::Clipboard;
use std::sync::{Arc, RwLock};
use std::time::Duration;

const PREVIEW_CHARS: usize = 40;

/// Copy the viewer selection and flash the highlighted line
pub fn handle_yank(state: &Arc<RwLock<AppState>>) {
    let text = {
        let s = state.read().unwrap();
        s.viewer().and_then(|viewer| viewer.selection_text())
    };

    let Some(text) = text.filter(|text| !text.is_empty()) else {
        tracing::debug!("Nothing to yank");
        return;
    };

    match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.clone())) {
        Ok(()) => {
            tracing::debug!("Yanked {} chars", text.chars().count());
            apply_many(
                state,
                vec![
                    AppAction::SetYankFlash(true),
                    AppAction::SetStatus(StatusMessage::info(copied_message(&text))),
                ],
            );

            let state_clone = state.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(200)).await;
                apply(&state_clone, AppAction::SetYankFlash(false));
            });
        }
        Err(e) => {
            tracing::warn!("Failed to copy to clipboard: {}", e);
            apply(
                state,
                AppAction::SetStatus(StatusMessage::error(format!("Clipboard unavailable: {e}"))),
            );
        }
    }
}

fn copied_message(text: &str) -> String {
    format!("Copied: {}", ellipsize(text, PREVIEW_CHARS))
}
