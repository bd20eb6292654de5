//! Helper functions for event handling
//!
//! State locking helpers shared by the handlers.

use crate::actions::{apply_action, AppAction};
use crate::state::AppState;
use std::sync::{Arc, RwLock};

/// Apply a single action to state
pub fn apply(state: &Arc<RwLock<AppState>>, action: AppAction) {
    let mut s = state.write().unwrap();
    apply_action(action, &mut s);
}

/// Apply multiple actions to state under one lock
pub fn apply_many(state: &Arc<RwLock<AppState>>, actions: Vec<AppAction>) {
    let mut s = state.write().unwrap();
    for action in actions {
        apply_action(action, &mut s);
    }
}
