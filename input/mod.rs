/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Keyboard surface for the editing session.
//!
//! The shell forwards key presses here and dispatches the returned action
//! on the session. Primary modifier is Control or Meta so the same map
//! serves both conventions.

use keyboard_types::{Key, Modifiers, NamedKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Undo,
    Redo,
    SelectAll,
    /// Escape: clear the selection, or cancel the staged draft if any.
    Cancel,
}

/// Map a key press to an editor action, if it is bound.
pub fn action_for(key: &Key, modifiers: Modifiers) -> Option<EditorAction> {
    if matches!(key, Key::Named(NamedKey::Escape)) {
        return Some(EditorAction::Cancel);
    }

    let primary =
        modifiers.contains(Modifiers::CONTROL) || modifiers.contains(Modifiers::META);
    if !primary {
        return None;
    }

    let Key::Character(text) = key else {
        return None;
    };
    match text.as_str() {
        t if t.eq_ignore_ascii_case("z") => {
            if modifiers.contains(Modifiers::SHIFT) {
                Some(EditorAction::Redo)
            } else {
                Some(EditorAction::Undo)
            }
        }
        t if t.eq_ignore_ascii_case("y") => Some(EditorAction::Redo),
        t if t.eq_ignore_ascii_case("a") => Some(EditorAction::SelectAll),
        _ => None,
    }
}
