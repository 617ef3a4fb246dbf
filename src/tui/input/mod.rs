mod confirm;
mod forms;
mod navigate;
mod search;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Help overlay intercepts everything; any key dismisses it
    if app.show_help {
        app.show_help = false;
        return;
    }

    let key = normalize_key(key);
    match app.mode {
        Mode::Navigate => navigate::handle_navigate(app, key),
        Mode::Insert | Mode::Edit => forms::handle_form(app, key),
        Mode::Search => search::handle_search(app, key),
        Mode::Confirm => confirm::handle_confirm(app, key),
    }
}

/// Terminals deliver shifted characters already translated (`?`, `C`);
/// drop the SHIFT modifier so they match plain patterns.
fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if matches!(key.code, KeyCode::Char(_)) {
        key.modifiers.remove(KeyModifiers::SHIFT);
    }
    key
}
