use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Live search: every keystroke narrows the active page's list. Enter
/// keeps the term, Esc clears it.
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    let page = app.page;
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            if let Some(state) = app.list_state_mut(page) {
                state.search.clear();
                state.cursor = 0;
            }
            app.mode = Mode::Navigate;
        }
        (_, KeyCode::Enter) => app.mode = Mode::Navigate,
        (_, KeyCode::Backspace) => {
            if let Some(state) = app.list_state_mut(page) {
                let cut = unicode::prev_boundary(&state.search, state.search.len());
                state.search.truncate(cut);
                state.cursor = 0;
            }
        }
        (mods, KeyCode::Char(c)) if !mods.contains(KeyModifiers::CONTROL) => {
            if let Some(state) = app.list_state_mut(page) {
                state.search.push(c);
                state.cursor = 0;
            }
        }
        _ => {}
    }
}
