use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, ConfirmAction, Mode};

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Confirm: y
        (KeyModifiers::NONE, KeyCode::Char('y')) => {
            let action = app.confirm.take();
            app.mode = Mode::Navigate;
            match action {
                Some(ConfirmAction::DeleteTask { id }) => app.dispatch_delete(id),
                Some(ConfirmAction::ClearCompleted { ids }) => app.dispatch_clear(ids),
                None => {}
            }
        }
        // Cancel: n or Esc
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => {
            app.confirm = None;
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}
