use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::TaskPatch;
use crate::tui::app::{App, FormField, Mode};
use crate::util::unicode;

/// Shared handler for the add form (Insert) and the inline editor (Edit):
/// both are a title field plus a due-date field.
pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => cancel(app),
        (_, KeyCode::Tab | KeyCode::BackTab) => toggle_field(app),
        (_, KeyCode::Enter) => commit(app),
        (_, KeyCode::Backspace) => backspace(app),
        (mods, KeyCode::Char(c)) if !mods.contains(KeyModifiers::CONTROL) => insert_char(app, c),
        _ => {}
    }
}

fn cancel(app: &mut App) {
    match app.mode {
        Mode::Insert => app.form.clear(),
        Mode::Edit => app.edit = None,
        _ => {}
    }
    app.mode = Mode::Navigate;
}

fn toggle_field(app: &mut App) {
    match app.mode {
        Mode::Insert => app.form.field = app.form.field.toggle(),
        Mode::Edit => {
            if let Some(edit) = app.edit.as_mut() {
                edit.field = edit.field.toggle();
            }
        }
        _ => {}
    }
}

fn insert_char(app: &mut App, c: char) {
    if let Some(buffer) = active_buffer(app) {
        buffer.push(c);
    }
}

fn backspace(app: &mut App) {
    if let Some(buffer) = active_buffer(app) {
        let cut = unicode::prev_boundary(buffer, buffer.len());
        buffer.truncate(cut);
    }
}

fn active_buffer(app: &mut App) -> Option<&mut String> {
    match app.mode {
        Mode::Insert => Some(match app.form.field {
            FormField::Title => &mut app.form.title,
            FormField::Due => &mut app.form.due,
        }),
        Mode::Edit => app.edit.as_mut().map(|edit| match edit.field {
            FormField::Title => &mut edit.title,
            FormField::Due => &mut edit.due,
        }),
        _ => None,
    }
}

/// Commit the staged input. An empty title or an unparseable due date
/// aborts silently: no request, the form/editor stays as it is.
fn commit(app: &mut App) {
    match app.mode {
        Mode::Insert => {
            let title = app.form.title.trim().to_string();
            if title.is_empty() {
                return;
            }
            let Ok(due) = parse_due(&app.form.due) else {
                return;
            };
            // The form clears and Insert mode ends only once the create
            // request confirms.
            app.dispatch_create(title, due);
        }
        Mode::Edit => {
            let Some(edit) = app.edit.as_mut() else {
                app.mode = Mode::Navigate;
                return;
            };
            if edit.pending {
                return;
            }
            let title = edit.title.trim().to_string();
            if title.is_empty() {
                return;
            }
            let Ok(due) = parse_due(&edit.due) else {
                return;
            };
            let id = edit.id;
            edit.pending = true;
            app.dispatch_update(id, TaskPatch::retitle(title, due));
        }
        _ => {}
    }
}

/// Empty means "no deadline"; anything else must be a calendar date.
fn parse_due(input: &str) -> Result<Option<NaiveDate>, ()> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_dates_parse_or_reject() {
        assert_eq!(parse_due(""), Ok(None));
        assert_eq!(parse_due("   "), Ok(None));
        assert_eq!(
            parse_due("2025-08-10"),
            Ok(Some(NaiveDate::from_ymd_opt(2025, 8, 10).unwrap()))
        );
        assert_eq!(parse_due("10/08/2025"), Err(()));
        assert_eq!(parse_due("2025-13-40"), Err(()));
    }
}
