use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, ConfirmAction, EditState, FormField, Mode, Page};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) | (KeyModifiers::NONE, KeyCode::Char('q')) => {
            app.should_quit = true;
        }
        (KeyModifiers::NONE, KeyCode::Char('?')) => app.show_help = true,

        // Tab strip
        (KeyModifiers::NONE, KeyCode::Tab) => app.page = app.page.next(),
        (_, KeyCode::BackTab) => app.page = app.page.prev(),
        (KeyModifiers::NONE, KeyCode::Char(c)) if Page::from_digit(c).is_some() => {
            if let Some(page) = Page::from_digit(c) {
                app.page = page;
            }
        }

        (KeyModifiers::NONE, KeyCode::Char('r')) => app.dispatch_refresh(),

        // List navigation
        (KeyModifiers::NONE, KeyCode::Down | KeyCode::Char('j')) => move_cursor(app, 1),
        (KeyModifiers::NONE, KeyCode::Up | KeyCode::Char('k')) => move_cursor(app, -1),

        (KeyModifiers::NONE, KeyCode::Char('a')) if app.page == Page::Tasks => {
            app.form.clear();
            app.mode = Mode::Insert;
        }
        (KeyModifiers::NONE, KeyCode::Char('/')) if app.page.is_list() => {
            app.mode = Mode::Search;
        }
        (KeyModifiers::NONE, KeyCode::Char('f')) if app.page == Page::Tasks => {
            app.status_filter = app.status_filter.next();
            app.tasks_list.cursor = 0;
        }

        // Task intents
        (KeyModifiers::NONE, KeyCode::Char(' ') | KeyCode::Char('x')) if app.page.is_list() => {
            toggle_selected(app);
        }
        (KeyModifiers::NONE, KeyCode::Enter | KeyCode::Char('e'))
            if matches!(app.page, Page::Tasks | Page::Current) =>
        {
            start_edit(app);
        }
        (KeyModifiers::NONE, KeyCode::Char('d')) if app.page.is_list() => {
            request_delete(app);
        }
        (_, KeyCode::Char('C')) if app.page == Page::Tasks => {
            request_clear_completed(app);
        }
        _ => {}
    }
}

/// Move the cursor on the active list page, clamped to the visible rows.
fn move_cursor(app: &mut App, delta: isize) {
    let len = app.page_rows(app.page).len();
    if len == 0 {
        return;
    }
    if let Some(state) = app.list_state_mut(app.page) {
        state.cursor = if delta < 0 {
            state.cursor.saturating_sub(delta.unsigned_abs())
        } else {
            (state.cursor + delta as usize).min(len - 1)
        };
    }
}

/// Flip completion of the task under the cursor. No confirmation.
fn toggle_selected(app: &mut App) {
    if let Some(id) = app.selected_id() {
        app.dispatch_toggle(id);
    }
}

/// Stage the selected task's title and due date for editing.
fn start_edit(app: &mut App) {
    let Some(id) = app.selected_id() else { return };
    let Some(task) = app.store.task(id) else { return };
    app.edit = Some(EditState {
        id,
        title: task.title.clone(),
        due: task.due_date.map(|d| d.to_string()).unwrap_or_default(),
        field: FormField::Title,
        pending: false,
    });
    app.mode = Mode::Edit;
}

/// Delete wants an explicit y/n before any request goes out.
fn request_delete(app: &mut App) {
    if let Some(id) = app.selected_id() {
        app.confirm = Some(ConfirmAction::DeleteTask { id });
        app.mode = Mode::Confirm;
    }
}

fn request_clear_completed(app: &mut App) {
    let ids = app.store.completed_ids();
    if ids.is_empty() {
        return;
    }
    app.confirm = Some(ConfirmAction::ClearCompleted { ids });
    app.mode = Mode::Confirm;
}
