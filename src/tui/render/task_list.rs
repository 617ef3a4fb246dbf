use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, FormField, Mode, Page, RowData};
use crate::util::unicode;
use crate::views;

use super::{error_banner_line, title_line};

/// Render one of the four list pages: all tasks, current, due, completed.
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let page = app.page;
    let rows = app.page_rows(page);

    // Clamp cursor to the visible rows
    if let Some(state) = app.list_state_mut(page) {
        state.cursor = state.cursor.min(rows.len().saturating_sub(1));
    }
    let cursor = app.list_state(page).map_or(0, |s| s.cursor);

    let header_lines = build_header(app, page, &rows);
    let row_lines = build_rows(app, page, &rows, cursor, area.width as usize);
    let footer_line = footer(app, page, rows.len());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_lines.len() as u16),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    let bg = Style::default().bg(app.theme.background);
    frame.render_widget(Paragraph::new(header_lines).style(bg), chunks[0]);

    // Keep the cursor row inside the list viewport
    let list_height = chunks[1].height as usize;
    let mut scroll = app.list_state(page).map_or(0, |s| s.scroll);
    if list_height > 0 {
        if cursor < scroll {
            scroll = cursor;
        } else if cursor >= scroll + list_height {
            scroll = cursor + 1 - list_height;
        }
    }
    if let Some(state) = app.list_state_mut(page) {
        state.scroll = scroll;
    }

    let visible: Vec<Line> = row_lines
        .into_iter()
        .skip(scroll)
        .take(list_height)
        .collect();
    frame.render_widget(Paragraph::new(visible).style(bg), chunks[1]);
    frame.render_widget(Paragraph::new(footer_line).style(bg), chunks[2]);
}

fn page_title(page: Page) -> &'static str {
    match page {
        Page::Tasks => "My Tasks",
        Page::Current => "Current Tasks",
        Page::Due => "Due Tasks",
        Page::Completed => "Completed Tasks",
        _ => "",
    }
}

fn build_header(app: &App, page: Page, rows: &[RowData]) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let bg = theme.background;
    let mut lines = vec![title_line(app, page_title(page))];

    if let Some(banner) = error_banner_line(app) {
        lines.push(banner);
    }

    // Due page: warn about the unfiltered due count
    if page == Page::Due {
        let due_count = views::due_tasks(&app.store.tasks, app.today).len();
        if due_count > 0 {
            let noun = if due_count == 1 { "task is" } else { "tasks are" };
            lines.push(Line::from(Span::styled(
                format!(" ! {} {} due or overdue", due_count, noun),
                Style::default().fg(theme.yellow).bg(bg),
            )));
        }
    }

    // Controls: filter state and search term
    let search = app.list_state(page).map_or("", |s| s.search.as_str());
    let searching = app.mode == Mode::Search;
    let mut controls: Vec<Span> = Vec::new();
    if page == Page::Tasks {
        controls.push(Span::styled(
            format!(" filter: {}", app.status_filter.label()),
            Style::default().fg(theme.purple).bg(bg),
        ));
    }
    if searching || !search.is_empty() {
        let style = if searching {
            Style::default().fg(theme.text_bright).bg(bg)
        } else {
            Style::default().fg(theme.dim).bg(bg)
        };
        controls.push(Span::styled(format!(" search: {}", search), style));
        if searching {
            controls.push(Span::styled(
                "\u{258C}",
                Style::default().fg(theme.highlight).bg(bg),
            ));
        }
    }
    if !controls.is_empty() {
        lines.push(Line::from(controls));
    }

    // The add form, while it is open
    if page == Page::Tasks && app.mode == Mode::Insert {
        lines.push(form_field_line(
            app,
            " add",
            &app.form.title,
            app.form.field == FormField::Title,
            "",
        ));
        lines.push(form_field_line(
            app,
            " due",
            &app.form.due,
            app.form.field == FormField::Due,
            "  (YYYY-MM-DD, optional)",
        ));
    }

    if rows.is_empty() {
        lines.push(Line::from(""));
        let (text, no_search_hint) = empty_state(page);
        lines.push(Line::from(Span::styled(
            format!(" {}", text),
            Style::default().fg(theme.text).bg(bg),
        )));
        let hint = if search.is_empty() {
            no_search_hint
        } else {
            "Try a different search term"
        };
        lines.push(Line::from(Span::styled(
            format!(" {}", hint),
            Style::default().fg(theme.dim).bg(bg),
        )));
    }

    lines.push(Line::from(""));
    lines
}

fn empty_state(page: Page) -> (&'static str, &'static str) {
    match page {
        Page::Tasks => ("No tasks found", "Add your first task with 'a'"),
        Page::Current => ("No current tasks!", "All caught up!"),
        Page::Due => ("No due tasks found", "Nothing is due or overdue"),
        Page::Completed => (
            "No completed tasks found",
            "Complete some tasks to see them here",
        ),
        _ => ("", ""),
    }
}

/// A single-line input field with a block cursor on the focused one.
fn form_field_line(
    app: &App,
    label: &str,
    value: &str,
    focused: bool,
    hint: &str,
) -> Line<'static> {
    let theme = &app.theme;
    let bg = theme.background;
    let mut spans = vec![Span::styled(
        format!("{}: ", label),
        Style::default().fg(theme.purple).bg(bg),
    )];
    spans.push(Span::styled(
        value.to_string(),
        Style::default().fg(theme.text_bright).bg(bg),
    ));
    if focused {
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(theme.highlight).bg(bg),
        ));
    }
    if !hint.is_empty() {
        spans.push(Span::styled(
            hint.to_string(),
            Style::default().fg(theme.dim).bg(bg),
        ));
    }
    Line::from(spans)
}

fn build_rows(
    app: &App,
    page: Page,
    rows: &[RowData],
    cursor: usize,
    width: usize,
) -> Vec<Line<'static>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let is_cursor = i == cursor;
            if app
                .edit
                .as_ref()
                .is_some_and(|e| e.id == row.id && app.mode == Mode::Edit)
            {
                edit_row_line(app, width)
            } else {
                row_line(app, page, row, is_cursor, width)
            }
        })
        .collect()
}

fn row_line(app: &App, page: Page, row: &RowData, is_cursor: bool, width: usize) -> Line<'static> {
    let theme = &app.theme;
    let bg = if is_cursor {
        theme.selection_bg
    } else {
        theme.background
    };
    let mut spans: Vec<Span> = Vec::new();

    // Cursor bar in column 0
    if is_cursor {
        spans.push(Span::styled(
            "\u{258E}",
            Style::default().fg(theme.selection_border).bg(bg),
        ));
    } else {
        spans.push(Span::styled(" ", Style::default().bg(bg)));
    }

    // Checkbox
    let (mark, mark_color) = if row.completed {
        ("[x] ", theme.green)
    } else {
        ("[ ] ", theme.text)
    };
    spans.push(Span::styled(mark, Style::default().fg(mark_color).bg(bg)));

    // Right-hand column: deadline, or creation date on the completed page
    let (right, right_color) = match (page, row.due_date, row.overdue) {
        (Page::Completed, _, _) => (
            row.created.map(|d| format!("done {}", d)).unwrap_or_default(),
            theme.dim,
        ),
        (_, Some(due), true) => (format!("{}  OVERDUE", due), theme.red),
        (_, Some(due), false) => (due.to_string(), theme.yellow),
        (_, None, _) => (String::new(), theme.dim),
    };

    // Title, truncated to the space remaining left of the right column
    let prefix_width: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
    let right_width = unicode::display_width(&right);
    let reserved = if right_width > 0 { right_width + 2 } else { 1 };
    let available = width.saturating_sub(prefix_width + reserved);
    let title = unicode::truncate_to_width(&row.title, available);

    let mut title_style = Style::default().fg(theme.text_bright).bg(bg);
    if is_cursor {
        title_style = title_style.add_modifier(Modifier::BOLD);
    }
    if row.completed {
        title_style = Style::default()
            .fg(theme.dim)
            .bg(bg)
            .add_modifier(Modifier::CROSSED_OUT);
    }
    spans.push(Span::styled(title, title_style));

    // Right-justify the date column, then pad to the full width
    if right_width > 0 {
        let used: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
        let start = width.saturating_sub(right_width + 1);
        if used < start {
            spans.push(Span::styled(" ".repeat(start - used), Style::default().bg(bg)));
        }
        spans.push(Span::styled(right, Style::default().fg(right_color).bg(bg)));
    }
    let used: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
    }

    Line::from(spans)
}

/// The row under edit shows the staged fields instead of the stored record.
fn edit_row_line(app: &App, width: usize) -> Line<'static> {
    let theme = &app.theme;
    let bg = theme.selection_bg;
    let Some(edit) = app.edit.as_ref() else {
        return Line::from("");
    };

    let mut spans = vec![Span::styled(
        "\u{258E}",
        Style::default().fg(theme.selection_border).bg(bg),
    )];
    spans.push(Span::styled(
        "[ ] ",
        Style::default().fg(theme.text).bg(bg),
    ));
    spans.push(Span::styled(
        edit.title.clone(),
        Style::default().fg(theme.text_bright).bg(bg),
    ));
    if edit.field == FormField::Title && !edit.pending {
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(theme.highlight).bg(bg),
        ));
    }
    spans.push(Span::styled(
        "  due: ",
        Style::default().fg(theme.purple).bg(bg),
    ));
    spans.push(Span::styled(
        edit.due.clone(),
        Style::default().fg(theme.text_bright).bg(bg),
    ));
    if edit.field == FormField::Due && !edit.pending {
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(theme.highlight).bg(bg),
        ));
    }
    if edit.pending {
        spans.push(Span::styled(
            "  saving\u{2026}",
            Style::default().fg(theme.dim).bg(bg),
        ));
    }
    let used: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
    }
    Line::from(spans)
}

fn footer(app: &App, page: Page, count: usize) -> Line<'static> {
    let noun = match page {
        Page::Current => "current task",
        Page::Due => "due task",
        Page::Completed => "completed task",
        _ => "task",
    };
    let plural = if count == 1 { "" } else { "s" };
    Line::from(Span::styled(
        format!(" {} {}{}", count, noun, plural),
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::EditState;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn all_tasks_page_lists_rows_and_footer() {
        let mut app = app_with_tasks(vec![
            test_task(1, "Write the report", false, None),
            test_task(2, "Ship the release", true, None),
        ]);
        app.page = Page::Tasks;
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_task_list(frame, &mut app, area);
        });
        assert!(output.contains("My Tasks"));
        assert!(output.contains("[ ] Write the report"));
        assert!(output.contains("[x] Ship the release"));
        assert!(output.contains("2 tasks"));
        assert!(output.contains("filter: all"));
    }

    #[test]
    fn due_page_shows_warning_and_overdue_badge() {
        let mut app = app_with_tasks(vec![test_task(1, "Pay rent", false, Some("2025-08-01"))]);
        app.page = Page::Due;
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_task_list(frame, &mut app, area);
        });
        assert!(output.contains("! 1 task is due or overdue"));
        assert!(output.contains("OVERDUE"));
        assert!(output.contains("2025-08-01"));
        assert!(output.contains("1 due task"));
    }

    #[test]
    fn error_banner_is_shown_until_cleared() {
        let mut app = app_with_tasks(vec![]);
        app.page = Page::Tasks;
        app.store.fail(crate::store::StoreAction::Add);
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_task_list(frame, &mut app, area);
        });
        assert!(output.contains("Failed to add task"));
    }

    #[test]
    fn empty_current_page_has_its_own_copy() {
        let mut app = app_with_tasks(vec![test_task(1, "done", true, None)]);
        app.page = Page::Current;
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_task_list(frame, &mut app, area);
        });
        assert!(output.contains("No current tasks!"));
        assert!(output.contains("0 current tasks"));
    }

    #[test]
    fn editing_row_renders_staged_fields() {
        let mut app = app_with_tasks(vec![test_task(1, "Original title", false, None)]);
        app.page = Page::Tasks;
        app.mode = Mode::Edit;
        app.edit = Some(EditState {
            id: 1,
            title: "Renamed".into(),
            due: "2025-09-01".into(),
            field: FormField::Title,
            pending: false,
        });
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_task_list(frame, &mut app, area);
        });
        assert!(output.contains("Renamed"));
        assert!(output.contains("due: 2025-09-01"));
        assert!(!output.contains("Original title"));
    }

    #[test]
    fn insert_mode_shows_the_add_form() {
        let mut app = app_with_tasks(vec![]);
        app.page = Page::Tasks;
        app.mode = Mode::Insert;
        app.form.title = "Buy mil".into();
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_task_list(frame, &mut app, area);
        });
        assert!(output.contains("add: Buy mil"));
        assert!(output.contains("(YYYY-MM-DD, optional)"));
    }
}
