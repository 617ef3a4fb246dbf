use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, ConfirmAction, Mode};

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let width = area.width as usize;

    let line = match app.mode {
        Mode::Navigate => hint_line(app, width, "? help"),
        Mode::Search => hint_line(app, width, "Enter keep  Esc clear"),
        Mode::Insert => hint_line(app, width, "Tab field  Enter add  Esc cancel"),
        Mode::Edit => hint_line(app, width, "Tab field  Enter save  Esc cancel"),
        Mode::Confirm => {
            let prompt = match &app.confirm {
                Some(ConfirmAction::DeleteTask { .. }) => {
                    "Delete this task? (y/n)".to_string()
                }
                Some(ConfirmAction::ClearCompleted { ids }) => {
                    format!("Delete {} completed task(s)? (y/n)", ids.len())
                }
                None => String::new(),
            };
            Line::from(Span::styled(
                format!(" {}", prompt),
                Style::default()
                    .fg(theme.yellow)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ))
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Right-aligned dim hint.
fn hint_line(app: &App, width: usize, hint: &str) -> Line<'static> {
    let hint_width = hint.chars().count();
    let mut spans: Vec<Span> = Vec::new();
    if hint_width + 1 < width {
        spans.push(Span::styled(
            " ".repeat(width - hint_width - 1),
            Style::default().bg(app.theme.background),
        ));
    }
    spans.push(Span::styled(
        hint.to_string(),
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    ));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn confirm_mode_shows_the_prompt() {
        let mut app = app_with_tasks(vec![test_task(1, "a", true, None)]);
        app.mode = Mode::Confirm;
        app.confirm = Some(ConfirmAction::ClearCompleted { ids: vec![1, 2, 3] });
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(output.contains("Delete 3 completed task(s)? (y/n)"));
    }

    #[test]
    fn navigate_mode_shows_the_help_hint() {
        let app = app_with_tasks(vec![]);
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(output.contains("? help"));
    }
}
