use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

use super::title_line;

/// Render the static about page.
pub fn render_about(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;

    let section = |text: &str| {
        Line::from(Span::styled(
            format!(" {}", text),
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let body = |text: &str| {
        Line::from(Span::styled(
            format!(" {}", text),
            Style::default().fg(theme.text).bg(bg),
        ))
    };
    let item = |key: &str, value: &str| {
        Line::from(vec![
            Span::styled(
                format!(" {:<14}", key),
                Style::default().fg(theme.purple).bg(bg),
            ),
            Span::styled(value.to_string(), Style::default().fg(theme.text).bg(bg)),
        ])
    };

    let lines: Vec<Line> = vec![
        title_line(app, "About taskdeck"),
        Line::from(""),
        body("A terminal dashboard for a remote todo service: list, add,"),
        body("edit, filter and complete tasks without leaving the shell."),
        Line::from(""),
        section("Architecture"),
        item("Interface", "ratatui terminal UI, plus a CLI for scripts"),
        item("Service", "remote todo REST resource (GET/POST/PUT/DELETE)"),
        item("Transport", "reqwest over HTTP, JSON bodies"),
        item("Runtime", "tokio; one spawned task per request"),
        Line::from(""),
        section("Behavior"),
        body("The local task list is a cache: it only changes after the"),
        body("server confirms an operation. Failures leave it untouched"),
        body("and surface a banner until the next success."),
        Line::from(""),
        item("Version", env!("CARGO_PKG_VERSION")),
        item("Config", "TASKDECK_API_URL or ~/.config/taskdeck/config.toml"),
    ];

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn about_page_renders_static_copy() {
        let app = app_with_tasks(vec![]);
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_about(frame, &app, area);
        });
        assert!(output.contains("About taskdeck"));
        assert!(output.contains("Architecture"));
        assert!(output.contains(env!("CARGO_PKG_VERSION")));
    }
}
