use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

const KEYS: &[(&str, &str)] = &[
    ("tab / shift-tab", "next / previous page"),
    ("1-7", "jump to page"),
    ("j / k, arrows", "move cursor"),
    ("space / x", "toggle complete"),
    ("a", "add task (all-tasks page)"),
    ("enter / e", "edit task"),
    ("d", "delete task (asks y/n)"),
    ("C", "clear completed (asks y/n)"),
    ("f", "cycle status filter"),
    ("/", "search titles"),
    ("r", "refresh from server"),
    ("q", "quit"),
];

/// Render the help overlay, centered on top of everything.
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let width = (area.width).min(46);
    let height = (area.height).min(KEYS.len() as u16 + 4);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, popup);

    let mut lines: Vec<Line> = vec![Line::from("")];
    for (key, what) in KEYS {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<16}", key),
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(what.to_string(), Style::default().fg(theme.text)),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.selection_border))
        .title(" Keys ")
        .style(Style::default().bg(theme.background));
    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn help_overlay_lists_bindings() {
        let app = app_with_tasks(vec![]);
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_help_overlay(frame, &app, area);
        });
        assert!(output.contains("Keys"));
        assert!(output.contains("toggle complete"));
        assert!(output.contains("clear completed"));
    }
}
