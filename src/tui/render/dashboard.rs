use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;
use crate::views::{self, ACTIVITY_FEED_LIMIT};

use super::title_line;

/// Render the dashboard: stat tiles plus the recent-activity feed.
pub fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let stats = views::dashboard_stats(&app.store.tasks);

    let mut lines: Vec<Line> = vec![title_line(app, "Dashboard Overview"), Line::from("")];

    let tiles = [
        ("Total Tasks", stats.total.to_string(), theme.blue),
        ("Completed", stats.completed.to_string(), theme.green),
        ("Pending", stats.pending.to_string(), theme.yellow),
        (
            "Completion Rate",
            format!("{}%", stats.completion_rate),
            theme.purple,
        ),
    ];

    // One row of labels, one row of values, in four fixed-width columns
    let col = 18;
    let mut label_spans: Vec<Span> = vec![Span::styled(" ", Style::default().bg(bg))];
    let mut value_spans: Vec<Span> = vec![Span::styled(" ", Style::default().bg(bg))];
    for (label, value, color) in &tiles {
        label_spans.push(Span::styled(
            pad_to(label, col),
            Style::default().fg(theme.dim).bg(bg),
        ));
        value_spans.push(Span::styled(
            pad_to(value, col),
            Style::default()
                .fg(*color)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
    }
    lines.push(Line::from(label_spans));
    lines.push(Line::from(value_spans));
    lines.push(Line::from(""));

    // Recent activity: the first five tasks in store order
    lines.push(Line::from(Span::styled(
        " Recent Tasks",
        Style::default()
            .fg(theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )));
    let recent = views::preview(&app.store.tasks, ACTIVITY_FEED_LIMIT);
    if recent.is_empty() {
        lines.push(Line::from(Span::styled(
            " No tasks yet",
            Style::default().fg(theme.dim).bg(bg),
        )));
    }
    for task in recent {
        let (mark, color) = if task.completed {
            ("\u{2713}", theme.green)
        } else {
            ("\u{25CB}", theme.yellow)
        };
        let created = task
            .created_date()
            .map(|d| d.to_string())
            .unwrap_or_default();
        let mut spans = vec![
            Span::styled(format!(" {} ", mark), Style::default().fg(color).bg(bg)),
            Span::styled(
                unicode::truncate_to_width(&task.title, (area.width as usize).saturating_sub(16)),
                Style::default().fg(theme.text_bright).bg(bg),
            ),
        ];
        if !created.is_empty() {
            spans.push(Span::styled(
                format!("  {}", created),
                Style::default().fg(theme.dim).bg(bg),
            ));
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn pad_to(text: &str, width: usize) -> String {
    let w = unicode::display_width(text);
    if w >= width {
        return text.to_string();
    }
    format!("{}{}", text, " ".repeat(width - w))
}
