use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;
use crate::views::{self, ANALYTICS_TABLE_LIMIT};

use super::title_line;

const METER_WIDTH: usize = 30;

/// Render the analytics page: status distribution, productivity meters,
/// and the capped details table.
pub fn render_analytics(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let summary = views::analytics_summary(&app.store.tasks);

    let mut lines: Vec<Line> = vec![title_line(app, "Analytics & Insights"), Line::from("")];

    // Status distribution
    lines.push(section(app, "Task Status Distribution"));
    lines.push(meter_line(
        app,
        "Completed",
        summary.completed,
        summary.completed_pct,
        theme.green,
    ));
    lines.push(meter_line(
        app,
        "Pending",
        summary.pending,
        summary.pending_pct,
        theme.yellow,
    ));
    lines.push(Line::from(""));

    // Productivity metrics
    lines.push(section(app, "Productivity Metrics"));
    lines.push(meter_line(
        app,
        "Completion Rate",
        summary.completed,
        summary.completed_pct,
        theme.purple,
    ));
    lines.push(Line::from(Span::styled(
        format!(" Active Tasks     {}", summary.pending),
        Style::default().fg(theme.text).bg(bg),
    )));
    lines.push(Line::from(""));

    // Details table, first ten tasks
    lines.push(section(app, "Task Details"));
    lines.push(Line::from(Span::styled(
        format!(" {:<12} {:<40} {}", "Status", "Task", "Created"),
        Style::default().fg(theme.dim).bg(bg),
    )));
    for task in views::preview(&app.store.tasks, ANALYTICS_TABLE_LIMIT) {
        let (status, color) = if task.completed {
            ("Completed", theme.green)
        } else {
            ("Pending", theme.yellow)
        };
        let created = task
            .created_date()
            .map(|d| d.to_string())
            .unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<12} ", status),
                Style::default().fg(color).bg(bg),
            ),
            Span::styled(
                format!("{:<40} ", unicode::truncate_to_width(&task.title, 40)),
                Style::default().fg(theme.text_bright).bg(bg),
            ),
            Span::styled(created, Style::default().fg(theme.dim).bg(bg)),
        ]));
    }
    if summary.total == 0 {
        lines.push(Line::from(Span::styled(
            " No tasks to analyze",
            Style::default().fg(theme.dim).bg(bg),
        )));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn section(app: &App, text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {}", text),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.background)
            .add_modifier(Modifier::BOLD),
    ))
}

/// " Label            ████████░░  42.9% (3)"
fn meter_line(
    app: &App,
    label: &str,
    count: usize,
    pct: f64,
    color: ratatui::style::Color,
) -> Line<'static> {
    let theme = &app.theme;
    let bg = theme.background;
    let filled = ((pct / 100.0) * METER_WIDTH as f64).round() as usize;
    let filled = filled.min(METER_WIDTH);
    Line::from(vec![
        Span::styled(
            format!(" {:<16} ", label),
            Style::default().fg(theme.text).bg(bg),
        ),
        Span::styled(
            "\u{2588}".repeat(filled),
            Style::default().fg(color).bg(bg),
        ),
        Span::styled(
            "\u{2591}".repeat(METER_WIDTH - filled),
            Style::default().fg(theme.dim).bg(bg),
        ),
        Span::styled(
            format!("  {}% ({})", pct, count),
            Style::default().fg(theme.text).bg(bg),
        ),
    ])
}
