pub mod about;
pub mod analytics;
pub mod dashboard;
pub mod help_overlay;
pub mod status_row;
pub mod tab_bar;
pub mod task_list;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::{App, Page};

/// Main render function — dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: tab bar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // tab bar + separator
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, chunks[0]);

    if app.store.loading {
        render_loading(frame, app, chunks[1]);
    } else {
        match app.page {
            Page::Dashboard => dashboard::render_dashboard(frame, app, chunks[1]),
            Page::Tasks | Page::Current | Page::Due | Page::Completed => {
                task_list::render_task_list(frame, app, chunks[1]);
            }
            Page::Analytics => analytics::render_analytics(frame, app, chunks[1]),
            Page::About => about::render_about(frame, app, chunks[1]),
        }
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

/// Full-page placeholder while the initial fetch is in flight.
fn render_loading(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![Line::from("")];
    let pad = (area.height as usize).saturating_sub(2) / 2;
    for _ in 0..pad {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        center_text("Loading tasks\u{2026}", area.width as usize),
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    )));
    let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

/// The error banner shown above page content until the next success.
pub(super) fn error_banner_line(app: &App) -> Option<Line<'static>> {
    let message = app.store.error.as_ref()?;
    Some(Line::from(Span::styled(
        format!(" \u{2717} {}", message),
        Style::default()
            .fg(app.theme.red)
            .bg(app.theme.background)
            .add_modifier(Modifier::BOLD),
    )))
}

/// A bold page-title line.
pub(super) fn title_line(app: &App, title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {}", title),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.background)
            .add_modifier(Modifier::BOLD),
    ))
}

fn center_text(text: &str, width: usize) -> String {
    let text_width = crate::util::unicode::display_width(text);
    if text_width >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat((width - text_width) / 2), text)
}
