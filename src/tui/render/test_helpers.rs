use chrono::NaiveDate;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::api::ApiClient;
use crate::model::Task;
use crate::tui::app::{ApiEvent, App};
use crate::tui::theme::Theme;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Every render test runs against this fixed day.
pub const TODAY: &str = "2025-08-06";

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Build an App with a fetched task collection and a pinned `today`.
pub fn app_with_tasks(tasks: Vec<Task>) -> App {
    let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
    let mut app = App::new(
        ApiClient::new("http://localhost:5000/api"),
        Theme::default(),
        tx,
    );
    app.today = NaiveDate::parse_from_str(TODAY, "%Y-%m-%d").unwrap();
    app.apply_event(ApiEvent::Fetched(Ok(tasks)));
    app
}

/// A task record for render tests.
pub fn test_task(id: i64, title: &str, completed: bool, due: Option<&str>) -> Task {
    Task {
        id,
        title: title.into(),
        completed,
        due_date: due.map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()),
        created_at: "2025-08-01 09:15:00".into(),
    }
}
