//! Pure view derivations over the task collection.
//!
//! Everything here is stateless and recomputed on each render: functions
//! take the current task slice (plus an explicit `today` where calendar
//! comparisons are involved) and return owned summaries or borrowed
//! subsets. Nothing mutates the store.

use chrono::NaiveDate;

use crate::model::Task;

/// Row cap of the analytics details table.
pub const ANALYTICS_TABLE_LIMIT: usize = 10;

/// Row cap of the dashboard recent-activity feed.
pub const ACTIVITY_FEED_LIMIT: usize = 5;

/// Aggregates shown as dashboard stat tiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// completed/total as a percentage, rounded to one decimal; 0 when empty
    pub completion_rate: f64,
}

/// Compute the dashboard tiles from the current collection.
pub fn dashboard_stats(tasks: &[Task]) -> DashboardStats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    DashboardStats {
        total,
        completed,
        pending: total - completed,
        completion_rate: percentage(completed, total),
    }
}

/// Percentages for the analytics page. Pending mirrors the dashboard's
/// `total - completed`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticsSummary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub completed_pct: f64,
    pub pending_pct: f64,
}

pub fn analytics_summary(tasks: &[Task]) -> AnalyticsSummary {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let pending = total - completed;
    AnalyticsSummary {
        total,
        completed,
        pending,
        completed_pct: percentage(completed, total),
        pending_pct: percentage(pending, total),
    }
}

/// part/whole as a percentage rounded to one decimal, 0 when `whole` is 0.
fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 1000.0).round() / 10.0
}

/// Status dimension of the all-tasks filter bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Completed => "completed",
        }
    }

    /// Cycle all → active → completed → all.
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Active,
            StatusFilter::Active => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::All,
        }
    }

    fn accepts(self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !task.completed,
            StatusFilter::Completed => task.completed,
        }
    }
}

/// Case-insensitive substring match against a task title. An empty term
/// matches everything.
pub fn matches_search(title: &str, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    title.to_lowercase().contains(&term.to_lowercase())
}

/// Status filter intersected with the text filter, in store order.
pub fn filter_tasks<'a>(tasks: &'a [Task], status: StatusFilter, term: &str) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| status.accepts(t))
        .filter(|t| matches_search(&t.title, term))
        .collect()
}

/// Incomplete tasks, store order.
pub fn current_tasks(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|t| !t.completed).collect()
}

/// Completed tasks, store order.
pub fn completed_tasks(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|t| t.completed).collect()
}

/// Incomplete tasks whose deadline has arrived or passed, ascending by
/// due date (ties keep store order).
pub fn due_tasks(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    let mut due: Vec<&Task> = tasks.iter().filter(|t| t.is_due(today)).collect();
    due.sort_by_key(|t| t.due_date);
    due
}

/// The first `limit` tasks, for capped previews.
pub fn preview(tasks: &[Task], limit: usize) -> &[Task] {
    &tasks[..tasks.len().min(limit)]
}
