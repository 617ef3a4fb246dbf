//! Scenario tests over the store and the response-application path,
//! exercising the confirmed-mutation discipline end to end (no network:
//! service responses are injected as events).

use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use taskdeck::api::{ApiClient, ApiError};
use taskdeck::model::{Task, TaskPatch};
use taskdeck::store::{StoreAction, TaskStore};
use taskdeck::tui::app::{ApiEvent, App, Page};
use taskdeck::tui::theme::Theme;
use taskdeck::views;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn task(id: i64, title: &str, completed: bool, due: Option<&str>) -> Task {
    Task {
        id,
        title: title.into(),
        completed,
        due_date: due.map(date),
        created_at: "2025-08-01 09:15:00".into(),
    }
}

fn app() -> App {
    let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
    let mut app = App::new(
        ApiClient::new("http://localhost:5000/api"),
        Theme::default(),
        tx,
    );
    app.today = date("2025-08-06");
    app
}

#[test]
fn create_on_empty_store_prepends() {
    let mut app = app();
    app.apply_event(ApiEvent::Fetched(Ok(vec![])));
    assert!(app.store.tasks.is_empty());

    app.apply_event(ApiEvent::Created(Ok(task(1, "Buy milk", false, None))));

    assert_eq!(app.store.tasks.len(), 1);
    let created = &app.store.tasks[0];
    assert_eq!(created.title, "Buy milk");
    assert!(!created.completed);
    assert_eq!(created.due_date, None);
}

#[test]
fn overdue_task_leaves_due_subset_when_completed() {
    let mut app = app();
    app.apply_event(ApiEvent::Fetched(Ok(vec![task(
        1,
        "Pay rent",
        false,
        Some("2025-08-05"), // yesterday
    )])));

    let due = app.page_rows(Page::Due);
    assert_eq!(due.len(), 1);
    assert!(due[0].overdue);

    // Toggle complete: server confirms, the patch merges in
    app.apply_event(ApiEvent::Updated {
        id: 1,
        patch: TaskPatch::completion(true),
        result: Ok(()),
    });

    assert!(app.page_rows(Page::Due).is_empty());
    assert_eq!(app.page_rows(Page::Completed).len(), 1);
}

#[test]
fn clear_completed_failure_removes_nothing_locally() {
    let mut app = app();
    app.apply_event(ApiEvent::Fetched(Ok(vec![
        task(1, "one", true, None),
        task(2, "two", true, None),
        task(3, "three", true, None),
    ])));

    let ids = app.store.completed_ids();
    assert_eq!(ids, vec![1, 2, 3]);

    // Second delete of the batch failed server-side: the whole batch
    // reports one failure and no task disappears locally.
    app.apply_event(ApiEvent::Cleared {
        ids,
        result: Err(ApiError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR)),
    });

    assert_eq!(app.store.tasks.len(), 3);
    assert_eq!(
        app.store.error.as_deref(),
        Some("Failed to clear completed tasks")
    );

    // A later successful refresh heals the divergence and the banner.
    app.apply_event(ApiEvent::Fetched(Ok(vec![task(2, "two", true, None)])));
    assert_eq!(app.store.tasks.len(), 1);
    assert_eq!(app.store.error, None);
}

#[test]
fn failed_initial_fetch_shows_banner_over_empty_list() {
    let mut store = TaskStore::new();
    store.begin_refresh();
    store.fail(StoreAction::Fetch);

    assert!(!store.loading);
    assert!(store.tasks.is_empty());
    assert_eq!(store.error.as_deref(), Some("Failed to load tasks"));
}

#[test]
fn derivations_agree_with_the_store_after_a_mutation_chain() {
    let mut app = app();
    app.apply_event(ApiEvent::Fetched(Ok(vec![
        task(10, "write report", false, Some("2025-08-06")),
        task(11, "review report", true, None),
    ])));
    app.apply_event(ApiEvent::Created(Ok(task(12, "new thing", false, None))));
    app.apply_event(ApiEvent::Updated {
        id: 10,
        patch: TaskPatch::retitle("write the report", Some(date("2025-08-02"))),
        result: Ok(()),
    });
    app.apply_event(ApiEvent::Deleted {
        id: 11,
        result: Ok(()),
    });

    let tasks = &app.store.tasks;
    assert_eq!(tasks.len(), 2);
    // Prepended create sits first
    assert_eq!(tasks[0].id, 12);

    let stats = views::dashboard_stats(tasks);
    assert_eq!(stats.total, 2);
    assert_eq!(stats.completed, 0);
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.completion_rate, 0.0);

    let due = views::due_tasks(tasks, app.today);
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].title, "write the report");
    assert!(due[0].is_overdue(app.today));
}
