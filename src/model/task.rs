use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// A task record as served by the remote todo service.
///
/// The server is the source of truth: `id` and `created_at` are assigned
/// there and never change. The client only caches records it has been
/// handed back by a successful call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Backend-assigned identifier, unique within the collection
    pub id: i64,
    /// Display text, non-empty
    pub title: String,
    /// Completion flag (the backend emits 0/1 as well as true/false)
    #[serde(deserialize_with = "bool_lenient")]
    pub completed: bool,
    /// Optional deadline as a calendar date, no time component
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Server creation timestamp, kept verbatim and parsed only for display
    #[serde(default)]
    pub created_at: String,
}

impl Task {
    /// Overdue: has a deadline, not completed, and the deadline is strictly
    /// in the past relative to `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.is_some_and(|d| d < today)
    }

    /// Due: has a deadline, not completed, and the deadline has arrived
    /// (today counts).
    pub fn is_due(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.is_some_and(|d| d <= today)
    }

    /// Best-effort calendar date of `created_at` for display.
    /// The backend emits SQLite `CURRENT_TIMESTAMP` strings.
    pub fn created_date(&self) -> Option<NaiveDate> {
        let s = self.created_at.trim();
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
            return Some(dt.date());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(dt.date());
        }
        NaiveDate::parse_from_str(s.get(..10)?, "%Y-%m-%d").ok()
    }

    /// Merge a partial update into this record. Only fields present in the
    /// patch change; a present-but-null due date clears the deadline.
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
    }
}

/// Body of `POST /todos`: everything the client decides at creation time.
#[derive(Debug, Clone, Serialize)]
pub struct TaskDraft {
    pub title: String,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
}

impl TaskDraft {
    /// A fresh, incomplete task.
    pub fn new(title: impl Into<String>, due_date: Option<NaiveDate>) -> Self {
        TaskDraft {
            title: title.into(),
            completed: false,
            due_date,
        }
    }
}

/// Body of `PUT /todos/{id}`: fields absent from the patch are left alone
/// by the server. `due_date` is doubly optional so "leave unchanged"
/// (omitted) and "clear the deadline" (explicit null) stay distinct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
}

impl TaskPatch {
    /// Patch flipping only the completion flag.
    pub fn completion(completed: bool) -> Self {
        TaskPatch {
            completed: Some(completed),
            ..Default::default()
        }
    }

    /// Patch replacing the title and deadline, as committed from an edit.
    pub fn retitle(title: impl Into<String>, due_date: Option<NaiveDate>) -> Self {
        TaskPatch {
            title: Some(title.into()),
            due_date: Some(due_date),
            ..Default::default()
        }
    }
}

/// Accept `true`/`false` as well as the 0/1 the backend's SQLite rows
/// serialize to.
fn bool_lenient<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrInt {
        Bool(bool),
        Int(i64),
    }
    Ok(match BoolOrInt::deserialize(deserializer)? {
        BoolOrInt::Bool(b) => b,
        BoolOrInt::Int(i) => i != 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn deserialize_record_with_integer_flag() {
        let json = r#"{
            "id": 7,
            "title": "Buy milk",
            "completed": 0,
            "due_date": "2025-08-10",
            "created_at": "2025-08-01 09:15:00"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 7);
        assert_eq!(task.title, "Buy milk");
        assert!(!task.completed);
        assert_eq!(task.due_date, Some(date("2025-08-10")));
        assert_eq!(task.created_date(), Some(date("2025-08-01")));
    }

    #[test]
    fn deserialize_record_without_due_date() {
        let json = r#"{"id": 1, "title": "x", "completed": true, "due_date": null}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.completed);
        assert_eq!(task.due_date, None);
        assert_eq!(task.created_date(), None);
    }

    #[test]
    fn overdue_requires_past_date_and_incomplete() {
        let today = date("2025-08-06");
        let mut task = Task {
            id: 1,
            title: "t".into(),
            completed: false,
            due_date: Some(date("2025-08-05")),
            created_at: String::new(),
        };
        assert!(task.is_overdue(today));
        assert!(task.is_due(today));

        // Due today: due but not overdue
        task.due_date = Some(today);
        assert!(!task.is_overdue(today));
        assert!(task.is_due(today));

        // Completed tasks are never due or overdue
        task.due_date = Some(date("2025-08-05"));
        task.completed = true;
        assert!(!task.is_overdue(today));
        assert!(!task.is_due(today));

        // No deadline
        task.completed = false;
        task.due_date = None;
        assert!(!task.is_overdue(today));
        assert!(!task.is_due(today));
    }

    #[test]
    fn patch_serializes_only_changed_fields() {
        let patch = TaskPatch::completion(true);
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"completed":true}"#);
    }

    #[test]
    fn patch_serializes_explicit_due_date_clear() {
        let patch = TaskPatch::retitle("New title", None);
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"title":"New title","due_date":null}"#);
    }

    #[test]
    fn patch_merge_leaves_absent_fields_alone() {
        let mut task = Task {
            id: 3,
            title: "Old".into(),
            completed: false,
            due_date: Some(date("2025-08-10")),
            created_at: "2025-08-01 09:15:00".into(),
        };
        task.apply_patch(&TaskPatch::completion(true));
        assert!(task.completed);
        assert_eq!(task.title, "Old");
        assert_eq!(task.due_date, Some(date("2025-08-10")));

        task.apply_patch(&TaskPatch::retitle("New", None));
        assert_eq!(task.title, "New");
        assert_eq!(task.due_date, None);
        // Completion untouched by a retitle
        assert!(task.completed);
    }

    #[test]
    fn draft_serializes_null_due_date() {
        let draft = TaskDraft::new("Buy milk", None);
        let json = serde_json::to_string(&draft).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Buy milk","completed":false,"due_date":null}"#
        );
    }

    #[test]
    fn created_date_parses_iso_variant() {
        let task = Task {
            id: 1,
            title: "t".into(),
            completed: false,
            due_date: None,
            created_at: "2025-08-01T09:15:00.123".into(),
        };
        assert_eq!(task.created_date(), Some(date("2025-08-01")));
    }
}
