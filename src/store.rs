use crate::model::{Task, TaskPatch};

/// The store operation behind an in-flight request, used to pick the fixed
/// failure message for the error banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreAction {
    Fetch,
    Add,
    Update,
    Delete,
    ClearCompleted,
}

impl StoreAction {
    /// One fixed, human-readable message per attempted action.
    pub fn failure_message(self) -> &'static str {
        match self {
            StoreAction::Fetch => "Failed to load tasks",
            StoreAction::Add => "Failed to add task",
            StoreAction::Update => "Failed to update task",
            StoreAction::Delete => "Failed to delete task",
            StoreAction::ClearCompleted => "Failed to clear completed tasks",
        }
    }
}

/// Client-local cache of the task collection plus the transient request
/// surface (`loading`, `error`).
///
/// Invariant: every mutating method here is only called once the matching
/// request has resolved successfully — the store never anticipates the
/// server. Ordering is the server's fetch order with newly created tasks
/// prepended.
#[derive(Debug, Default)]
pub struct TaskStore {
    pub tasks: Vec<Task>,
    pub loading: bool,
    pub error: Option<String>,
}

impl TaskStore {
    pub fn new() -> Self {
        TaskStore::default()
    }

    /// Look up a cached record by id.
    pub fn task(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Ids of all completed tasks, in store order.
    pub fn completed_ids(&self) -> Vec<i64> {
        self.tasks
            .iter()
            .filter(|t| t.completed)
            .map(|t| t.id)
            .collect()
    }

    /// Mark a full fetch as in flight.
    pub fn begin_refresh(&mut self) {
        self.loading = true;
    }

    /// Replace the collection with a confirmed fetch result.
    pub fn apply_fetched(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.loading = false;
        self.error = None;
    }

    /// Prepend a record the server confirmed creating.
    pub fn apply_created(&mut self, task: Task) {
        self.tasks.insert(0, task);
        self.error = None;
    }

    /// Field-merge a confirmed partial update into the matching record.
    /// A response for a task deleted in the meantime is dropped silently.
    pub fn apply_updated(&mut self, id: i64, patch: &TaskPatch) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.apply_patch(patch);
        }
        self.error = None;
    }

    /// Remove a record the server confirmed deleting.
    pub fn apply_deleted(&mut self, id: i64) {
        self.tasks.retain(|t| t.id != id);
        self.error = None;
    }

    /// Remove every record of a fully successful clear-completed batch.
    /// Callers only invoke this when *all* deletes in the batch succeeded.
    pub fn apply_cleared(&mut self, ids: &[i64]) {
        self.tasks.retain(|t| !ids.contains(&t.id));
        self.error = None;
    }

    /// Record a failed request: no local mutation, banner message set.
    pub fn fail(&mut self, action: StoreAction) {
        if action == StoreAction::Fetch {
            self.loading = false;
        }
        self.error = Some(action.failure_message().to_string());
    }
}
