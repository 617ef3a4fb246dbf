use std::io;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::{ApiClient, ApiError};
use crate::config::Config;
use crate::model::{Task, TaskDraft, TaskPatch};
use crate::store::{StoreAction, TaskStore};
use crate::views::{self, StatusFilter};

use super::input;
use super::render;
use super::theme::Theme;

/// Navigation destinations, one per tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Tasks,
    Current,
    Due,
    Completed,
    Analytics,
    About,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Dashboard,
        Page::Tasks,
        Page::Current,
        Page::Due,
        Page::Completed,
        Page::Analytics,
        Page::About,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Tasks => "All Tasks",
            Page::Current => "Current",
            Page::Due => "Due",
            Page::Completed => "Completed",
            Page::Analytics => "Analytics",
            Page::About => "About",
        }
    }

    pub fn next(self) -> Page {
        let i = Page::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Page::ALL[(i + 1) % Page::ALL.len()]
    }

    pub fn prev(self) -> Page {
        let i = Page::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Page::ALL[(i + Page::ALL.len() - 1) % Page::ALL.len()]
    }

    pub fn from_digit(c: char) -> Option<Page> {
        let idx = c.to_digit(10)? as usize;
        (1..=Page::ALL.len()).contains(&idx).then(|| Page::ALL[idx - 1])
    }

    /// Pages that render a task list with a cursor.
    pub fn is_list(self) -> bool {
        matches!(
            self,
            Page::Tasks | Page::Current | Page::Due | Page::Completed
        )
    }
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing into the add-task form
    Insert,
    /// Editing a staged copy of an existing task
    Edit,
    /// Typing into the active page's search box
    Search,
    /// Waiting on a y/n answer
    Confirm,
}

/// Which field of a two-field form has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Due,
}

impl FormField {
    pub fn toggle(self) -> FormField {
        match self {
            FormField::Title => FormField::Due,
            FormField::Due => FormField::Title,
        }
    }
}

/// Staged input of the add-task form (all-tasks page)
#[derive(Debug, Default)]
pub struct AddForm {
    pub title: String,
    pub due: String,
    pub field: FormField,
}

impl AddForm {
    pub fn clear(&mut self) {
        self.title.clear();
        self.due.clear();
        self.field = FormField::Title;
    }
}

/// Staged copy of a task mid-edit. The stored record is untouched until
/// the update request confirms.
#[derive(Debug)]
pub struct EditState {
    pub id: i64,
    pub title: String,
    pub due: String,
    pub field: FormField,
    /// An update request for this edit is in flight
    pub pending: bool,
}

/// Action awaiting an explicit y/n confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteTask { id: i64 },
    ClearCompleted { ids: Vec<i64> },
}

/// Cursor, scroll offset, and search term of one list page
#[derive(Debug, Default)]
pub struct ListState {
    pub cursor: usize,
    pub scroll: usize,
    pub search: String,
}

/// Result of a completed service call, delivered back to the event loop.
/// Applying one of these is the only way the store mutates.
#[derive(Debug)]
pub enum ApiEvent {
    Fetched(Result<Vec<Task>, ApiError>),
    Created(Result<Task, ApiError>),
    Updated {
        id: i64,
        patch: TaskPatch,
        result: Result<(), ApiError>,
    },
    Deleted {
        id: i64,
        result: Result<(), ApiError>,
    },
    Cleared {
        ids: Vec<i64>,
        result: Result<(), ApiError>,
    },
}

/// Owned snapshot of one visible list row
#[derive(Debug, Clone)]
pub struct RowData {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
    pub overdue: bool,
    pub created: Option<NaiveDate>,
}

impl RowData {
    fn from_task(task: &Task, today: NaiveDate) -> Self {
        RowData {
            id: task.id,
            title: task.title.clone(),
            completed: task.completed,
            due_date: task.due_date,
            overdue: task.is_overdue(today),
            created: task.created_date(),
        }
    }
}

/// Main application state
pub struct App {
    pub store: TaskStore,
    pub page: Page,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_help: bool,
    /// Status dimension of the all-tasks filter bar
    pub status_filter: StatusFilter,
    pub tasks_list: ListState,
    pub current_list: ListState,
    pub due_list: ListState,
    pub completed_list: ListState,
    pub form: AddForm,
    pub edit: Option<EditState>,
    pub confirm: Option<ConfirmAction>,
    /// Refreshed once per loop tick; everything date-related derives from it
    pub today: NaiveDate,
    client: ApiClient,
    events_tx: UnboundedSender<ApiEvent>,
}

impl App {
    pub fn new(client: ApiClient, theme: Theme, events_tx: UnboundedSender<ApiEvent>) -> Self {
        App {
            store: TaskStore::new(),
            page: Page::Dashboard,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            show_help: false,
            status_filter: StatusFilter::All,
            tasks_list: ListState::default(),
            current_list: ListState::default(),
            due_list: ListState::default(),
            completed_list: ListState::default(),
            form: AddForm::default(),
            edit: None,
            confirm: None,
            today: Local::now().date_naive(),
            client,
            events_tx,
        }
    }

    pub fn list_state(&self, page: Page) -> Option<&ListState> {
        match page {
            Page::Tasks => Some(&self.tasks_list),
            Page::Current => Some(&self.current_list),
            Page::Due => Some(&self.due_list),
            Page::Completed => Some(&self.completed_list),
            _ => None,
        }
    }

    pub fn list_state_mut(&mut self, page: Page) -> Option<&mut ListState> {
        match page {
            Page::Tasks => Some(&mut self.tasks_list),
            Page::Current => Some(&mut self.current_list),
            Page::Due => Some(&mut self.due_list),
            Page::Completed => Some(&mut self.completed_list),
            _ => None,
        }
    }

    /// Build the visible rows for a list page: status subset, then the
    /// page's search term, snapshotted into owned row data.
    pub fn page_rows(&self, page: Page) -> Vec<RowData> {
        let tasks = &self.store.tasks;
        let today = self.today;
        let subset: Vec<&Task> = match page {
            Page::Tasks => views::filter_tasks(tasks, self.status_filter, &self.tasks_list.search),
            Page::Current => views::current_tasks(tasks)
                .into_iter()
                .filter(|t| views::matches_search(&t.title, &self.current_list.search))
                .collect(),
            Page::Due => views::due_tasks(tasks, today)
                .into_iter()
                .filter(|t| views::matches_search(&t.title, &self.due_list.search))
                .collect(),
            Page::Completed => views::completed_tasks(tasks)
                .into_iter()
                .filter(|t| views::matches_search(&t.title, &self.completed_list.search))
                .collect(),
            _ => Vec::new(),
        };
        subset
            .into_iter()
            .map(|t| RowData::from_task(t, today))
            .collect()
    }

    /// Id of the task under the cursor on the active page.
    pub fn selected_id(&self) -> Option<i64> {
        let state = self.list_state(self.page)?;
        self.page_rows(self.page).get(state.cursor).map(|r| r.id)
    }

    // -----------------------------------------------------------------
    // Request dispatch — one spawned task per service call; results come
    // back through the channel and are applied in `apply_event`.
    // -----------------------------------------------------------------

    pub fn dispatch_refresh(&mut self) {
        self.store.begin_refresh();
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_tasks().await;
            let _ = tx.send(ApiEvent::Fetched(result));
        });
    }

    pub fn dispatch_create(&mut self, title: String, due_date: Option<NaiveDate>) {
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.create_task(&TaskDraft::new(title, due_date)).await;
            let _ = tx.send(ApiEvent::Created(result));
        });
    }

    pub fn dispatch_update(&mut self, id: i64, patch: TaskPatch) {
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.update_task(id, &patch).await;
            let _ = tx.send(ApiEvent::Updated { id, patch, result });
        });
    }

    /// Toggle the completion flag of a cached task.
    pub fn dispatch_toggle(&mut self, id: i64) {
        if let Some(task) = self.store.task(id) {
            let patch = TaskPatch::completion(!task.completed);
            self.dispatch_update(id, patch);
        }
    }

    pub fn dispatch_delete(&mut self, id: i64) {
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.delete_task(id).await;
            let _ = tx.send(ApiEvent::Deleted { id, result });
        });
    }

    /// Clear-completed batch: one delete per id; every request is issued
    /// and awaited, and a single result is reported for the whole batch.
    pub fn dispatch_clear(&mut self, ids: Vec<i64>) {
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let mut result: Result<(), ApiError> = Ok(());
            for &id in &ids {
                if let Err(e) = client.delete_task(id).await {
                    // Remaining deletes still run; the batch reports the
                    // first failure.
                    if result.is_ok() {
                        result = Err(e);
                    }
                }
            }
            let _ = tx.send(ApiEvent::Cleared { ids, result });
        });
    }

    // -----------------------------------------------------------------
    // Response application — the only mutation path into the store.
    // -----------------------------------------------------------------

    pub fn apply_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::Fetched(Ok(tasks)) => self.store.apply_fetched(tasks),
            ApiEvent::Fetched(Err(_)) => self.store.fail(StoreAction::Fetch),

            ApiEvent::Created(Ok(task)) => {
                self.store.apply_created(task);
                self.form.clear();
                if self.mode == Mode::Insert {
                    self.mode = Mode::Navigate;
                }
            }
            ApiEvent::Created(Err(_)) => self.store.fail(StoreAction::Add),

            ApiEvent::Updated {
                id,
                patch,
                result: Ok(()),
            } => {
                self.store.apply_updated(id, &patch);
                // A confirmed commit closes the matching editor
                if self.edit.as_ref().is_some_and(|e| e.pending && e.id == id) {
                    self.edit = None;
                    if self.mode == Mode::Edit {
                        self.mode = Mode::Navigate;
                    }
                }
            }
            ApiEvent::Updated {
                id,
                result: Err(_),
                ..
            } => {
                self.store.fail(StoreAction::Update);
                // The editor stays open with its staged values
                if let Some(edit) = self.edit.as_mut().filter(|e| e.id == id) {
                    edit.pending = false;
                }
            }

            ApiEvent::Deleted { id, result: Ok(()) } => self.store.apply_deleted(id),
            ApiEvent::Deleted { result: Err(_), .. } => self.store.fail(StoreAction::Delete),

            ApiEvent::Cleared { ids, result: Ok(()) } => self.store.apply_cleared(&ids),
            ApiEvent::Cleared { result: Err(_), .. } => {
                self.store.fail(StoreAction::ClearCompleted)
            }
        }
    }
}

/// Run the TUI application
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let theme = Theme::from_config(&config.ui);
    let client = ApiClient::new(config.api_url.clone());
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut app = App::new(client, theme, tx);
    app.dispatch_refresh();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, &mut rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    rx: &mut UnboundedReceiver<ApiEvent>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Confirmed responses first, so the draw below reflects them
        while let Ok(api_event) = rx.try_recv() {
            app.apply_event(api_event);
        }

        app.today = Local::now().date_naive();
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
