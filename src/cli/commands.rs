use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "td",
    about = concat!("[\u{25AA}] taskdeck v", env!("CARGO_PKG_VERSION"), " - your tasks, one dashboard"),
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Base URL of the task service (overrides env and config file)
    #[arg(long = "api-url", global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks
    List(ListArgs),
    /// Add a task
    Add(AddArgs),
    /// Mark a task completed
    Done(IdArg),
    /// Reopen a completed task
    Reopen(IdArg),
    /// Delete a task
    Rm(IdArg),
    /// Show task statistics
    Stats,
    /// Probe the backend health endpoint
    Health,
}

#[derive(Args)]
pub struct ListArgs {
    /// Filter by status (all, active, completed)
    #[arg(long, default_value = "all")]
    pub status: String,
    /// Case-insensitive title filter
    #[arg(long)]
    pub search: Option<String>,
    /// Only tasks due today or earlier, sorted by due date
    #[arg(long)]
    pub due: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,
}

#[derive(Args)]
pub struct IdArg {
    /// Task id
    pub id: i64,
}
