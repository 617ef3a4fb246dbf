use chrono::{Local, NaiveDate};

use crate::api::{ApiClient, ApiError};
use crate::config::{Config, ConfigError};
use crate::model::{Task, TaskDraft, TaskPatch};
use crate::views::{self, StatusFilter};

use super::commands::{AddArgs, Cli, Commands, IdArg, ListArgs};

/// Error type for CLI handlers
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("{0}")]
    InvalidArg(String),
}

/// Dispatch a parsed subcommand against the remote service.
pub async fn dispatch(cli: Cli) -> Result<(), CliError> {
    let config = Config::load(cli.api_url.as_deref())?;
    let client = ApiClient::new(config.api_url);
    let json = cli.json;

    match cli.command.expect("dispatch requires a subcommand") {
        Commands::List(args) => cmd_list(&client, &args, json).await,
        Commands::Add(args) => cmd_add(&client, &args, json).await,
        Commands::Done(arg) => cmd_set_completed(&client, arg.id, true, json).await,
        Commands::Reopen(arg) => cmd_set_completed(&client, arg.id, false, json).await,
        Commands::Rm(arg) => cmd_rm(&client, arg.id, json).await,
        Commands::Stats => cmd_stats(&client, json).await,
        Commands::Health => cmd_health(&client, json).await,
    }
}

fn parse_status(s: &str) -> Result<StatusFilter, CliError> {
    match s {
        "all" => Ok(StatusFilter::All),
        "active" => Ok(StatusFilter::Active),
        "completed" => Ok(StatusFilter::Completed),
        other => Err(CliError::InvalidArg(format!(
            "unknown status \"{other}\" (expected all, active, or completed)"
        ))),
    }
}

fn parse_due(s: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| CliError::InvalidArg(format!("invalid due date \"{s}\" (expected YYYY-MM-DD)")))
}

fn print_task_line(task: &Task, today: NaiveDate) {
    let mark = if task.completed { "[x]" } else { "[ ]" };
    let due = match task.due_date {
        Some(d) if task.is_overdue(today) => format!("  due {d} (overdue)"),
        Some(d) => format!("  due {d}"),
        None => String::new(),
    };
    println!("{} #{} {}{}", mark, task.id, task.title, due);
}

async fn cmd_list(client: &ApiClient, args: &ListArgs, json: bool) -> Result<(), CliError> {
    let status = parse_status(&args.status)?;
    let tasks = client.fetch_tasks().await?;
    let today = Local::now().date_naive();
    let term = args.search.as_deref().unwrap_or("");

    let selected: Vec<&Task> = if args.due {
        views::due_tasks(&tasks, today)
            .into_iter()
            .filter(|t| views::matches_search(&t.title, term))
            .collect()
    } else {
        views::filter_tasks(&tasks, status, term)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&selected).expect("tasks serialize"));
    } else {
        for task in &selected {
            print_task_line(task, today);
        }
        println!("{} task(s)", selected.len());
    }
    Ok(())
}

async fn cmd_add(client: &ApiClient, args: &AddArgs, json: bool) -> Result<(), CliError> {
    let title = args.title.trim();
    if title.is_empty() {
        return Err(CliError::InvalidArg("title must not be empty".into()));
    }
    let due = args.due.as_deref().map(parse_due).transpose()?;
    let task = client.create_task(&TaskDraft::new(title, due)).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&task).expect("task serializes"));
    } else {
        println!("added #{} {}", task.id, task.title);
    }
    Ok(())
}

async fn cmd_set_completed(
    client: &ApiClient,
    id: i64,
    completed: bool,
    json: bool,
) -> Result<(), CliError> {
    client
        .update_task(id, &TaskPatch::completion(completed))
        .await?;
    if json {
        println!(
            "{}",
            serde_json::json!({ "id": id, "completed": completed })
        );
    } else if completed {
        println!("completed #{id}");
    } else {
        println!("reopened #{id}");
    }
    Ok(())
}

async fn cmd_rm(client: &ApiClient, id: i64, json: bool) -> Result<(), CliError> {
    client.delete_task(id).await?;
    if json {
        println!("{}", serde_json::json!({ "id": id, "deleted": true }));
    } else {
        println!("deleted #{id}");
    }
    Ok(())
}

async fn cmd_stats(client: &ApiClient, json: bool) -> Result<(), CliError> {
    let tasks = client.fetch_tasks().await?;
    let stats = views::dashboard_stats(&tasks);
    if json {
        println!(
            "{}",
            serde_json::json!({
                "total": stats.total,
                "completed": stats.completed,
                "pending": stats.pending,
                "completion_rate": stats.completion_rate,
            })
        );
    } else {
        println!("total:      {}", stats.total);
        println!("completed:  {}", stats.completed);
        println!("pending:    {}", stats.pending);
        println!("completion: {}%", stats.completion_rate);
    }
    Ok(())
}

async fn cmd_health(client: &ApiClient, json: bool) -> Result<(), CliError> {
    let health = client.health().await?;
    if json {
        println!(
            "{}",
            serde_json::json!({
                "status": health.status,
                "service": health.service,
                "timestamp": health.timestamp,
            })
        );
    } else {
        println!("{} ({})", health.status, health.service);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings_parse() {
        assert_eq!(parse_status("all").unwrap(), StatusFilter::All);
        assert_eq!(parse_status("active").unwrap(), StatusFilter::Active);
        assert_eq!(parse_status("completed").unwrap(), StatusFilter::Completed);
        assert!(parse_status("done").is_err());
    }

    #[test]
    fn due_dates_validate() {
        assert!(parse_due("2025-08-10").is_ok());
        assert!(parse_due("tomorrow").is_err());
    }
}
