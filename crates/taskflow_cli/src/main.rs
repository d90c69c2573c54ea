//! TaskFlow command-line front end.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Drive `TaskStore` operations and print projections and notifications.
//! - Provide the confirmation capability for destructive clears.

mod render;

use chrono::Local;
use clap::{Parser, Subcommand};
use log::info;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use taskflow_core::db::open_db;
use taskflow_core::{
    default_log_level, init_logging, project, ClearOutcome, KeyValueStore, Priority,
    SqliteKeyValueStore, TaskFilter, TaskId, TaskStore, ViewState,
};

/// Local task list manager.
#[derive(Debug, Parser)]
#[command(name = "taskflow", version)]
struct Cli {
    /// SQLite file holding the task collection.
    #[arg(long, env = "TASKFLOW_DB", default_value = "taskflow.sqlite3", global = true)]
    db: PathBuf,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "TASKFLOW_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "TASKFLOW_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Answer yes to confirmation prompts.
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a task.
    Add {
        text: String,
        #[arg(long, short, default_value = "low")]
        priority: Priority,
        #[arg(long, short, default_value = "personal")]
        category: String,
    },
    /// Show the filtered, sorted task list.
    List {
        #[arg(long, short, default_value = "all")]
        filter: TaskFilter,
        #[arg(long, short, default_value = "")]
        search: String,
    },
    /// Flip a task between pending and completed.
    Toggle { id: String },
    /// Replace a task's text.
    Edit { id: String, text: String },
    /// Delete a task.
    Delete { id: String },
    /// Delete every completed task.
    ClearCompleted,
    /// Delete every task.
    ClearAll,
    /// Print counters only.
    Stats,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("taskflow: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, &log_dir.to_string_lossy())?;
    }

    let conn = open_db(&cli.db)?;
    let storage = SqliteKeyValueStore::try_new(&conn)?;
    let mut store = TaskStore::load(storage)?;
    info!(
        "event=cli_command module=cli status=start command={}",
        command_name(&cli.command)
    );

    execute(&mut store, cli.command, cli.yes)
}

fn execute<S: KeyValueStore>(
    store: &mut TaskStore<S>,
    command: Command,
    assume_yes: bool,
) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Add {
            text,
            priority,
            category,
        } => match store.add(&text, priority, &category)? {
            Some(task) => notify(&format!("Task added ({})", task.id)),
            None => return Err("task text cannot be empty".into()),
        },
        Command::List { filter, search } => {
            let projection = project(store.tasks(), &ViewState::new(filter, search));
            print!(
                "{}",
                render::render_list(&projection, Local::now().date_naive(), &Local)
            );
        }
        Command::Toggle { id } => {
            if let Some(task) = store.toggle(&TaskId::from(id))? {
                if task.completed {
                    notify("Task completed");
                }
            }
        }
        Command::Edit { id, text } => {
            if store.edit(&TaskId::from(id), &text)?.is_some() {
                notify("Task updated");
            }
        }
        Command::Delete { id } => {
            if store.delete(&TaskId::from(id))?.is_some() {
                notify("Task deleted");
            }
        }
        Command::ClearCompleted => {
            let outcome = store.clear_completed_confirmed(|count| {
                confirm(&render::clear_completed_prompt(count), assume_yes)
            })?;
            match outcome {
                ClearOutcome::NothingToClear => notify("No completed tasks"),
                ClearOutcome::Declined => {}
                ClearOutcome::Cleared(count) => notify(&render::cleared_notice(count)),
            }
        }
        Command::ClearAll => {
            let outcome = store
                .clear_all_confirmed(|_| confirm(render::clear_all_prompt(), assume_yes))?;
            match outcome {
                ClearOutcome::NothingToClear => notify("No tasks to clear"),
                ClearOutcome::Declined => {}
                ClearOutcome::Cleared(_) => notify("All tasks cleared"),
            }
        }
        Command::Stats => {
            let projection = project(store.tasks(), &ViewState::default());
            print!("{}", render::render_stats(&projection.counters));
        }
    }
    Ok(())
}

fn notify(message: &str) {
    println!("{message}");
}

fn confirm(prompt: &str, assume_yes: bool) -> bool {
    if assume_yes {
        return true;
    }

    eprint!("{prompt} [y/N] ");
    let _ = io::stderr().flush();
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Add { .. } => "add",
        Command::List { .. } => "list",
        Command::Toggle { .. } => "toggle",
        Command::Edit { .. } => "edit",
        Command::Delete { .. } => "delete",
        Command::ClearCompleted => "clear-completed",
        Command::ClearAll => "clear-all",
        Command::Stats => "stats",
    }
}

#[cfg(test)]
mod tests {
    use super::{execute, Cli, Command};
    use clap::Parser;
    use taskflow_core::{MemoryKeyValueStore, Priority, TaskFilter, TaskStore};

    #[test]
    fn parses_add_with_defaults() {
        let cli = Cli::try_parse_from(["taskflow", "add", "Buy milk"]).unwrap();
        match cli.command {
            Command::Add {
                text,
                priority,
                category,
            } => {
                assert_eq!(text, "Buy milk");
                assert_eq!(priority, Priority::Low);
                assert_eq!(category, "personal");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_filter() {
        assert!(Cli::try_parse_from(["taskflow", "list", "--filter", "someday"]).is_err());
        let cli = Cli::try_parse_from(["taskflow", "list", "-f", "active"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::List {
                filter: TaskFilter::Active,
                ..
            }
        ));
    }

    #[test]
    fn blank_add_is_reported_as_error() {
        let storage = MemoryKeyValueStore::new();
        let mut store = TaskStore::load(&storage).unwrap();
        let command = Command::Add {
            text: "   ".to_string(),
            priority: Priority::Low,
            category: "work".to_string(),
        };
        assert!(execute(&mut store, command, true).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn clear_all_with_assume_yes_empties_store() {
        let storage = MemoryKeyValueStore::new();
        let mut store = TaskStore::load(&storage).unwrap();
        store.add("a", Priority::High, "work").unwrap();
        store.add("b", Priority::Low, "work").unwrap();

        execute(&mut store, Command::ClearAll, true).unwrap();
        assert!(store.is_empty());
    }
}
