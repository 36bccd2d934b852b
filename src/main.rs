use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::{Result, eyre};
use std::path::PathBuf;
use taskly::{BlobStorage, Error, FileStorage, SortMode, StatusFilter, TaskStore, project};

#[derive(Parser)]
#[command(name = "taskly")]
#[command(about = "Taskly - task list with search, filters, and drag-style reordering")]
#[command(version)]
struct Cli {
    /// Path to the store directory (default: the user data dir)
    #[arg(short, long)]
    store_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task
    Add { text: String },

    /// List tasks
    List {
        /// Case-insensitive substring to search for
        #[arg(short, long, default_value = "")]
        search: String,

        /// Status filter: all, active, or completed
        #[arg(short, long, default_value = "all")]
        filter: StatusFilter,

        /// Sort mode: newest, oldest, or alpha
        #[arg(long, default_value = "newest")]
        sort: SortMode,
    },

    /// Toggle a task's completed flag
    Toggle { id: String },

    /// Replace a task's text
    Edit { id: String, text: String },

    /// Delete a task
    Rm { id: String },

    /// Move a task immediately before another task
    Move { from_id: String, to_id: String },

    /// Remove every completed task
    ClearCompleted,

    /// Add three sample tasks
    Sample,

    /// Print all tasks as pretty JSON
    Export,

    /// Show total/active/completed counts
    Stats,

    /// Toggle the dark/light theme preference
    Theme,

    /// Clear all local data (tasks and theme)
    Reset,
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let store_dir = match cli.store_path {
        Some(path) => path,
        None => dirs::data_dir()
            .ok_or_else(|| eyre!("could not determine the user data directory"))?
            .join("taskly"),
    };

    let storage = FileStorage::open(&store_dir)?;
    let mut store = TaskStore::open(storage);

    match cli.command {
        Commands::Add { text } => match store.create(text.trim()) {
            Ok(id) => println!("added {}", id.dimmed()),
            Err(err @ Error::Storage(_)) => warn_unsaved(&err),
            Err(err) => return Err(err.into()),
        },
        Commands::List { search, filter, sort } => {
            let visible = project(store.tasks(), &search, filter, sort);
            if visible.is_empty() {
                println!("No tasks - add your first task.");
            }
            for task in &visible {
                let mark = if task.completed { "[x]".green() } else { "[ ]".normal() };
                let text = if task.completed {
                    task.text.strikethrough().dimmed()
                } else {
                    task.text.normal()
                };
                println!(
                    "{} {}  {}  {}",
                    mark,
                    task.id.dimmed(),
                    text,
                    format_time(task.created).dimmed()
                );
            }
            let stats = store.stats();
            println!("{} visible, {} total", visible.len(), stats.total);
        }
        Commands::Toggle { id } => quiet_mutation(store.toggle_complete(&id))?,
        Commands::Edit { id, text } => quiet_mutation(store.edit_text(&id, text.trim()))?,
        Commands::Rm { id } => quiet_mutation(store.remove(&id))?,
        Commands::Move { from_id, to_id } => quiet_mutation(store.reorder(&from_id, &to_id))?,
        Commands::ClearCompleted => match store.clear_completed() {
            Ok(removed) => println!("cleared {removed} completed tasks"),
            Err(err @ Error::Storage(_)) => warn_unsaved(&err),
            Err(err) => return Err(err.into()),
        },
        Commands::Sample => {
            for text in ["Read a chapter of a book", "Finish project report", "Buy groceries"] {
                match store.create(text) {
                    Ok(_) => {}
                    Err(err @ Error::Storage(_)) => warn_unsaved(&err),
                    Err(err) => return Err(err.into()),
                }
            }
            println!("added 3 sample tasks");
        }
        Commands::Export => println!("{}", store.export_json()?),
        Commands::Stats => {
            let stats = store.stats();
            println!(
                "{} total, {} active, {} completed",
                stats.total.to_string().bold(),
                stats.active.to_string().cyan(),
                stats.completed.to_string().green()
            );
        }
        Commands::Theme => {
            let next = taskly::toggle_theme(store.storage_mut())?;
            println!("theme: {next}");
        }
        Commands::Reset => {
            store.clear_all()?;
            store.storage_mut().remove(taskly::THEME_KEY)?;
            println!("cleared all local data");
        }
    }

    Ok(())
}

/// Mutations on an unknown id are silent no-ops; a failed persist keeps the
/// change in memory and warns instead of failing.
fn quiet_mutation(result: taskly::Result<bool>) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(err @ Error::Storage(_)) => {
            warn_unsaved(&err);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn warn_unsaved(err: &Error) {
    eprintln!(
        "{} change kept in memory but not saved: {err}",
        "warning:".yellow().bold()
    );
}

fn format_time(ms: i64) -> String {
    match chrono::DateTime::from_timestamp_millis(ms) {
        Some(utc) => utc.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}
