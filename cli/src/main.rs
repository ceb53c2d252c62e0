mod table;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Parser;
use tasklens_core::{
    calculate_next_occurrence, calculate_reminder_time, format_reminder_time, parse_human_date,
    parse_reminder_time, recurrence_options, validate_recurrence, validate_reminder_at,
    FileTaskSource, Priority, RecurrencePattern, SortField, SortOrder, TaskFilter, TaskService,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tasklens")]
#[command(about = "Filter, sort and schedule to-do lists", long_about = None)]
struct Cli {
    /// Task file (JSON array). Defaults to ~/.tasklens/tasks.json
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List tasks matching the given filters
    List {
        /// Case-insensitive text searched in title and description
        #[arg(short, long)]
        search: Option<String>,
        /// low, medium or high
        #[arg(short, long)]
        priority: Option<Priority>,
        /// true or false
        #[arg(short, long)]
        completed: Option<bool>,
        /// Exact tag name
        #[arg(short, long)]
        tag: Option<String>,
        /// created_at or priority
        #[arg(long, default_value = "created_at")]
        sort: String,
        /// asc or desc
        #[arg(long, default_value = "desc")]
        order: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List every tag in use
    Tags,
    /// Show the available recurrence patterns
    #[command(name = "recurrence-options")]
    RecurrenceOptions,
    /// Compute the next occurrence of a recurring date
    Next {
        /// Last occurrence (2024-01-31, 2024-01-31T09:00:00Z, today, +3d ...)
        #[arg(long)]
        from: String,
        /// none, daily, weekly or monthly
        #[arg(long)]
        pattern: String,
    },
    /// Compute and validate a reminder lead time
    Reminder {
        /// Due date of the task
        #[arg(long)]
        due: Option<String>,
        /// minutes, hours or days
        #[arg(long, default_value = "minutes")]
        unit: String,
        /// Amount of `unit` before the due date
        #[arg(long, allow_hyphen_values = true)]
        value: Option<i64>,
    },
    /// Show the next instance of every recurring task
    Upcoming,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tasklens=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::List { search, priority, completed, tag, sort, order, json } => {
            let service = open_service(cli.file)?;
            let filter = TaskFilter {
                search,
                priority,
                completed,
                tag,
                sort: Some(SortField::from(sort.as_str())),
                order: Some(SortOrder::from(order.as_str())),
            };
            debug!(?filter, "listing tasks");

            let views = service.list_task_views(&filter)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&views)?);
            } else if views.is_empty() {
                println!("No tasks found.");
            } else {
                println!("{}", table::task_table(&views));
            }
        },
        Commands::Tags => {
            let service = open_service(cli.file)?;
            let tags = service.unique_tags()?;
            if tags.is_empty() {
                println!("No tags found.");
            }
            for tag in tags {
                println!("{}", tag);
            }
        },
        Commands::RecurrenceOptions => {
            println!("{}", table::recurrence_table(recurrence_options()));
        },
        Commands::Next { from, pattern } => {
            let errors = validate_recurrence(Some(pattern.as_str()));
            if !errors.is_empty() {
                for e in errors {
                    println!("Error: {} ({})", e, pattern);
                }
                return Ok(());
            }

            let last = parse_human_date(&from)?;
            let pattern: Option<RecurrencePattern> = pattern.parse().ok();
            match calculate_next_occurrence(Some(last), pattern) {
                Some(next) => println!("Next occurrence: {}", next.to_rfc3339()),
                None => println!("Does not repeat"),
            }
        },
        Commands::Reminder { due, unit, value } => {
            let due = due.map(|d| parse_human_date(&d)).transpose()?;
            let minutes = parse_reminder_time(Some(unit.as_str()), value);
            info!(?due, ?minutes, "evaluating reminder");

            for line in reminder_report(due, minutes, Utc::now()) {
                println!("{}", line);
            }
        },
        Commands::Upcoming => {
            let service = open_service(cli.file)?;
            let upcoming = service.upcoming_occurrences()?;
            if upcoming.is_empty() {
                println!("No recurring tasks found.");
            } else {
                println!("{}", table::occurrence_table(&upcoming));
            }
        },
    }
    Ok(())
}

/// Lines printed by `reminder`. Without a lead time there is nothing to validate.
fn reminder_report(
    due: Option<DateTime<Utc>>,
    minutes: Option<i64>,
    now: DateTime<Utc>,
) -> Vec<String> {
    let mut lines = vec![format!("Lead time: {}", format_reminder_time(minutes))];
    if minutes.is_none() {
        return lines;
    }

    if let Some(at) = calculate_reminder_time(due, minutes) {
        lines.push(format!("Fires at: {}", at.to_rfc3339()));
    }

    let errors = validate_reminder_at(due, minutes, now);
    if errors.is_empty() {
        lines.push("Reminder is valid.".to_string());
    }
    lines.extend(errors.into_iter().map(|e| format!("Error: {}", e)));
    lines
}

fn open_service(file: Option<PathBuf>) -> Result<TaskService<FileTaskSource>> {
    let source = FileTaskSource::new(file)?;
    debug!(path = %source.path().display(), "reading tasks");
    Ok(TaskService::new(source))
}
