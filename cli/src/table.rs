use chrono::{DateTime, Local, Utc};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tasklens_core::{RecurrenceOption, Task, TaskDto};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Repeats")]
    recurrence: String,
    #[tabled(rename = "Reminder")]
    reminder: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

#[derive(Tabled)]
struct OptionRow {
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Label")]
    label: String,
}

#[derive(Tabled)]
struct OccurrenceRow {
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Next due")]
    due: String,
}

pub fn task_table(views: &[TaskDto]) -> String {
    let rows: Vec<TaskRow> = views
        .iter()
        .map(|v| TaskRow {
            id: short_id(&v.id.to_string()),
            title: v.title.clone(),
            priority: v.priority.clone(),
            status: v.status.as_str().to_string(),
            due: format_date(v.due_date),
            recurrence: v.recurrence.clone(),
            reminder: v.reminder.clone(),
            tags: v.tags.join(", "),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    table.to_string()
}

pub fn recurrence_table(options: &[RecurrenceOption]) -> String {
    let rows: Vec<OptionRow> = options
        .iter()
        .map(|o| OptionRow {
            value: o.value.to_string(),
            label: o.label.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    table.to_string()
}

pub fn occurrence_table(tasks: &[Task]) -> String {
    let rows: Vec<OccurrenceRow> = tasks
        .iter()
        .map(|t| OccurrenceRow {
            from: t
                .last_occurrence_id
                .as_ref()
                .map(|id| short_id(&id.to_string()))
                .unwrap_or_else(|| "-".to_string()),
            title: t.title.clone(),
            due: format_date(t.due_date),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    table.to_string()
}

fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}
