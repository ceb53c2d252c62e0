pub mod error;
pub mod model;
pub mod recurrence;
pub mod reminder;
pub mod repository;
pub mod service;
pub mod time;

pub use error::{RecurrenceError, ReminderError};
pub use model::filter::{SortField, SortOrder, TaskFilter};
pub use model::task::{Task, TaskId, Priority, VisualStatus};
pub use recurrence::{
    calculate_next_occurrence, format_recurrence_pattern, is_recurring_task, recurrence_options,
    validate_recurrence, RecurrenceOption, RecurrencePattern,
};
pub use reminder::{
    calculate_reminder_time, format_reminder_time, parse_reminder_time, validate_reminder,
    validate_reminder_at,
};
pub use repository::{TaskSource, FileTaskSource};
pub use time::parse_human_date;
pub use service::task_service::{
    TaskService, apply_filters, extract_unique_tags, filter_by_completion, filter_by_priority,
    filter_by_tag, search_tasks, sort_tasks,
};
pub use service::dto::TaskDto;
