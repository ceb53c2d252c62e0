use serde::{Serialize, Deserialize};
use chrono::{DateTime, TimeZone, Utc};
use crate::model::task::{Task, TaskId, VisualStatus};
use crate::recurrence::format_recurrence_pattern;
use crate::reminder::format_reminder_time;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TaskDto {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub priority: String, // "low", "medium", "high" or "-" when unranked
    pub completed: bool,
    pub due_date: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,

    // Derived display fields
    pub status: VisualStatus,
    pub recurrence: String,
    pub is_recurring: bool,
    pub reminder: String,
    pub reminder_at: Option<DateTime<Utc>>,
}

impl TaskDto {
    pub fn from_entity<Tz: TimeZone>(task: Task, now: &DateTime<Tz>) -> Self {
        let status = task.visual_status_at(now);
        let reminder_at = task.reminder_at();
        let is_recurring = task.is_recurring();

        Self {
            id: task.id,
            priority: task.priority.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()),
            completed: task.completed,
            due_date: task.due_date,
            created_at: task.created_at,
            status,
            recurrence: format_recurrence_pattern(task.recurrence_pattern.as_str()),
            is_recurring,
            reminder: format_reminder_time(task.reminder_time),
            reminder_at,
            title: task.title,
            description: task.description,
            tags: task.tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurrence::RecurrencePattern;
    use chrono::TimeZone;

    #[test]
    fn test_from_entity() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();
        let due = Utc.with_ymd_and_hms(2024, 3, 10, 18, 0, 0).unwrap();

        let mut task = Task::new("Review PR".to_string(), Some(due));
        task.priority = None;
        task.recurrence_pattern = RecurrencePattern::Weekly;
        task.reminder_time = Some(90);

        let dto = TaskDto::from_entity(task.clone(), &now);
        assert_eq!(dto.id, task.id);
        assert_eq!(dto.priority, "-");
        assert_eq!(dto.status, VisualStatus::DueToday);
        assert_eq!(dto.recurrence, "Repeats weekly");
        assert!(dto.is_recurring);
        assert_eq!(dto.reminder, "1h 30m before");
        assert_eq!(dto.reminder_at, Some(Utc.with_ymd_and_hms(2024, 3, 10, 16, 30, 0).unwrap()));
    }
}
