use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::recurrence::{calculate_next_occurrence, RecurrencePattern};
use crate::reminder::calculate_reminder_time;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Ordinal used for "most important first" ordering.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority: {}", other)),
        }
    }
}

/// Rank of an optional priority. Unranked tasks rank below `Low`.
pub fn priority_rank(priority: Option<Priority>) -> u8 {
    priority.map(Priority::rank).unwrap_or(0)
}

// Unknown priority strings are kept as unranked instead of rejecting the record.
fn lenient_priority<'de, D>(deserializer: D) -> Result<Option<Priority>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|v| v.as_str()).and_then(|s| s.parse().ok()))
}

/// Stable task identifier. Backends hand out either integers or strings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum TaskId {
    Int(i64),
    Text(String),
}

impl TaskId {
    pub fn generate() -> Self {
        TaskId::Text(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Int(id) => write!(f, "{}", id),
            TaskId::Text(id) => f.write_str(id),
        }
    }
}

/// RFC 3339, or a naive ISO timestamp taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f").ok())
        .map(|naive| naive.and_utc())
}

fn utc_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
}

fn optional_utc_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw))),
        None => Ok(None),
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum VisualStatus {
    Completed,
    NoDueDate,
    Overdue,
    DueToday,
    Upcoming,
}

impl VisualStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VisualStatus::Completed => "completed",
            VisualStatus::NoDueDate => "no-due-date",
            VisualStatus::Overdue => "overdue",
            VisualStatus::DueToday => "due-today",
            VisualStatus::Upcoming => "upcoming",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_priority")]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, deserialize_with = "optional_utc_timestamp")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub recurrence_pattern: RecurrencePattern,

    /// Lead time in minutes before `due_date`.
    #[serde(default)]
    pub reminder_time: Option<i64>,

    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "utc_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_occurrence_id: Option<TaskId>,
}

impl Task {
    pub fn new(title: String, due_date: Option<DateTime<Utc>>) -> Self {
        Self {
            id: TaskId::generate(),
            title,
            description: None,
            priority: Some(Priority::Medium),
            completed: false,
            due_date,
            recurrence_pattern: RecurrencePattern::None,
            reminder_time: None,
            tags: Vec::new(),
            created_at: Utc::now(),
            last_occurrence_id: None,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence_pattern != RecurrencePattern::None
    }

    /// Absolute instant the reminder should fire, if one is configured.
    pub fn reminder_at(&self) -> Option<DateTime<Utc>> {
        calculate_reminder_time(self.due_date, self.reminder_time)
    }

    /// Builds the next instance of a recurring task.
    ///
    /// Returns `None` for non-recurring tasks and for tasks without a due date.
    /// The new instance starts incomplete and links back through
    /// `last_occurrence_id`.
    pub fn next_occurrence(&self) -> Option<Task> {
        let due_date = calculate_next_occurrence(self.due_date, Some(self.recurrence_pattern))?;
        Some(Task {
            id: TaskId::generate(),
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            completed: false,
            due_date: Some(due_date),
            recurrence_pattern: self.recurrence_pattern,
            reminder_time: self.reminder_time,
            tags: self.tags.clone(),
            created_at: Utc::now(),
            last_occurrence_id: Some(self.id.clone()),
        })
    }

    /// Status relative to the calendar day of `now`, in `now`'s time zone.
    pub fn visual_status_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> VisualStatus {
        if self.completed {
            return VisualStatus::Completed;
        }
        let Some(due) = self.due_date else {
            return VisualStatus::NoDueDate;
        };

        let due_day = due.with_timezone(&now.timezone()).date_naive();
        let today = now.date_naive();
        if due_day < today {
            VisualStatus::Overdue
        } else if due_day == today {
            VisualStatus::DueToday
        } else {
            VisualStatus::Upcoming
        }
    }
}
