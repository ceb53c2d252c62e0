use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RecurrenceError;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RecurrencePattern {
    None,
    Daily,
    Weekly,
    Monthly,
}

impl Default for RecurrencePattern {
    fn default() -> Self {
        RecurrencePattern::None
    }
}

impl RecurrencePattern {
    pub fn as_str(self) -> &'static str {
        match self {
            RecurrencePattern::None => "none",
            RecurrencePattern::Daily => "daily",
            RecurrencePattern::Weekly => "weekly",
            RecurrencePattern::Monthly => "monthly",
        }
    }

    /// Sentence used when describing a task's schedule.
    pub fn description(self) -> &'static str {
        match self {
            RecurrencePattern::None => "Does not repeat",
            RecurrencePattern::Daily => "Repeats daily",
            RecurrencePattern::Weekly => "Repeats weekly",
            RecurrencePattern::Monthly => "Repeats monthly",
        }
    }
}

impl fmt::Display for RecurrencePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecurrencePattern {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(RecurrencePattern::None),
            "daily" => Ok(RecurrencePattern::Daily),
            "weekly" => Ok(RecurrencePattern::Weekly),
            "monthly" => Ok(RecurrencePattern::Monthly),
            other => Err(RecurrenceError::InvalidPattern(other.to_string())),
        }
    }
}

/// Entry of the recurrence selector.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurrenceOption {
    pub value: RecurrencePattern,
    pub label: &'static str,
}

static RECURRENCE_OPTIONS: [RecurrenceOption; 4] = [
    RecurrenceOption { value: RecurrencePattern::None, label: "Does not repeat" },
    RecurrenceOption { value: RecurrencePattern::Daily, label: "Daily" },
    RecurrenceOption { value: RecurrencePattern::Weekly, label: "Weekly" },
    RecurrenceOption { value: RecurrencePattern::Monthly, label: "Monthly" },
];

pub fn recurrence_options() -> &'static [RecurrenceOption] {
    &RECURRENCE_OPTIONS
}

/// Human readable form of a raw pattern name. Unknown names are echoed back.
pub fn format_recurrence_pattern(pattern: &str) -> String {
    match pattern.parse::<RecurrencePattern>() {
        Ok(p) => p.description().to_string(),
        Err(_) => pattern.to_string(),
    }
}

/// Next occurrence after `last_occurrence`.
///
/// Monthly recurrence keeps the day of month and clamps it to the last day of
/// the target month (Jan 31 -> Feb 29 in a leap year).
pub fn calculate_next_occurrence(
    last_occurrence: Option<DateTime<Utc>>,
    pattern: Option<RecurrencePattern>,
) -> Option<DateTime<Utc>> {
    let last = last_occurrence?;
    match pattern? {
        RecurrencePattern::None => None,
        RecurrencePattern::Daily => last.checked_add_signed(Duration::days(1)),
        RecurrencePattern::Weekly => last.checked_add_signed(Duration::days(7)),
        RecurrencePattern::Monthly => last.checked_add_months(Months::new(1)),
    }
}

pub fn is_recurring_task(pattern: Option<RecurrencePattern>) -> bool {
    matches!(pattern, Some(p) if p != RecurrencePattern::None)
}

/// Checks a raw pattern name coming from user input.
pub fn validate_recurrence(pattern: Option<&str>) -> Vec<RecurrenceError> {
    let mut errors = Vec::new();
    if let Some(raw) = pattern.filter(|p| !p.is_empty()) {
        if let Err(e) = raw.parse::<RecurrencePattern>() {
            errors.push(e);
        }
    }
    errors
}
