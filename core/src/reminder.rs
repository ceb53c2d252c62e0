use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::ReminderError;

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderUnit {
    Minutes,
    Hours,
    Days,
}

impl ReminderUnit {
    pub fn minutes(self) -> i64 {
        match self {
            ReminderUnit::Minutes => 1,
            ReminderUnit::Hours => MINUTES_PER_HOUR,
            ReminderUnit::Days => MINUTES_PER_DAY,
        }
    }
}

impl FromStr for ReminderUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minutes" => Ok(ReminderUnit::Minutes),
            "hours" => Ok(ReminderUnit::Hours),
            "days" => Ok(ReminderUnit::Days),
            other => Err(format!("unknown reminder unit: {}", other)),
        }
    }
}

/// Converts a (unit, value) pair entered by the user into minutes.
///
/// An unknown unit passes `value` through as minutes.
pub fn parse_reminder_time(time_unit: Option<&str>, time_value: Option<i64>) -> Option<i64> {
    let unit = time_unit.filter(|u| !u.is_empty())?;
    let value = time_value.filter(|v| *v != 0)?;

    match unit.parse::<ReminderUnit>() {
        Ok(unit) => Some(value.saturating_mul(unit.minutes())),
        Err(_) => Some(value),
    }
}

/// `due_date` shifted back by `minutes_before`.
pub fn calculate_reminder_time(
    due_date: Option<DateTime<Utc>>,
    minutes_before: Option<i64>,
) -> Option<DateTime<Utc>> {
    let due = due_date?;
    let lead = TimeDelta::try_minutes(minutes_before?)?;
    due.checked_sub_signed(lead)
}

pub fn format_reminder_time(minutes_before: Option<i64>) -> String {
    let minutes = match minutes_before {
        Some(m) if m != 0 => m,
        _ => return "No reminder set".to_string(),
    };

    if minutes < MINUTES_PER_HOUR {
        format!("{} minutes before", minutes)
    } else if minutes < MINUTES_PER_DAY {
        let hours = minutes / MINUTES_PER_HOUR;
        let rest = minutes % MINUTES_PER_HOUR;
        if rest > 0 {
            format!("{}h {}m before", hours, rest)
        } else {
            format!("{} hours before", hours)
        }
    } else {
        let days = minutes / MINUTES_PER_DAY;
        let hours = (minutes % MINUTES_PER_DAY) / MINUTES_PER_HOUR;
        if hours > 0 {
            format!("{}d {}h before", days, hours)
        } else {
            format!("{} days before", days)
        }
    }
}

/// Validates a reminder request against the current time.
pub fn validate_reminder(
    due_date: Option<DateTime<Utc>>,
    minutes_before: Option<i64>,
) -> Vec<ReminderError> {
    validate_reminder_at(due_date, minutes_before, Utc::now())
}

/// Validates a reminder request, reporting every violated rule.
pub fn validate_reminder_at(
    due_date: Option<DateTime<Utc>>,
    minutes_before: Option<i64>,
    now: DateTime<Utc>,
) -> Vec<ReminderError> {
    let mut errors = Vec::new();
    let Some(minutes) = minutes_before else {
        return errors;
    };

    if due_date.is_none() {
        errors.push(ReminderError::MissingDueDate);
    }

    if minutes <= 0 {
        errors.push(ReminderError::NonPositiveLeadTime);
    }

    if due_date.is_some() {
        // An unrepresentable reminder instant lies before any real `now`.
        let in_future = calculate_reminder_time(due_date, Some(minutes)).is_some_and(|at| at > now);
        if !in_future {
            errors.push(ReminderError::InPast);
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_reminder_time() {
        assert_eq!(parse_reminder_time(Some("minutes"), Some(5)), Some(5));
        assert_eq!(parse_reminder_time(Some("hours"), Some(2)), Some(120));
        assert_eq!(parse_reminder_time(Some("days"), Some(1)), Some(1440));
    }

    #[test]
    fn test_parse_reminder_time_fallbacks() {
        assert_eq!(parse_reminder_time(Some("weeks"), Some(3)), Some(3));
        assert_eq!(parse_reminder_time(None, Some(3)), None);
        assert_eq!(parse_reminder_time(Some(""), Some(3)), None);
        assert_eq!(parse_reminder_time(Some("hours"), None), None);
        assert_eq!(parse_reminder_time(Some("hours"), Some(0)), None);
    }

    #[test]
    fn test_calculate_reminder_time() {
        let due = now();
        assert_eq!(calculate_reminder_time(Some(due), Some(30)), Some(due - Duration::minutes(30)));
        assert_eq!(calculate_reminder_time(None, Some(30)), None);
        assert_eq!(calculate_reminder_time(Some(due), None), None);
        assert_eq!(calculate_reminder_time(Some(due), Some(i64::MAX)), None);
    }

    #[test]
    fn test_format_reminder_time() {
        assert_eq!(format_reminder_time(None), "No reminder set");
        assert_eq!(format_reminder_time(Some(0)), "No reminder set");
        assert_eq!(format_reminder_time(Some(45)), "45 minutes before");
        assert_eq!(format_reminder_time(Some(90)), "1h 30m before");
        assert_eq!(format_reminder_time(Some(120)), "2 hours before");
        assert_eq!(format_reminder_time(Some(1440)), "1 days before");
        assert_eq!(format_reminder_time(Some(1500)), "1d 1h before");
        assert_eq!(format_reminder_time(Some(2 * 1440 + 59)), "2 days before");
    }

    #[test]
    fn test_validate_requires_due_date() {
        let errors = validate_reminder_at(None, Some(30), now());
        assert_eq!(errors, vec![ReminderError::MissingDueDate]);
        assert_eq!(errors[0].to_string(), "Due date is required to set a reminder.");
    }

    #[test]
    fn test_validate_negative_lead_time() {
        let due = now() + Duration::days(2);
        let errors = validate_reminder_at(Some(due), Some(-5), now());
        assert_eq!(errors, vec![ReminderError::NonPositiveLeadTime]);
        assert_eq!(errors[0].to_string(), "Reminder time must be greater than 0 minutes.");
    }

    #[test]
    fn test_validate_accumulates_errors() {
        let errors = validate_reminder_at(None, Some(0), now());
        assert_eq!(errors, vec![ReminderError::MissingDueDate, ReminderError::NonPositiveLeadTime]);
    }

    #[test]
    fn test_validate_past_reminder() {
        let due = now() + Duration::minutes(20);
        let errors = validate_reminder_at(Some(due), Some(30), now());
        assert_eq!(errors, vec![ReminderError::InPast]);
        assert_eq!(errors[0].to_string(), "Reminder time cannot be in the past.");

        // Exactly now is not in the future.
        let errors = validate_reminder_at(Some(due), Some(20), now());
        assert_eq!(errors, vec![ReminderError::InPast]);
    }

    #[test]
    fn test_validate_ok() {
        let due = now() + Duration::hours(3);
        assert!(validate_reminder_at(Some(due), Some(60), now()).is_empty());
        assert!(validate_reminder_at(Some(due), None, now()).is_empty());
        assert!(validate_reminder_at(None, None, now()).is_empty());
    }

    #[test]
    fn test_validate_against_wall_clock() {
        let far_future = Utc::now() + Duration::days(365);
        assert!(validate_reminder(Some(far_future), Some(30)).is_empty());
    }
}
