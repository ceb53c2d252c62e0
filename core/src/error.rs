//! Validation errors reported by the reminder and recurrence calculators.
//!
//! These are returned in lists, never raised. `Display` yields the
//! user-facing message.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReminderError {
    #[error("Due date is required to set a reminder.")]
    MissingDueDate,

    #[error("Reminder time must be greater than 0 minutes.")]
    NonPositiveLeadTime,

    #[error("Reminder time cannot be in the past.")]
    InPast,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurrenceError {
    #[error("Invalid recurrence pattern")]
    InvalidPattern(String),
}
