//! Error types for task validation and parsing.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while validating an incoming task or patch payload.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskValidationError {
    /// The task name is absent or empty after trimming.
    #[error("task name must not be empty")]
    MissingName,

    /// The priority is not one of the supported values.
    #[error("invalid priority '{0}', expected one of: urgent, important, unimportant")]
    InvalidPriority(String),

    /// The expiration date lies before the validation instant.
    #[error("expiration date {expiration} is earlier than the current time {now}")]
    ExpirationInPast {
        /// The rejected expiration date.
        expiration: DateTime<Utc>,
        /// The instant validation was performed at.
        now: DateTime<Utc>,
    },

    /// A reminder was requested without an expiration date to remind about.
    #[error("remind is set but no expiration date was given")]
    ReminderWithoutExpiration,
}

impl TaskValidationError {
    /// Returns a stable, machine-checkable error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingName => "missing_name",
            Self::InvalidPriority(_) => "invalid_priority",
            Self::ExpirationInPast { .. } => "expiration_in_past",
            Self::ReminderWithoutExpiration => "reminder_without_expiration",
        }
    }
}
