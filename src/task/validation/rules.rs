//! Individual validation rules.
//!
//! Each rule is a pure function over one field (or one field pair) and
//! returns the normalized value or a specific [`TaskValidationError`].

use crate::task::domain::{Priority, TaskName, TaskValidationError};
use chrono::{DateTime, SubsecRound, Utc};

/// Fractional-second digits kept for stored timestamps (`TIMESTAMPTZ`
/// resolution).
pub const TIMESTAMP_PRECISION: u16 = 6;

/// Truncates `date` to the resolution timestamps are stored at.
#[must_use]
pub fn storage_precision(date: DateTime<Utc>) -> DateTime<Utc> {
    date.trunc_subsecs(TIMESTAMP_PRECISION)
}

/// Validates that a name is present and non-empty.
///
/// # Errors
///
/// Returns [`TaskValidationError::MissingName`] when absent or blank.
pub fn validate_name(name: Option<String>) -> Result<TaskName, TaskValidationError> {
    name.map_or(Err(TaskValidationError::MissingName), TaskName::new)
}

/// Validates an optional priority against the closed set.
///
/// # Errors
///
/// Returns [`TaskValidationError::InvalidPriority`] for unknown values.
pub fn validate_priority(priority: Option<&str>) -> Result<Option<Priority>, TaskValidationError> {
    priority.map(Priority::parse).transpose()
}

/// Validates that an optional expiration date is not in the past.
///
/// A date equal to `now` is accepted. The returned date is truncated to
/// microseconds so it reads back unchanged from every store.
///
/// # Errors
///
/// Returns [`TaskValidationError::ExpirationInPast`] when `expiration < now`.
pub fn validate_expiration(
    expiration: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<Option<DateTime<Utc>>, TaskValidationError> {
    match expiration {
        Some(date) if date < now => Err(TaskValidationError::ExpirationInPast {
            expiration: date,
            now,
        }),
        other => Ok(other.map(storage_precision)),
    }
}

/// Validates that a reminder is only requested alongside an expiration date.
///
/// # Errors
///
/// Returns [`TaskValidationError::ReminderWithoutExpiration`] when `remind`
/// is `true` and no expiration date is present.
pub fn validate_reminder(
    remind: Option<bool>,
    expiration: Option<DateTime<Utc>>,
) -> Result<(), TaskValidationError> {
    if remind == Some(true) && expiration.is_none() {
        return Err(TaskValidationError::ReminderWithoutExpiration);
    }
    Ok(())
}
