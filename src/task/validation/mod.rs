//! Validation of incoming task payloads.
//!
//! Payloads arrive as loosely typed values (string priority, optional name)
//! and leave as domain values ([`Task`], [`TaskPatch`]) that satisfy the
//! task invariants:
//!
//! 1. the name is non-empty;
//! 2. a priority, when given, is one of `urgent`, `important`, `unimportant`;
//! 3. an expiration date, when given, is not earlier than the validation
//!    instant;
//! 4. `remind == true` requires an expiration date.
//!
//! Rules run in that order and the first failure is reported. Validation is
//! synchronous and never consults storage.

pub mod rules;

use crate::task::domain::{Task, TaskPatch, TaskValidationError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Deserialize;

/// Unvalidated task payload as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TaskPayload {
    name: Option<String>,
    priority: Option<String>,
    expiration_date: Option<DateTime<Utc>>,
    finished: Option<bool>,
    remind: Option<bool>,
}

impl TaskPayload {
    /// Creates a payload carrying only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Sets the raw priority value.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the expiration date.
    #[must_use]
    pub const fn with_expiration_date(mut self, expiration_date: DateTime<Utc>) -> Self {
        self.expiration_date = Some(expiration_date);
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_finished(mut self, finished: bool) -> Self {
        self.finished = Some(finished);
        self
    }

    /// Sets the reminder flag.
    #[must_use]
    pub const fn with_remind(mut self, remind: bool) -> Self {
        self.remind = Some(remind);
        self
    }

    /// Returns the raw name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Unvalidated sparse patch payload as received from a client.
///
/// A `name` member in the request body is ignored: tasks cannot be renamed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TaskPatchPayload {
    priority: Option<String>,
    expiration_date: Option<DateTime<Utc>>,
    finished: Option<bool>,
    remind: Option<bool>,
}

impl TaskPatchPayload {
    /// Creates an empty patch payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the raw priority value.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the expiration date.
    #[must_use]
    pub const fn with_expiration_date(mut self, expiration_date: DateTime<Utc>) -> Self {
        self.expiration_date = Some(expiration_date);
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_finished(mut self, finished: bool) -> Self {
        self.finished = Some(finished);
        self
    }

    /// Sets the reminder flag.
    #[must_use]
    pub const fn with_remind(mut self, remind: bool) -> Self {
        self.remind = Some(remind);
        self
    }
}

/// Validates a full task payload and normalizes it into a [`Task`].
///
/// # Errors
///
/// Returns the first [`TaskValidationError`] encountered, checking the name,
/// then the priority, then the expiration date, then the reminder rule.
pub fn validate(payload: TaskPayload, clock: &impl Clock) -> Result<Task, TaskValidationError> {
    let TaskPayload {
        name,
        priority,
        expiration_date,
        finished,
        remind,
    } = payload;

    let name = rules::validate_name(name)?;
    let priority = rules::validate_priority(priority.as_deref())?;
    let expiration_date = rules::validate_expiration(expiration_date, clock.utc())?;
    rules::validate_reminder(remind, expiration_date)?;

    Ok(Task::new(name, priority, expiration_date, finished, remind))
}

/// Validates a sparse patch payload in isolation.
///
/// Each supplied field is checked as if it were part of a freshly submitted
/// task that only sets the touched fields, so `remind: true` requires an
/// expiration date in the same patch. The stored record is not consulted.
///
/// # Errors
///
/// Returns the first [`TaskValidationError`] encountered.
pub fn validate_patch(
    payload: TaskPatchPayload,
    clock: &impl Clock,
) -> Result<TaskPatch, TaskValidationError> {
    let TaskPatchPayload {
        priority,
        expiration_date,
        finished,
        remind,
    } = payload;

    let priority = rules::validate_priority(priority.as_deref())?;
    let expiration_date = rules::validate_expiration(expiration_date, clock.utc())?;
    rules::validate_reminder(remind, expiration_date)?;

    let mut patch = TaskPatch::new();
    if let Some(value) = priority {
        patch = patch.with_priority(value);
    }
    if let Some(value) = expiration_date {
        patch = patch.with_expiration_date(value);
    }
    if let Some(value) = finished {
        patch = patch.with_finished(value);
    }
    if let Some(value) = remind {
        patch = patch.with_remind(value);
    }
    Ok(patch)
}
