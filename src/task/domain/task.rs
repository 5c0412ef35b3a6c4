//! Task aggregate root and the sparse patch applied to it.

use super::{Priority, TaskId, TaskName};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Task aggregate root.
///
/// Instances are produced by the validator (new tasks) or rebuilt from
/// storage via [`Task::from_persisted`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    name: TaskName,
    priority: Option<Priority>,
    expiration_date: Option<DateTime<Utc>>,
    finished: Option<bool>,
    remind: Option<bool>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted task name.
    pub name: TaskName,
    /// Persisted priority, if any.
    pub priority: Option<Priority>,
    /// Persisted expiration date, if any.
    pub expiration_date: Option<DateTime<Utc>>,
    /// Persisted completion flag, if any.
    pub finished: Option<bool>,
    /// Persisted reminder flag, if any.
    pub remind: Option<bool>,
}

impl Task {
    /// Creates a task from already validated parts, deriving its identifier.
    pub(crate) fn new(
        name: TaskName,
        priority: Option<Priority>,
        expiration_date: Option<DateTime<Utc>>,
        finished: Option<bool>,
        remind: Option<bool>,
    ) -> Self {
        Self {
            id: TaskId::derive(&name),
            name,
            priority,
            expiration_date,
            finished,
            remind,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            priority: data.priority,
            expiration_date: data.expiration_date,
            finished: data.finished,
            remind: data.remind,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.name
    }

    /// Returns the priority, if set.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Returns the expiration date, if set.
    #[must_use]
    pub const fn expiration_date(&self) -> Option<DateTime<Utc>> {
        self.expiration_date
    }

    /// Returns the stored completion flag, if set.
    #[must_use]
    pub const fn finished(&self) -> Option<bool> {
        self.finished
    }

    /// Returns `true` only when the task is explicitly marked finished.
    ///
    /// An absent flag counts as not finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished.unwrap_or(false)
    }

    /// Returns the reminder flag, if set.
    #[must_use]
    pub const fn remind(&self) -> Option<bool> {
        self.remind
    }

    /// Overwrites the fields supplied by `patch`, leaving the others intact.
    ///
    /// Returns `true` when at least one field was supplied.
    pub fn apply(&mut self, patch: &TaskPatch) -> bool {
        overwrite(&mut self.priority, patch.priority);
        overwrite(&mut self.expiration_date, patch.expiration_date);
        overwrite(&mut self.finished, patch.finished);
        overwrite(&mut self.remind, patch.remind);
        !patch.is_empty()
    }
}

fn overwrite<T>(field: &mut Option<T>, value: Option<T>) {
    if let Some(new_value) = value {
        *field = Some(new_value);
    }
}

/// Sparse patch for an existing task.
///
/// Only supplied fields overwrite stored values. The name, and therefore
/// the identifier, cannot be patched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskPatch {
    priority: Option<Priority>,
    expiration_date: Option<DateTime<Utc>>,
    finished: Option<bool>,
    remind: Option<bool>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
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

    /// Returns the supplied priority, if any.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Returns the supplied expiration date, if any.
    #[must_use]
    pub const fn expiration_date(&self) -> Option<DateTime<Utc>> {
        self.expiration_date
    }

    /// Returns the supplied completion flag, if any.
    #[must_use]
    pub const fn finished(&self) -> Option<bool> {
        self.finished
    }

    /// Returns the supplied reminder flag, if any.
    #[must_use]
    pub const fn remind(&self) -> Option<bool> {
        self.remind
    }

    /// Returns `true` when no field is supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.priority.is_none()
            && self.expiration_date.is_none()
            && self.finished.is_none()
            && self.remind.is_none()
    }
}
