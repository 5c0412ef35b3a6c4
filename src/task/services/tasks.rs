//! Service layer orchestrating validation, persistence, and notification.

use crate::task::{
    domain::{Priority, Task, TaskFilter, TaskId, TaskName, TaskValidationError},
    ports::{ChannelName, TaskEventPublisher, TaskStore, TaskStoreError},
    validation::{self, TaskPatchPayload, TaskPayload},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// What a failed lookup, update, or delete was looking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskLookup {
    /// A single task by name.
    Name(TaskName),
    /// Any task matching a predicate.
    Filter(TaskFilter),
}

impl fmt::Display for TaskLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "name '{name}'"),
            Self::Filter(filter) => write!(f, "{filter}"),
        }
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Clone, Error)]
pub enum TaskServiceError {
    /// The payload failed validation; nothing was written.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),

    /// No task matched. Empty predicate lookups also report this.
    #[error("no task found for {0}")]
    NotFound(TaskLookup),

    /// An update supplied no fields to set.
    #[error("update must set at least one field")]
    EmptyUpdate,

    /// A task with the same derived identifier already exists.
    #[error("a task with identifier {0} already exists")]
    DuplicateKey(TaskId),

    /// The store could not complete the operation.
    #[error("task storage unavailable: {0}")]
    StorageUnavailable(TaskStoreError),
}

impl TaskServiceError {
    /// Returns a stable, machine-checkable error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.kind(),
            Self::NotFound(_) => "not_found",
            Self::EmptyUpdate => "empty_update",
            Self::DuplicateKey(_) => "duplicate_key",
            Self::StorageUnavailable(_) => "storage_unavailable",
        }
    }
}

impl From<TaskStoreError> for TaskServiceError {
    fn from(err: TaskStoreError) -> Self {
        match err {
            TaskStoreError::DuplicateKey(id) => Self::DuplicateKey(id),
            TaskStoreError::NotFound(name) => Self::NotFound(TaskLookup::Name(name)),
            TaskStoreError::Persistence(_) => Self::StorageUnavailable(err),
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
///
/// Holds no task state between calls; every operation fetches from and
/// writes back to the injected store.
pub struct TaskService<S, P, C>
where
    S: TaskStore,
    P: TaskEventPublisher,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    publisher: Arc<P>,
    clock: Arc<C>,
    channel: ChannelName,
}

impl<S, P, C> Clone for TaskService<S, P, C>
where
    S: TaskStore,
    P: TaskEventPublisher,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            publisher: Arc::clone(&self.publisher),
            clock: Arc::clone(&self.clock),
            channel: self.channel.clone(),
        }
    }
}

impl<S, P, C> TaskService<S, P, C>
where
    S: TaskStore,
    P: TaskEventPublisher,
    C: Clock + Send + Sync,
{
    /// Creates a service publishing task events on the default channel.
    #[must_use]
    pub fn new(store: Arc<S>, publisher: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            store,
            publisher,
            clock,
            channel: ChannelName::default(),
        }
    }

    /// Sets the channel task events are published on.
    #[must_use]
    pub fn with_channel(mut self, channel: ChannelName) -> Self {
        self.channel = channel;
        self
    }

    /// Returns the channel task events are published on.
    #[must_use]
    pub const fn channel(&self) -> &ChannelName {
        &self.channel
    }

    /// Validates and stores a new task, then announces it.
    ///
    /// The announcement is best-effort: a publish failure is logged and
    /// does not affect the result.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] before any store access when
    /// the payload is invalid, [`TaskServiceError::DuplicateKey`] when the
    /// task already exists, or [`TaskServiceError::StorageUnavailable`].
    pub async fn create(&self, payload: TaskPayload) -> TaskServiceResult<Task> {
        let task = validation::validate(payload, &*self.clock)?;
        self.store.insert(&task).await?;
        tracing::info!(task_id = %task.id(), name = %task.name(), "task created");

        self.announce_created(&task).await;
        Ok(task)
    }

    async fn announce_created(&self, task: &Task) {
        let message = format!("Created new task: {}", task.name());
        if let Err(err) = self.publisher.publish(&self.channel, &message).await {
            tracing::warn!(
                channel = %self.channel,
                task_id = %task.id(),
                error = %err,
                "failed to publish task event"
            );
        }
    }

    /// Retrieves a task by name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task has this name.
    pub async fn read_by_name(&self, name: &TaskName) -> TaskServiceResult<Task> {
        self.store
            .find_by_name(name)
            .await?
            .ok_or_else(|| TaskServiceError::NotFound(TaskLookup::Name(name.clone())))
    }

    /// Retrieves all tasks with the given priority.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task matches.
    pub async fn read_by_priority(&self, priority: Priority) -> TaskServiceResult<Vec<Task>> {
        let tasks = self.store.find_by_priority(priority).await?;
        non_empty(tasks, TaskFilter::Priority(priority))
    }

    /// Retrieves all tasks explicitly marked finished.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task matches.
    pub async fn read_finished(&self) -> TaskServiceResult<Vec<Task>> {
        let tasks = self.store.find_by_finished(true).await?;
        non_empty(tasks, TaskFilter::Finished(true))
    }

    /// Retrieves all tasks not marked finished, including tasks whose flag
    /// was never set.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task matches.
    pub async fn read_unfinished(&self) -> TaskServiceResult<Vec<Task>> {
        let tasks = self.store.find_by_finished(false).await?;
        non_empty(tasks, TaskFilter::Finished(false))
    }

    /// Retrieves all tasks expiring within `start..=end`.
    ///
    /// Both bounds are truncated to the stored timestamp resolution, so a
    /// bound copied from a submitted expiration date still matches it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task matches.
    pub async fn read_by_expiration_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TaskServiceResult<Vec<Task>> {
        let start = validation::rules::storage_precision(start);
        let end = validation::rules::storage_precision(end);
        let tasks = self.store.find_by_expiration_range(start, end).await?;
        non_empty(tasks, TaskFilter::ExpirationRange { start, end })
    }

    /// Merges the supplied fields into the task called `name`.
    ///
    /// The patch is validated on its own; the merged record is not
    /// re-checked against the stored baseline.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`], [`TaskServiceError::EmptyUpdate`]
    /// when the patch sets nothing, or [`TaskServiceError::NotFound`] when no
    /// task has this name.
    pub async fn update_by_name(
        &self,
        name: &TaskName,
        payload: TaskPatchPayload,
    ) -> TaskServiceResult<u64> {
        let patch = validation::validate_patch(payload, &*self.clock)?;
        if patch.is_empty() {
            return Err(TaskServiceError::EmptyUpdate);
        }
        let updated = self.store.update_one(name, &patch).await?;
        tracing::info!(name = %name, updated, "task updated");
        Ok(updated)
    }

    /// Merges the supplied fields into every task with `priority`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`], [`TaskServiceError::EmptyUpdate`]
    /// when the patch sets nothing, or [`TaskServiceError::NotFound`] when no
    /// task has this priority.
    pub async fn update_by_priority(
        &self,
        priority: Priority,
        payload: TaskPatchPayload,
    ) -> TaskServiceResult<u64> {
        let patch = validation::validate_patch(payload, &*self.clock)?;
        if patch.is_empty() {
            return Err(TaskServiceError::EmptyUpdate);
        }
        let filter = TaskFilter::Priority(priority);
        let updated = self.store.update_many(&filter, &patch).await?;
        if updated == 0 {
            return Err(TaskServiceError::NotFound(TaskLookup::Filter(filter)));
        }
        tracing::info!(priority = %priority, updated, "tasks updated");
        Ok(updated)
    }

    /// Deletes the task called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when nothing was deleted.
    pub async fn delete_by_name(&self, name: &TaskName) -> TaskServiceResult<()> {
        let deleted = self.store.delete_one(name).await?;
        if deleted == 0 {
            return Err(TaskServiceError::NotFound(TaskLookup::Name(name.clone())));
        }
        tracing::info!(name = %name, "task deleted");
        Ok(())
    }
}

/// Maps an empty predicate result to [`TaskServiceError::NotFound`].
fn non_empty(tasks: Vec<Task>, filter: TaskFilter) -> TaskServiceResult<Vec<Task>> {
    if tasks.is_empty() {
        return Err(TaskServiceError::NotFound(TaskLookup::Filter(filter)));
    }
    Ok(tasks)
}
