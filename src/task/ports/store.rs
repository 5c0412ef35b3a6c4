//! Store port for task persistence, lookup, and sparse updates.

use crate::task::domain::{Priority, Task, TaskFilter, TaskId, TaskName, TaskPatch};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task persistence contract.
///
/// Implementations guarantee that each single insert, update, or delete is
/// applied atomically. No multi-record transaction is offered. Multi-record
/// lookups return tasks ordered by name.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateKey`] when a task with the same
    /// identifier already exists.
    async fn insert(&self, task: &Task) -> TaskStoreResult<()>;

    /// Finds a task by name.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_name(&self, name: &TaskName) -> TaskStoreResult<Option<Task>>;

    /// Returns all tasks matching `filter`. An empty vector is not an error.
    async fn find_matching(&self, filter: &TaskFilter) -> TaskStoreResult<Vec<Task>>;

    /// Merges `patch` into the task named `name`.
    ///
    /// Returns the number of records updated: `1` for a non-empty patch,
    /// `0` when the patch is empty.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn update_one(&self, name: &TaskName, patch: &TaskPatch) -> TaskStoreResult<u64>;

    /// Merges `patch` into every task matching `filter`.
    ///
    /// Returns the number of records updated; zero matches is not an error.
    async fn update_many(&self, filter: &TaskFilter, patch: &TaskPatch) -> TaskStoreResult<u64>;

    /// Deletes the task named `name`, returning the number of records
    /// removed.
    async fn delete_one(&self, name: &TaskName) -> TaskStoreResult<u64>;

    /// Returns all tasks with the given priority.
    async fn find_by_priority(&self, priority: Priority) -> TaskStoreResult<Vec<Task>> {
        self.find_matching(&TaskFilter::Priority(priority)).await
    }

    /// Returns all tasks with the given completion status.
    async fn find_by_finished(&self, finished: bool) -> TaskStoreResult<Vec<Task>> {
        self.find_matching(&TaskFilter::Finished(finished)).await
    }

    /// Returns all tasks expiring within `start..=end`.
    async fn find_by_expiration_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TaskStoreResult<Vec<Task>> {
        self.find_matching(&TaskFilter::ExpirationRange { start, end })
            .await
    }
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateKey(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskName),

    /// Persistence-layer failure; the store could not be reached or failed
    /// to complete the operation.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
