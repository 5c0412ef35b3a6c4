//! Shared world state for task management BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasklist::task::{
    adapters::memory::{InMemoryBroker, InMemoryTaskStore},
    services::{TaskService, TaskServiceError},
};

/// Service type used by the BDD world.
pub type TestTaskService = TaskService<InMemoryTaskStore, InMemoryBroker, DefaultClock>;

/// Scenario world for task management behaviour tests.
pub struct TaskManagementWorld {
    pub service: TestTaskService,
    pub last_error: Option<TaskServiceError>,
    pub last_updated: Option<u64>,
}

impl TaskManagementWorld {
    /// Creates a world backed by a fresh in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let service = TaskService::new(
            Arc::new(InMemoryTaskStore::new()),
            Arc::new(InMemoryBroker::new()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            last_error: None,
            last_updated: None,
        }
    }

    /// Records the outcome of the most recent operation.
    pub fn record<T>(&mut self, result: Result<T, TaskServiceError>) -> Option<T> {
        match result {
            Ok(value) => {
                self.last_error = None;
                Some(value)
            }
            Err(err) => {
                self.last_error = Some(err);
                None
            }
        }
    }
}

impl Default for TaskManagementWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskManagementWorld {
    TaskManagementWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
