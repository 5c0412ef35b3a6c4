//! In-memory task store.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{Task, TaskFilter, TaskId, TaskName, TaskPatch},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Each operation holds the lock for its whole duration, so single-record
/// and bulk mutations are atomic with respect to each other.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    name_index: BTreeMap<TaskName, TaskId>,
}

impl InMemoryTaskState {
    fn by_name_mut(&mut self, name: &TaskName) -> Option<&mut Task> {
        let id = self.name_index.get(name)?;
        self.tasks.get_mut(id)
    }

    /// Tasks in name order.
    fn ordered(&self) -> impl Iterator<Item = &Task> {
        self.name_index
            .values()
            .filter_map(|id| self.tasks.get(id))
    }
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskStoreResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TaskStoreResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert(&self, task: &Task) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        if state.tasks.contains_key(task.id()) {
            return Err(TaskStoreError::DuplicateKey(task.id().clone()));
        }

        state
            .name_index
            .insert(task.name().clone(), task.id().clone());
        state.tasks.insert(task.id().clone(), task.clone());
        Ok(())
    }

    async fn find_by_name(&self, name: &TaskName) -> TaskStoreResult<Option<Task>> {
        let state = self.read()?;
        let task = state
            .name_index
            .get(name)
            .and_then(|id| state.tasks.get(id))
            .cloned();
        Ok(task)
    }

    async fn find_matching(&self, filter: &TaskFilter) -> TaskStoreResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state
            .ordered()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect())
    }

    async fn update_one(&self, name: &TaskName, patch: &TaskPatch) -> TaskStoreResult<u64> {
        let mut state = self.write()?;
        let task = state
            .by_name_mut(name)
            .ok_or_else(|| TaskStoreError::NotFound(name.clone()))?;
        Ok(u64::from(task.apply(patch)))
    }

    async fn update_many(&self, filter: &TaskFilter, patch: &TaskPatch) -> TaskStoreResult<u64> {
        if patch.is_empty() {
            return Ok(0);
        }
        let mut state = self.write()?;
        let mut updated = 0;
        for task in state.tasks.values_mut().filter(|task| filter.matches(task)) {
            task.apply(patch);
            updated += 1;
        }
        Ok(updated)
    }

    async fn delete_one(&self, name: &TaskName) -> TaskStoreResult<u64> {
        let mut state = self.write()?;
        let Some(id) = state.name_index.remove(name) else {
            return Ok(0);
        };
        Ok(u64::from(state.tasks.remove(&id).is_some()))
    }
}
