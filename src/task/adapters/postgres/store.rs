//! `PostgreSQL` store implementation for task persistence.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{PersistedTaskData, Priority, Task, TaskFilter, TaskId, TaskName, TaskPatch},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by the task store.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Idempotent DDL creating the `tasks` table and its indexes.
const BOOTSTRAP_SQL: &str =
    include_str!("../../../../migrations/2026-10-19-000000_create_tasks/up.sql");

/// `PostgreSQL`-backed task store.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: TaskPgPool,
}

impl PostgresTaskStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Builds a connection pool for `database_url` and wraps it in a store.
    ///
    /// Blocks until the pool has established its initial connections.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the pool cannot be built.
    pub fn connect(database_url: &str, max_size: u32) -> TaskStoreResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(max_size)
            .build(manager)
            .map_err(TaskStoreError::persistence)?;
        Ok(Self::new(pool))
    }

    /// Creates the `tasks` table and indexes when they do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the DDL fails.
    pub async fn ensure_schema(&self) -> TaskStoreResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(BOOTSTRAP_SQL)
                .map_err(TaskStoreError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn insert(&self, task: &Task) -> TaskStoreResult<()> {
        let task_id = task.id().clone();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    // Both the primary key and the name index map to the
                    // same conflict: the id is derived from the name.
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskStoreError::DuplicateKey(task_id)
                    }
                    _ => TaskStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_name(&self, name: &TaskName) -> TaskStoreResult<Option<Task>> {
        let lookup = name.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::name.eq(lookup))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_matching(&self, filter: &TaskFilter) -> TaskStoreResult<Vec<Task>> {
        let filter = *filter;
        self.run_blocking(move |connection| {
            let query = tasks::table
                .select(TaskRow::as_select())
                .order(tasks::name.asc())
                .into_boxed();
            let query = match filter {
                TaskFilter::Priority(priority) => {
                    query.filter(tasks::priority.eq(priority.as_str()))
                }
                TaskFilter::Finished(true) => query.filter(tasks::finished.eq(true)),
                TaskFilter::Finished(false) => {
                    query.filter(tasks::finished.is_distinct_from(true))
                }
                TaskFilter::ExpirationRange { start, end } => {
                    query.filter(tasks::expiration_date.between(start, end))
                }
            };
            let rows = query
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn update_one(&self, name: &TaskName, patch: &TaskPatch) -> TaskStoreResult<u64> {
        let lookup = name.clone();
        let changeset = to_changeset(patch);
        let is_empty = patch.is_empty();

        self.run_blocking(move |connection| {
            let target = tasks::table.filter(tasks::name.eq(lookup.as_str().to_owned()));
            let updated = if is_empty {
                let exists = diesel::select(diesel::dsl::exists(target))
                    .get_result::<bool>(connection)
                    .map_err(TaskStoreError::persistence)?;
                if !exists {
                    return Err(TaskStoreError::NotFound(lookup));
                }
                0
            } else {
                let count = diesel::update(target)
                    .set(&changeset)
                    .execute(connection)
                    .map_err(TaskStoreError::persistence)?;
                if count == 0 {
                    return Err(TaskStoreError::NotFound(lookup));
                }
                count
            };
            to_count(updated)
        })
        .await
    }

    async fn update_many(&self, filter: &TaskFilter, patch: &TaskPatch) -> TaskStoreResult<u64> {
        if patch.is_empty() {
            return Ok(0);
        }
        let filter = *filter;
        let changeset = to_changeset(patch);

        self.run_blocking(move |connection| {
            let updated = match filter {
                TaskFilter::Priority(priority) => diesel::update(
                    tasks::table.filter(tasks::priority.eq(priority.as_str())),
                )
                .set(&changeset)
                .execute(connection),
                TaskFilter::Finished(true) => {
                    diesel::update(tasks::table.filter(tasks::finished.eq(true)))
                        .set(&changeset)
                        .execute(connection)
                }
                TaskFilter::Finished(false) => {
                    diesel::update(tasks::table.filter(tasks::finished.is_distinct_from(true)))
                        .set(&changeset)
                        .execute(connection)
                }
                TaskFilter::ExpirationRange { start, end } => diesel::update(
                    tasks::table.filter(tasks::expiration_date.between(start, end)),
                )
                .set(&changeset)
                .execute(connection),
            }
            .map_err(TaskStoreError::persistence)?;
            to_count(updated)
        })
        .await
    }

    async fn delete_one(&self, name: &TaskName) -> TaskStoreResult<u64> {
        let lookup = name.as_str().to_owned();
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.filter(tasks::name.eq(lookup)))
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            to_count(deleted)
        })
        .await
    }
}

fn to_count(rows: usize) -> TaskStoreResult<u64> {
    u64::try_from(rows).map_err(TaskStoreError::persistence)
}

pub(super) fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().as_str().to_owned(),
        name: task.name().as_str().to_owned(),
        priority: task.priority().map(|priority| priority.as_str().to_owned()),
        expiration_date: task.expiration_date(),
        finished: task.finished(),
        remind: task.remind(),
    }
}

pub(super) fn to_changeset(patch: &TaskPatch) -> TaskChangeset {
    TaskChangeset {
        priority: patch.priority().map(|priority| priority.as_str().to_owned()),
        expiration_date: patch.expiration_date(),
        finished: patch.finished(),
        remind: patch.remind(),
    }
}

pub(super) fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let TaskRow {
        id,
        name,
        priority,
        expiration_date,
        finished,
        remind,
    } = row;

    let name = TaskName::new(name).map_err(TaskStoreError::persistence)?;
    let priority = priority
        .as_deref()
        .map(Priority::parse)
        .transpose()
        .map_err(TaskStoreError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_persisted(id),
        name,
        priority,
        expiration_date,
        finished,
        remind,
    }))
}
