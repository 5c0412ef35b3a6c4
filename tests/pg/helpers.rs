//! Shared helpers for `PostgreSQL` task store integration tests.
//!
//! The tests run against the database named by `TASKLIST_TEST_DATABASE_URL`
//! and are skipped when it is unset. Every test clears the `tasks` table, so
//! the database must be disposable.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use std::sync::OnceLock;
use tasklist::task::adapters::postgres::{PostgresTaskStore, TaskPgPool};
use tokio::sync::{Mutex, MutexGuard};

/// Environment variable naming the test database.
pub const DATABASE_URL_ENV: &str = "TASKLIST_TEST_DATABASE_URL";

static DATABASE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Store plus exclusive access to the test database.
pub struct PgContext {
    pub store: PostgresTaskStore,
    _lock: MutexGuard<'static, ()>,
}

/// Connects to the test database, applies the schema, and empties `tasks`.
///
/// Returns `Ok(None)` when no test database is configured.
///
/// # Errors
///
/// Returns an error when the database is configured but unusable.
pub async fn connect() -> eyre::Result<Option<PgContext>> {
    let Ok(url) = std::env::var(DATABASE_URL_ENV) else {
        tracing::warn!("{DATABASE_URL_ENV} unset; skipping PostgreSQL test");
        return Ok(None);
    };

    let lock = DATABASE_LOCK.get_or_init(|| Mutex::new(())).lock().await;
    let pool = tokio::task::spawn_blocking(move || build_pool(&url)).await??;
    let store = PostgresTaskStore::new(pool.clone());
    store.ensure_schema().await?;
    tokio::task::spawn_blocking(move || -> eyre::Result<()> {
        pool.get()?.batch_execute("DELETE FROM tasks")?;
        Ok(())
    })
    .await??;

    Ok(Some(PgContext { store, _lock: lock }))
}

fn build_pool(url: &str) -> eyre::Result<TaskPgPool> {
    let manager = ConnectionManager::<PgConnection>::new(url);
    Ok(Pool::builder().max_size(2).build(manager)?)
}
