//! Serves the task API over HTTP.
//!
//! Usage:
//!
//! ```text
//! tasklist-server [--bind 127.0.0.1:8000] [--database-url postgres://...]
//! ```
//!
//! Without a database URL tasks live in memory and vanish on exit. Task
//! events go to an in-process channel drained by a background listener
//! unless `--notifications false` is given.

use clap::Parser;
use mockable::DefaultClock;
use std::sync::Arc;
use tasklist::config::{ConfigError, TaskServerCliArgs, TaskServerConfig};
use tasklist::http;
use tasklist::task::{
    adapters::memory::{DiscardingPublisher, InMemoryBroker, InMemoryTaskStore},
    adapters::postgres::PostgresTaskStore,
    ports::{NotifierError, TaskEventPublisher, TaskStore, TaskStoreError},
    services::{TaskEventListener, TaskService, log_payload},
};
use thiserror::Error;
use tokio::net::TcpListener;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("task store setup failed: {0}")]
    Store(#[from] TaskStoreError),
    #[error("notification channel setup failed: {0}")]
    Notifier(#[from] NotifierError),
    #[error("notification channel '{0}' already has a consumer")]
    ChannelTaken(String),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
    #[error("server terminated: {0}")]
    Serve(std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = TaskServerCliArgs::parse();
    let config = TaskServerConfig::load(&cli).map_err(ServerError::from)?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if let Err(err) = run(config).await {
        tracing::error!(error = %err, "task server failed");
        return Err(err.into());
    }
    Ok(())
}

async fn run(config: TaskServerConfig) -> Result<(), ServerError> {
    if let Some(url) = config.database_url.clone() {
        let pool_size = config.pool_size;
        let store = tokio::task::spawn_blocking(move || {
            PostgresTaskStore::connect(&url, pool_size)
        })
        .await
        .map_err(TaskStoreError::persistence)??;
        store.ensure_schema().await?;
        tracing::info!(pool_size, "using PostgreSQL task store");
        with_store(config, store).await
    } else {
        tracing::info!("using in-memory task store");
        with_store(config, InMemoryTaskStore::new()).await
    }
}

async fn with_store<S: TaskStore + 'static>(
    config: TaskServerConfig,
    store: S,
) -> Result<(), ServerError> {
    if !config.notifications_enabled {
        tracing::info!("task event notifications disabled");
        return serve(config, store, DiscardingPublisher).await;
    }

    let broker = InMemoryBroker::new();
    let channel = config.notification_channel.clone();
    let receiver = broker
        .consume(&channel)?
        .ok_or_else(|| ServerError::ChannelTaken(channel.to_string()))?;
    let listener = TaskEventListener::new(channel, receiver).spawn(log_payload);

    let result = serve(config, store, broker).await;
    listener.abort();
    result
}

async fn serve<S, P>(config: TaskServerConfig, store: S, publisher: P) -> Result<(), ServerError>
where
    S: TaskStore + 'static,
    P: TaskEventPublisher + 'static,
{
    let service = TaskService::new(Arc::new(store), Arc::new(publisher), Arc::new(DefaultClock))
        .with_channel(config.notification_channel.clone());
    let app = http::router(service);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind_addr.clone(),
            source,
        })?;
    let local_addr = listener.local_addr().map_err(ServerError::Serve)?;
    tracing::info!(addr = %local_addr, "task server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;
    tracing::info!("task server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for Ctrl-C; shutting down");
    }
}
