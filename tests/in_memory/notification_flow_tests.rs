//! End-to-end notification flow: create, publish, and consume.

use std::sync::{Arc, Mutex};

use rstest::rstest;
use tasklist::task::{
    services::{ListenerError, TaskEventListener},
    validation::TaskPayload,
};

use super::helpers::{Backend, backend};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listener_receives_creation_events_in_order(backend: Backend) -> eyre::Result<()> {
    let receiver = backend
        .broker
        .consume(backend.channel())?
        .ok_or_else(|| eyre::eyre!("channel already consumed"))?;

    for name in ["first", "second", "third"] {
        backend.service.create(TaskPayload::new(name)).await?;
    }

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let listener = TaskEventListener::new(backend.channel().clone(), receiver);
    let handle = listener.spawn(move |payload: &str| -> Result<(), ListenerError> {
        sink.lock()
            .map_err(|err| ListenerError(err.to_string()))?
            .push(payload.to_owned());
        Ok(())
    });

    // The service and broker hold the only senders.
    drop(backend);
    let consumed = handle.await?;

    eyre::ensure!(consumed == 3, "expected 3 consumed messages, got {consumed}");
    let messages = seen.lock().map_err(|err| eyre::eyre!("{err}"))?.clone();
    eyre::ensure!(
        messages
            == [
                "Created new task: first",
                "Created new task: second",
                "Created new task: third",
            ],
        "unexpected messages: {messages:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failing_handler_does_not_stop_the_listener(backend: Backend) -> eyre::Result<()> {
    let receiver = backend
        .broker
        .consume(backend.channel())?
        .ok_or_else(|| eyre::eyre!("channel already consumed"))?;
    backend.service.create(TaskPayload::new("one")).await?;
    backend.service.create(TaskPayload::new("two")).await?;

    let handle = TaskEventListener::new(backend.channel().clone(), receiver)
        .spawn(|_: &str| -> Result<(), ListenerError> {
            Err(ListenerError("handler rejected message".to_owned()))
        });

    drop(backend);
    let consumed = handle.await?;
    eyre::ensure!(consumed == 2, "expected 2 consumed messages, got {consumed}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_succeeds_after_the_consumer_is_gone(backend: Backend) -> eyre::Result<()> {
    let receiver = backend
        .broker
        .consume(backend.channel())?
        .ok_or_else(|| eyre::eyre!("channel already consumed"))?;
    drop(receiver);

    let created = backend.service.create(TaskPayload::new("orphaned")).await?;
    eyre::ensure!(created.name().as_str() == "orphaned", "unexpected task name");
    Ok(())
}
