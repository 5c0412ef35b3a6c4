//! Long-running consumer that drains a task event channel.

use crate::task::ports::ChannelName;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Failure reported by a message handler.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to handle task event: {0}")]
pub struct ListenerError(pub String);

/// Processes one message payload.
pub trait MessageHandler: Send + 'static {
    /// Handles `payload`.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError`] when processing fails. The listener logs the
    /// failure and moves on; the message is not redelivered.
    fn handle(&mut self, payload: &str) -> Result<(), ListenerError>;
}

impl<F> MessageHandler for F
where
    F: FnMut(&str) -> Result<(), ListenerError> + Send + 'static,
{
    fn handle(&mut self, payload: &str) -> Result<(), ListenerError> {
        self(payload)
    }
}

/// Default handler: logs the payload at `info`.
///
/// # Errors
///
/// Never fails.
pub fn log_payload(payload: &str) -> Result<(), ListenerError> {
    tracing::info!(payload, "received task event");
    Ok(())
}

/// Drains one channel for the lifetime of the process.
///
/// Consumption is at-most-once: every received message counts as consumed,
/// whether or not its handler succeeded.
#[derive(Debug)]
pub struct TaskEventListener {
    channel: ChannelName,
    receiver: mpsc::UnboundedReceiver<String>,
}

impl TaskEventListener {
    /// Creates a listener over the consuming end of `channel`.
    #[must_use]
    pub const fn new(channel: ChannelName, receiver: mpsc::UnboundedReceiver<String>) -> Self {
        Self { channel, receiver }
    }

    /// Runs until every publisher handle to the channel is gone, returning
    /// the number of messages consumed.
    pub async fn run<H: MessageHandler>(mut self, mut handler: H) -> u64 {
        tracing::info!(channel = %self.channel, "task event listener started");
        let mut consumed = 0;
        while let Some(payload) = self.receiver.recv().await {
            consumed += 1;
            if let Err(err) = handler.handle(&payload) {
                tracing::warn!(
                    channel = %self.channel,
                    error = %err,
                    "task event handler failed; message dropped"
                );
            }
        }
        tracing::info!(channel = %self.channel, consumed, "task event listener stopped");
        consumed
    }

    /// Spawns [`Self::run`] on the current tokio runtime.
    #[must_use]
    pub fn spawn<H: MessageHandler>(self, handler: H) -> JoinHandle<u64> {
        tokio::spawn(self.run(handler))
    }
}
