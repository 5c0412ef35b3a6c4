//! In-process message broker with named FIFO channels.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;

use crate::task::ports::{ChannelName, NotifierError, NotifierResult, TaskEventPublisher};

/// In-process broker holding one unbounded FIFO queue per channel name.
///
/// Queues are declared lazily on first publish or consume and buffer
/// messages until a consumer drains them, so publishing before a listener
/// attaches is not an error. Each queue has a single consumer; once that
/// consumer is dropped, further publishes on the channel fail with
/// [`NotifierError::ChannelClosed`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryBroker {
    channels: Arc<Mutex<HashMap<ChannelName, Queue>>>,
}

#[derive(Debug)]
struct Queue {
    sender: mpsc::UnboundedSender<String>,
    receiver: Option<mpsc::UnboundedReceiver<String>>,
}

impl Queue {
    fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver: Some(receiver),
        }
    }
}

impl InMemoryBroker {
    /// Creates a broker with no declared channels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> NotifierResult<MutexGuard<'_, HashMap<ChannelName, Queue>>> {
        self.channels
            .lock()
            .map_err(|err| NotifierError::Unavailable(err.to_string()))
    }

    /// Takes the consuming end of `channel`, declaring it if needed.
    ///
    /// Returns `Ok(None)` when the channel already has a consumer.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::Unavailable`] if the broker state is
    /// poisoned.
    pub fn consume(
        &self,
        channel: &ChannelName,
    ) -> NotifierResult<Option<mpsc::UnboundedReceiver<String>>> {
        let mut channels = self.lock()?;
        let queue = channels.entry(channel.clone()).or_insert_with(Queue::new);
        Ok(queue.receiver.take())
    }
}

#[async_trait]
impl TaskEventPublisher for InMemoryBroker {
    async fn publish(&self, channel: &ChannelName, message: &str) -> NotifierResult<()> {
        let sender = {
            let mut channels = self.lock()?;
            channels
                .entry(channel.clone())
                .or_insert_with(Queue::new)
                .sender
                .clone()
        };
        sender
            .send(message.to_owned())
            .map_err(|_| NotifierError::ChannelClosed(channel.clone()))
    }
}

/// Publisher that accepts and drops every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardingPublisher;

#[async_trait]
impl TaskEventPublisher for DiscardingPublisher {
    async fn publish(&self, channel: &ChannelName, message: &str) -> NotifierResult<()> {
        tracing::trace!(
            channel = %channel,
            payload = message,
            "notifications disabled; dropping message"
        );
        Ok(())
    }
}
