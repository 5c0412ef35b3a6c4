//! Notification port for best-effort task event publishing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for notifier operations.
pub type NotifierResult<T> = Result<T, NotifierError>;

/// Name of a message channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelName(String);

impl ChannelName {
    /// Channel used when none is configured.
    pub const DEFAULT: &'static str = "task_events";

    /// Creates a channel name.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ChannelName {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fire-and-forget publisher for task events.
///
/// A publish is one-shot and at-most-once: there is no retry and no
/// delivery confirmation. Publishing while no consumer is attached is not
/// an error.
#[async_trait]
pub trait TaskEventPublisher: Send + Sync {
    /// Publishes a plain-text message on `channel`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError`] when the message could not be handed to
    /// the channel. Callers treat this as non-fatal.
    async fn publish(&self, channel: &ChannelName, message: &str) -> NotifierResult<()>;
}

/// Errors returned by notifier implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotifierError {
    /// The channel's consumer has gone away.
    #[error("channel '{0}' is closed")]
    ChannelClosed(ChannelName),

    /// The broker could not be reached.
    #[error("broker unavailable: {0}")]
    Unavailable(String),
}
