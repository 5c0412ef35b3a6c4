//! Shared fixtures for in-memory task integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasklist::task::{
    adapters::memory::{InMemoryBroker, InMemoryTaskStore},
    ports::ChannelName,
    services::TaskService,
};

/// Service wired to in-memory adapters.
pub type MemoryService = TaskService<InMemoryTaskStore, InMemoryBroker, DefaultClock>;

/// Service and the broker it publishes to.
pub struct Backend {
    pub service: MemoryService,
    pub broker: InMemoryBroker,
}

impl Backend {
    /// Returns the channel the service publishes on.
    pub fn channel(&self) -> &ChannelName {
        self.service.channel()
    }
}

/// Provides a fresh in-memory backend for each test.
#[fixture]
pub fn backend() -> Backend {
    let broker = InMemoryBroker::new();
    let service = TaskService::new(
        Arc::new(InMemoryTaskStore::new()),
        Arc::new(broker.clone()),
        Arc::new(DefaultClock),
    );
    Backend { service, broker }
}
