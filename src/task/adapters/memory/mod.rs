//! In-memory adapter implementations.

mod broker;
mod task;

pub use broker::{DiscardingPublisher, InMemoryBroker};
pub use task::InMemoryTaskStore;
