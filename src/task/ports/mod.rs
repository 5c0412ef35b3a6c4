//! Port contracts for task management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod notifier;
pub mod store;

pub use notifier::{ChannelName, NotifierError, NotifierResult, TaskEventPublisher};
pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
