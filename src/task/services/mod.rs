//! Application services for task management.

mod listener;
mod tasks;

pub use listener::{ListenerError, MessageHandler, TaskEventListener, log_payload};
pub use tasks::{TaskLookup, TaskService, TaskServiceError, TaskServiceResult};
