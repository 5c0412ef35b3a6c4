//! Domain model for task management.
//!
//! The domain defines the task aggregate, its content-addressed identity,
//! the closed priority set, sparse patches, and lookup predicates. It holds
//! no infrastructure concerns.

mod error;
mod filter;
mod ids;
mod priority;
mod task;

pub use error::TaskValidationError;
pub use filter::TaskFilter;
pub use ids::{TaskId, TaskName, derive_id};
pub use priority::Priority;
pub use task::{PersistedTaskData, Task, TaskPatch};
