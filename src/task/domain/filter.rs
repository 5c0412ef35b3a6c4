//! Predicates used for multi-record lookups and bulk updates.

use super::{Priority, Task};
use chrono::{DateTime, Utc};
use std::fmt;

/// Equality or range predicate over stored tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFilter {
    /// Tasks with exactly this priority.
    Priority(Priority),
    /// Tasks by completion status. `false` also matches tasks whose flag
    /// was never set.
    Finished(bool),
    /// Tasks whose expiration date lies within `start..=end`. Tasks without
    /// an expiration date never match.
    ExpirationRange {
        /// Inclusive lower bound.
        start: DateTime<Utc>,
        /// Inclusive upper bound.
        end: DateTime<Utc>,
    },
}

impl TaskFilter {
    /// Returns `true` when `task` satisfies the predicate.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        match *self {
            Self::Priority(priority) => task.priority() == Some(priority),
            Self::Finished(flag) => task.is_finished() == flag,
            Self::ExpirationRange { start, end } => task
                .expiration_date()
                .is_some_and(|date| start <= date && date <= end),
        }
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Priority(priority) => write!(f, "priority '{priority}'"),
            Self::Finished(true) => f.write_str("finished tasks"),
            Self::Finished(false) => f.write_str("unfinished tasks"),
            Self::ExpirationRange { start, end } => {
                write!(f, "expiration between {start} and {end}")
            }
        }
    }
}
