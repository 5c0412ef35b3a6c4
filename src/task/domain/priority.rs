//! Closed priority enumeration for tasks.

use super::TaskValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Must be handled first.
    Urgent,
    /// Should be handled soon.
    Important,
    /// Can wait.
    Unimportant,
}

impl Priority {
    /// All priorities in descending order of urgency.
    pub const ALL: [Self; 3] = [Self::Urgent, Self::Important, Self::Unimportant];

    /// Returns the canonical wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::Important => "important",
            Self::Unimportant => "unimportant",
        }
    }

    /// Parses a priority from its canonical spelling.
    ///
    /// Surrounding whitespace is ignored; matching is otherwise exact.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::InvalidPriority`] for any other value.
    pub fn parse(value: &str) -> Result<Self, TaskValidationError> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == trimmed)
            .ok_or_else(|| TaskValidationError::InvalidPriority(value.to_owned()))
    }
}

impl TryFrom<&str> for Priority {
    type Error = TaskValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
