//! Identifier and validated scalar types for the task domain.

use super::TaskValidationError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Content-addressed identifier for a task record.
///
/// The identifier is the lowercase hexadecimal SHA-256 digest of the task
/// name. Equal names always produce equal identifiers; distinct names are
/// not guaranteed to produce distinct identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Length of the hexadecimal digest in characters.
    pub const HEX_LEN: usize = 64;

    /// Derives the identifier for a task name.
    #[must_use]
    pub fn derive(name: &TaskName) -> Self {
        derive_id(name.as_str())
    }

    /// Wraps a previously persisted identifier without re-deriving it.
    #[must_use]
    pub fn from_persisted(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Computes the content-addressed identifier of a raw task name.
///
/// Pure and deterministic: the same UTF-8 input always yields the same
/// 64-character lowercase hexadecimal digest.
#[must_use]
pub fn derive_id(name: &str) -> TaskId {
    let digest = Sha256::digest(name.as_bytes());
    let hex = digest
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect::<String>();
    TaskId(hex)
}

/// Validated, non-empty task name. Acts as the natural key of a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskName(String);

impl TaskName {
    /// Creates a validated task name.
    ///
    /// The name is stored exactly as given; surrounding whitespace only
    /// matters for the emptiness check.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::MissingName`] when the name is empty
    /// or consists solely of whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(TaskValidationError::MissingName);
        }
        Ok(Self(raw))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskName {
    type Error = TaskValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskName> for String {
    fn from(value: TaskName) -> Self {
        value.0
    }
}

impl AsRef<str> for TaskName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
