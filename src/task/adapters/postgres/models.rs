//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Content-addressed task identifier.
    pub id: String,
    /// Task name.
    pub name: String,
    /// Priority in canonical spelling.
    pub priority: Option<String>,
    /// Expiration timestamp.
    pub expiration_date: Option<DateTime<Utc>>,
    /// Completion flag.
    pub finished: Option<bool>,
    /// Reminder flag.
    pub remind: Option<bool>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Content-addressed task identifier.
    pub id: String,
    /// Task name.
    pub name: String,
    /// Priority in canonical spelling.
    pub priority: Option<String>,
    /// Expiration timestamp.
    pub expiration_date: Option<DateTime<Utc>>,
    /// Completion flag.
    pub finished: Option<bool>,
    /// Reminder flag.
    pub remind: Option<bool>,
}

/// Sparse update model; `None` fields are left out of the `SET` clause.
#[derive(Debug, Clone, Default, PartialEq, Eq, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// New priority, if supplied.
    pub priority: Option<String>,
    /// New expiration timestamp, if supplied.
    pub expiration_date: Option<DateTime<Utc>>,
    /// New completion flag, if supplied.
    pub finished: Option<bool>,
    /// New reminder flag, if supplied.
    pub remind: Option<bool>,
}
