//! Adapters for the task ports.
//!
//! # Available Adapters
//!
//! - [`memory::InMemoryTaskStore`]: thread-safe in-memory storage used by
//!   tests and when no database is configured
//! - [`memory::InMemoryBroker`]: in-process named channels for task events
//! - [`memory::DiscardingPublisher`]: publisher used when notifications are
//!   disabled
//! - [`postgres::PostgresTaskStore`]: `PostgreSQL` persistence via Diesel

pub mod memory;
pub mod postgres;
