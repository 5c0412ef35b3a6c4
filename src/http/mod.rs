//! HTTP boundary for the task API.
//!
//! Handlers are generic over the store, publisher, and clock so the same
//! router serves the in-memory and `PostgreSQL` configurations. Every
//! failure is rendered as `{"kind": .., "detail": ..}` with the status
//! chosen by [`error::status_for`].

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::{ApiError, ErrorBody};
pub use routes::router;
