//! Tasklist: a small task-management backend.
//!
//! Tasks are identified by a content hash of their name, validated on the
//! way in, persisted through a pluggable store, and announced on a named
//! message channel when created.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: task values and invariants, free of infrastructure
//! - **Ports**: async traits for storage and event publishing
//! - **Adapters**: in-memory and `PostgreSQL` stores, an in-process broker
//! - **Services**: the orchestration layer the HTTP boundary calls into
//!
//! # Modules
//!
//! - [`task`]: task domain, validation, ports, adapters, and services
//! - [`http`]: axum router and error mapping
//! - [`config`]: layered server configuration

pub mod config;
pub mod http;
pub mod task;
