//! Task management.
//!
//! Clients create, query, update, and delete tasks keyed by name. Every
//! operation validates its input, makes a single store call, and maps the
//! result back; creating a task also announces it on a notification
//! channel. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Payload validation in [`validation`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;
