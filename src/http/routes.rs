//! Route table for the task API.

use super::handlers;
use crate::task::{
    ports::{TaskEventPublisher, TaskStore},
    services::TaskService,
};
use axum::Router;
use axum::routing::{delete, get, post, put};
use mockable::Clock;
use tower_http::trace::TraceLayer;

/// Builds the task router with `service` as shared state.
///
/// Requests are wrapped in a `tower-http` trace span.
pub fn router<S, P, C>(service: TaskService<S, P, C>) -> Router
where
    S: TaskStore + 'static,
    P: TaskEventPublisher + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/tasks", post(handlers::create_task::<S, P, C>))
        .route("/tasks/", post(handlers::create_task::<S, P, C>))
        .route("/tasks/name/{name}", get(handlers::read_by_name::<S, P, C>))
        .route(
            "/tasks/priority/{priority}",
            get(handlers::read_by_priority::<S, P, C>),
        )
        .route("/tasks/finished", get(handlers::read_finished::<S, P, C>))
        .route("/tasks/unfinished", get(handlers::read_unfinished::<S, P, C>))
        .route(
            "/tasks/expiration_range",
            get(handlers::read_by_expiration_range::<S, P, C>),
        )
        .route(
            "/tasks/update_by_name",
            put(handlers::update_by_name::<S, P, C>),
        )
        .route(
            "/tasks/update_by_priority",
            put(handlers::update_by_priority::<S, P, C>),
        )
        .route("/tasks/{name}", delete(handlers::delete_by_name::<S, P, C>))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
