//! Request handlers translating HTTP requests into service calls.

use super::error::ApiError;
use crate::task::{
    domain::{Priority, Task, TaskName},
    ports::{TaskEventPublisher, TaskStore},
    services::TaskService,
    validation::{TaskPatchPayload, TaskPayload},
};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Acknowledgement returned by create and delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    /// Human-readable confirmation.
    pub message: String,
    /// Identifier of the affected task, when one was created.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
}

/// Query string of `GET /tasks/expiration_range`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpirationRangeQuery {
    /// Inclusive lower bound.
    pub start_date: DateTime<Utc>,
    /// Inclusive upper bound.
    pub end_date: DateTime<Utc>,
}

/// Query string of `PUT /tasks/update_by_name`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateByNameQuery {
    /// Name of the task to update.
    pub task_name: String,
}

/// Query string of `PUT /tasks/update_by_priority`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateByPriorityQuery {
    /// Priority selecting the tasks to update.
    pub task_priority: String,
}

type HandlerResult<T> = Result<T, ApiError>;

/// `POST /tasks/`
pub async fn create_task<S, P, C>(
    State(service): State<TaskService<S, P, C>>,
    body: Result<Json<TaskPayload>, JsonRejection>,
) -> HandlerResult<Json<Acknowledgement>>
where
    S: TaskStore,
    P: TaskEventPublisher,
    C: Clock + Send + Sync,
{
    let Json(payload) = body?;
    let task = service.create(payload).await?;
    Ok(Json(Acknowledgement {
        message: "Task created successfully".to_owned(),
        id: Some(task.id().to_string()),
    }))
}

/// `GET /tasks/name/{name}`
pub async fn read_by_name<S, P, C>(
    State(service): State<TaskService<S, P, C>>,
    Path(name): Path<String>,
) -> HandlerResult<Json<Task>>
where
    S: TaskStore,
    P: TaskEventPublisher,
    C: Clock + Send + Sync,
{
    let name = TaskName::new(name)?;
    Ok(Json(service.read_by_name(&name).await?))
}

/// `GET /tasks/priority/{priority}`
pub async fn read_by_priority<S, P, C>(
    State(service): State<TaskService<S, P, C>>,
    Path(priority): Path<String>,
) -> HandlerResult<Json<Vec<Task>>>
where
    S: TaskStore,
    P: TaskEventPublisher,
    C: Clock + Send + Sync,
{
    let priority = Priority::parse(&priority)?;
    Ok(Json(service.read_by_priority(priority).await?))
}

/// `GET /tasks/finished`
pub async fn read_finished<S, P, C>(
    State(service): State<TaskService<S, P, C>>,
) -> HandlerResult<Json<Vec<Task>>>
where
    S: TaskStore,
    P: TaskEventPublisher,
    C: Clock + Send + Sync,
{
    Ok(Json(service.read_finished().await?))
}

/// `GET /tasks/unfinished`
pub async fn read_unfinished<S, P, C>(
    State(service): State<TaskService<S, P, C>>,
) -> HandlerResult<Json<Vec<Task>>>
where
    S: TaskStore,
    P: TaskEventPublisher,
    C: Clock + Send + Sync,
{
    Ok(Json(service.read_unfinished().await?))
}

/// `GET /tasks/expiration_range?start_date=..&end_date=..`
pub async fn read_by_expiration_range<S, P, C>(
    State(service): State<TaskService<S, P, C>>,
    query: Result<Query<ExpirationRangeQuery>, QueryRejection>,
) -> HandlerResult<Json<Vec<Task>>>
where
    S: TaskStore,
    P: TaskEventPublisher,
    C: Clock + Send + Sync,
{
    let Query(range) = query?;
    Ok(Json(
        service
            .read_by_expiration_range(range.start_date, range.end_date)
            .await?,
    ))
}

/// `PUT /tasks/update_by_name?task_name=..`
pub async fn update_by_name<S, P, C>(
    State(service): State<TaskService<S, P, C>>,
    query: Result<Query<UpdateByNameQuery>, QueryRejection>,
    body: Result<Json<TaskPatchPayload>, JsonRejection>,
) -> HandlerResult<String>
where
    S: TaskStore,
    P: TaskEventPublisher,
    C: Clock + Send + Sync,
{
    let Query(UpdateByNameQuery { task_name }) = query?;
    let Json(patch) = body?;
    let name = TaskName::new(task_name)?;
    service.update_by_name(&name, patch).await?;
    Ok(format!("Task '{name}' updated successfully"))
}

/// `PUT /tasks/update_by_priority?task_priority=..`
pub async fn update_by_priority<S, P, C>(
    State(service): State<TaskService<S, P, C>>,
    query: Result<Query<UpdateByPriorityQuery>, QueryRejection>,
    body: Result<Json<TaskPatchPayload>, JsonRejection>,
) -> HandlerResult<String>
where
    S: TaskStore,
    P: TaskEventPublisher,
    C: Clock + Send + Sync,
{
    let Query(UpdateByPriorityQuery { task_priority }) = query?;
    let Json(patch) = body?;
    let priority = Priority::parse(&task_priority)?;
    let updated = service.update_by_priority(priority, patch).await?;
    Ok(format!("{updated} task(s) with priority '{priority}' updated"))
}

/// `DELETE /tasks/{name}`
pub async fn delete_by_name<S, P, C>(
    State(service): State<TaskService<S, P, C>>,
    Path(name): Path<String>,
) -> HandlerResult<Json<Acknowledgement>>
where
    S: TaskStore,
    P: TaskEventPublisher,
    C: Clock + Send + Sync,
{
    let name = TaskName::new(name)?;
    service.delete_by_name(&name).await?;
    Ok(Json(Acknowledgement {
        message: "Task deleted successfully".to_owned(),
        id: None,
    }))
}
