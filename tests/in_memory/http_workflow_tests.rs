//! Full request workflow against the router backed by in-memory adapters.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tasklist::http::router;
use tower::ServiceExt;

use super::helpers::{Backend, backend};

#[fixture]
fn app(backend: Backend) -> Router {
    router(backend.service)
}

async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> eyre::Result<(StatusCode, Vec<u8>)> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))?,
        None => builder.body(Body::empty())?,
    };
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok((status, bytes.to_vec()))
}

fn names(body: &[u8]) -> eyre::Result<Vec<String>> {
    let tasks: Vec<Value> = serde_json::from_slice(body)?;
    tasks
        .iter()
        .map(|task| {
            task["name"]
                .as_str()
                .map(str::to_owned)
                .ok_or_else(|| eyre::eyre!("task without a name: {task}"))
        })
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bulk_update_marks_every_matching_task_finished(app: Router) -> eyre::Result<()> {
    for name in ["gamma", "alpha", "beta"] {
        let (status, _) = call(
            &app,
            Method::POST,
            "/tasks/",
            Some(json!({"name": name, "priority": "important"})),
        )
        .await?;
        eyre::ensure!(status == StatusCode::OK, "create {name} returned {status}");
    }
    call(
        &app,
        Method::POST,
        "/tasks/",
        Some(json!({"name": "delta", "priority": "unimportant"})),
    )
    .await?;

    let (status, body) = call(
        &app,
        Method::PUT,
        "/tasks/update_by_priority?task_priority=important",
        Some(json!({"finished": true})),
    )
    .await?;
    eyre::ensure!(status == StatusCode::OK, "bulk update returned {status}");
    eyre::ensure!(
        String::from_utf8(body)?.starts_with("3 "),
        "bulk update should report three tasks"
    );

    let (status, body) = call(&app, Method::GET, "/tasks/finished", None).await?;
    eyre::ensure!(status == StatusCode::OK, "finished listing returned {status}");
    eyre::ensure!(
        names(&body)? == ["alpha", "beta", "gamma"],
        "finished tasks should be the three important ones in name order"
    );

    let (status, body) = call(&app, Method::GET, "/tasks/unfinished", None).await?;
    eyre::ensure!(status == StatusCode::OK, "unfinished listing returned {status}");
    eyre::ensure!(names(&body)? == ["delta"], "only delta is unfinished");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn expiration_range_is_inclusive_and_skips_undated_tasks(app: Router) -> eyre::Result<()> {
    let soon = Utc::now() + Duration::days(1);
    let later = Utc::now() + Duration::days(10);
    call(
        &app,
        Method::POST,
        "/tasks/",
        Some(json!({"name": "soon", "expiration_date": soon})),
    )
    .await?;
    call(
        &app,
        Method::POST,
        "/tasks/",
        Some(json!({"name": "later", "expiration_date": later})),
    )
    .await?;
    call(&app, Method::POST, "/tasks/", Some(json!({"name": "undated"}))).await?;

    let uri = format!(
        "/tasks/expiration_range?start_date={}&end_date={}",
        urlencode(&soon.to_rfc3339()),
        urlencode(&soon.to_rfc3339()),
    );
    let (status, body) = call(&app, Method::GET, &uri, None).await?;
    eyre::ensure!(status == StatusCode::OK, "range lookup returned {status}");
    eyre::ensure!(names(&body)? == ["soon"], "only the boundary task matches");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_create_leaves_no_record(app: Router) -> eyre::Result<()> {
    let past = Utc::now() - Duration::hours(1);
    let (status, _) = call(
        &app,
        Method::POST,
        "/tasks/",
        Some(json!({"name": "stale", "expiration_date": past})),
    )
    .await?;
    eyre::ensure!(status == StatusCode::UNPROCESSABLE_ENTITY, "got {status}");

    let (status, _) = call(&app, Method::GET, "/tasks/name/stale", None).await?;
    eyre::ensure!(status == StatusCode::NOT_FOUND, "got {status}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_json_is_rejected(app: Router) -> eyre::Result<()> {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/tasks/")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))?;
    let response = app.oneshot(request).await?;
    eyre::ensure!(
        response.status() == StatusCode::BAD_REQUEST,
        "got {}",
        response.status()
    );
    Ok(())
}

/// Percent-encodes the characters of an RFC 3339 timestamp that are not
/// query-safe.
fn urlencode(value: &str) -> String {
    value.replace('+', "%2B").replace(':', "%3A")
}
