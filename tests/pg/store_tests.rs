//! Task store behaviour against a live `PostgreSQL` database.

use std::sync::Arc;

use chrono::{Duration, Utc};
use mockable::DefaultClock;
use tasklist::task::{
    adapters::memory::DiscardingPublisher,
    domain::{Priority, Task, TaskFilter, TaskName, TaskPatch},
    ports::{TaskStore, TaskStoreError},
    services::TaskService,
    validation::{TaskPayload, validate},
};

use super::helpers::connect;

fn task(payload: TaskPayload) -> eyre::Result<Task> {
    Ok(validate(payload, &DefaultClock)?)
}

fn name(value: &str) -> eyre::Result<TaskName> {
    Ok(TaskName::new(value)?)
}

#[tokio::test(flavor = "multi_thread")]
async fn insert_and_find_by_name_round_trips() -> eyre::Result<()> {
    let Some(ctx) = connect().await? else {
        return Ok(());
    };
    let expiration = Utc::now() + Duration::days(2) + Duration::nanoseconds(123);
    let created = task(
        TaskPayload::new("file taxes")
            .with_priority("urgent")
            .with_expiration_date(expiration)
            .with_remind(true),
    )?;

    ctx.store.insert(&created).await?;
    let found = ctx.store.find_by_name(&name("file taxes")?).await?;

    eyre::ensure!(found.as_ref() == Some(&created), "round trip mismatch: {found:?}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn created_task_reads_back_unchanged_through_the_service() -> eyre::Result<()> {
    let Some(ctx) = connect().await? else {
        return Ok(());
    };
    let service = TaskService::new(
        Arc::new(ctx.store.clone()),
        Arc::new(DiscardingPublisher),
        Arc::new(DefaultClock),
    );
    let submitted = Utc::now() + Duration::days(1) + Duration::nanoseconds(123);

    let created = service
        .create(TaskPayload::new("precise").with_expiration_date(submitted))
        .await?;
    let read = service.read_by_name(created.name()).await?;
    eyre::ensure!(read == created, "round trip changed the task: {created:?} vs {read:?}");

    let in_range = service.read_by_expiration_range(submitted, submitted).await?;
    eyre::ensure!(
        in_range == [created],
        "range bounded by the submitted instant should find the task"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn second_insert_is_a_duplicate() -> eyre::Result<()> {
    let Some(ctx) = connect().await? else {
        return Ok(());
    };
    let created = task(TaskPayload::new("water plants"))?;
    ctx.store.insert(&created).await?;

    let result = ctx.store.insert(&created).await;
    eyre::ensure!(
        matches!(result, Err(TaskStoreError::DuplicateKey(ref id)) if id == created.id()),
        "expected duplicate key, got {result:?}"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unfinished_filter_includes_unset_flags() -> eyre::Result<()> {
    let Some(ctx) = connect().await? else {
        return Ok(());
    };
    ctx.store.insert(&task(TaskPayload::new("unset"))?).await?;
    ctx.store
        .insert(&task(TaskPayload::new("open").with_finished(false))?)
        .await?;
    ctx.store
        .insert(&task(TaskPayload::new("done").with_finished(true))?)
        .await?;

    let unfinished = ctx.store.find_matching(&TaskFilter::Finished(false)).await?;
    let names: Vec<&str> = unfinished.iter().map(|t| t.name().as_str()).collect();
    eyre::ensure!(names == ["open", "unset"], "unexpected unfinished tasks: {names:?}");

    let finished = ctx.store.find_by_finished(true).await?;
    eyre::ensure!(finished.len() == 1, "expected one finished task");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn update_many_applies_sparse_patch() -> eyre::Result<()> {
    let Some(ctx) = connect().await? else {
        return Ok(());
    };
    for task_name in ["a", "b", "c"] {
        ctx.store
            .insert(&task(TaskPayload::new(task_name).with_priority("important"))?)
            .await?;
    }
    ctx.store
        .insert(&task(TaskPayload::new("d").with_priority("urgent"))?)
        .await?;

    let patch = TaskPatch::new().with_finished(true);
    let updated = ctx
        .store
        .update_many(&TaskFilter::Priority(Priority::Important), &patch)
        .await?;
    eyre::ensure!(updated == 3, "expected 3 updates, got {updated}");

    let important = ctx.store.find_by_priority(Priority::Important).await?;
    eyre::ensure!(
        important
            .iter()
            .all(|t| t.finished() == Some(true) && t.priority() == Some(Priority::Important)),
        "patch should set finished and keep priority"
    );
    let untouched = ctx.store.find_by_name(&name("d")?).await?;
    eyre::ensure!(
        untouched.is_some_and(|t| t.finished().is_none()),
        "urgent task must not be touched"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn update_and_delete_report_missing_tasks() -> eyre::Result<()> {
    let Some(ctx) = connect().await? else {
        return Ok(());
    };
    let ghost = name("ghost")?;

    let update = ctx
        .store
        .update_one(&ghost, &TaskPatch::new().with_remind(false))
        .await;
    eyre::ensure!(
        matches!(update, Err(TaskStoreError::NotFound(_))),
        "expected NotFound, got {update:?}"
    );

    let deleted = ctx.store.delete_one(&ghost).await?;
    eyre::ensure!(deleted == 0, "nothing should be deleted");
    Ok(())
}
