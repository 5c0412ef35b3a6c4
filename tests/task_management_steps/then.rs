//! Then steps for task management BDD scenarios.

use super::world::{TaskManagementWorld, run_async};
use rstest_bdd_macros::then;
use tasklist::task::domain::{Priority, Task, TaskName};

fn read(world: &TaskManagementWorld, name: &str) -> Result<Task, eyre::Report> {
    let name = TaskName::new(name)?;
    Ok(run_async(world.service.read_by_name(&name))?)
}

#[then(r#"the task named "{name}" has priority "{priority}""#)]
fn task_has_priority(
    world: &TaskManagementWorld,
    name: String,
    priority: String,
) -> Result<(), eyre::Report> {
    let expected = Priority::parse(&priority)?;
    let task = read(world, &name)?;
    eyre::ensure!(
        task.priority() == Some(expected),
        "expected priority {expected}, found {:?}",
        task.priority()
    );
    Ok(())
}

#[then(r#"the task named "{name}" is finished"#)]
fn task_is_finished(world: &TaskManagementWorld, name: String) -> Result<(), eyre::Report> {
    let task = read(world, &name)?;
    eyre::ensure!(task.is_finished(), "task '{name}' should be finished");
    Ok(())
}

#[then(r#"the task named "{name}" is not finished"#)]
fn task_is_not_finished(world: &TaskManagementWorld, name: String) -> Result<(), eyre::Report> {
    let task = read(world, &name)?;
    eyre::ensure!(!task.is_finished(), "task '{name}' should not be finished");
    Ok(())
}

#[then(r#"the request fails with a "{kind}" error"#)]
fn request_fails(world: &TaskManagementWorld, kind: String) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the last request to fail"))?;
    eyre::ensure!(err.kind() == kind, "expected {kind} error, got {err:?}");
    Ok(())
}

#[then(r#"reading the task named "{name}" fails with a "{kind}" error"#)]
fn read_fails(world: &TaskManagementWorld, name: String, kind: String) -> Result<(), eyre::Report> {
    let name = TaskName::new(name)?;
    let result = run_async(world.service.read_by_name(&name));
    match result {
        Ok(task) => Err(eyre::eyre!("expected {kind} error, found {task:?}")),
        Err(err) if err.kind() == kind => Ok(()),
        Err(err) => Err(eyre::eyre!("expected {kind} error, got {err:?}")),
    }
}

#[then("{count:u64} tasks are reported updated")]
fn tasks_reported_updated(world: &TaskManagementWorld, count: u64) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.last_updated == Some(count),
        "expected {count} updated tasks, got {:?}",
        world.last_updated
    );
    Ok(())
}
