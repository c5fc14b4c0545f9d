//! Integration tests for deadline sweeps and work tracking.

use chrono::{TimeDelta, Utc};
use crewboard::board::{
    domain::{TaskPriority, TaskStatus},
    services::{CreateTaskRequest, WorkError},
};
use eyre::Result;
use rstest::rstest;

use super::helpers::{App, app, register};

fn dated_task(title: &str, days_from_now: i64) -> CreateTaskRequest {
    CreateTaskRequest {
        title: title.to_owned(),
        description: None,
        priority: TaskPriority::High,
        deadline: Some(Utc::now() + TimeDelta::days(days_from_now)),
        assignees: Vec::new(),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sweep_fails_expired_tasks_and_spares_the_rest(app: App) -> Result<()> {
    let grace = register(&app, "grace@example.com", "grace", "Grace").await?;
    let project = app.projects.create_project("Apollo", grace.id()).await?;
    let section = app
        .sections
        .create_section(project.id(), grace.id(), "To Do", "#6366f1", Vec::new())
        .await?;

    let expired = app
        .tasks
        .create_task(section.id(), grace.id(), dated_task("Ship it", -2))
        .await?;
    let upcoming = app
        .tasks
        .create_task(section.id(), grace.id(), dated_task("Plan it", 2))
        .await?;
    let done = app
        .tasks
        .create_task(section.id(), grace.id(), dated_task("Already shipped", -2))
        .await?;
    app.tasks.toggle_status(done.id(), grace.id()).await?;

    let failed = app.deadlines.sweep_expired(project.id()).await?;
    assert_eq!(failed, 1);

    let swept = app
        .tasks
        .find_task(expired.id())
        .await?
        .expect("swept task present");
    assert_eq!(swept.status(), TaskStatus::Failed);
    let spared = app
        .tasks
        .find_task(upcoming.id())
        .await?
        .expect("upcoming task present");
    assert_eq!(spared.status(), TaskStatus::Active);

    // A second pass finds nothing left to fail.
    assert_eq!(app.deadlines.sweep_expired(project.id()).await?, 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overdue_listing_excludes_completed_tasks(app: App) -> Result<()> {
    let grace = register(&app, "grace@example.com", "grace", "Grace").await?;
    let project = app.projects.create_project("Apollo", grace.id()).await?;
    let section = app
        .sections
        .create_section(project.id(), grace.id(), "To Do", "#6366f1", Vec::new())
        .await?;

    let late = app
        .tasks
        .create_task(section.id(), grace.id(), dated_task("Late", -3))
        .await?;
    let finished = app
        .tasks
        .create_task(section.id(), grace.id(), dated_task("Finished", -3))
        .await?;
    app.tasks.toggle_status(finished.id(), grace.id()).await?;

    let overdue = app.deadlines.overdue_tasks(project.id()).await?;
    let ids: Vec<_> = overdue.iter().map(|task| task.id()).collect();
    assert_eq!(ids, vec![late.id()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sweeping_a_working_task_clears_its_workers(app: App) -> Result<()> {
    let grace = register(&app, "grace@example.com", "grace", "Grace").await?;
    let linus = register(&app, "linus@example.com", "linus", "Linus").await?;
    let project = app.projects.create_project("Apollo", grace.id()).await?;
    app.projects
        .join_by_invite(project.invite_code(), linus.id())
        .await?;
    let section = app
        .sections
        .create_section(
            project.id(),
            grace.id(),
            "Doing",
            "#6366f1",
            vec![crewboard::project::domain::RoleName::member()],
        )
        .await?;

    let mut request = dated_task("Hot fix", -1);
    request.assignees = vec![linus.id()];
    let task = app
        .tasks
        .create_task(section.id(), grace.id(), request)
        .await?;
    app.work.start_working(task.id(), linus.id()).await?;
    assert_eq!(
        app.work.tasks_in_progress(project.id(), linus.id()).await?.len(),
        1
    );

    app.deadlines.sweep_expired(project.id()).await?;

    assert!(
        app.work
            .tasks_in_progress(project.id(), linus.id())
            .await?
            .is_empty()
    );
    let resume = app.work.start_working(task.id(), linus.id()).await;
    assert!(matches!(resume, Err(WorkError::Domain(_))));
    Ok(())
}
