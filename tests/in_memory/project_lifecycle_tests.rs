//! Integration tests for project creation, joining, leaving, and the
//! deletion cascade.

use crewboard::board::services::CreateTaskRequest;
use crewboard::board::domain::TaskPriority;
use crewboard::project::services::ProjectError;
use eyre::Result;
use rstest::rstest;

use super::helpers::{App, app, register};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invite_codes_take_new_members_through_the_full_flow(app: App) -> Result<()> {
    let grace = register(&app, "grace@example.com", "grace", "Grace").await?;
    let linus = register(&app, "linus@example.com", "linus", "Linus").await?;

    let project = app.projects.create_project("Apollo", grace.id()).await?;
    let joined = app
        .projects
        .join_by_invite(project.invite_code(), linus.id())
        .await?;
    assert_eq!(joined.id(), project.id());

    let members = app.projects.members_of(project.id()).await?;
    assert_eq!(members.len(), 2);

    let linus_projects = app.projects.projects_of(linus.id()).await?;
    assert_eq!(linus_projects.len(), 1);
    assert!(
        linus_projects
            .first()
            .is_some_and(|summary| summary.project.id() == project.id())
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn leaving_members_are_unassigned_from_their_tasks(app: App) -> Result<()> {
    let grace = register(&app, "grace@example.com", "grace", "Grace").await?;
    let linus = register(&app, "linus@example.com", "linus", "Linus").await?;
    let project = app.projects.create_project("Apollo", grace.id()).await?;
    app.projects
        .join_by_invite(project.invite_code(), linus.id())
        .await?;

    let section = app
        .sections
        .create_section(project.id(), grace.id(), "To Do", "#6366f1", Vec::new())
        .await?;
    let task = app
        .tasks
        .create_task(
            section.id(),
            grace.id(),
            CreateTaskRequest {
                title: "T1".to_owned(),
                description: None,
                priority: TaskPriority::Medium,
                deadline: None,
                assignees: vec![linus.id()],
            },
        )
        .await?;

    app.projects.leave_project(project.id(), linus.id()).await?;

    let task = app
        .tasks
        .find_task(task.id())
        .await?
        .expect("task should survive the member leaving");
    assert!(task.assignees().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_project_leaves_no_orphans(app: App) -> Result<()> {
    let grace = register(&app, "grace@example.com", "grace", "Grace").await?;
    let project = app.projects.create_project("Apollo", grace.id()).await?;
    let section = app
        .sections
        .create_section(project.id(), grace.id(), "To Do", "#6366f1", Vec::new())
        .await?;
    let task = app
        .tasks
        .create_task(
            section.id(),
            grace.id(),
            CreateTaskRequest {
                title: "T1".to_owned(),
                description: None,
                priority: TaskPriority::High,
                deadline: None,
                assignees: Vec::new(),
            },
        )
        .await?;
    app.comments
        .post_comment(task.id(), grace.id(), "kicking off")
        .await?;

    app.projects.delete_project(project.id(), grace.id()).await?;

    assert!(app.projects.find_project(project.id()).await?.is_none());
    assert!(app.sections.sections_of(project.id()).await?.is_empty());
    assert!(app.tasks.find_task(task.id()).await?.is_none());
    assert_eq!(app.comments.comment_count(task.id()).await?, 0);

    let members = app.projects.members_of(project.id()).await;
    assert!(matches!(members, Err(ProjectError::ProjectNotFound(_))));
    Ok(())
}
