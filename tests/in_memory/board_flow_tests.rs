//! Integration tests for section allowlists and the task lifecycle.

use crewboard::board::{
    domain::{TaskPriority, TaskStatus},
    services::{CreateTaskRequest, TaskError, UpdateTaskRequest},
};
use crewboard::project::{domain::RolePermissions, services::CreateRoleRequest};
use eyre::Result;
use rstest::rstest;

use super::helpers::{App, app, register};

fn task_request(title: &str) -> CreateTaskRequest {
    CreateTaskRequest {
        title: title.to_owned(),
        description: None,
        priority: TaskPriority::Medium,
        deadline: None,
        assignees: Vec::new(),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owner_gated_sections_are_read_only_for_plain_members(app: App) -> Result<()> {
    let grace = register(&app, "grace@example.com", "grace", "Grace").await?;
    let linus = register(&app, "linus@example.com", "linus", "Linus").await?;
    let project = app.projects.create_project("P1", grace.id()).await?;
    app.projects
        .join_by_invite(project.invite_code(), linus.id())
        .await?;

    // Empty allowlist defaults to Owner-only.
    let section = app
        .sections
        .create_section(project.id(), grace.id(), "To Do", "#6366f1", Vec::new())
        .await?;

    let denied = app
        .tasks
        .create_task(section.id(), linus.id(), task_request("T1"))
        .await;
    assert!(matches!(denied, Err(TaskError::SectionEditDenied { .. })));

    let task = app
        .tasks
        .create_task(section.id(), grace.id(), task_request("T1"))
        .await?;
    let update_denied = app
        .tasks
        .update_task(
            task.id(),
            linus.id(),
            UpdateTaskRequest {
                title: "Hijacked".to_owned(),
                description: None,
                priority: TaskPriority::Low,
                deadline: None,
            },
        )
        .await;
    assert!(matches!(update_denied, Err(TaskError::SectionEditDenied { .. })));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn allowlisted_roles_may_edit_and_move_tasks(app: App) -> Result<()> {
    let grace = register(&app, "grace@example.com", "grace", "Grace").await?;
    let linus = register(&app, "linus@example.com", "linus", "Linus").await?;
    let project = app.projects.create_project("Apollo", grace.id()).await?;
    app.projects
        .join_by_invite(project.invite_code(), linus.id())
        .await?;

    let reviewer = app
        .roles
        .create_role(
            project.id(),
            grace.id(),
            CreateRoleRequest {
                name: "Reviewer".to_owned(),
                color: None,
                permissions: RolePermissions::none(),
            },
        )
        .await?;
    app.roles
        .toggle_member_role(project.id(), grace.id(), linus.id(), reviewer.id())
        .await?;

    let backlog = app
        .sections
        .create_section(
            project.id(),
            grace.id(),
            "Backlog",
            "#6366f1",
            vec![reviewer.name().clone()],
        )
        .await?;
    let review = app
        .sections
        .create_section(
            project.id(),
            grace.id(),
            "Review",
            "#10b981",
            vec![reviewer.name().clone()],
        )
        .await?;

    let task = app
        .tasks
        .create_task(backlog.id(), linus.id(), task_request("Review the docs"))
        .await?;
    let moved = app.tasks.move_task(task.id(), linus.id(), review.id()).await?;
    assert_eq!(moved.section_id(), review.id());

    let status = app.tasks.toggle_status(task.id(), linus.id()).await?;
    assert_eq!(status, TaskStatus::Done);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_deletion_requires_the_delete_task_permission(app: App) -> Result<()> {
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
        .create_task(section.id(), grace.id(), task_request("T1"))
        .await?;

    let denied = app.tasks.delete_task(task.id(), linus.id()).await;
    assert!(matches!(denied, Err(TaskError::PermissionDenied { .. })));

    app.tasks.delete_task(task.id(), grace.id()).await?;
    assert!(app.tasks.find_task(task.id()).await?.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn section_listings_carry_resolved_assignee_cards(app: App) -> Result<()> {
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
    let mut request = task_request("T1");
    request.assignees = vec![linus.id(), grace.id()];
    app.tasks
        .create_task(section.id(), grace.id(), request)
        .await?;

    let views = app.tasks.tasks_in_section(section.id()).await?;
    assert_eq!(views.len(), 1);
    let view = views.first().expect("one task view");
    let names: Vec<&str> = view
        .assignees
        .iter()
        .map(|card| card.display_name.as_str())
        .collect();
    assert_eq!(names, vec!["Linus", "Grace"]);
    Ok(())
}
