//! Integration tests for project-wide task search.

use crewboard::board::{domain::TaskPriority, services::CreateTaskRequest};
use eyre::Result;
use rstest::rstest;

use super::helpers::{App, app, register};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_spans_titles_descriptions_and_assignee_names(app: App) -> Result<()> {
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

    app.tasks
        .create_task(
            section.id(),
            grace.id(),
            CreateTaskRequest {
                title: "Fix login page".to_owned(),
                description: Some("The auth token expires too early".to_owned()),
                priority: TaskPriority::High,
                deadline: None,
                assignees: vec![linus.id()],
            },
        )
        .await?;
    app.tasks
        .create_task(
            section.id(),
            grace.id(),
            CreateTaskRequest {
                title: "Write release notes".to_owned(),
                description: None,
                priority: TaskPriority::Low,
                deadline: None,
                assignees: Vec::new(),
            },
        )
        .await?;

    let by_title = app.search.search(project.id(), "LOGIN").await?;
    assert_eq!(by_title.len(), 1);
    let hit = by_title.first().expect("title hit");
    assert_eq!(hit.section_name, "To Do");
    assert_eq!(hit.section_color.as_str(), "#6366f1");

    let by_description = app.search.search(project.id(), "auth token").await?;
    assert_eq!(by_description.len(), 1);

    let by_assignee = app.search.search(project.id(), "linus").await?;
    assert_eq!(by_assignee.len(), 1);

    assert!(app.search.search(project.id(), "   ").await?.is_empty());
    assert!(app.search.search(project.id(), "kubernetes").await?.is_empty());
    Ok(())
}
