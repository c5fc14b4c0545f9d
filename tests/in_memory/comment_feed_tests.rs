//! Integration tests for comments and the change feed.

use crewboard::board::{
    domain::{Comment, CommentBody, TaskPriority},
    services::{CommentError, CreateTaskRequest},
};
use crewboard::events::StoreEvent;
use eyre::Result;
use mockable::DefaultClock;
use rstest::rstest;

use super::helpers::{App, app, register};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn posted_comments_reach_feed_subscribers(app: App) -> Result<()> {
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
                priority: TaskPriority::Medium,
                deadline: None,
                assignees: Vec::new(),
            },
        )
        .await?;

    let mut feed = app.comments.subscribe();
    let posted = app
        .comments
        .post_comment(task.id(), grace.id(), "Looks good to me")
        .await?;
    assert_eq!(posted.author_name(), "Grace");

    let event = feed.recv().await.expect("feed event");
    let StoreEvent::CommentPosted(comment) = event else {
        panic!("expected a comment event, got {event:?}");
    };
    assert_eq!(comment.id(), posted.id());
    assert_eq!(comment.body().as_str(), "Looks good to me");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outsiders_cannot_comment(app: App) -> Result<()> {
    let grace = register(&app, "grace@example.com", "grace", "Grace").await?;
    let mallory = register(&app, "mallory@example.com", "mallory", "Mallory").await?;
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
                priority: TaskPriority::Medium,
                deadline: None,
                assignees: Vec::new(),
            },
        )
        .await?;

    let denied = app
        .comments
        .post_comment(task.id(), mallory.id(), "Let me in")
        .await;
    assert!(matches!(denied, Err(CommentError::NotAProjectMember { .. })));
    assert_eq!(app.comments.comment_count(task.id()).await?, 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn merging_a_known_comment_is_a_no_op(app: App) -> Result<()> {
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
                priority: TaskPriority::Medium,
                deadline: None,
                assignees: Vec::new(),
            },
        )
        .await?;

    let body = CommentBody::new("Synced from elsewhere")?;
    let external = Comment::new(task.id(), grace.id(), "Grace", body, &DefaultClock);
    assert!(app.comments.merge_external(external.clone()).await?);
    assert!(!app.comments.merge_external(external).await?);
    assert_eq!(app.comments.comment_count(task.id()).await?, 1);
    Ok(())
}
