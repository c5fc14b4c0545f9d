//! Service orchestration tests for the board, driven through the real
//! access evaluator over in-memory repositories.

use std::sync::Arc;

use crate::board::{
    adapters::{
        RepositoryUserDirectory,
        memory::{InMemoryCommentRepository, InMemorySectionRepository, InMemoryTaskRepository},
    },
    domain::{BoardDomainError, TaskPriority, TaskStatus},
    services::{
        CommentError, CommentService, CreateTaskRequest, DeadlineService, SearchService,
        SectionError, SectionService, TaskError, TaskService, WorkError, WorkTrackingService,
    },
};
use crate::events::ChangeFeed;
use crate::identity::{
    adapters::memory::InMemoryUserRepository,
    domain::{DisplayName, EmailAddress, User, UserId, Username},
    ports::UserRepository,
};
use crate::project::{
    adapters::memory::{
        InMemoryMembershipRepository, InMemoryProjectRepository, InMemoryRoleRepository,
    },
    domain::{Membership, Project, ProjectName, ProjectRole},
    ports::{MembershipRepository, ProjectRepository, RoleRepository},
    services::AccessEvaluator,
};
use chrono::{TimeDelta, Utc};
use eyre::Result;
use mockable::DefaultClock;
use rstest::rstest;

type Sections =
    SectionService<InMemorySectionRepository, InMemoryTaskRepository, InMemoryCommentRepository, DefaultClock>;
type Tasks =
    TaskService<InMemorySectionRepository, InMemoryTaskRepository, InMemoryCommentRepository, DefaultClock>;
type Work = WorkTrackingService<InMemorySectionRepository, InMemoryTaskRepository, DefaultClock>;
type Deadlines = DeadlineService<InMemoryTaskRepository, DefaultClock>;
type Search = SearchService<InMemorySectionRepository, InMemoryTaskRepository>;
type Comments =
    CommentService<InMemoryTaskRepository, InMemoryCommentRepository, DefaultClock>;

struct BoardHarness {
    sections: Sections,
    tasks: Tasks,
    work: Work,
    deadlines: Deadlines,
    search: Search,
    comments: Comments,
    project: Project,
    creator: UserId,
    member: UserId,
}

async fn register_user(
    users: &InMemoryUserRepository,
    email: &str,
    username: &str,
    display_name: &str,
) -> Result<UserId> {
    let user = User::register(
        EmailAddress::new(email)?,
        Username::new(username)?,
        DisplayName::new(display_name)?,
        DisplayName::new("Tester")?,
        &DefaultClock,
    );
    users.store(&user).await?;
    Ok(user.id())
}

/// Seeds a project with its creator and one plain member, then builds
/// every board service over shared in-memory repositories.
async fn harness() -> Result<BoardHarness> {
    let users = Arc::new(InMemoryUserRepository::new());
    let creator = register_user(&users, "grace@example.com", "grace", "Grace").await?;
    let member = register_user(&users, "linus@example.com", "linus", "Linus").await?;

    let projects = Arc::new(InMemoryProjectRepository::new());
    let memberships = Arc::new(InMemoryMembershipRepository::new());
    let roles = Arc::new(InMemoryRoleRepository::new());

    let project = Project::new(ProjectName::new("Apollo")?, creator, &DefaultClock);
    projects.store(&project).await?;
    roles
        .store(&ProjectRole::owner(project.id(), &DefaultClock))
        .await?;
    roles
        .store(&ProjectRole::member(project.id(), &DefaultClock))
        .await?;
    memberships
        .store(&Membership::owner(project.id(), creator, &DefaultClock))
        .await?;
    memberships
        .store(&Membership::joining(project.id(), member, &DefaultClock))
        .await?;

    let access = Arc::new(AccessEvaluator::new(projects, memberships, roles));
    let directory = Arc::new(RepositoryUserDirectory::new(users));

    let section_repo = Arc::new(InMemorySectionRepository::new());
    let task_repo = Arc::new(InMemoryTaskRepository::new());
    let comment_repo = Arc::new(InMemoryCommentRepository::new());
    let clock = Arc::new(DefaultClock);
    let feed = ChangeFeed::new();

    Ok(BoardHarness {
        sections: SectionService::new(
            Arc::clone(&section_repo),
            Arc::clone(&task_repo),
            Arc::clone(&comment_repo),
            access.clone(),
            Arc::clone(&clock),
            feed.clone(),
        ),
        tasks: TaskService::new(
            Arc::clone(&section_repo),
            Arc::clone(&task_repo),
            Arc::clone(&comment_repo),
            access.clone(),
            directory.clone(),
            Arc::clone(&clock),
            feed.clone(),
        ),
        work: WorkTrackingService::new(
            Arc::clone(&section_repo),
            Arc::clone(&task_repo),
            access.clone(),
            directory.clone(),
            Arc::clone(&clock),
            feed.clone(),
        ),
        deadlines: DeadlineService::new(Arc::clone(&task_repo), Arc::clone(&clock), feed.clone()),
        search: SearchService::new(
            Arc::clone(&section_repo),
            Arc::clone(&task_repo),
            directory.clone(),
        ),
        comments: CommentService::new(
            task_repo,
            comment_repo,
            access,
            directory,
            clock,
            feed,
        ),
        project,
        creator,
        member,
    })
}

fn task_request(title: &str, assignees: Vec<UserId>) -> CreateTaskRequest {
    CreateTaskRequest {
        title: title.to_owned(),
        description: None,
        priority: TaskPriority::Medium,
        deadline: None,
        assignees,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn plain_members_cannot_create_sections() -> Result<()> {
    let fixture = harness().await?;

    let denied = fixture
        .sections
        .create_section(fixture.project.id(), fixture.member, "To Do", "#6366f1", Vec::new())
        .await;
    assert!(matches!(denied, Err(SectionError::PermissionDenied { .. })));

    fixture
        .sections
        .create_section(fixture.project.id(), fixture.creator, "To Do", "#6366f1", Vec::new())
        .await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owner_gated_sections_reject_plain_member_edits() -> Result<()> {
    let fixture = harness().await?;
    // Empty allowlist defaults to Owner-only.
    let section = fixture
        .sections
        .create_section(fixture.project.id(), fixture.creator, "To Do", "#6366f1", Vec::new())
        .await?;

    let denied = fixture
        .tasks
        .create_task(
            section.id(),
            fixture.member,
            task_request("T1", vec![fixture.member]),
        )
        .await;
    assert!(matches!(denied, Err(TaskError::SectionEditDenied { .. })));

    fixture
        .tasks
        .create_task(
            section.id(),
            fixture.creator,
            task_request("T1", vec![fixture.member]),
        )
        .await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_section_cascades_to_tasks_and_comments() -> Result<()> {
    let fixture = harness().await?;
    let section = fixture
        .sections
        .create_section(fixture.project.id(), fixture.creator, "To Do", "#6366f1", Vec::new())
        .await?;
    let task = fixture
        .tasks
        .create_task(section.id(), fixture.creator, task_request("T1", Vec::new()))
        .await?;
    fixture
        .comments
        .post_comment(task.id(), fixture.creator, "first!")
        .await?;

    fixture
        .sections
        .delete_section(section.id(), fixture.creator)
        .await?;

    assert!(fixture.tasks.find_task(task.id()).await?.is_none());
    assert_eq!(fixture.comments.comment_count(task.id()).await?, 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn work_tracking_enforces_assignment_and_section_rights() -> Result<()> {
    let fixture = harness().await?;
    // Member-editable section.
    let section = fixture
        .sections
        .create_section(
            fixture.project.id(),
            fixture.creator,
            "Doing",
            "#10b981",
            vec![crate::project::domain::RoleName::member()],
        )
        .await?;

    let unassigned = fixture
        .tasks
        .create_task(section.id(), fixture.creator, task_request("T1", Vec::new()))
        .await?;
    assert!(!fixture.work.can_work_on(unassigned.id(), fixture.member).await?);
    let denied = fixture
        .work
        .start_working(unassigned.id(), fixture.member)
        .await;
    assert!(matches!(denied, Err(WorkError::NotAssigned { .. })));

    let assigned = fixture
        .tasks
        .create_task(
            section.id(),
            fixture.creator,
            task_request("T2", vec![fixture.member]),
        )
        .await?;
    assert!(fixture.work.can_work_on(assigned.id(), fixture.member).await?);

    let task = fixture
        .work
        .start_working(assigned.id(), fixture.member)
        .await?;
    assert_eq!(task.working(), &[fixture.member]);
    assert!(task.working_started().is_some());

    // Idempotent repeat.
    fixture
        .work
        .start_working(assigned.id(), fixture.member)
        .await?;

    let workers = fixture.work.workers_of(assigned.id()).await?;
    assert_eq!(workers.len(), 1);
    assert!(workers.first().is_some_and(|card| card.display_name == "Linus"));

    let stopped = fixture
        .work
        .stop_working(assigned.id(), fixture.member)
        .await?;
    assert!(stopped.working().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sweep_fails_tasks_overdue_before_end_of_today() -> Result<()> {
    let fixture = harness().await?;
    let section = fixture
        .sections
        .create_section(fixture.project.id(), fixture.creator, "To Do", "#6366f1", Vec::new())
        .await?;

    let mut overdue = task_request("Yesterday", vec![fixture.creator]);
    overdue.deadline = Some(Utc::now() - TimeDelta::days(1));
    let overdue = fixture
        .tasks
        .create_task(section.id(), fixture.creator, overdue)
        .await?;
    fixture
        .work
        .start_working(overdue.id(), fixture.creator)
        .await?;

    let mut upcoming = task_request("Next week", Vec::new());
    upcoming.deadline = Some(Utc::now() + TimeDelta::days(7));
    let upcoming = fixture
        .tasks
        .create_task(section.id(), fixture.creator, upcoming)
        .await?;

    assert_eq!(fixture.deadlines.sweep_expired(fixture.project.id()).await?, 1);

    let failed = fixture.deadlines.failed_tasks(fixture.project.id()).await?;
    assert_eq!(failed.len(), 1);
    let swept = failed.first().expect("one failed task");
    assert_eq!(swept.id(), overdue.id());
    assert!(swept.working().is_empty());

    let survivor = fixture
        .tasks
        .find_task(upcoming.id())
        .await?
        .expect("upcoming task should survive");
    assert_eq!(survivor.status(), TaskStatus::Active);

    // A second sweep finds nothing new.
    assert_eq!(fixture.deadlines.sweep_expired(fixture.project.id()).await?, 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_tasks_cannot_be_toggled() -> Result<()> {
    let fixture = harness().await?;
    let section = fixture
        .sections
        .create_section(fixture.project.id(), fixture.creator, "To Do", "#6366f1", Vec::new())
        .await?;
    let mut request = task_request("Late", Vec::new());
    request.deadline = Some(Utc::now() - TimeDelta::days(1));
    let task = fixture
        .tasks
        .create_task(section.id(), fixture.creator, request)
        .await?;
    fixture.deadlines.sweep_expired(fixture.project.id()).await?;

    let result = fixture.tasks.toggle_status(task.id(), fixture.creator).await;
    assert!(matches!(
        result,
        Err(TaskError::Domain(
            BoardDomainError::InvalidStatusTransition { .. }
        ))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_matches_title_description_and_assignee_names() -> Result<()> {
    let fixture = harness().await?;
    let section = fixture
        .sections
        .create_section(fixture.project.id(), fixture.creator, "To Do", "#6366f1", Vec::new())
        .await?;

    let mut described = task_request("Ship release", Vec::new());
    described.description = Some("Update the AUTH docs".to_owned());
    fixture
        .tasks
        .create_task(section.id(), fixture.creator, described)
        .await?;
    fixture
        .tasks
        .create_task(
            section.id(),
            fixture.creator,
            task_request("Implement authentication", Vec::new()),
        )
        .await?;
    fixture
        .tasks
        .create_task(
            section.id(),
            fixture.creator,
            task_request("Fix build", vec![fixture.member]),
        )
        .await?;

    let by_title = fixture.search.search(fixture.project.id(), "auth").await?;
    assert_eq!(by_title.len(), 2);
    assert!(by_title.iter().all(|hit| hit.section_name == "To Do"));

    let by_assignee = fixture.search.search(fixture.project.id(), "LINUS").await?;
    assert_eq!(by_assignee.len(), 1);

    assert!(fixture.search.search(fixture.project.id(), "nomatch").await?.is_empty());
    assert!(fixture.search.search(fixture.project.id(), "   ").await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comments_require_project_membership() -> Result<()> {
    let fixture = harness().await?;
    let section = fixture
        .sections
        .create_section(fixture.project.id(), fixture.creator, "To Do", "#6366f1", Vec::new())
        .await?;
    let task = fixture
        .tasks
        .create_task(section.id(), fixture.creator, task_request("T1", Vec::new()))
        .await?;

    let outsider = UserId::new();
    let denied = fixture
        .comments
        .post_comment(task.id(), outsider, "hello")
        .await;
    assert!(matches!(denied, Err(CommentError::NotAProjectMember { .. })));

    let posted = fixture
        .comments
        .post_comment(task.id(), fixture.member, "on it")
        .await?;
    assert_eq!(posted.author_name(), "Linus");

    // Re-merging the same comment from the realtime feed is a no-op.
    assert!(!fixture.comments.merge_external(posted).await?);
    assert_eq!(fixture.comments.comment_count(task.id()).await?, 1);
    Ok(())
}
