//! Shared wiring for in-memory integration tests.
//!
//! Builds the whole application over the in-memory adapters: identity,
//! project, and board services share one set of repositories, the real
//! access evaluator, and the real board gateway, so cross-context cascades
//! run exactly as they would in production wiring.

use std::sync::Arc;

use crewboard::board::{
    adapters::{
        RepositoryBoardGateway, RepositoryUserDirectory,
        memory::{InMemoryCommentRepository, InMemorySectionRepository, InMemoryTaskRepository},
    },
    services::{
        CommentService, DeadlineService, SearchService, SectionService, TaskService,
        WorkTrackingService,
    },
};
use crewboard::events::ChangeFeed;
use crewboard::identity::{
    adapters::memory::{InMemoryCredentialStore, InMemoryUserRepository},
    domain::User,
    services::{AccountService, RegisterAccountRequest},
};
use crewboard::project::{
    adapters::memory::{
        InMemoryMembershipRepository, InMemoryProjectRepository, InMemoryRoleRepository,
    },
    services::{AccessEvaluator, ProjectService, RoleService},
};
use eyre::Result;
use mockable::DefaultClock;
use rstest::fixture;

type Gateway = RepositoryBoardGateway<
    InMemorySectionRepository,
    InMemoryTaskRepository,
    InMemoryCommentRepository,
    DefaultClock,
>;

/// Account service over in-memory adapters.
pub type Accounts =
    AccountService<InMemoryUserRepository, InMemoryCredentialStore, DefaultClock>;

/// Project service over in-memory adapters and the real board gateway.
pub type Projects = ProjectService<
    InMemoryProjectRepository,
    InMemoryMembershipRepository,
    InMemoryRoleRepository,
    Gateway,
    DefaultClock,
>;

/// Role service over in-memory adapters and the real board gateway.
pub type Roles = RoleService<
    InMemoryProjectRepository,
    InMemoryMembershipRepository,
    InMemoryRoleRepository,
    Gateway,
    DefaultClock,
>;

/// Section service over in-memory adapters.
pub type Sections = SectionService<
    InMemorySectionRepository,
    InMemoryTaskRepository,
    InMemoryCommentRepository,
    DefaultClock,
>;

/// Task service over in-memory adapters.
pub type Tasks = TaskService<
    InMemorySectionRepository,
    InMemoryTaskRepository,
    InMemoryCommentRepository,
    DefaultClock,
>;

/// Work tracking service over in-memory adapters.
pub type Work =
    WorkTrackingService<InMemorySectionRepository, InMemoryTaskRepository, DefaultClock>;

/// Deadline service over in-memory adapters.
pub type Deadlines = DeadlineService<InMemoryTaskRepository, DefaultClock>;

/// Search service over in-memory adapters.
pub type Search = SearchService<InMemorySectionRepository, InMemoryTaskRepository>;

/// Comment service over in-memory adapters.
pub type Comments =
    CommentService<InMemoryTaskRepository, InMemoryCommentRepository, DefaultClock>;

/// The fully wired application.
pub struct App {
    /// Identity services.
    pub accounts: Accounts,
    /// Project lifecycle services.
    pub projects: Projects,
    /// Role administration services.
    pub roles: Roles,
    /// Section services.
    pub sections: Sections,
    /// Task services.
    pub tasks: Tasks,
    /// Work tracking services.
    pub work: Work,
    /// Deadline services.
    pub deadlines: Deadlines,
    /// Search services.
    pub search: Search,
    /// Comment services.
    pub comments: Comments,
    /// Shared change feed.
    pub feed: ChangeFeed,
}

/// Builds a fresh application over empty in-memory repositories.
#[fixture]
#[must_use]
pub fn app() -> App {
    let clock = Arc::new(DefaultClock);
    let feed = ChangeFeed::new();

    let users = Arc::new(InMemoryUserRepository::new());
    let credentials = Arc::new(InMemoryCredentialStore::new());
    let project_repo = Arc::new(InMemoryProjectRepository::new());
    let membership_repo = Arc::new(InMemoryMembershipRepository::new());
    let role_repo = Arc::new(InMemoryRoleRepository::new());
    let section_repo = Arc::new(InMemorySectionRepository::new());
    let task_repo = Arc::new(InMemoryTaskRepository::new());
    let comment_repo = Arc::new(InMemoryCommentRepository::new());

    let access = Arc::new(AccessEvaluator::new(
        Arc::clone(&project_repo),
        Arc::clone(&membership_repo),
        Arc::clone(&role_repo),
    ));
    let directory = Arc::new(RepositoryUserDirectory::new(Arc::clone(&users)));
    let gateway = Arc::new(RepositoryBoardGateway::new(
        Arc::clone(&section_repo),
        Arc::clone(&task_repo),
        Arc::clone(&comment_repo),
        Arc::clone(&clock),
    ));

    App {
        accounts: AccountService::new(users, credentials, Arc::clone(&clock)),
        projects: ProjectService::new(
            Arc::clone(&project_repo),
            Arc::clone(&membership_repo),
            Arc::clone(&role_repo),
            Arc::clone(&gateway),
            Arc::clone(&clock),
            feed.clone(),
        ),
        roles: RoleService::new(
            project_repo,
            membership_repo,
            role_repo,
            gateway,
            Arc::clone(&clock),
            feed.clone(),
        ),
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
        search: SearchService::new(section_repo, Arc::clone(&task_repo), directory.clone()),
        comments: CommentService::new(
            task_repo,
            comment_repo,
            access,
            directory,
            clock,
            feed.clone(),
        ),
        feed,
    }
}

/// Registers an account with a default password.
///
/// # Errors
///
/// Returns an error when registration fails.
pub async fn register(app: &App, email: &str, username: &str, display_name: &str) -> Result<User> {
    let user = app
        .accounts
        .register(RegisterAccountRequest::new(
            email,
            username,
            display_name,
            "Tester",
            "s3cret",
        ))
        .await?;
    Ok(user)
}
