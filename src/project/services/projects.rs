//! Project lifecycle orchestration.

use crate::events::{ChangeFeed, StoreEvent};
use crate::identity::domain::UserId;
use crate::project::{
    domain::{
        InviteCode, Membership, Project, ProjectDomainError, ProjectId, ProjectName, ProjectRole,
    },
    ports::{
        BoardGateway, BoardGatewayError, MembershipRepository, MembershipRepositoryError,
        ProjectRepository, ProjectRepositoryError, RoleRepository, RoleRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project service operations.
pub type ProjectResult<T> = Result<T, ProjectError>;

/// Errors surfaced by the project service.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// Domain validation failure.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),

    /// Project repository failure.
    #[error(transparent)]
    Projects(#[from] ProjectRepositoryError),

    /// Membership repository failure.
    #[error(transparent)]
    Memberships(#[from] MembershipRepositoryError),

    /// Role repository failure.
    #[error(transparent)]
    Roles(#[from] RoleRepositoryError),

    /// Board-side cascade failure.
    #[error(transparent)]
    Board(#[from] BoardGatewayError),

    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// No project carries the given invite code.
    #[error("unknown invite code: {0}")]
    UnknownInviteCode(InviteCode),

    /// The user does not belong to the project.
    #[error("user {user_id} is not a member of project {project_id}")]
    NotAMember {
        /// Project looked up.
        project_id: ProjectId,
        /// User looked up.
        user_id: UserId,
    },

    /// Only the creator may delete the project.
    #[error("only the creator may delete project {0}")]
    NotCreator(ProjectId),

    /// The creator cannot leave their own project.
    #[error("the creator cannot leave project {0}")]
    CreatorCannotLeave(ProjectId),
}

/// A project together with the asking user's membership in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    /// The project.
    pub project: Project,
    /// The asking user's membership.
    pub membership: Membership,
}

/// Orchestrates project creation, joining, leaving, and deletion.
///
/// Every mutation returns a `Result`; callers decide how failures reach the
/// user. Committed writes are announced on the shared [`ChangeFeed`].
pub struct ProjectService<P, M, R, G, C>
where
    P: ProjectRepository,
    M: MembershipRepository,
    R: RoleRepository,
    G: BoardGateway,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    memberships: Arc<M>,
    roles: Arc<R>,
    board: Arc<G>,
    clock: Arc<C>,
    feed: ChangeFeed,
}

impl<P, M, R, G, C> ProjectService<P, M, R, G, C>
where
    P: ProjectRepository,
    M: MembershipRepository,
    R: RoleRepository,
    G: BoardGateway,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(
        projects: Arc<P>,
        memberships: Arc<M>,
        roles: Arc<R>,
        board: Arc<G>,
        clock: Arc<C>,
        feed: ChangeFeed,
    ) -> Self {
        Self {
            projects,
            memberships,
            roles,
            board,
            clock,
            feed,
        }
    }

    /// Creates a project, seeding the `Owner` and `Member` roles and the
    /// creator's `Owner` membership.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Domain`] for an invalid name and repository
    /// errors for persistence failures.
    pub async fn create_project(
        &self,
        name: impl Into<String> + Send,
        creator: UserId,
    ) -> ProjectResult<Project> {
        let name = ProjectName::new(name)?;
        let project = Project::new(name, creator, self.clock.as_ref());

        self.projects.store(&project).await?;
        self.roles
            .store(&ProjectRole::owner(project.id(), self.clock.as_ref()))
            .await?;
        self.roles
            .store(&ProjectRole::member(project.id(), self.clock.as_ref()))
            .await?;
        self.memberships
            .store(&Membership::owner(project.id(), creator, self.clock.as_ref()))
            .await?;

        tracing::info!(project_id = %project.id(), %creator, "project created");
        self.feed.publish(StoreEvent::ProjectsChanged(project.id()));
        Ok(project)
    }

    /// Joins a project through its invite code.
    ///
    /// Joining a project the user already belongs to is a no-op that
    /// returns the project unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::UnknownInviteCode`] when no project carries
    /// the code.
    pub async fn join_by_invite(&self, code: &InviteCode, user_id: UserId) -> ProjectResult<Project> {
        let project = self
            .projects
            .find_by_invite_code(code)
            .await?
            .ok_or_else(|| ProjectError::UnknownInviteCode(code.clone()))?;

        if self.memberships.find(project.id(), user_id).await?.is_some() {
            return Ok(project);
        }

        self.memberships
            .store(&Membership::joining(
                project.id(),
                user_id,
                self.clock.as_ref(),
            ))
            .await?;

        tracing::info!(project_id = %project.id(), %user_id, "member joined");
        self.feed.publish(StoreEvent::MembersChanged(project.id()));
        Ok(project)
    }

    /// Leaves a project, unassigning the user from its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::CreatorCannotLeave`] for the creator and
    /// [`ProjectError::NotAMember`] when the user does not belong to the
    /// project.
    pub async fn leave_project(&self, project_id: ProjectId, user_id: UserId) -> ProjectResult<()> {
        let project = self.require_project(project_id).await?;
        if project.is_creator(user_id) {
            return Err(ProjectError::CreatorCannotLeave(project_id));
        }
        if self.memberships.find(project_id, user_id).await?.is_none() {
            return Err(ProjectError::NotAMember {
                project_id,
                user_id,
            });
        }

        self.board.unassign_member(project_id, user_id).await?;
        self.memberships.remove(project_id, user_id).await?;

        tracing::info!(%project_id, %user_id, "member left");
        self.feed.publish(StoreEvent::MembersChanged(project_id));
        Ok(())
    }

    /// Deletes a project and everything under it.
    ///
    /// The cascade removes board content first, then memberships and roles,
    /// and finally the project record itself.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::NotCreator`] when the caller is not the
    /// project creator.
    pub async fn delete_project(&self, project_id: ProjectId, user_id: UserId) -> ProjectResult<()> {
        let project = self.require_project(project_id).await?;
        if !project.is_creator(user_id) {
            return Err(ProjectError::NotCreator(project_id));
        }

        self.board.purge_project(project_id).await?;
        self.memberships.remove_all_for_project(project_id).await?;
        self.roles.remove_all_for_project(project_id).await?;
        self.projects.remove(project_id).await?;

        tracing::info!(%project_id, "project deleted");
        self.feed.publish(StoreEvent::ProjectsChanged(project_id));
        Ok(())
    }

    /// Finds a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Projects`] on repository failure.
    pub async fn find_project(&self, project_id: ProjectId) -> ProjectResult<Option<Project>> {
        Ok(self.projects.find_by_id(project_id).await?)
    }

    /// Returns every project the user belongs to, with their membership.
    ///
    /// Memberships whose project record is missing are skipped.
    ///
    /// # Errors
    ///
    /// Returns repository errors on persistence failure.
    pub async fn projects_of(&self, user_id: UserId) -> ProjectResult<Vec<ProjectSummary>> {
        let memberships = self.memberships.list_for_user(user_id).await?;
        let mut summaries = Vec::with_capacity(memberships.len());
        for membership in memberships {
            if let Some(project) = self.projects.find_by_id(membership.project_id()).await? {
                summaries.push(ProjectSummary {
                    project,
                    membership,
                });
            }
        }
        summaries.sort_by_key(|summary| summary.project.created_at());
        Ok(summaries)
    }

    /// Returns every membership of a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::ProjectNotFound`] when the project does not
    /// exist.
    pub async fn members_of(&self, project_id: ProjectId) -> ProjectResult<Vec<Membership>> {
        self.require_project(project_id).await?;
        let mut members = self.memberships.list_for_project(project_id).await?;
        members.sort_by_key(Membership::joined_at);
        Ok(members)
    }

    async fn require_project(&self, project_id: ProjectId) -> ProjectResult<Project> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or(ProjectError::ProjectNotFound(project_id))
    }
}
