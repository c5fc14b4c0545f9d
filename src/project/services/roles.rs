//! Role administration and member role assignment.

use crate::events::{ChangeFeed, StoreEvent};
use crate::identity::domain::UserId;
use crate::project::{
    domain::{
        self, Permission, ProjectDomainError, ProjectId, ProjectRole, RoleId, RoleName,
        RolePermissions, palette_color,
    },
    ports::{
        BoardGateway, BoardGatewayError, MembershipRepository, MembershipRepositoryError,
        ProjectRepository, ProjectRepositoryError, RoleRepository, RoleRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Result type for role service operations.
pub type RoleResult<T> = Result<T, RoleError>;

/// Errors surfaced by the role service.
#[derive(Debug, Error)]
pub enum RoleError {
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

    /// The role does not exist.
    #[error("role not found: {0}")]
    RoleNotFound(RoleId),

    /// The target user does not belong to the project.
    #[error("user {user_id} is not a member of project {project_id}")]
    NotAMember {
        /// Project looked up.
        project_id: ProjectId,
        /// User looked up.
        user_id: UserId,
    },

    /// The acting user lacks the required permission.
    #[error("user {user_id} lacks the {permission:?} permission")]
    PermissionDenied {
        /// Acting user.
        user_id: UserId,
        /// Permission that was required.
        permission: Permission,
    },

    /// The project creator cannot be removed.
    #[error("the creator of project {0} cannot be removed")]
    CannotRemoveCreator(ProjectId),
}

/// Parameters for creating a role definition.
#[derive(Debug, Clone)]
pub struct CreateRoleRequest {
    /// Role name, unique per project ignoring case.
    pub name: String,
    /// Display color; when `None` the palette is cycled by creation order.
    pub color: Option<String>,
    /// Permission flags; `is_admin` expands to every flag.
    pub permissions: RolePermissions,
}

/// Orchestrates role definitions and member role assignment.
///
/// All mutations require the acting user to hold `EditRoles` (or
/// `DeleteMember` for member removal); the creator and admin roles pass
/// every check.
pub struct RoleService<P, M, R, G, C>
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

impl<P, M, R, G, C> RoleService<P, M, R, G, C>
where
    P: ProjectRepository,
    M: MembershipRepository,
    R: RoleRepository,
    G: BoardGateway,
    C: Clock + Send + Sync,
{
    /// Creates a new role service.
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

    /// Creates a role definition.
    ///
    /// A name clash (ignoring case) with an existing role returns that
    /// existing role instead of failing, so repeated submissions are
    /// harmless.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError::PermissionDenied`] without `EditRoles`.
    pub async fn create_role(
        &self,
        project_id: ProjectId,
        actor: UserId,
        request: CreateRoleRequest,
    ) -> RoleResult<ProjectRole> {
        self.require_permission(project_id, actor, Permission::EditRoles)
            .await?;
        let name = RoleName::new(request.name)?;

        if let Some(existing) = self.roles.find_by_name(project_id, &name).await? {
            return Ok(existing);
        }

        let existing_count = self.roles.list_for_project(project_id).await?.len();
        let color = request
            .color
            .unwrap_or_else(|| palette_color(existing_count).to_owned());
        let role = ProjectRole::new(
            project_id,
            name,
            color,
            request.permissions,
            self.clock.as_ref(),
        );
        self.roles.store(&role).await?;

        tracing::info!(%project_id, role = %role.name(), "role created");
        self.feed.publish(StoreEvent::RolesChanged(project_id));
        Ok(role)
    }

    /// Replaces a role's permission flags.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError::Domain`] for the protected `Owner` role and
    /// [`RoleError::PermissionDenied`] without `EditRoles`.
    pub async fn update_role_permissions(
        &self,
        project_id: ProjectId,
        actor: UserId,
        role_id: RoleId,
        permissions: RolePermissions,
    ) -> RoleResult<ProjectRole> {
        self.require_permission(project_id, actor, Permission::EditRoles)
            .await?;
        let mut role = self.require_role(project_id, role_id).await?;
        role.update_permissions(permissions)?;
        self.roles.update(&role).await?;

        tracing::info!(%project_id, role = %role.name(), "role permissions updated");
        self.feed.publish(StoreEvent::RolesChanged(project_id));
        Ok(role)
    }

    /// Deletes a role definition and strips its name everywhere it is
    /// referenced.
    ///
    /// Members left role-less fall back to `Member`; section allowlists
    /// simply lose the name.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError::Domain`] for the protected `Owner` role and
    /// [`RoleError::PermissionDenied`] without `EditRoles`.
    pub async fn delete_role(
        &self,
        project_id: ProjectId,
        actor: UserId,
        role_id: RoleId,
    ) -> RoleResult<()> {
        self.require_permission(project_id, actor, Permission::EditRoles)
            .await?;
        let role = self.require_role(project_id, role_id).await?;
        if role.is_protected() {
            return Err(ProjectDomainError::ProtectedRole(role.name().clone()).into());
        }

        let mut members_changed = false;
        for mut membership in self.memberships.list_for_project(project_id).await? {
            if membership.remove_role_name(role.name()) {
                self.memberships.update(&membership).await?;
                members_changed = true;
            }
        }
        self.board
            .strip_role_from_sections(project_id, role.name())
            .await?;
        self.roles.remove(role_id).await?;

        tracing::info!(%project_id, role = %role.name(), "role deleted");
        self.feed.publish(StoreEvent::RolesChanged(project_id));
        if members_changed {
            self.feed.publish(StoreEvent::MembersChanged(project_id));
        }
        self.feed.publish(StoreEvent::SectionsChanged(project_id));
        Ok(())
    }

    /// Adds a role to a member when absent, removes it when present.
    ///
    /// The creator always keeps `Owner`, and a member always keeps at least
    /// one role; toggles that would break either rule are silently skipped.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError::PermissionDenied`] without `EditRoles` and
    /// [`RoleError::NotAMember`] for an unknown target.
    pub async fn toggle_member_role(
        &self,
        project_id: ProjectId,
        actor: UserId,
        target: UserId,
        role_id: RoleId,
    ) -> RoleResult<()> {
        self.require_permission(project_id, actor, Permission::EditRoles)
            .await?;
        let project = self.require_project(project_id).await?;
        let role = self.require_role(project_id, role_id).await?;
        let mut membership = self.require_membership(project_id, target).await?;

        membership.toggle_role(role.name().clone(), project.is_creator(target));
        self.memberships.update(&membership).await?;

        self.feed.publish(StoreEvent::MembersChanged(project_id));
        Ok(())
    }

    /// Replaces a member's role list with the named roles.
    ///
    /// The creator always retains `Owner`; an empty replacement degrades to
    /// `Member`.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError::RoleNotFound`] when any identifier does not
    /// name a role of this project.
    pub async fn set_member_roles(
        &self,
        project_id: ProjectId,
        actor: UserId,
        target: UserId,
        role_ids: Vec<RoleId>,
    ) -> RoleResult<()> {
        self.require_permission(project_id, actor, Permission::EditRoles)
            .await?;
        let project = self.require_project(project_id).await?;
        let mut membership = self.require_membership(project_id, target).await?;

        let mut names = Vec::with_capacity(role_ids.len());
        for role_id in role_ids {
            let role = self.require_role(project_id, role_id).await?;
            names.push(role.name().clone());
        }

        membership.set_roles(names, project.is_creator(target));
        self.memberships.update(&membership).await?;

        self.feed.publish(StoreEvent::MembersChanged(project_id));
        Ok(())
    }

    /// Removes a member from the project, unassigning them from its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError::CannotRemoveCreator`] for the creator and
    /// [`RoleError::PermissionDenied`] without `DeleteMember`.
    pub async fn remove_member(
        &self,
        project_id: ProjectId,
        actor: UserId,
        target: UserId,
    ) -> RoleResult<()> {
        self.require_permission(project_id, actor, Permission::DeleteMember)
            .await?;
        let project = self.require_project(project_id).await?;
        if project.is_creator(target) {
            return Err(RoleError::CannotRemoveCreator(project_id));
        }
        if self.memberships.find(project_id, target).await?.is_none() {
            return Err(RoleError::NotAMember {
                project_id,
                user_id: target,
            });
        }

        self.board.unassign_member(project_id, target).await?;
        self.memberships.remove(project_id, target).await?;

        tracing::info!(%project_id, %target, "member removed");
        self.feed.publish(StoreEvent::MembersChanged(project_id));
        Ok(())
    }

    /// Returns the role definitions of a project in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError::ProjectNotFound`] when the project does not
    /// exist.
    pub async fn list_roles(&self, project_id: ProjectId) -> RoleResult<Vec<ProjectRole>> {
        self.require_project(project_id).await?;
        Ok(self.roles.list_for_project(project_id).await?)
    }

    async fn require_permission(
        &self,
        project_id: ProjectId,
        actor: UserId,
        permission: Permission,
    ) -> RoleResult<()> {
        let project = self.require_project(project_id).await?;
        let membership = self.memberships.find(project_id, actor).await?;
        let roles = self.roles.list_for_project(project_id).await?;
        let permissions = domain::evaluate_permissions(&project, membership.as_ref(), &roles);
        if permissions.grants(permission) {
            Ok(())
        } else {
            Err(RoleError::PermissionDenied {
                user_id: actor,
                permission,
            })
        }
    }

    async fn require_project(
        &self,
        project_id: ProjectId,
    ) -> RoleResult<crate::project::domain::Project> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or(RoleError::ProjectNotFound(project_id))
    }

    async fn require_role(&self, project_id: ProjectId, role_id: RoleId) -> RoleResult<ProjectRole> {
        let role = self
            .roles
            .find_by_id(role_id)
            .await?
            .filter(|found| found.project_id() == project_id)
            .ok_or(RoleError::RoleNotFound(role_id))?;
        Ok(role)
    }

    async fn require_membership(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> RoleResult<crate::project::domain::Membership> {
        self.memberships
            .find(project_id, user_id)
            .await?
            .ok_or(RoleError::NotAMember {
                project_id,
                user_id,
            })
    }
}
