//! Read-side permission evaluation service.

use crate::identity::domain::UserId;
use crate::project::{
    domain::{self, Permission, ProjectId, RoleName, RolePermissions},
    ports::{
        AccessControl, AccessError, AccessResult, MembershipRepository, ProjectRepository,
        RoleRepository,
    },
};
use async_trait::async_trait;
use std::sync::Arc;

/// Evaluates effective permissions from the project repositories.
///
/// Board services consume this through the [`AccessControl`] port so gated
/// operations are checked in the service layer rather than by hiding UI
/// affordances.
#[derive(Clone)]
pub struct AccessEvaluator<P, M, R>
where
    P: ProjectRepository,
    M: MembershipRepository,
    R: RoleRepository,
{
    projects: Arc<P>,
    memberships: Arc<M>,
    roles: Arc<R>,
}

impl<P, M, R> AccessEvaluator<P, M, R>
where
    P: ProjectRepository,
    M: MembershipRepository,
    R: RoleRepository,
{
    /// Creates a new access evaluator.
    #[must_use]
    pub const fn new(projects: Arc<P>, memberships: Arc<M>, roles: Arc<R>) -> Self {
        Self {
            projects,
            memberships,
            roles,
        }
    }
}

#[async_trait]
impl<P, M, R> AccessControl for AccessEvaluator<P, M, R>
where
    P: ProjectRepository,
    M: MembershipRepository,
    R: RoleRepository,
{
    async fn effective_permissions(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> AccessResult<RolePermissions> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await
            .map_err(AccessError::backend)?
            .ok_or(AccessError::ProjectNotFound(project_id))?;
        let membership = self
            .memberships
            .find(project_id, user_id)
            .await
            .map_err(AccessError::backend)?;
        let roles = self
            .roles
            .list_for_project(project_id)
            .await
            .map_err(AccessError::backend)?;

        Ok(domain::evaluate_permissions(
            &project,
            membership.as_ref(),
            &roles,
        ))
    }

    async fn has_permission(
        &self,
        project_id: ProjectId,
        user_id: UserId,
        permission: Permission,
    ) -> AccessResult<bool> {
        let permissions = self.effective_permissions(project_id, user_id).await?;
        Ok(permissions.grants(permission))
    }

    async fn role_names(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> AccessResult<Vec<RoleName>> {
        let membership = self
            .memberships
            .find(project_id, user_id)
            .await
            .map_err(AccessError::backend)?;
        Ok(membership.map_or_else(Vec::new, |found| found.role_names().to_vec()))
    }

    async fn can_edit_section(
        &self,
        project_id: ProjectId,
        user_id: UserId,
        allowed_roles: &[RoleName],
    ) -> AccessResult<bool> {
        let role_names = self.role_names(project_id, user_id).await?;
        Ok(domain::can_edit_section(&role_names, allowed_roles))
    }

    async fn is_member(&self, project_id: ProjectId, user_id: UserId) -> AccessResult<bool> {
        let membership = self
            .memberships
            .find(project_id, user_id)
            .await
            .map_err(AccessError::backend)?;
        Ok(membership.is_some())
    }
}
