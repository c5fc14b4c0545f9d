//! Access-control contract consumed by the board services.
//!
//! Permission checks are enforced here rather than by hiding UI
//! affordances: every gated board operation asks this port before mutating
//! anything. Non-members simply hold no permissions; only infrastructure
//! failures surface as errors.

use crate::identity::domain::UserId;
use crate::project::domain::{Permission, ProjectId, RoleName, RolePermissions};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for access control queries.
pub type AccessResult<T> = Result<T, AccessError>;

/// Permission evaluation contract.
#[async_trait]
pub trait AccessControl: Send + Sync {
    /// Computes the effective permission set of a user within a project.
    ///
    /// The creator holds every permission; a non-member holds none.
    async fn effective_permissions(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> AccessResult<RolePermissions>;

    /// Returns whether the user holds a single permission in the project.
    async fn has_permission(
        &self,
        project_id: ProjectId,
        user_id: UserId,
        permission: Permission,
    ) -> AccessResult<bool>;

    /// Returns the role names the user holds in the project.
    async fn role_names(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> AccessResult<Vec<RoleName>>;

    /// Returns whether the user may edit tasks in a section with the given
    /// role allowlist: `Owner` always may, otherwise any held role must
    /// intersect the allowlist.
    async fn can_edit_section(
        &self,
        project_id: ProjectId,
        user_id: UserId,
        allowed_roles: &[RoleName],
    ) -> AccessResult<bool>;

    /// Returns whether the user belongs to the project.
    async fn is_member(&self, project_id: ProjectId, user_id: UserId) -> AccessResult<bool>;
}

/// Errors returned by access control implementations.
#[derive(Debug, Clone, Error)]
pub enum AccessError {
    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Underlying repository failure.
    #[error("access lookup failed: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl AccessError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
