//! Repository port for project role definitions.

use crate::project::domain::{ProjectId, ProjectRole, RoleId, RoleName};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for role repository operations.
pub type RoleRepositoryResult<T> = Result<T, RoleRepositoryError>;

/// Role definition persistence contract.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Stores a new role definition.
    ///
    /// # Errors
    ///
    /// Returns [`RoleRepositoryError::DuplicateRole`] when the project
    /// already has a role with the same name.
    async fn store(&self, role: &ProjectRole) -> RoleRepositoryResult<()>;

    /// Persists changes to an existing role definition.
    ///
    /// # Errors
    ///
    /// Returns [`RoleRepositoryError::NotFound`] when the role does not
    /// exist.
    async fn update(&self, role: &ProjectRole) -> RoleRepositoryResult<()>;

    /// Removes a role definition.
    ///
    /// # Errors
    ///
    /// Returns [`RoleRepositoryError::NotFound`] when the role does not
    /// exist.
    async fn remove(&self, id: RoleId) -> RoleRepositoryResult<()>;

    /// Finds a role by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: RoleId) -> RoleRepositoryResult<Option<ProjectRole>>;

    /// Finds a role by name within a project, ignoring ASCII case.
    async fn find_by_name(
        &self,
        project_id: ProjectId,
        name: &RoleName,
    ) -> RoleRepositoryResult<Option<ProjectRole>>;

    /// Returns all role definitions of a project.
    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> RoleRepositoryResult<Vec<ProjectRole>>;

    /// Removes every role definition of a project. Returns the removed
    /// count.
    async fn remove_all_for_project(&self, project_id: ProjectId) -> RoleRepositoryResult<usize>;
}

/// Errors returned by role repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RoleRepositoryError {
    /// The project already has a role with this name.
    #[error("project {project_id} already has a role named '{name}'")]
    DuplicateRole {
        /// Project holding the clashing role.
        project_id: ProjectId,
        /// Clashing role name.
        name: RoleName,
    },

    /// The role was not found.
    #[error("role not found: {0}")]
    NotFound(RoleId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RoleRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
