//! Repository port for project persistence and lookup.

use crate::project::domain::{InviteCode, Project, ProjectId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateProject`] when the
    /// identifier already exists, or
    /// [`ProjectRepositoryError::DuplicateInviteCode`] when the invite code
    /// collides.
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Removes a project record.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does
    /// not exist.
    async fn remove(&self, id: ProjectId) -> ProjectRepositoryResult<()>;

    /// Finds a project by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;

    /// Finds a project by invite code. Returns `None` when absent.
    async fn find_by_invite_code(
        &self,
        code: &InviteCode,
    ) -> ProjectRepositoryResult<Option<Project>>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// A project with the same identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// A project with the same invite code already exists.
    #[error("invite code already in use: {0}")]
    DuplicateInviteCode(InviteCode),

    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
