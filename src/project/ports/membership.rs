//! Repository port for project membership persistence.

use crate::identity::domain::UserId;
use crate::project::domain::{Membership, ProjectId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for membership repository operations.
pub type MembershipRepositoryResult<T> = Result<T, MembershipRepositoryError>;

/// Membership persistence contract, keyed by (project, user).
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Stores a new membership.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipRepositoryError::DuplicateMembership`] when the
    /// user already belongs to the project.
    async fn store(&self, membership: &Membership) -> MembershipRepositoryResult<()>;

    /// Persists changes to an existing membership (role list).
    ///
    /// # Errors
    ///
    /// Returns [`MembershipRepositoryError::NotFound`] when the membership
    /// does not exist.
    async fn update(&self, membership: &Membership) -> MembershipRepositoryResult<()>;

    /// Removes a membership.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipRepositoryError::NotFound`] when the membership
    /// does not exist.
    async fn remove(&self, project_id: ProjectId, user_id: UserId)
    -> MembershipRepositoryResult<()>;

    /// Finds a membership. Returns `None` when absent.
    async fn find(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> MembershipRepositoryResult<Option<Membership>>;

    /// Returns all memberships of a project.
    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> MembershipRepositoryResult<Vec<Membership>>;

    /// Returns all memberships held by a user.
    async fn list_for_user(&self, user_id: UserId) -> MembershipRepositoryResult<Vec<Membership>>;

    /// Removes every membership of a project. Returns the removed count.
    async fn remove_all_for_project(
        &self,
        project_id: ProjectId,
    ) -> MembershipRepositoryResult<usize>;
}

/// Errors returned by membership repository implementations.
#[derive(Debug, Clone, Error)]
pub enum MembershipRepositoryError {
    /// The user already belongs to the project.
    #[error("user {user_id} is already a member of project {project_id}")]
    DuplicateMembership {
        /// Project joined twice.
        project_id: ProjectId,
        /// User already joined.
        user_id: UserId,
    },

    /// The membership was not found.
    #[error("user {user_id} is not a member of project {project_id}")]
    NotFound {
        /// Project looked up.
        project_id: ProjectId,
        /// User looked up.
        user_id: UserId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MembershipRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
