//! Gateway through which project-side cascades reach the board context.
//!
//! Deleting a project, removing a member, and deleting a role all have
//! board-side consequences (purging sections and tasks, unassigning a user,
//! stripping a role name from section allowlists). This port keeps the
//! project services free of board repository types.

use crate::identity::domain::UserId;
use crate::project::domain::{ProjectId, RoleName};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board gateway operations.
pub type BoardGatewayResult<T> = Result<T, BoardGatewayError>;

/// Board-side cascade contract.
#[async_trait]
pub trait BoardGateway: Send + Sync {
    /// Removes every section, task, and comment of a project.
    async fn purge_project(&self, project_id: ProjectId) -> BoardGatewayResult<()>;

    /// Removes a user from every assignee and working-on list in a project.
    async fn unassign_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> BoardGatewayResult<()>;

    /// Removes a role name from every section allowlist in a project.
    async fn strip_role_from_sections(
        &self,
        project_id: ProjectId,
        role: &RoleName,
    ) -> BoardGatewayResult<()>;
}

/// Errors returned by board gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardGatewayError {
    /// Board-side persistence failure.
    #[error("board cascade failed: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardGatewayError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
