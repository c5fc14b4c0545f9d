//! Repository port for task comment persistence.

use crate::board::domain::{Comment, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for comment repository operations.
pub type CommentRepositoryResult<T> = Result<T, CommentRepositoryError>;

/// Comment persistence contract.
///
/// Comments are append-only; the only delete operation is the cascade that
/// follows a task's removal.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Stores a comment unless its identifier is already present.
    ///
    /// Returns whether the comment was inserted. The id-based
    /// de-duplication makes merging an external realtime feed idempotent.
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<bool>;

    /// Returns the comments of a task ordered by posting time.
    async fn list_for_task(&self, task_id: TaskId) -> CommentRepositoryResult<Vec<Comment>>;

    /// Returns the number of comments on a task.
    async fn count_for_task(&self, task_id: TaskId) -> CommentRepositoryResult<usize>;

    /// Removes every comment of a task. Returns the removed count.
    async fn remove_all_for_task(&self, task_id: TaskId) -> CommentRepositoryResult<usize>;
}

/// Errors returned by comment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CommentRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CommentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
