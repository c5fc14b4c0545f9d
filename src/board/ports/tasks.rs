//! Repository port for task persistence.

use crate::board::domain::{SectionId, Task, TaskId};
use crate::project::domain::ProjectId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the identifier
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the tasks of a section in creation order.
    async fn list_for_section(&self, section_id: SectionId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all tasks of a project.
    async fn list_for_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>>;

    /// Removes every task of a section. Returns the removed task ids.
    async fn remove_all_for_section(
        &self,
        section_id: SectionId,
    ) -> TaskRepositoryResult<Vec<TaskId>>;

    /// Removes every task of a project. Returns the removed task ids.
    async fn remove_all_for_project(
        &self,
        project_id: ProjectId,
    ) -> TaskRepositoryResult<Vec<TaskId>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
