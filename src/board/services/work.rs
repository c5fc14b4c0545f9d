//! Multi-assignee work tracking.

use crate::board::{
    domain::{BoardDomainError, Task, TaskId, TaskStatus},
    ports::{
        SectionRepository, SectionRepositoryError, TaskRepository, TaskRepositoryError, UserCard,
        UserDirectory, UserDirectoryError,
    },
};
use crate::events::{ChangeFeed, StoreEvent};
use crate::identity::domain::UserId;
use crate::project::{domain::ProjectId, ports::{AccessControl, AccessError}};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Result type for work tracking operations.
pub type WorkResult<T> = Result<T, WorkError>;

/// Errors surfaced by the work tracking service.
#[derive(Debug, Error)]
pub enum WorkError {
    /// Domain transition failure.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// Task repository failure.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// Section repository failure.
    #[error(transparent)]
    Sections(#[from] SectionRepositoryError),

    /// Permission lookup failure.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// User directory failure.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The user is not an assignee of the task.
    #[error("user {user_id} is not assigned to task {task_id}")]
    NotAssigned {
        /// Task looked up.
        task_id: TaskId,
        /// User looked up.
        user_id: UserId,
    },

    /// The user may not edit tasks in the task's section.
    #[error("user {user_id} may not work in the section holding task {task_id}")]
    SectionEditDenied {
        /// Task whose section rejected the user.
        task_id: TaskId,
        /// Acting user.
        user_id: UserId,
    },
}

/// Tracks which assignees are actively working on a task.
///
/// Starting work requires being an assignee with section edit rights on a
/// non-terminal task; starting twice is a no-op.
pub struct WorkTrackingService<S, T, C>
where
    S: SectionRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    sections: Arc<S>,
    tasks: Arc<T>,
    access: Arc<dyn AccessControl>,
    directory: Arc<dyn UserDirectory>,
    clock: Arc<C>,
    feed: ChangeFeed,
}

impl<S, T, C> WorkTrackingService<S, T, C>
where
    S: SectionRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new work tracking service.
    #[must_use]
    pub fn new(
        sections: Arc<S>,
        tasks: Arc<T>,
        access: Arc<dyn AccessControl>,
        directory: Arc<dyn UserDirectory>,
        clock: Arc<C>,
        feed: ChangeFeed,
    ) -> Self {
        Self {
            sections,
            tasks,
            access,
            directory,
            clock,
            feed,
        }
    }

    /// Returns whether the user could start working on the task: assigned,
    /// holding section edit rights, and the task not yet terminal.
    ///
    /// # Errors
    ///
    /// Returns [`WorkError::TaskNotFound`] for an unknown task.
    pub async fn can_work_on(&self, task_id: TaskId, user_id: UserId) -> WorkResult<bool> {
        let task = self.require_task(task_id).await?;
        if task.status().is_terminal() || !task.is_assigned(user_id) {
            return Ok(false);
        }
        self.holds_edit_rights(&task, user_id).await
    }

    /// Adds the user to the task's working list.
    ///
    /// Idempotent when the user is already working.
    ///
    /// # Errors
    ///
    /// Returns [`WorkError::NotAssigned`] for a non-assignee,
    /// [`WorkError::SectionEditDenied`] without section rights, and a
    /// domain error for a terminal task.
    pub async fn start_working(&self, task_id: TaskId, user_id: UserId) -> WorkResult<Task> {
        let mut task = self.require_task(task_id).await?;
        if !task.is_assigned(user_id) {
            return Err(WorkError::NotAssigned { task_id, user_id });
        }
        if !self.holds_edit_rights(&task, user_id).await? {
            return Err(WorkError::SectionEditDenied { task_id, user_id });
        }

        task.start_work(user_id, self.clock.utc())?;
        self.tasks.update(&task).await?;

        tracing::debug!(%task_id, %user_id, "work started");
        self.feed.publish(StoreEvent::TaskChanged(task_id));
        Ok(task)
    }

    /// Removes the user from the task's working list.
    ///
    /// # Errors
    ///
    /// Returns a domain error when the user is not on the working list.
    pub async fn stop_working(&self, task_id: TaskId, user_id: UserId) -> WorkResult<Task> {
        let mut task = self.require_task(task_id).await?;
        task.stop_work(user_id, self.clock.utc())?;
        self.tasks.update(&task).await?;

        tracing::debug!(%task_id, %user_id, "work stopped");
        self.feed.publish(StoreEvent::TaskChanged(task_id));
        Ok(task)
    }

    /// Returns name cards for the users currently working on a task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkError::TaskNotFound`] for an unknown task.
    pub async fn workers_of(&self, task_id: TaskId) -> WorkResult<Vec<UserCard>> {
        let task = self.require_task(task_id).await?;
        let cards = self.directory.cards_for(task.working()).await?;
        Ok(task
            .working()
            .iter()
            .filter_map(|worker| cards.get(worker).cloned())
            .collect())
    }

    /// Returns the active tasks in a project the user is working on.
    ///
    /// # Errors
    ///
    /// Returns [`WorkError::Tasks`] on repository failure.
    pub async fn tasks_in_progress(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> WorkResult<Vec<Task>> {
        let tasks = self.tasks.list_for_project(project_id).await?;
        Ok(tasks
            .into_iter()
            .filter(|task| task.status() == TaskStatus::Active && task.is_working(user_id))
            .collect())
    }

    async fn require_task(&self, task_id: TaskId) -> WorkResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(WorkError::TaskNotFound(task_id))
    }

    async fn holds_edit_rights(&self, task: &Task, user_id: UserId) -> WorkResult<bool> {
        let Some(section) = self.sections.find_by_id(task.section_id()).await? else {
            return Ok(false);
        };
        Ok(self
            .access
            .can_edit_section(task.project_id(), user_id, section.allowed_roles())
            .await?)
    }
}
