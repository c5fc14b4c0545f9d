//! Task lifecycle orchestration.

use crate::board::{
    domain::{
        BoardDomainError, NewTaskData, Section, SectionId, Task, TaskId, TaskPriority, TaskStatus,
        TaskTitle,
    },
    ports::{
        CommentRepository, CommentRepositoryError, SectionRepository, SectionRepositoryError,
        TaskRepository, TaskRepositoryError, UserCard, UserDirectory, UserDirectoryError,
    },
};
use crate::events::{ChangeFeed, StoreEvent};
use crate::identity::domain::UserId;
use crate::project::{
    domain::Permission,
    ports::{AccessControl, AccessError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task service operations.
pub type TaskResult<T> = Result<T, TaskError>;

/// Errors surfaced by the task service.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Domain validation or transition failure.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// Section repository failure.
    #[error(transparent)]
    Sections(#[from] SectionRepositoryError),

    /// Task repository failure.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// Comment repository failure.
    #[error(transparent)]
    Comments(#[from] CommentRepositoryError),

    /// Permission lookup failure.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// User directory failure.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The section does not exist.
    #[error("section not found: {0}")]
    SectionNotFound(SectionId),

    /// The acting user may not edit tasks in the section.
    #[error("user {user_id} may not edit tasks in section {section_id}")]
    SectionEditDenied {
        /// Acting user.
        user_id: UserId,
        /// Section whose allowlist rejected the user.
        section_id: SectionId,
    },

    /// The acting user lacks the required permission.
    #[error("user {user_id} lacks the {permission:?} permission")]
    PermissionDenied {
        /// Acting user.
        user_id: UserId,
        /// Permission that was required.
        permission: Permission,
    },
}

/// Parameters for creating a task.
#[derive(Debug, Clone)]
pub struct CreateTaskRequest {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Urgency marker.
    pub priority: TaskPriority,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Initially assigned users.
    pub assignees: Vec<UserId>,
}

/// Parameters for updating a task's fields.
#[derive(Debug, Clone)]
pub struct UpdateTaskRequest {
    /// Replacement title.
    pub title: String,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement priority.
    pub priority: TaskPriority,
    /// Replacement deadline.
    pub deadline: Option<DateTime<Utc>>,
}

/// Task joined with its resolved assignee name cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    /// The task.
    pub task: Task,
    /// Name cards for resolvable assignees, in assignment order.
    pub assignees: Vec<UserCard>,
}

/// Orchestrates task creation, editing, status toggling, and deletion.
///
/// Mutations inside a section require section edit rights; deletion
/// additionally requires the `DeleteTask` permission.
pub struct TaskService<S, T, O, C>
where
    S: SectionRepository,
    T: TaskRepository,
    O: CommentRepository,
    C: Clock + Send + Sync,
{
    sections: Arc<S>,
    tasks: Arc<T>,
    comments: Arc<O>,
    access: Arc<dyn AccessControl>,
    directory: Arc<dyn UserDirectory>,
    clock: Arc<C>,
    feed: ChangeFeed,
}

impl<S, T, O, C> TaskService<S, T, O, C>
where
    S: SectionRepository,
    T: TaskRepository,
    O: CommentRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub fn new(
        sections: Arc<S>,
        tasks: Arc<T>,
        comments: Arc<O>,
        access: Arc<dyn AccessControl>,
        directory: Arc<dyn UserDirectory>,
        clock: Arc<C>,
        feed: ChangeFeed,
    ) -> Self {
        Self {
            sections,
            tasks,
            comments,
            access,
            directory,
            clock,
            feed,
        }
    }

    /// Creates a task in a section.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::SectionEditDenied`] when the caller may not
    /// edit tasks in the section, and [`TaskError::Domain`] for an invalid
    /// title.
    pub async fn create_task(
        &self,
        section_id: SectionId,
        actor: UserId,
        request: CreateTaskRequest,
    ) -> TaskResult<Task> {
        let section = self.require_section(section_id).await?;
        self.require_edit_rights(&section, actor).await?;

        let title = TaskTitle::new(request.title)?;
        let task = Task::new(
            NewTaskData {
                project_id: section.project_id(),
                section_id,
                title,
                description: request.description,
                priority: request.priority,
                deadline: request.deadline,
                assignees: request.assignees,
            },
            self.clock.as_ref(),
        );
        self.tasks.store(&task).await?;

        tracing::info!(
            project_id = %section.project_id(),
            task_id = %task.id(),
            "task created"
        );
        self.feed
            .publish(StoreEvent::TasksChanged(section.project_id()));
        Ok(task)
    }

    /// Replaces a task's title, description, priority, and deadline.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::SectionEditDenied`] when the caller may not
    /// edit tasks in the task's section.
    pub async fn update_task(
        &self,
        task_id: TaskId,
        actor: UserId,
        request: UpdateTaskRequest,
    ) -> TaskResult<Task> {
        let (mut task, _) = self.authorized_task(task_id, actor).await?;
        let title = TaskTitle::new(request.title)?;
        task.update_details(
            title,
            request.description,
            request.priority,
            request.deadline,
            self.clock.utc(),
        );
        self.tasks.update(&task).await?;
        self.feed.publish(StoreEvent::TaskChanged(task_id));
        Ok(task)
    }

    /// Replaces a task's assignee list.
    ///
    /// Dropped assignees also stop working on the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::SectionEditDenied`] when the caller may not
    /// edit tasks in the task's section.
    pub async fn set_assignees(
        &self,
        task_id: TaskId,
        actor: UserId,
        assignees: Vec<UserId>,
    ) -> TaskResult<Task> {
        let (mut task, _) = self.authorized_task(task_id, actor).await?;
        task.set_assignees(assignees, self.clock.utc());
        self.tasks.update(&task).await?;
        self.feed.publish(StoreEvent::TaskChanged(task_id));
        Ok(task)
    }

    /// Moves a task to another section of the same project.
    ///
    /// The caller needs edit rights in both the source and the target
    /// section.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::SectionNotFound`] for a target in another
    /// project.
    pub async fn move_task(
        &self,
        task_id: TaskId,
        actor: UserId,
        target_section: SectionId,
    ) -> TaskResult<Task> {
        let (mut task, _) = self.authorized_task(task_id, actor).await?;
        let target = self.require_section(target_section).await?;
        if target.project_id() != task.project_id() {
            return Err(TaskError::SectionNotFound(target_section));
        }
        self.require_edit_rights(&target, actor).await?;

        task.move_to_section(target_section, self.clock.utc());
        self.tasks.update(&task).await?;
        self.feed
            .publish(StoreEvent::TasksChanged(task.project_id()));
        Ok(task)
    }

    /// Toggles a task between `Active` and `Done`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Domain`] with an invalid-transition error for a
    /// `Failed` task.
    pub async fn toggle_status(&self, task_id: TaskId, actor: UserId) -> TaskResult<TaskStatus> {
        let (mut task, _) = self.authorized_task(task_id, actor).await?;
        let status = task.toggle_status(self.clock.utc())?;
        self.tasks.update(&task).await?;
        self.feed.publish(StoreEvent::TaskChanged(task_id));
        Ok(status)
    }

    /// Deletes a task and its comments.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::PermissionDenied`] without `DeleteTask`.
    pub async fn delete_task(&self, task_id: TaskId, actor: UserId) -> TaskResult<()> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskError::TaskNotFound(task_id))?;
        let allowed = self
            .access
            .has_permission(task.project_id(), actor, Permission::DeleteTask)
            .await?;
        if !allowed {
            return Err(TaskError::PermissionDenied {
                user_id: actor,
                permission: Permission::DeleteTask,
            });
        }

        self.comments.remove_all_for_task(task_id).await?;
        self.tasks.remove(task_id).await?;

        tracing::info!(project_id = %task.project_id(), %task_id, "task deleted");
        self.feed
            .publish(StoreEvent::TasksChanged(task.project_id()));
        Ok(())
    }

    /// Returns the tasks of a section with resolved assignee cards.
    ///
    /// # Errors
    ///
    /// Returns repository errors on persistence failure.
    pub async fn tasks_in_section(&self, section_id: SectionId) -> TaskResult<Vec<TaskView>> {
        let tasks = self.tasks.list_for_section(section_id).await?;
        let mut views = Vec::with_capacity(tasks.len());
        for task in tasks {
            let cards = self.directory.cards_for(task.assignees()).await?;
            let assignees = task
                .assignees()
                .iter()
                .filter_map(|assignee| cards.get(assignee).cloned())
                .collect();
            views.push(TaskView { task, assignees });
        }
        Ok(views)
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Tasks`] on repository failure.
    pub async fn find_task(&self, task_id: TaskId) -> TaskResult<Option<Task>> {
        Ok(self.tasks.find_by_id(task_id).await?)
    }

    async fn authorized_task(&self, task_id: TaskId, actor: UserId) -> TaskResult<(Task, Section)> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskError::TaskNotFound(task_id))?;
        let section = self.require_section(task.section_id()).await?;
        self.require_edit_rights(&section, actor).await?;
        Ok((task, section))
    }

    async fn require_section(&self, section_id: SectionId) -> TaskResult<Section> {
        self.sections
            .find_by_id(section_id)
            .await?
            .ok_or(TaskError::SectionNotFound(section_id))
    }

    async fn require_edit_rights(&self, section: &Section, actor: UserId) -> TaskResult<()> {
        let allowed = self
            .access
            .can_edit_section(section.project_id(), actor, section.allowed_roles())
            .await?;
        if allowed {
            Ok(())
        } else {
            Err(TaskError::SectionEditDenied {
                user_id: actor,
                section_id: section.id(),
            })
        }
    }
}
