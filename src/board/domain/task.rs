//! Task aggregate, its status state machine, and work tracking.

use super::{BoardDomainError, SectionId, TaskId};
use crate::identity::domain::UserId;
use crate::project::domain::ProjectId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a task title, matching the `VARCHAR(200)` column.
const MAX_TASK_TITLE_LENGTH: usize = 200;

/// Trimmed, non-empty task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when the value is empty
    /// after trimming, or [`BoardDomainError::TaskTitleTooLong`] when it
    /// exceeds 200 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTaskTitle);
        }
        if trimmed.len() > MAX_TASK_TITLE_LENGTH {
            return Err(BoardDomainError::TaskTitleTooLong(raw));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task lifecycle status.
///
/// Legal transitions are `Active → Done`, `Done → Active` (manual toggle),
/// and `Active → Failed` (deadline sweep). Nothing leaves `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// The task is open.
    Active,
    /// The task was completed manually.
    Done,
    /// The task missed its deadline.
    Failed,
}

impl TaskStatus {
    /// Returns whether this status accepts no further work.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

/// Task urgency marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Normal urgency.
    Medium,
    /// Needs attention first.
    High,
}

/// Task belonging to exactly one section.
///
/// Assignees are the users responsible for the task; the working list is
/// the subset of assignees currently engaged with it. Multiple concurrent
/// workers are permitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    section_id: SectionId,
    title: TaskTitle,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    deadline: Option<DateTime<Utc>>,
    assignees: Vec<UserId>,
    working: Vec<UserId>,
    working_started: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Owning project.
    pub project_id: ProjectId,
    /// Owning section.
    pub section_id: SectionId,
    /// Validated title.
    pub title: TaskTitle,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Priority level.
    pub priority: TaskPriority,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Initial assignee list.
    pub assignees: Vec<UserId>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted owning section.
    pub section_id: SectionId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Persisted assignee list.
    pub assignees: Vec<UserId>,
    /// Persisted working list.
    pub working: Vec<UserId>,
    /// Persisted first-worker timestamp.
    pub working_started: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `Active` task.
    #[must_use]
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Self {
        let now = clock.utc();
        Self {
            id: TaskId::new(),
            project_id: data.project_id,
            section_id: data.section_id,
            title: data.title,
            description: data.description,
            status: TaskStatus::Active,
            priority: data.priority,
            deadline: data.deadline,
            assignees: data.assignees,
            working: Vec::new(),
            working_started: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            section_id: data.section_id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            deadline: data.deadline,
            assignees: data.assignees,
            working: data.working,
            working_started: data.working_started,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the owning section.
    #[must_use]
    pub const fn section_id(&self) -> SectionId {
        self.section_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, when set.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the deadline, when set.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the assignee list.
    #[must_use]
    pub fn assignees(&self) -> &[UserId] {
        &self.assignees
    }

    /// Returns the users currently working on the task.
    #[must_use]
    pub fn working(&self) -> &[UserId] {
        &self.working
    }

    /// Returns when the first current worker started, when anyone works.
    #[must_use]
    pub const fn working_started(&self) -> Option<DateTime<Utc>> {
        self.working_started
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the user is on the assignee list.
    #[must_use]
    pub fn is_assigned(&self, user_id: UserId) -> bool {
        self.assignees.contains(&user_id)
    }

    /// Returns whether the user is currently working on the task.
    #[must_use]
    pub fn is_working(&self, user_id: UserId) -> bool {
        self.working.contains(&user_id)
    }

    /// Returns whether the task counts as overdue at the given cutoff:
    /// not `Done` and deadline strictly before it.
    #[must_use]
    pub fn is_overdue(&self, cutoff: DateTime<Utc>) -> bool {
        self.status != TaskStatus::Done
            && self.deadline.is_some_and(|deadline| deadline < cutoff)
    }

    /// Replaces title, description, priority, and deadline.
    pub fn update_details(
        &mut self,
        title: TaskTitle,
        description: Option<String>,
        priority: TaskPriority,
        deadline: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) {
        self.title = title;
        self.description = description;
        self.priority = priority;
        self.deadline = deadline;
        self.updated_at = now;
    }

    /// Replaces the assignee list.
    ///
    /// Dropped assignees are also removed from the working list.
    pub fn set_assignees(&mut self, assignees: Vec<UserId>, now: DateTime<Utc>) {
        self.assignees = assignees;
        self.working
            .retain(|worker| self.assignees.contains(worker));
        if self.working.is_empty() {
            self.working_started = None;
        }
        self.updated_at = now;
    }

    /// Moves the task to another section.
    pub fn move_to_section(&mut self, section_id: SectionId, now: DateTime<Utc>) {
        self.section_id = section_id;
        self.updated_at = now;
    }

    /// Toggles between `Active` and `Done`.
    ///
    /// Completing a task clears its working list.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidStatusTransition`] for a `Failed`
    /// task.
    pub fn toggle_status(&mut self, now: DateTime<Utc>) -> Result<TaskStatus, BoardDomainError> {
        self.status = match self.status {
            TaskStatus::Active => {
                self.working.clear();
                self.working_started = None;
                TaskStatus::Done
            }
            TaskStatus::Done => TaskStatus::Active,
            TaskStatus::Failed => {
                return Err(BoardDomainError::InvalidStatusTransition {
                    task_id: self.id,
                    from: TaskStatus::Failed,
                });
            }
        };
        self.updated_at = now;
        Ok(self.status)
    }

    /// Adds the user to the working list.
    ///
    /// Idempotent for a user already working. The first worker stamps
    /// `working_started`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TerminalTask`] for a `Done` or `Failed`
    /// task.
    pub fn start_work(&mut self, user_id: UserId, now: DateTime<Utc>) -> Result<(), BoardDomainError> {
        if self.status.is_terminal() {
            return Err(BoardDomainError::TerminalTask {
                task_id: self.id,
                status: self.status,
            });
        }
        if self.is_working(user_id) {
            return Ok(());
        }
        if self.working.is_empty() {
            self.working_started = Some(now);
        }
        self.working.push(user_id);
        self.updated_at = now;
        Ok(())
    }

    /// Removes the user from the working list.
    ///
    /// Clears `working_started` when the list empties.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::NotWorking`] when the user is not on the
    /// working list.
    pub fn stop_work(&mut self, user_id: UserId, now: DateTime<Utc>) -> Result<(), BoardDomainError> {
        if !self.is_working(user_id) {
            return Err(BoardDomainError::NotWorking {
                task_id: self.id,
                user_id,
            });
        }
        self.working.retain(|worker| *worker != user_id);
        if self.working.is_empty() {
            self.working_started = None;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Fails the task when `Active` with a deadline strictly before the
    /// given end-of-day instant. The working list is cleared.
    ///
    /// Returns whether the task transitioned.
    pub fn fail_expired(&mut self, end_of_day: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let expired = self.status == TaskStatus::Active
            && self.deadline.is_some_and(|deadline| deadline < end_of_day);
        if !expired {
            return false;
        }
        self.status = TaskStatus::Failed;
        self.working.clear();
        self.working_started = None;
        self.updated_at = now;
        true
    }

    /// Removes a departing user from the assignee and working lists.
    ///
    /// Returns whether the task changed.
    pub fn unassign_user(&mut self, user_id: UserId, now: DateTime<Utc>) -> bool {
        let was_assigned = self.is_assigned(user_id);
        let was_working = self.is_working(user_id);
        if !was_assigned && !was_working {
            return false;
        }
        self.assignees.retain(|assignee| *assignee != user_id);
        self.working.retain(|worker| *worker != user_id);
        if self.working.is_empty() {
            self.working_started = None;
        }
        self.updated_at = now;
        true
    }
}
