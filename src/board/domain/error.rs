//! Error types for board domain validation and state transitions.

use super::{TaskId, TaskStatus};
use crate::identity::domain::UserId;
use thiserror::Error;

/// Errors produced while validating or mutating board domain objects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardDomainError {
    /// Section name was empty after trimming.
    #[error("section name must not be empty")]
    EmptySectionName,

    /// Section name exceeded the maximum length.
    #[error("section name exceeds 100 characters: '{0}'")]
    SectionNameTooLong(String),

    /// Color was not a `#rrggbb` hex string.
    #[error("invalid hex color: '{0}'")]
    InvalidHexColor(String),

    /// Task title was empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// Task title exceeded the maximum length.
    #[error("task title exceeds 200 characters: '{0}'")]
    TaskTitleTooLong(String),

    /// Comment body was empty after trimming.
    #[error("comment body must not be empty")]
    EmptyCommentBody,

    /// Comment body exceeded the maximum length.
    #[error("comment body exceeds 2000 characters")]
    CommentBodyTooLong,

    /// The requested status change is not a legal transition.
    #[error("task {task_id} cannot change status from {from:?}")]
    InvalidStatusTransition {
        /// Task whose status was targeted.
        task_id: TaskId,
        /// Status the task currently holds.
        from: TaskStatus,
    },

    /// Work cannot start or continue on a `Done` or `Failed` task.
    #[error("task {task_id} is {status:?} and no longer accepts work")]
    TerminalTask {
        /// Task in a terminal status.
        task_id: TaskId,
        /// The terminal status.
        status: TaskStatus,
    },

    /// The user is not on the task's working list.
    #[error("user {user_id} is not working on task {task_id}")]
    NotWorking {
        /// Task looked up.
        task_id: TaskId,
        /// User looked up.
        user_id: UserId,
    },
}
