//! Append-only task comments.

use super::{BoardDomainError, CommentId, TaskId};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a comment body.
const MAX_COMMENT_LENGTH: usize = 2000;

/// Trimmed, non-empty comment body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentBody(String);

impl CommentBody {
    /// Creates a validated comment body.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyCommentBody`] when the value is
    /// empty after trimming, or [`BoardDomainError::CommentBodyTooLong`]
    /// when it exceeds 2000 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyCommentBody);
        }
        if trimmed.len() > MAX_COMMENT_LENGTH {
            return Err(BoardDomainError::CommentBodyTooLong);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the body as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CommentBody {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CommentBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Chat message attached to a task, ordered by timestamp.
///
/// The author's display name is denormalized so feeds render without a
/// user lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    task_id: TaskId,
    author_id: UserId,
    author_name: String,
    body: CommentBody,
    posted_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a new comment.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        author_id: UserId,
        author_name: impl Into<String>,
        body: CommentBody,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: CommentId::new(),
            task_id,
            author_id,
            author_name: author_name.into(),
            body,
            posted_at: clock.utc(),
        }
    }

    /// Reconstructs a comment from persisted storage or an external feed.
    #[must_use]
    pub fn from_persisted(
        id: CommentId,
        task_id: TaskId,
        author_id: UserId,
        author_name: String,
        body: CommentBody,
        posted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            task_id,
            author_id,
            author_name,
            body,
            posted_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the commented task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the author.
    #[must_use]
    pub const fn author_id(&self) -> UserId {
        self.author_id
    }

    /// Returns the denormalized author display name.
    #[must_use]
    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    /// Returns the comment body.
    #[must_use]
    pub const fn body(&self) -> &CommentBody {
        &self.body
    }

    /// Returns the posting timestamp.
    #[must_use]
    pub const fn posted_at(&self) -> DateTime<Utc> {
        self.posted_at
    }
}
