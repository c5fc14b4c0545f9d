//! Task comment posting and realtime merging.

use crate::board::{
    domain::{BoardDomainError, Comment, CommentBody, TaskId},
    ports::{
        CommentRepository, CommentRepositoryError, TaskRepository, TaskRepositoryError,
        UserDirectory, UserDirectoryError,
    },
};
use crate::events::{ChangeFeed, StoreEvent};
use crate::identity::domain::UserId;
use crate::project::{
    domain::ProjectId,
    ports::{AccessControl, AccessError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;

/// Result type for comment service operations.
pub type CommentResult<T> = Result<T, CommentError>;

/// Errors surfaced by the comment service.
#[derive(Debug, Error)]
pub enum CommentError {
    /// Domain validation failure.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

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

    /// The author does not belong to the task's project.
    #[error("user {user_id} is not a member of project {project_id}")]
    NotAProjectMember {
        /// Project of the commented task.
        project_id: ProjectId,
        /// Commenting user.
        user_id: UserId,
    },

    /// The author has no directory entry to denormalize a name from.
    #[error("no directory entry for user {0}")]
    UnknownAuthor(UserId),
}

/// Posts comments and merges an external realtime feed.
///
/// Posted and merged comments are announced on the shared change feed as
/// [`StoreEvent::CommentPosted`]; [`CommentService::subscribe`] exposes
/// that stream.
pub struct CommentService<T, O, C>
where
    T: TaskRepository,
    O: CommentRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    comments: Arc<O>,
    access: Arc<dyn AccessControl>,
    directory: Arc<dyn UserDirectory>,
    clock: Arc<C>,
    feed: ChangeFeed,
}

impl<T, O, C> CommentService<T, O, C>
where
    T: TaskRepository,
    O: CommentRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new comment service.
    #[must_use]
    pub fn new(
        tasks: Arc<T>,
        comments: Arc<O>,
        access: Arc<dyn AccessControl>,
        directory: Arc<dyn UserDirectory>,
        clock: Arc<C>,
        feed: ChangeFeed,
    ) -> Self {
        Self {
            tasks,
            comments,
            access,
            directory,
            clock,
            feed,
        }
    }

    /// Posts a comment on a task.
    ///
    /// The author must belong to the task's project; their display name is
    /// denormalized into the comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentError::NotAProjectMember`] for a non-member author
    /// and [`CommentError::Domain`] for an empty body.
    pub async fn post_comment(
        &self,
        task_id: TaskId,
        author: UserId,
        body: impl Into<String> + Send,
    ) -> CommentResult<Comment> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(CommentError::TaskNotFound(task_id))?;
        let is_member = self.access.is_member(task.project_id(), author).await?;
        if !is_member {
            return Err(CommentError::NotAProjectMember {
                project_id: task.project_id(),
                user_id: author,
            });
        }

        let body = CommentBody::new(body)?;
        let cards = self.directory.cards_for(&[author]).await?;
        let author_name = cards
            .get(&author)
            .map(|card| card.display_name.clone())
            .ok_or(CommentError::UnknownAuthor(author))?;

        let comment = Comment::new(task_id, author, author_name, body, self.clock.as_ref());
        self.comments.store(&comment).await?;

        tracing::debug!(%task_id, %author, "comment posted");
        self.feed.publish(StoreEvent::CommentPosted(comment.clone()));
        Ok(comment)
    }

    /// Merges a comment received from an external realtime feed.
    ///
    /// Returns whether the comment was new; a comment already present by
    /// id is ignored and not re-announced.
    ///
    /// # Errors
    ///
    /// Returns [`CommentError::Comments`] on repository failure.
    pub async fn merge_external(&self, comment: Comment) -> CommentResult<bool> {
        let inserted = self.comments.store(&comment).await?;
        if inserted {
            self.feed.publish(StoreEvent::CommentPosted(comment));
        }
        Ok(inserted)
    }

    /// Returns the comments of a task ordered by posting time.
    ///
    /// # Errors
    ///
    /// Returns [`CommentError::Comments`] on repository failure.
    pub async fn comments_for_task(&self, task_id: TaskId) -> CommentResult<Vec<Comment>> {
        Ok(self.comments.list_for_task(task_id).await?)
    }

    /// Returns the number of comments on a task.
    ///
    /// # Errors
    ///
    /// Returns [`CommentError::Comments`] on repository failure.
    pub async fn comment_count(&self, task_id: TaskId) -> CommentResult<usize> {
        Ok(self.comments.count_for_task(task_id).await?)
    }

    /// Subscribes to store events, including posted comments.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.feed.subscribe()
    }
}
