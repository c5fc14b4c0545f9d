//! Thread-safe in-memory comment repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{Comment, CommentId, TaskId},
    ports::{CommentRepository, CommentRepositoryError, CommentRepositoryResult},
};

/// Thread-safe in-memory comment repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommentRepository {
    state: Arc<RwLock<HashMap<CommentId, Comment>>>,
}

impl InMemoryCommentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> CommentRepositoryError {
    CommentRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<bool> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.contains_key(&comment.id()) {
            return Ok(false);
        }
        state.insert(comment.id(), comment.clone());
        Ok(true)
    }

    async fn list_for_task(&self, task_id: TaskId) -> CommentRepositoryResult<Vec<Comment>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut comments: Vec<Comment> = state
            .values()
            .filter(|comment| comment.task_id() == task_id)
            .cloned()
            .collect();
        comments.sort_by_key(Comment::posted_at);
        Ok(comments)
    }

    async fn count_for_task(&self, task_id: TaskId) -> CommentRepositoryResult<usize> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state
            .values()
            .filter(|comment| comment.task_id() == task_id)
            .count())
    }

    async fn remove_all_for_task(&self, task_id: TaskId) -> CommentRepositoryResult<usize> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let before = state.len();
        state.retain(|_, comment| comment.task_id() != task_id);
        Ok(before - state.len())
    }
}
