//! Lookup port for denormalizing user names into board views.

use crate::identity::domain::UserId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user directory lookups.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// Name card for a user referenced from a board view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCard {
    /// The user.
    pub user_id: UserId,
    /// Display name shown on cards and search hits.
    pub display_name: String,
    /// Login handle, also matched by search.
    pub username: String,
}

/// Read-only lookup of user names for display and search.
///
/// Unknown identifiers are simply absent from the result; a dangling
/// assignee reference is not an error.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolves name cards for the given users.
    async fn cards_for(&self, user_ids: &[UserId])
    -> UserDirectoryResult<HashMap<UserId, UserCard>>;
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// Underlying lookup failure.
    #[error("user lookup failed: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
