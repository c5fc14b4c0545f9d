//! Repository port for user account persistence and lookup.

use crate::identity::domain::{EmailAddress, User, UserId, Username};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateUser`] when the identifier
    /// already exists, [`UserRepositoryError::DuplicateEmail`] when the email
    /// is taken, or [`UserRepositoryError::DuplicateUsername`] when the
    /// handle is taken.
    async fn store(&self, user: &User) -> UserRepositoryResult<()>;

    /// Persists changes to an existing user (streak, activity timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the user does not
    /// exist.
    async fn update(&self, user: &User) -> UserRepositoryResult<()>;

    /// Finds a user by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by email address. Returns `None` when absent.
    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by account handle. Returns `None` when absent.
    async fn find_by_username(&self, username: &Username) -> UserRepositoryResult<Option<User>>;

    /// Returns all registered users.
    async fn list_all(&self) -> UserRepositoryResult<Vec<User>>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// A user with the same email address already exists.
    #[error("email address already registered: {0}")]
    DuplicateEmail(EmailAddress),

    /// A user with the same handle already exists.
    #[error("username already taken: {0}")]
    DuplicateUsername(Username),

    /// The user was not found.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
