//! Thread-safe in-memory user repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{EmailAddress, User, UserId, Username},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: HashMap<UserId, User>,
    email_index: HashMap<EmailAddress, UserId>,
    username_index: HashMap<Username, UserId>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> UserRepositoryError {
    UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.users.contains_key(&user.id()) {
            return Err(UserRepositoryError::DuplicateUser(user.id()));
        }
        if state.email_index.contains_key(user.email()) {
            return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
        }
        if state.username_index.contains_key(user.username()) {
            return Err(UserRepositoryError::DuplicateUsername(
                user.username().clone(),
            ));
        }

        state.email_index.insert(user.email().clone(), user.id());
        state
            .username_index
            .insert(user.username().clone(), user.id());
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state.users.contains_key(&user.id()) {
            return Err(UserRepositoryError::NotFound(user.id()));
        }
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let user = state
            .email_index
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned();
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let user = state
            .username_index
            .get(username)
            .and_then(|id| state.users.get(id))
            .cloned();
        Ok(user)
    }

    async fn list_all(&self) -> UserRepositoryResult<Vec<User>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.users.values().cloned().collect())
    }
}
