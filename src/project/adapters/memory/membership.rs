//! Thread-safe in-memory membership repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::domain::UserId;
use crate::project::{
    domain::{Membership, ProjectId},
    ports::{MembershipRepository, MembershipRepositoryError, MembershipRepositoryResult},
};

/// Thread-safe in-memory membership repository keyed by (project, user).
#[derive(Debug, Clone, Default)]
pub struct InMemoryMembershipRepository {
    state: Arc<RwLock<HashMap<(ProjectId, UserId), Membership>>>,
}

impl InMemoryMembershipRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> MembershipRepositoryError {
    MembershipRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipRepository {
    async fn store(&self, membership: &Membership) -> MembershipRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let key = (membership.project_id(), membership.user_id());
        if state.contains_key(&key) {
            return Err(MembershipRepositoryError::DuplicateMembership {
                project_id: membership.project_id(),
                user_id: membership.user_id(),
            });
        }
        state.insert(key, membership.clone());
        Ok(())
    }

    async fn update(&self, membership: &Membership) -> MembershipRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let key = (membership.project_id(), membership.user_id());
        if !state.contains_key(&key) {
            return Err(MembershipRepositoryError::NotFound {
                project_id: membership.project_id(),
                user_id: membership.user_id(),
            });
        }
        state.insert(key, membership.clone());
        Ok(())
    }

    async fn remove(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> MembershipRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state
            .remove(&(project_id, user_id))
            .map(|_| ())
            .ok_or(MembershipRepositoryError::NotFound {
                project_id,
                user_id,
            })
    }

    async fn find(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> MembershipRepositoryResult<Option<Membership>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.get(&(project_id, user_id)).cloned())
    }

    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> MembershipRepositoryResult<Vec<Membership>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state
            .values()
            .filter(|membership| membership.project_id() == project_id)
            .cloned()
            .collect())
    }

    async fn list_for_user(&self, user_id: UserId) -> MembershipRepositoryResult<Vec<Membership>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state
            .values()
            .filter(|membership| membership.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn remove_all_for_project(
        &self,
        project_id: ProjectId,
    ) -> MembershipRepositoryResult<usize> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let before = state.len();
        state.retain(|(held_project, _), _| *held_project != project_id);
        Ok(before - state.len())
    }
}
