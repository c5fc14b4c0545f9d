//! Thread-safe in-memory role definition repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::project::{
    domain::{ProjectId, ProjectRole, RoleId, RoleName},
    ports::{RoleRepository, RoleRepositoryError, RoleRepositoryResult},
};

/// Thread-safe in-memory role repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoleRepository {
    state: Arc<RwLock<HashMap<RoleId, ProjectRole>>>,
}

impl InMemoryRoleRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> RoleRepositoryError {
    RoleRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn find_named(
    state: &HashMap<RoleId, ProjectRole>,
    project_id: ProjectId,
    name: &RoleName,
) -> Option<ProjectRole> {
    state
        .values()
        .find(|role| role.project_id() == project_id && role.name().eq_ignore_case(name))
        .cloned()
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn store(&self, role: &ProjectRole) -> RoleRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if find_named(&state, role.project_id(), role.name()).is_some() {
            return Err(RoleRepositoryError::DuplicateRole {
                project_id: role.project_id(),
                name: role.name().clone(),
            });
        }
        state.insert(role.id(), role.clone());
        Ok(())
    }

    async fn update(&self, role: &ProjectRole) -> RoleRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state.contains_key(&role.id()) {
            return Err(RoleRepositoryError::NotFound(role.id()));
        }
        state.insert(role.id(), role.clone());
        Ok(())
    }

    async fn remove(&self, id: RoleId) -> RoleRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state
            .remove(&id)
            .map(|_| ())
            .ok_or(RoleRepositoryError::NotFound(id))
    }

    async fn find_by_id(&self, id: RoleId) -> RoleRepositoryResult<Option<ProjectRole>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.get(&id).cloned())
    }

    async fn find_by_name(
        &self,
        project_id: ProjectId,
        name: &RoleName,
    ) -> RoleRepositoryResult<Option<ProjectRole>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(find_named(&state, project_id, name))
    }

    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> RoleRepositoryResult<Vec<ProjectRole>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut roles: Vec<ProjectRole> = state
            .values()
            .filter(|role| role.project_id() == project_id)
            .cloned()
            .collect();
        roles.sort_by_key(ProjectRole::created_at);
        Ok(roles)
    }

    async fn remove_all_for_project(&self, project_id: ProjectId) -> RoleRepositoryResult<usize> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let before = state.len();
        state.retain(|_, role| role.project_id() != project_id);
        Ok(before - state.len())
    }
}
