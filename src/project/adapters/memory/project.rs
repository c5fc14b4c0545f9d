//! Thread-safe in-memory project repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::project::{
    domain::{InviteCode, Project, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};

/// Thread-safe in-memory project repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    state: Arc<RwLock<InMemoryProjectState>>,
}

#[derive(Debug, Default)]
struct InMemoryProjectState {
    projects: HashMap<ProjectId, Project>,
    invite_index: HashMap<InviteCode, ProjectId>,
}

impl InMemoryProjectRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> ProjectRepositoryError {
    ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }
        if state.invite_index.contains_key(project.invite_code()) {
            return Err(ProjectRepositoryError::DuplicateInviteCode(
                project.invite_code().clone(),
            ));
        }

        state
            .invite_index
            .insert(project.invite_code().clone(), project.id());
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn remove(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let removed = state
            .projects
            .remove(&id)
            .ok_or(ProjectRepositoryError::NotFound(id))?;
        state.invite_index.remove(removed.invite_code());
        Ok(())
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn find_by_invite_code(
        &self,
        code: &InviteCode,
    ) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let project = state
            .invite_index
            .get(code)
            .and_then(|id| state.projects.get(id))
            .cloned();
        Ok(project)
    }
}
