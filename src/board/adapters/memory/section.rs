//! Thread-safe in-memory section repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{Section, SectionId},
    ports::{SectionRepository, SectionRepositoryError, SectionRepositoryResult},
};
use crate::project::domain::ProjectId;

/// Thread-safe in-memory section repository.
#[derive(Debug, Clone, Default)]
pub struct InMemorySectionRepository {
    state: Arc<RwLock<HashMap<SectionId, Section>>>,
}

impl InMemorySectionRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> SectionRepositoryError {
    SectionRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SectionRepository for InMemorySectionRepository {
    async fn store(&self, section: &Section) -> SectionRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.contains_key(&section.id()) {
            return Err(SectionRepositoryError::DuplicateSection(section.id()));
        }
        state.insert(section.id(), section.clone());
        Ok(())
    }

    async fn update(&self, section: &Section) -> SectionRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state.contains_key(&section.id()) {
            return Err(SectionRepositoryError::NotFound(section.id()));
        }
        state.insert(section.id(), section.clone());
        Ok(())
    }

    async fn remove(&self, id: SectionId) -> SectionRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state
            .remove(&id)
            .map(|_| ())
            .ok_or(SectionRepositoryError::NotFound(id))
    }

    async fn find_by_id(&self, id: SectionId) -> SectionRepositoryResult<Option<Section>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.get(&id).cloned())
    }

    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> SectionRepositoryResult<Vec<Section>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut sections: Vec<Section> = state
            .values()
            .filter(|section| section.project_id() == project_id)
            .cloned()
            .collect();
        sections.sort_by_key(Section::position);
        Ok(sections)
    }

    async fn remove_all_for_project(
        &self,
        project_id: ProjectId,
    ) -> SectionRepositoryResult<usize> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let before = state.len();
        state.retain(|_, section| section.project_id() != project_id);
        Ok(before - state.len())
    }
}
