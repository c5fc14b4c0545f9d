//! Thread-safe in-memory task repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{SectionId, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::project::domain::ProjectId;

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn sorted_by_creation(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by_key(Task::created_at);
    tasks
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.get(&id).cloned())
    }

    async fn list_for_section(&self, section_id: SectionId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let tasks = state
            .values()
            .filter(|task| task.section_id() == section_id)
            .cloned()
            .collect();
        Ok(sorted_by_creation(tasks))
    }

    async fn list_for_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let tasks = state
            .values()
            .filter(|task| task.project_id() == project_id)
            .cloned()
            .collect();
        Ok(sorted_by_creation(tasks))
    }

    async fn remove_all_for_section(
        &self,
        section_id: SectionId,
    ) -> TaskRepositoryResult<Vec<TaskId>> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let removed: Vec<TaskId> = state
            .values()
            .filter(|task| task.section_id() == section_id)
            .map(Task::id)
            .collect();
        for id in &removed {
            state.remove(id);
        }
        Ok(removed)
    }

    async fn remove_all_for_project(
        &self,
        project_id: ProjectId,
    ) -> TaskRepositoryResult<Vec<TaskId>> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let removed: Vec<TaskId> = state
            .values()
            .filter(|task| task.project_id() == project_id)
            .map(Task::id)
            .collect();
        for id in &removed {
            state.remove(id);
        }
        Ok(removed)
    }
}
