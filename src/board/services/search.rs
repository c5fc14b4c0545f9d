//! Case-insensitive task search within a project.

use crate::board::{
    domain::{HexColor, SectionId, Task},
    ports::{
        SectionRepository, SectionRepositoryError, TaskRepository, TaskRepositoryError,
        UserDirectory, UserDirectoryError,
    },
};
use crate::project::domain::ProjectId;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors surfaced by the search service.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Task repository failure.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// Section repository failure.
    #[error(transparent)]
    Sections(#[from] SectionRepositoryError),

    /// User directory failure.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
}

/// A matching task denormalized for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// The matching task.
    pub task: Task,
    /// Name of the task's section, or empty for a dangling reference.
    pub section_name: String,
    /// Color of the task's section, falling back to the default.
    pub section_color: HexColor,
}

/// Searches tasks by title, description, and assignee names.
pub struct SearchService<S, T>
where
    S: SectionRepository,
    T: TaskRepository,
{
    sections: Arc<S>,
    tasks: Arc<T>,
    directory: Arc<dyn UserDirectory>,
}

impl<S, T> SearchService<S, T>
where
    S: SectionRepository,
    T: TaskRepository,
{
    /// Creates a new search service.
    #[must_use]
    pub fn new(sections: Arc<S>, tasks: Arc<T>, directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            sections,
            tasks,
            directory,
        }
    }

    /// Returns the project's tasks whose title, description, or assignee
    /// display/user names contain the query, ignoring case.
    ///
    /// A blank query matches nothing.
    ///
    /// # Errors
    ///
    /// Returns repository or directory errors on lookup failure.
    pub async fn search(&self, project_id: ProjectId, query: &str) -> SearchResult<Vec<SearchHit>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let sections: HashMap<SectionId, (String, HexColor)> = self
            .sections
            .list_for_project(project_id)
            .await?
            .into_iter()
            .map(|section| {
                (
                    section.id(),
                    (
                        section.name().as_str().to_owned(),
                        section.color().clone(),
                    ),
                )
            })
            .collect();

        let mut hits = Vec::new();
        for task in self.tasks.list_for_project(project_id).await? {
            if !self.matches(&task, &needle).await? {
                continue;
            }
            let (section_name, section_color) = sections
                .get(&task.section_id())
                .cloned()
                .unwrap_or_else(|| (String::new(), HexColor::fallback()));
            hits.push(SearchHit {
                task,
                section_name,
                section_color,
            });
        }
        Ok(hits)
    }

    async fn matches(&self, task: &Task, needle: &str) -> SearchResult<bool> {
        if task.title().as_str().to_lowercase().contains(needle) {
            return Ok(true);
        }
        if task
            .description()
            .is_some_and(|description| description.to_lowercase().contains(needle))
        {
            return Ok(true);
        }

        let cards = self.directory.cards_for(task.assignees()).await?;
        Ok(cards.values().any(|card| {
            card.display_name.to_lowercase().contains(needle)
                || card.username.to_lowercase().contains(needle)
        }))
    }
}
