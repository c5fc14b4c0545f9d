//! Repository port for board section persistence.

use crate::board::domain::{Section, SectionId};
use crate::project::domain::ProjectId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for section repository operations.
pub type SectionRepositoryResult<T> = Result<T, SectionRepositoryError>;

/// Section persistence contract.
#[async_trait]
pub trait SectionRepository: Send + Sync {
    /// Stores a new section.
    ///
    /// # Errors
    ///
    /// Returns [`SectionRepositoryError::DuplicateSection`] when the
    /// identifier already exists.
    async fn store(&self, section: &Section) -> SectionRepositoryResult<()>;

    /// Persists changes to an existing section.
    ///
    /// # Errors
    ///
    /// Returns [`SectionRepositoryError::NotFound`] when the section does
    /// not exist.
    async fn update(&self, section: &Section) -> SectionRepositoryResult<()>;

    /// Removes a section.
    ///
    /// # Errors
    ///
    /// Returns [`SectionRepositoryError::NotFound`] when the section does
    /// not exist.
    async fn remove(&self, id: SectionId) -> SectionRepositoryResult<()>;

    /// Finds a section by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: SectionId) -> SectionRepositoryResult<Option<Section>>;

    /// Returns the sections of a project in board order.
    async fn list_for_project(&self, project_id: ProjectId)
    -> SectionRepositoryResult<Vec<Section>>;

    /// Removes every section of a project. Returns the removed count.
    async fn remove_all_for_project(&self, project_id: ProjectId)
    -> SectionRepositoryResult<usize>;
}

/// Errors returned by section repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SectionRepositoryError {
    /// A section with the same identifier already exists.
    #[error("duplicate section identifier: {0}")]
    DuplicateSection(SectionId),

    /// The section was not found.
    #[error("section not found: {0}")]
    NotFound(SectionId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SectionRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
