//! Section lifecycle orchestration.

use crate::board::{
    domain::{BoardDomainError, HexColor, Section, SectionId, SectionName},
    ports::{
        CommentRepository, CommentRepositoryError, SectionRepository, SectionRepositoryError,
        TaskRepository, TaskRepositoryError,
    },
};
use crate::events::{ChangeFeed, StoreEvent};
use crate::identity::domain::UserId;
use crate::project::{
    domain::{Permission, ProjectId, RoleName},
    ports::{AccessControl, AccessError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Result type for section service operations.
pub type SectionResult<T> = Result<T, SectionError>;

/// Errors surfaced by the section service.
#[derive(Debug, Error)]
pub enum SectionError {
    /// Domain validation failure.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// Section repository failure.
    #[error(transparent)]
    Sections(#[from] SectionRepositoryError),

    /// Task repository failure.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// Comment repository failure.
    #[error(transparent)]
    Comments(#[from] CommentRepositoryError),

    /// Permission lookup failure.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// The section does not exist.
    #[error("section not found: {0}")]
    SectionNotFound(SectionId),

    /// The acting user lacks the required permission.
    #[error("user {user_id} lacks the {permission:?} permission")]
    PermissionDenied {
        /// Acting user.
        user_id: UserId,
        /// Permission that was required.
        permission: Permission,
    },
}

/// Orchestrates section creation, editing, and cascade deletion.
///
/// Every mutation requires the acting user to hold `AddSection` in the
/// owning project.
pub struct SectionService<S, T, O, C>
where
    S: SectionRepository,
    T: TaskRepository,
    O: CommentRepository,
    C: Clock + Send + Sync,
{
    sections: Arc<S>,
    tasks: Arc<T>,
    comments: Arc<O>,
    access: Arc<dyn AccessControl>,
    clock: Arc<C>,
    feed: ChangeFeed,
}

impl<S, T, O, C> SectionService<S, T, O, C>
where
    S: SectionRepository,
    T: TaskRepository,
    O: CommentRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new section service.
    #[must_use]
    pub fn new(
        sections: Arc<S>,
        tasks: Arc<T>,
        comments: Arc<O>,
        access: Arc<dyn AccessControl>,
        clock: Arc<C>,
        feed: ChangeFeed,
    ) -> Self {
        Self {
            sections,
            tasks,
            comments,
            access,
            clock,
            feed,
        }
    }

    /// Creates a section at the end of the board.
    ///
    /// An empty `allowed_roles` defaults to `["Owner"]`.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::PermissionDenied`] without `AddSection` and
    /// [`SectionError::Domain`] for an invalid name or color.
    pub async fn create_section(
        &self,
        project_id: ProjectId,
        actor: UserId,
        name: impl Into<String> + Send,
        color: impl Into<String> + Send,
        allowed_roles: Vec<RoleName>,
    ) -> SectionResult<Section> {
        self.require_permission(project_id, actor).await?;
        let name = SectionName::new(name)?;
        let color = HexColor::parse(color)?;

        let existing = self.sections.list_for_project(project_id).await?;
        let position = u32::try_from(existing.len()).unwrap_or(u32::MAX);
        let section = Section::new(
            project_id,
            name,
            color,
            position,
            allowed_roles,
            self.clock.as_ref(),
        );
        self.sections.store(&section).await?;

        tracing::info!(%project_id, section_id = %section.id(), "section created");
        self.feed.publish(StoreEvent::SectionsChanged(project_id));
        Ok(section)
    }

    /// Renames a section.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::PermissionDenied`] without `AddSection`.
    pub async fn rename_section(
        &self,
        section_id: SectionId,
        actor: UserId,
        name: impl Into<String> + Send,
    ) -> SectionResult<Section> {
        let mut section = self.authorized_section(section_id, actor).await?;
        section.rename(SectionName::new(name)?);
        self.sections.update(&section).await?;
        self.feed
            .publish(StoreEvent::SectionsChanged(section.project_id()));
        Ok(section)
    }

    /// Changes a section's display color.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::PermissionDenied`] without `AddSection`.
    pub async fn recolor_section(
        &self,
        section_id: SectionId,
        actor: UserId,
        color: impl Into<String> + Send,
    ) -> SectionResult<Section> {
        let mut section = self.authorized_section(section_id, actor).await?;
        section.recolor(HexColor::parse(color)?);
        self.sections.update(&section).await?;
        self.feed
            .publish(StoreEvent::SectionsChanged(section.project_id()));
        Ok(section)
    }

    /// Replaces a section's role allowlist.
    ///
    /// An empty allowlist leaves only `Owner` with edit rights.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::PermissionDenied`] without `AddSection`.
    pub async fn set_allowed_roles(
        &self,
        section_id: SectionId,
        actor: UserId,
        allowed_roles: Vec<RoleName>,
    ) -> SectionResult<Section> {
        let mut section = self.authorized_section(section_id, actor).await?;
        section.set_allowed_roles(allowed_roles);
        self.sections.update(&section).await?;
        self.feed
            .publish(StoreEvent::SectionsChanged(section.project_id()));
        Ok(section)
    }

    /// Deletes a section, its tasks, and their comments.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::PermissionDenied`] without `AddSection`.
    pub async fn delete_section(&self, section_id: SectionId, actor: UserId) -> SectionResult<()> {
        let section = self.authorized_section(section_id, actor).await?;

        let removed_tasks = self.tasks.remove_all_for_section(section_id).await?;
        for task_id in &removed_tasks {
            self.comments.remove_all_for_task(*task_id).await?;
        }
        self.sections.remove(section_id).await?;

        tracing::info!(
            project_id = %section.project_id(),
            %section_id,
            tasks = removed_tasks.len(),
            "section deleted"
        );
        self.feed.publish(StoreEvent::SectionRemoved(section_id));
        self.feed
            .publish(StoreEvent::SectionsChanged(section.project_id()));
        Ok(())
    }

    /// Returns the sections of a project in board order.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::Sections`] on repository failure.
    pub async fn sections_of(&self, project_id: ProjectId) -> SectionResult<Vec<Section>> {
        Ok(self.sections.list_for_project(project_id).await?)
    }

    async fn authorized_section(
        &self,
        section_id: SectionId,
        actor: UserId,
    ) -> SectionResult<Section> {
        let section = self
            .sections
            .find_by_id(section_id)
            .await?
            .ok_or(SectionError::SectionNotFound(section_id))?;
        self.require_permission(section.project_id(), actor).await?;
        Ok(section)
    }

    async fn require_permission(&self, project_id: ProjectId, actor: UserId) -> SectionResult<()> {
        let allowed = self
            .access
            .has_permission(project_id, actor, Permission::AddSection)
            .await?;
        if allowed {
            Ok(())
        } else {
            Err(SectionError::PermissionDenied {
                user_id: actor,
                permission: Permission::AddSection,
            })
        }
    }
}
