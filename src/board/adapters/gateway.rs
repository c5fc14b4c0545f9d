//! Board-side implementation of the project context's cascade gateway.

use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;

use crate::board::ports::{CommentRepository, SectionRepository, TaskRepository};
use crate::identity::domain::UserId;
use crate::project::{
    domain::{ProjectId, RoleName},
    ports::{BoardGateway, BoardGatewayError, BoardGatewayResult},
};

/// Applies project-side cascades against the board repositories.
pub struct RepositoryBoardGateway<S, T, O, C>
where
    S: SectionRepository,
    T: TaskRepository,
    O: CommentRepository,
    C: Clock + Send + Sync,
{
    sections: Arc<S>,
    tasks: Arc<T>,
    comments: Arc<O>,
    clock: Arc<C>,
}

impl<S, T, O, C> RepositoryBoardGateway<S, T, O, C>
where
    S: SectionRepository,
    T: TaskRepository,
    O: CommentRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new gateway over the board repositories.
    #[must_use]
    pub const fn new(sections: Arc<S>, tasks: Arc<T>, comments: Arc<O>, clock: Arc<C>) -> Self {
        Self {
            sections,
            tasks,
            comments,
            clock,
        }
    }
}

#[async_trait]
impl<S, T, O, C> BoardGateway for RepositoryBoardGateway<S, T, O, C>
where
    S: SectionRepository,
    T: TaskRepository,
    O: CommentRepository,
    C: Clock + Send + Sync,
{
    async fn purge_project(&self, project_id: ProjectId) -> BoardGatewayResult<()> {
        let removed_tasks = self
            .tasks
            .remove_all_for_project(project_id)
            .await
            .map_err(BoardGatewayError::backend)?;
        for task_id in &removed_tasks {
            self.comments
                .remove_all_for_task(*task_id)
                .await
                .map_err(BoardGatewayError::backend)?;
        }
        let removed_sections = self
            .sections
            .remove_all_for_project(project_id)
            .await
            .map_err(BoardGatewayError::backend)?;

        tracing::info!(
            %project_id,
            tasks = removed_tasks.len(),
            sections = removed_sections,
            "board content purged"
        );
        Ok(())
    }

    async fn unassign_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> BoardGatewayResult<()> {
        let now = self.clock.utc();
        let tasks = self
            .tasks
            .list_for_project(project_id)
            .await
            .map_err(BoardGatewayError::backend)?;
        for mut task in tasks {
            if task.unassign_user(user_id, now) {
                self.tasks
                    .update(&task)
                    .await
                    .map_err(BoardGatewayError::backend)?;
            }
        }
        Ok(())
    }

    async fn strip_role_from_sections(
        &self,
        project_id: ProjectId,
        role: &RoleName,
    ) -> BoardGatewayResult<()> {
        let sections = self
            .sections
            .list_for_project(project_id)
            .await
            .map_err(BoardGatewayError::backend)?;
        for mut section in sections {
            if section.strip_role(role) {
                self.sections
                    .update(&section)
                    .await
                    .map_err(BoardGatewayError::backend)?;
            }
        }
        Ok(())
    }
}
