//! Deadline sweeping and overdue queries.
//!
//! The sweep runs on demand rather than on a timer: callers invoke it when
//! a board is loaded or refreshed, so staleness between invocations is
//! bounded by how often the board is viewed.

use crate::board::{
    domain::{Task, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::events::{ChangeFeed, StoreEvent};
use crate::project::domain::ProjectId;
use chrono::{DateTime, Days, NaiveTime, TimeZone, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Result type for deadline operations.
pub type DeadlineResult<T> = Result<T, DeadlineError>;

/// Errors surfaced by the deadline service.
#[derive(Debug, Error)]
pub enum DeadlineError {
    /// Task repository failure.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
}

/// Returns midnight UTC at the start of the current day.
fn start_of_current_day(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.from_utc_datetime(&now.date_naive().and_time(NaiveTime::MIN))
}

/// Returns midnight UTC at the start of the next day.
fn end_of_current_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .checked_add_days(Days::new(1))
        .map_or(now, |next| Utc.from_utc_datetime(&next.and_time(NaiveTime::MIN)))
}

/// Fails expired tasks and answers overdue queries.
pub struct DeadlineService<T, C>
where
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    clock: Arc<C>,
    feed: ChangeFeed,
}

impl<T, C> DeadlineService<T, C>
where
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new deadline service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, clock: Arc<C>, feed: ChangeFeed) -> Self {
        Self { tasks, clock, feed }
    }

    /// Fails every `Active` task of the project whose deadline lies
    /// strictly before the end of the current day.
    ///
    /// Returns the number of tasks that transitioned.
    ///
    /// # Errors
    ///
    /// Returns [`DeadlineError::Tasks`] on repository failure.
    pub async fn sweep_expired(&self, project_id: ProjectId) -> DeadlineResult<usize> {
        let now = self.clock.utc();
        let cutoff = end_of_current_day(now);

        let mut failed = 0_usize;
        for mut task in self.tasks.list_for_project(project_id).await? {
            if task.fail_expired(cutoff, now) {
                self.tasks.update(&task).await?;
                failed = failed.saturating_add(1);
            }
        }

        if failed > 0 {
            tracing::info!(%project_id, failed, "deadline sweep failed expired tasks");
            self.feed.publish(StoreEvent::TasksChanged(project_id));
        }
        Ok(failed)
    }

    /// Returns tasks that are not `Done` and whose deadline lies before
    /// the start of today.
    ///
    /// # Errors
    ///
    /// Returns [`DeadlineError::Tasks`] on repository failure.
    pub async fn overdue_tasks(&self, project_id: ProjectId) -> DeadlineResult<Vec<Task>> {
        let cutoff = start_of_current_day(self.clock.utc());
        let tasks = self.tasks.list_for_project(project_id).await?;
        Ok(tasks
            .into_iter()
            .filter(|task| task.is_overdue(cutoff))
            .collect())
    }

    /// Returns the `Failed` tasks of the project.
    ///
    /// # Errors
    ///
    /// Returns [`DeadlineError::Tasks`] on repository failure.
    pub async fn failed_tasks(&self, project_id: ProjectId) -> DeadlineResult<Vec<Task>> {
        let tasks = self.tasks.list_for_project(project_id).await?;
        Ok(tasks
            .into_iter()
            .filter(|task| task.status() == TaskStatus::Failed)
            .collect())
    }
}
