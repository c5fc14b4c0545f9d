//! Change-notification broadcast shared by the orchestration services.
//!
//! The original observer wiring re-rendered every subscriber synchronously
//! after each in-memory mutation. Here services publish a coarse
//! [`StoreEvent`] onto a [`tokio::sync::broadcast`] channel after the
//! repository write has succeeded, so observers only ever see committed
//! state. Dropped events (lagging receivers) are acceptable: consumers are
//! expected to re-query the repositories rather than replay the feed.

use crate::board::domain::Comment;
use crate::board::domain::{SectionId, TaskId};
use crate::project::domain::ProjectId;
use tokio::sync::broadcast;

/// Default capacity of the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// Coarse-grained change notification published after a committed mutation.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// A project was created, joined, left, or deleted.
    ProjectsChanged(ProjectId),
    /// A membership or role assignment changed within a project.
    MembersChanged(ProjectId),
    /// A role definition was created, edited, or deleted.
    RolesChanged(ProjectId),
    /// A section was created, edited, or deleted.
    SectionsChanged(ProjectId),
    /// A task was created, edited, swept, or deleted.
    TasksChanged(ProjectId),
    /// A single task changed (work tracking, status toggle).
    TaskChanged(TaskId),
    /// A section and its tasks were removed.
    SectionRemoved(SectionId),
    /// A comment was appended to a task.
    CommentPosted(Comment),
}

/// Broadcast hub for [`StoreEvent`] notifications.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<StoreEvent>,
}

impl ChangeFeed {
    /// Creates a feed with the default buffer capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a feed with an explicit buffer capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to future change notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }

    /// Publishes an event, ignoring the no-subscriber case.
    pub fn publish(&self, event: StoreEvent) {
        // send only fails when no receiver is subscribed, which is fine.
        drop(self.sender.send(event));
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}
