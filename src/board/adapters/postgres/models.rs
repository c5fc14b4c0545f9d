//! Diesel row models for board persistence.

use super::schema::{board_sections, board_tasks, task_comments};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for section records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = board_sections)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SectionRow {
    /// Section identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Section name.
    pub name: String,
    /// Display color.
    pub color: String,
    /// Board position.
    pub position: i32,
    /// Role allowlist.
    pub allowed_roles: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for section records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = board_sections)]
pub struct NewSectionRow {
    /// Section identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Section name.
    pub name: String,
    /// Display color.
    pub color: String,
    /// Board position.
    pub position: i32,
    /// Role allowlist.
    pub allowed_roles: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = board_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Owning section.
    pub section_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Urgency marker.
    pub priority: String,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Assigned users.
    pub assignees: Vec<uuid::Uuid>,
    /// Users currently working on the task.
    pub working: Vec<uuid::Uuid>,
    /// When the first current worker started.
    pub working_started: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = board_tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Owning section.
    pub section_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Urgency marker.
    pub priority: String,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Assigned users.
    pub assignees: Vec<uuid::Uuid>,
    /// Users currently working on the task.
    pub working: Vec<uuid::Uuid>,
    /// When the first current worker started.
    pub working_started: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for comment records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    /// Comment identifier.
    pub id: uuid::Uuid,
    /// Commented task.
    pub task_id: uuid::Uuid,
    /// Author.
    pub author_id: uuid::Uuid,
    /// Denormalized author display name.
    pub author_name: String,
    /// Comment body.
    pub body: String,
    /// Posting timestamp.
    pub posted_at: DateTime<Utc>,
}

/// Insert model for comment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_comments)]
pub struct NewCommentRow {
    /// Comment identifier.
    pub id: uuid::Uuid,
    /// Commented task.
    pub task_id: uuid::Uuid,
    /// Author.
    pub author_id: uuid::Uuid,
    /// Denormalized author display name.
    pub author_name: String,
    /// Comment body.
    pub body: String,
    /// Posting timestamp.
    pub posted_at: DateTime<Utc>,
}
