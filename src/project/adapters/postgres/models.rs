//! Diesel row models for project persistence.

use super::schema::{project_members, project_roles, projects};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for project records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Project name.
    pub name: String,
    /// Shareable invite code.
    pub invite_code: String,
    /// Creating user.
    pub created_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for project records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub struct NewProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Project name.
    pub name: String,
    /// Shareable invite code.
    pub invite_code: String,
    /// Creating user.
    pub created_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for membership records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = project_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MembershipRow {
    /// Joined project.
    pub project_id: uuid::Uuid,
    /// Joined user.
    pub user_id: uuid::Uuid,
    /// Held role names.
    pub role_names: Vec<String>,
    /// Join timestamp.
    pub joined_at: DateTime<Utc>,
}

/// Insert model for membership records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = project_members)]
pub struct NewMembershipRow {
    /// Joined project.
    pub project_id: uuid::Uuid,
    /// Joined user.
    pub user_id: uuid::Uuid,
    /// Held role names.
    pub role_names: Vec<String>,
    /// Join timestamp.
    pub joined_at: DateTime<Utc>,
}

/// Query result row for role definition records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = project_roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoleRow {
    /// Role identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Role name.
    pub name: String,
    /// Display color.
    pub color: String,
    /// Full administrative access.
    pub is_admin: bool,
    /// May create invitations.
    pub can_invite: bool,
    /// May add board sections.
    pub can_add_section: bool,
    /// May remove members.
    pub can_delete_member: bool,
    /// May delete tasks.
    pub can_delete_task: bool,
    /// May edit roles and assignments.
    pub can_edit_roles: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for role definition records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = project_roles)]
pub struct NewRoleRow {
    /// Role identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Role name.
    pub name: String,
    /// Display color.
    pub color: String,
    /// Full administrative access.
    pub is_admin: bool,
    /// May create invitations.
    pub can_invite: bool,
    /// May add board sections.
    pub can_add_section: bool,
    /// May remove members.
    pub can_delete_member: bool,
    /// May delete tasks.
    pub can_delete_task: bool,
    /// May edit roles and assignments.
    pub can_edit_roles: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
