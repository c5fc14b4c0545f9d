//! Diesel row models for user account persistence.

use super::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Lowercased email address.
    pub email: String,
    /// Lowercased account handle.
    pub username: String,
    /// Given name.
    pub display_name: String,
    /// Surname.
    pub surname: String,
    /// Consecutive-day login streak.
    pub streak: i32,
    /// Last recorded activity.
    pub last_active: DateTime<Utc>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Lowercased email address.
    pub email: String,
    /// Lowercased account handle.
    pub username: String,
    /// Given name.
    pub display_name: String,
    /// Surname.
    pub surname: String,
    /// Consecutive-day login streak.
    pub streak: i32,
    /// Last recorded activity.
    pub last_active: DateTime<Utc>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}
