//! Project aggregate root.

use super::{InviteCode, ProjectId, ProjectName};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Project aggregate root.
///
/// The creator is the immutable owner: ownership is never transferred, the
/// creator cannot leave, and only the creator may delete the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    invite_code: InviteCode,
    created_by: UserId,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted project name.
    pub name: ProjectName,
    /// Persisted invite code.
    pub invite_code: InviteCode,
    /// Persisted creator.
    pub created_by: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new project with a freshly generated invite code.
    #[must_use]
    pub fn new(name: ProjectName, created_by: UserId, clock: &impl Clock) -> Self {
        Self {
            id: ProjectId::new(),
            name,
            invite_code: InviteCode::generate(),
            created_by,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            invite_code: data.invite_code,
            created_by: data.created_by,
            created_at: data.created_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the invite code.
    #[must_use]
    pub const fn invite_code(&self) -> &InviteCode {
        &self.invite_code
    }

    /// Returns the creator.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether the given user is the project creator.
    #[must_use]
    pub fn is_creator(&self, user_id: UserId) -> bool {
        self.created_by == user_id
    }
}
