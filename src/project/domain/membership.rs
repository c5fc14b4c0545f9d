//! Project membership and its role-list invariants.

use super::{ProjectDomainError, ProjectId, RoleName};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Join record between a user and a project.
///
/// Invariants enforced here:
///
/// - a membership always carries at least one role name (`Member` is the
///   fallback when the last role is removed for it);
/// - the project creator's membership always contains `Owner`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    project_id: ProjectId,
    user_id: UserId,
    role_names: Vec<RoleName>,
    joined_at: DateTime<Utc>,
}

impl Membership {
    /// Creates a membership with the given initial roles.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyMembership`] when `role_names` is
    /// empty.
    pub fn new(
        project_id: ProjectId,
        user_id: UserId,
        role_names: Vec<RoleName>,
        clock: &impl Clock,
    ) -> Result<Self, ProjectDomainError> {
        if role_names.is_empty() {
            return Err(ProjectDomainError::EmptyMembership);
        }
        Ok(Self {
            project_id,
            user_id,
            role_names,
            joined_at: clock.utc(),
        })
    }

    /// Creates the creator's membership, holding the `Owner` role.
    #[must_use]
    pub fn owner(project_id: ProjectId, user_id: UserId, clock: &impl Clock) -> Self {
        Self {
            project_id,
            user_id,
            role_names: vec![RoleName::owner()],
            joined_at: clock.utc(),
        }
    }

    /// Creates a joining member's membership, holding the `Member` role.
    #[must_use]
    pub fn joining(project_id: ProjectId, user_id: UserId, clock: &impl Clock) -> Self {
        Self {
            project_id,
            user_id,
            role_names: vec![RoleName::member()],
            joined_at: clock.utc(),
        }
    }

    /// Reconstructs a membership from persisted storage.
    ///
    /// An empty persisted role list degrades to `Member` rather than
    /// violating the non-empty invariant.
    #[must_use]
    pub fn from_persisted(
        project_id: ProjectId,
        user_id: UserId,
        role_names: Vec<RoleName>,
        joined_at: DateTime<Utc>,
    ) -> Self {
        let roles = if role_names.is_empty() {
            vec![RoleName::member()]
        } else {
            role_names
        };
        Self {
            project_id,
            user_id,
            role_names: roles,
            joined_at,
        }
    }

    /// Returns the project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the member.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the held role names.
    #[must_use]
    pub fn role_names(&self) -> &[RoleName] {
        &self.role_names
    }

    /// Returns the join timestamp.
    #[must_use]
    pub const fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    /// Returns whether the membership holds the given role.
    #[must_use]
    pub fn has_role(&self, role: &RoleName) -> bool {
        self.role_names.contains(role)
    }

    /// Returns whether the membership holds the `Owner` role.
    #[must_use]
    pub fn is_owner(&self) -> bool {
        self.role_names.iter().any(RoleName::is_owner)
    }

    /// Adds the role when absent, removes it when present.
    ///
    /// Removal is skipped when it would leave the membership role-less, or
    /// when it would strip `Owner` from the project creator
    /// (`member_is_creator`).
    pub fn toggle_role(&mut self, role: RoleName, member_is_creator: bool) {
        if member_is_creator && role.is_owner() && self.has_role(&role) {
            return;
        }
        if self.has_role(&role) {
            if self.role_names.len() > 1 {
                self.role_names.retain(|held| held != &role);
            }
        } else {
            self.role_names.push(role);
        }
    }

    /// Replaces the role list.
    ///
    /// The creator always retains `Owner` even when the replacement omits
    /// it; an empty replacement degrades to `Member`.
    pub fn set_roles(&mut self, role_names: Vec<RoleName>, member_is_creator: bool) {
        let mut roles = role_names;
        if member_is_creator && !roles.iter().any(RoleName::is_owner) {
            roles.insert(0, RoleName::owner());
        }
        if roles.is_empty() {
            roles.push(RoleName::member());
        }
        self.role_names = roles;
    }

    /// Removes a deleted role's name, substituting `Member` when the
    /// membership would be left role-less.
    ///
    /// Returns whether the membership changed.
    pub fn remove_role_name(&mut self, role: &RoleName) -> bool {
        if !self.has_role(role) {
            return false;
        }
        self.role_names.retain(|held| held != role);
        if self.role_names.is_empty() {
            self.role_names.push(RoleName::member());
        }
        true
    }
}
