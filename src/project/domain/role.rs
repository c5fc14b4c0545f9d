//! Project role definitions and the display color palette.

use super::{ProjectDomainError, ProjectId, RoleId, RoleName, RolePermissions};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Display colors cycled through when roles are created without an explicit
/// color.
pub const ROLE_PALETTE: [&str; 10] = [
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899", "#06b6d4", "#84cc16",
    "#f97316", "#14b8a6",
];

/// Display color for the synthetic `Owner` role.
const OWNER_COLOR: &str = "#f59e0b";

/// Display color for the fallback `Member` role.
const MEMBER_COLOR: &str = "#6b7280";

/// Returns the palette color for the nth created role.
#[must_use]
pub fn palette_color(index: usize) -> &'static str {
    let wrapped = index.checked_rem(ROLE_PALETTE.len()).unwrap_or_default();
    ROLE_PALETTE.get(wrapped).copied().unwrap_or(MEMBER_COLOR)
}

/// Named permission bundle assignable to project members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRole {
    id: RoleId,
    project_id: ProjectId,
    name: RoleName,
    color: String,
    permissions: RolePermissions,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted role definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedRoleData {
    /// Persisted role identifier.
    pub id: RoleId,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted role name.
    pub name: RoleName,
    /// Persisted display color.
    pub color: String,
    /// Persisted permission flags.
    pub permissions: RolePermissions,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl ProjectRole {
    /// Creates a new role definition.
    ///
    /// `is_admin` in the supplied permission set is expanded to every flag.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        name: RoleName,
        color: impl Into<String>,
        permissions: RolePermissions,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: RoleId::new(),
            project_id,
            name,
            color: color.into(),
            permissions: permissions.with_admin_expanded(),
            created_at: clock.utc(),
        }
    }

    /// Creates the protected `Owner` role seeded at project creation.
    #[must_use]
    pub fn owner(project_id: ProjectId, clock: &impl Clock) -> Self {
        Self::new(
            project_id,
            RoleName::owner(),
            OWNER_COLOR,
            RolePermissions::admin(),
            clock,
        )
    }

    /// Creates the fallback `Member` role seeded at project creation.
    #[must_use]
    pub fn member(project_id: ProjectId, clock: &impl Clock) -> Self {
        Self::new(
            project_id,
            RoleName::member(),
            MEMBER_COLOR,
            RolePermissions::none(),
            clock,
        )
    }

    /// Reconstructs a role from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedRoleData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            name: data.name,
            color: data.color,
            permissions: data.permissions,
            created_at: data.created_at,
        }
    }

    /// Returns the role identifier.
    #[must_use]
    pub const fn id(&self) -> RoleId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the role name.
    #[must_use]
    pub const fn name(&self) -> &RoleName {
        &self.name
    }

    /// Returns the display color.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns the permission flags.
    #[must_use]
    pub const fn permissions(&self) -> RolePermissions {
        self.permissions
    }

    /// Returns whether this is the protected `Owner` role.
    #[must_use]
    pub fn is_protected(&self) -> bool {
        self.name.is_owner()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replaces the permission flags.
    ///
    /// Setting `is_admin` expands to every flag; clearing it leaves the other
    /// flags as supplied.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::ProtectedRole`] for the `Owner` role.
    pub fn update_permissions(
        &mut self,
        permissions: RolePermissions,
    ) -> Result<(), ProjectDomainError> {
        if self.is_protected() {
            return Err(ProjectDomainError::ProtectedRole(self.name.clone()));
        }
        self.permissions = permissions.with_admin_expanded();
        Ok(())
    }
}
