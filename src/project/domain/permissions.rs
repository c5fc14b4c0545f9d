//! Permission flags attached to project roles.

use serde::{Deserialize, Serialize};

/// A single checkable permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Create invitations for the project.
    Invite,
    /// Add board sections.
    AddSection,
    /// Remove project members.
    DeleteMember,
    /// Delete tasks.
    DeleteTask,
    /// Edit role definitions and member role assignments.
    EditRoles,
}

/// Permission flag set carried by a role definition.
///
/// `is_admin` subsumes every other flag; [`RolePermissions::admin`] and the
/// normalisation in [`RolePermissions::with_admin_expanded`] keep the stored
/// flags consistent with that rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RolePermissions {
    /// Full administrative access; implies every other flag.
    pub is_admin: bool,
    /// May create invitations.
    pub can_invite: bool,
    /// May add board sections.
    pub can_add_section: bool,
    /// May remove members.
    pub can_delete_member: bool,
    /// May delete tasks.
    pub can_delete_task: bool,
    /// May edit roles and role assignments.
    pub can_edit_roles: bool,
}

impl RolePermissions {
    /// Returns the empty permission set.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            is_admin: false,
            can_invite: false,
            can_add_section: false,
            can_delete_member: false,
            can_delete_task: false,
            can_edit_roles: false,
        }
    }

    /// Returns the full administrative permission set.
    #[must_use]
    pub const fn admin() -> Self {
        Self {
            is_admin: true,
            can_invite: true,
            can_add_section: true,
            can_delete_member: true,
            can_delete_task: true,
            can_edit_roles: true,
        }
    }

    /// Expands `is_admin` into every concrete flag.
    #[must_use]
    pub const fn with_admin_expanded(self) -> Self {
        if self.is_admin { Self::admin() } else { self }
    }

    /// Returns whether this set grants the given permission.
    #[must_use]
    pub const fn grants(self, permission: Permission) -> bool {
        if self.is_admin {
            return true;
        }
        match permission {
            Permission::Invite => self.can_invite,
            Permission::AddSection => self.can_add_section,
            Permission::DeleteMember => self.can_delete_member,
            Permission::DeleteTask => self.can_delete_task,
            Permission::EditRoles => self.can_edit_roles,
        }
    }

    /// Returns the union of two permission sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        let merged = Self {
            is_admin: self.is_admin || other.is_admin,
            can_invite: self.can_invite || other.can_invite,
            can_add_section: self.can_add_section || other.can_add_section,
            can_delete_member: self.can_delete_member || other.can_delete_member,
            can_delete_task: self.can_delete_task || other.can_delete_task,
            can_edit_roles: self.can_edit_roles || other.can_edit_roles,
        };
        merged.with_admin_expanded()
    }
}
