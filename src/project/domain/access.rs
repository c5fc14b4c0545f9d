//! Pure permission evaluation over projects, memberships, and roles.

use super::{Membership, Project, ProjectRole, RoleName, RolePermissions};

/// Computes the effective permission set of a user within a project.
///
/// The creator holds every permission. Otherwise the result is the union of
/// the permission sets of every role definition whose name the membership
/// holds; any `is_admin` role grants everything. A missing membership holds
/// nothing.
#[must_use]
pub fn evaluate_permissions(
    project: &Project,
    membership: Option<&Membership>,
    roles: &[ProjectRole],
) -> RolePermissions {
    let Some(membership) = membership else {
        return RolePermissions::none();
    };
    if project.is_creator(membership.user_id()) {
        return RolePermissions::admin();
    }

    roles
        .iter()
        .filter(|role| membership.has_role(role.name()))
        .fold(RolePermissions::none(), |acc, role| {
            acc.union(role.permissions())
        })
}

/// Returns whether a member holding `role_names` may edit tasks in a section
/// with the given allowlist.
///
/// `Owner` always may; otherwise any held role must appear in the allowlist.
#[must_use]
pub fn can_edit_section(role_names: &[RoleName], allowed_roles: &[RoleName]) -> bool {
    if role_names.iter().any(RoleName::is_owner) {
        return true;
    }
    role_names.iter().any(|held| allowed_roles.contains(held))
}
