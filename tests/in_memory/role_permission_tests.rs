//! Integration tests for role administration and permission gating.

use crewboard::project::{
    domain::{Permission, RoleName, RolePermissions},
    services::CreateRoleRequest,
};
use eyre::Result;
use rstest::rstest;

use super::helpers::{App, app, register};

fn role_request(name: &str, permissions: RolePermissions) -> CreateRoleRequest {
    CreateRoleRequest {
        name: name.to_owned(),
        color: None,
        permissions,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn granted_roles_unlock_the_matching_permissions(app: App) -> Result<()> {
    let grace = register(&app, "grace@example.com", "grace", "Grace").await?;
    let linus = register(&app, "linus@example.com", "linus", "Linus").await?;
    let project = app.projects.create_project("Apollo", grace.id()).await?;
    app.projects
        .join_by_invite(project.invite_code(), linus.id())
        .await?;

    // A plain member cannot create sections.
    let denied = app
        .sections
        .create_section(project.id(), linus.id(), "Blocked", "#6366f1", Vec::new())
        .await;
    assert!(denied.is_err());

    let architect = app
        .roles
        .create_role(
            project.id(),
            grace.id(),
            role_request(
                "Architect",
                RolePermissions {
                    can_add_section: true,
                    ..RolePermissions::none()
                },
            ),
        )
        .await?;
    app.roles
        .toggle_member_role(project.id(), grace.id(), linus.id(), architect.id())
        .await?;

    app.sections
        .create_section(project.id(), linus.id(), "Allowed", "#6366f1", Vec::new())
        .await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_role_strips_it_from_members_and_section_allowlists(app: App) -> Result<()> {
    let grace = register(&app, "grace@example.com", "grace", "Grace").await?;
    let linus = register(&app, "linus@example.com", "linus", "Linus").await?;
    let project = app.projects.create_project("Apollo", grace.id()).await?;
    app.projects
        .join_by_invite(project.invite_code(), linus.id())
        .await?;

    let designer = app
        .roles
        .create_role(project.id(), grace.id(), role_request("Designer", RolePermissions::none()))
        .await?;
    app.roles
        .set_member_roles(project.id(), grace.id(), linus.id(), vec![designer.id()])
        .await?;
    let section = app
        .sections
        .create_section(
            project.id(),
            grace.id(),
            "Design",
            "#ec4899",
            vec![designer.name().clone()],
        )
        .await?;

    app.roles
        .delete_role(project.id(), grace.id(), designer.id())
        .await?;

    let members = app.projects.members_of(project.id()).await?;
    let linus_membership = members
        .iter()
        .find(|membership| membership.user_id() == linus.id())
        .expect("membership should survive role deletion");
    assert_eq!(linus_membership.role_names(), &[RoleName::member()]);

    let sections = app.sections.sections_of(project.id()).await?;
    let stripped = sections
        .iter()
        .find(|found| found.id() == section.id())
        .expect("section should survive role deletion");
    assert!(stripped.allowed_roles().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn member_removal_requires_the_delete_member_permission(app: App) -> Result<()> {
    let grace = register(&app, "grace@example.com", "grace", "Grace").await?;
    let linus = register(&app, "linus@example.com", "linus", "Linus").await?;
    let margaret = register(&app, "margaret@example.com", "margaret", "Margaret").await?;
    let project = app.projects.create_project("Apollo", grace.id()).await?;
    app.projects
        .join_by_invite(project.invite_code(), linus.id())
        .await?;
    app.projects
        .join_by_invite(project.invite_code(), margaret.id())
        .await?;

    let denied = app
        .roles
        .remove_member(project.id(), linus.id(), margaret.id())
        .await;
    assert!(denied.is_err());

    let moderator = app
        .roles
        .create_role(
            project.id(),
            grace.id(),
            role_request(
                "Moderator",
                RolePermissions {
                    can_delete_member: true,
                    ..RolePermissions::none()
                },
            ),
        )
        .await?;
    app.roles
        .toggle_member_role(project.id(), grace.id(), linus.id(), moderator.id())
        .await?;

    app.roles
        .remove_member(project.id(), linus.id(), margaret.id())
        .await?;
    assert_eq!(app.projects.members_of(project.id()).await?.len(), 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_roles_grant_every_permission(app: App) -> Result<()> {
    let grace = register(&app, "grace@example.com", "grace", "Grace").await?;
    let linus = register(&app, "linus@example.com", "linus", "Linus").await?;
    let project = app.projects.create_project("Apollo", grace.id()).await?;
    app.projects
        .join_by_invite(project.invite_code(), linus.id())
        .await?;

    let admin = app
        .roles
        .create_role(
            project.id(),
            grace.id(),
            role_request(
                "Admin",
                RolePermissions {
                    is_admin: true,
                    ..RolePermissions::none()
                },
            ),
        )
        .await?;
    assert!(admin.permissions().grants(Permission::EditRoles));
    app.roles
        .toggle_member_role(project.id(), grace.id(), linus.id(), admin.id())
        .await?;

    // An admin member can now administer roles themselves.
    app.roles
        .create_role(project.id(), linus.id(), role_request("Scribe", RolePermissions::none()))
        .await?;
    Ok(())
}
