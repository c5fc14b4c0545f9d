//! Domain-level tests for invite codes, roles, memberships, and permission
//! evaluation.

use crate::identity::domain::UserId;
use crate::project::domain::{
    InviteCode, Membership, Permission, Project, ProjectDomainError, ProjectName, ProjectRole,
    ROLE_PALETTE, RoleName, RolePermissions, can_edit_section, evaluate_permissions,
    palette_color,
};
use mockable::DefaultClock;
use rstest::rstest;

fn role_name(value: &str) -> RoleName {
    RoleName::new(value).expect("role name should be valid")
}

fn sample_project(creator: UserId) -> Project {
    let name = ProjectName::new("Apollo").expect("project name should be valid");
    Project::new(name, creator, &DefaultClock)
}

#[rstest]
fn generated_invite_codes_are_eight_lowercase_hex_chars() {
    let code = InviteCode::generate();
    assert_eq!(code.as_str().len(), 8);
    assert!(code.as_str().chars().all(|c| c.is_ascii_hexdigit()));

    let reparsed = InviteCode::parse(code.as_str()).expect("generated code should parse");
    assert_eq!(reparsed, code);
}

#[rstest]
#[case("  AbCd1234  ", "abcd1234")]
#[case("zzzz", "zzzz")]
fn invite_code_parsing_trims_and_lowercases(#[case] input: &str, #[case] expected: &str) {
    let code = InviteCode::parse(input).expect("code should parse");
    assert_eq!(code.as_str(), expected);
}

#[rstest]
#[case("abc")]
#[case("toolongtobeanvalidcode")]
#[case("with space")]
#[case("dash-code")]
fn malformed_invite_codes_are_rejected(#[case] input: &str) {
    assert!(matches!(
        InviteCode::parse(input),
        Err(ProjectDomainError::InvalidInviteCode(_))
    ));
}

#[rstest]
fn palette_color_wraps_around() {
    assert_eq!(palette_color(0), "#3b82f6");
    assert_eq!(palette_color(ROLE_PALETTE.len()), "#3b82f6");
    assert_eq!(palette_color(ROLE_PALETTE.len() + 3), "#ef4444");
}

#[rstest]
fn admin_flag_expands_to_every_permission() {
    let permissions = RolePermissions {
        is_admin: true,
        ..RolePermissions::none()
    }
    .with_admin_expanded();

    assert_eq!(permissions, RolePermissions::admin());
    assert!(permissions.grants(Permission::Invite));
    assert!(permissions.grants(Permission::EditRoles));
}

#[rstest]
fn permission_union_merges_flags() {
    let inviter = RolePermissions {
        can_invite: true,
        ..RolePermissions::none()
    };
    let sectioner = RolePermissions {
        can_add_section: true,
        ..RolePermissions::none()
    };

    let merged = inviter.union(sectioner);
    assert!(merged.grants(Permission::Invite));
    assert!(merged.grants(Permission::AddSection));
    assert!(!merged.grants(Permission::DeleteTask));
}

#[rstest]
fn owner_role_cannot_be_reconfigured() {
    let project_id = sample_project(UserId::new()).id();
    let mut owner = ProjectRole::owner(project_id, &DefaultClock);

    let result = owner.update_permissions(RolePermissions::none());
    assert!(matches!(result, Err(ProjectDomainError::ProtectedRole(_))));
    assert_eq!(owner.permissions(), RolePermissions::admin());
}

#[rstest]
fn creator_holds_every_permission_without_roles() {
    let creator = UserId::new();
    let project = sample_project(creator);
    let membership = Membership::owner(project.id(), creator, &DefaultClock);

    let permissions = evaluate_permissions(&project, Some(&membership), &[]);
    assert_eq!(permissions, RolePermissions::admin());
}

#[rstest]
fn non_member_holds_no_permissions() {
    let project = sample_project(UserId::new());
    let permissions = evaluate_permissions(&project, None, &[]);
    assert_eq!(permissions, RolePermissions::none());
}

#[rstest]
fn member_permissions_union_over_held_roles() {
    let project = sample_project(UserId::new());
    let reviewer = ProjectRole::new(
        project.id(),
        role_name("Reviewer"),
        "#10b981",
        RolePermissions {
            can_delete_task: true,
            ..RolePermissions::none()
        },
        &DefaultClock,
    );
    let greeter = ProjectRole::new(
        project.id(),
        role_name("Greeter"),
        "#3b82f6",
        RolePermissions {
            can_invite: true,
            ..RolePermissions::none()
        },
        &DefaultClock,
    );
    let unheld = ProjectRole::new(
        project.id(),
        role_name("Admin"),
        "#ef4444",
        RolePermissions::admin(),
        &DefaultClock,
    );

    let member = UserId::new();
    let membership = Membership::new(
        project.id(),
        member,
        vec![role_name("Reviewer"), role_name("Greeter")],
        &DefaultClock,
    )
    .expect("membership should be valid");

    let permissions =
        evaluate_permissions(&project, Some(&membership), &[reviewer, greeter, unheld]);
    assert!(permissions.grants(Permission::DeleteTask));
    assert!(permissions.grants(Permission::Invite));
    assert!(!permissions.grants(Permission::EditRoles));
}

#[rstest]
#[case(vec!["Owner"], vec!["Designer"], true)]
#[case(vec!["Designer"], vec!["Designer", "Reviewer"], true)]
#[case(vec!["Designer"], vec!["Reviewer"], false)]
#[case(vec!["Member"], vec![], false)]
fn section_edit_rights_follow_allowlist(
    #[case] held: Vec<&str>,
    #[case] allowed: Vec<&str>,
    #[case] expected: bool,
) {
    let held: Vec<RoleName> = held.into_iter().map(role_name).collect();
    let allowed: Vec<RoleName> = allowed.into_iter().map(role_name).collect();
    assert_eq!(can_edit_section(&held, &allowed), expected);
}

#[rstest]
fn toggling_last_role_is_skipped() {
    let project_id = sample_project(UserId::new()).id();
    let mut membership = Membership::joining(project_id, UserId::new(), &DefaultClock);

    membership.toggle_role(RoleName::member(), false);
    assert_eq!(membership.role_names(), &[RoleName::member()]);
}

#[rstest]
fn creator_keeps_owner_through_toggle_and_replace() {
    let creator = UserId::new();
    let project_id = sample_project(creator).id();
    let mut membership = Membership::owner(project_id, creator, &DefaultClock);

    membership.toggle_role(RoleName::owner(), true);
    assert!(membership.is_owner());

    membership.set_roles(vec![role_name("Designer")], true);
    assert!(membership.is_owner());
    assert!(membership.has_role(&role_name("Designer")));
}

#[rstest]
fn removing_last_role_name_falls_back_to_member() {
    let project_id = sample_project(UserId::new()).id();
    let mut membership = Membership::new(
        project_id,
        UserId::new(),
        vec![role_name("Designer")],
        &DefaultClock,
    )
    .expect("membership should be valid");

    let changed = membership.remove_role_name(&role_name("Designer"));
    assert!(changed);
    assert_eq!(membership.role_names(), &[RoleName::member()]);

    let unchanged = membership.remove_role_name(&role_name("Designer"));
    assert!(!unchanged);
}
