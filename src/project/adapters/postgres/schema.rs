//! Diesel schema for project persistence.

diesel::table! {
    /// Project records.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Project name.
        #[max_length = 200]
        name -> Varchar,
        /// Shareable invite code, unique.
        #[max_length = 16]
        invite_code -> Varchar,
        /// Creating user; the immutable owner.
        created_by -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Membership records joining users to projects.
    project_members (project_id, user_id) {
        /// Joined project.
        project_id -> Uuid,
        /// Joined user.
        user_id -> Uuid,
        /// Held role names; never empty.
        role_names -> Array<Text>,
        /// Join timestamp.
        joined_at -> Timestamptz,
    }
}

diesel::table! {
    /// Role definitions scoped to a project.
    project_roles (id) {
        /// Role identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Role name, unique within the project.
        #[max_length = 100]
        name -> Varchar,
        /// Display color.
        #[max_length = 16]
        color -> Varchar,
        /// Full administrative access.
        is_admin -> Bool,
        /// May create invitations.
        can_invite -> Bool,
        /// May add board sections.
        can_add_section -> Bool,
        /// May remove members.
        can_delete_member -> Bool,
        /// May delete tasks.
        can_delete_task -> Bool,
        /// May edit roles and assignments.
        can_edit_roles -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(projects, project_members, project_roles);
