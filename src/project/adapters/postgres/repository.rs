//! `PostgreSQL` repository implementations for project storage.

use super::{
    models::{MembershipRow, NewMembershipRow, NewProjectRow, NewRoleRow, ProjectRow, RoleRow},
    schema::{project_members, project_roles, projects},
};
use crate::identity::domain::UserId;
use crate::project::{
    domain::{
        InviteCode, Membership, PersistedProjectData, PersistedRoleData, Project, ProjectId,
        ProjectName, ProjectRole, RoleId, RoleName, RolePermissions,
    },
    ports::{
        MembershipRepository, MembershipRepositoryError, MembershipRepositoryResult,
        ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult, RoleRepository,
        RoleRepositoryError, RoleRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by project adapters.
pub type ProjectPgPool = Pool<ConnectionManager<PgConnection>>;

fn is_constraint(info: &dyn DatabaseErrorInformation, name: &str) -> bool {
    info.constraint_name().is_some_and(|found| found == name)
}

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: ProjectPgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ProjectPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProjectRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProjectRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProjectRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProjectRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let invite_code = project.invite_code().clone();
        let new_row = NewProjectRow {
            id: project.id().into_inner(),
            name: project.name().as_str().to_owned(),
            invite_code: project.invite_code().as_str().to_owned(),
            created_by: project.created_by().into_inner(),
            created_at: project.created_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(projects::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_constraint(info.as_ref(), "idx_projects_invite_code_unique") =>
                    {
                        ProjectRepositoryError::DuplicateInviteCode(invite_code.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateProject(project_id)
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn remove(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let removed =
                diesel::delete(projects::table.filter(projects::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(ProjectRepositoryError::persistence)?;
            if removed == 0 {
                return Err(ProjectRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::id.eq(id.into_inner()))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn find_by_invite_code(
        &self,
        code: &InviteCode,
    ) -> ProjectRepositoryResult<Option<Project>> {
        let lookup = code.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::invite_code.eq(lookup))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }
}

fn row_to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    let name = ProjectName::new(row.name).map_err(ProjectRepositoryError::persistence)?;
    let invite_code =
        InviteCode::parse(row.invite_code).map_err(ProjectRepositoryError::persistence)?;
    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(row.id),
        name,
        invite_code,
        created_by: UserId::from_uuid(row.created_by),
        created_at: row.created_at,
    }))
}

/// `PostgreSQL`-backed membership repository.
#[derive(Debug, Clone)]
pub struct PostgresMembershipRepository {
    pool: ProjectPgPool,
}

impl PostgresMembershipRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ProjectPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> MembershipRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> MembershipRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(MembershipRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(MembershipRepositoryError::persistence)?
    }
}

fn membership_to_new_row(membership: &Membership) -> NewMembershipRow {
    NewMembershipRow {
        project_id: membership.project_id().into_inner(),
        user_id: membership.user_id().into_inner(),
        role_names: membership
            .role_names()
            .iter()
            .map(|role| role.as_str().to_owned())
            .collect(),
        joined_at: membership.joined_at(),
    }
}

fn row_to_membership(row: MembershipRow) -> MembershipRepositoryResult<Membership> {
    let role_names = row
        .role_names
        .into_iter()
        .map(RoleName::new)
        .collect::<Result<Vec<_>, _>>()
        .map_err(MembershipRepositoryError::persistence)?;
    Ok(Membership::from_persisted(
        ProjectId::from_uuid(row.project_id),
        UserId::from_uuid(row.user_id),
        role_names,
        row.joined_at,
    ))
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn store(&self, membership: &Membership) -> MembershipRepositoryResult<()> {
        let project_id = membership.project_id();
        let user_id = membership.user_id();
        let new_row = membership_to_new_row(membership);

        self.run_blocking(move |connection| {
            diesel::insert_into(project_members::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        MembershipRepositoryError::DuplicateMembership {
                            project_id,
                            user_id,
                        }
                    }
                    _ => MembershipRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, membership: &Membership) -> MembershipRepositoryResult<()> {
        let project_id = membership.project_id();
        let user_id = membership.user_id();
        let role_names: Vec<String> = membership
            .role_names()
            .iter()
            .map(|role| role.as_str().to_owned())
            .collect();

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                project_members::table
                    .filter(project_members::project_id.eq(project_id.into_inner()))
                    .filter(project_members::user_id.eq(user_id.into_inner())),
            )
            .set(project_members::role_names.eq(role_names))
            .execute(connection)
            .map_err(MembershipRepositoryError::persistence)?;
            if updated == 0 {
                return Err(MembershipRepositoryError::NotFound {
                    project_id,
                    user_id,
                });
            }
            Ok(())
        })
        .await
    }

    async fn remove(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> MembershipRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(
                project_members::table
                    .filter(project_members::project_id.eq(project_id.into_inner()))
                    .filter(project_members::user_id.eq(user_id.into_inner())),
            )
            .execute(connection)
            .map_err(MembershipRepositoryError::persistence)?;
            if removed == 0 {
                return Err(MembershipRepositoryError::NotFound {
                    project_id,
                    user_id,
                });
            }
            Ok(())
        })
        .await
    }

    async fn find(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> MembershipRepositoryResult<Option<Membership>> {
        self.run_blocking(move |connection| {
            let row = project_members::table
                .filter(project_members::project_id.eq(project_id.into_inner()))
                .filter(project_members::user_id.eq(user_id.into_inner()))
                .select(MembershipRow::as_select())
                .first::<MembershipRow>(connection)
                .optional()
                .map_err(MembershipRepositoryError::persistence)?;
            row.map(row_to_membership).transpose()
        })
        .await
    }

    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> MembershipRepositoryResult<Vec<Membership>> {
        self.run_blocking(move |connection| {
            let rows = project_members::table
                .filter(project_members::project_id.eq(project_id.into_inner()))
                .order(project_members::joined_at.asc())
                .select(MembershipRow::as_select())
                .load::<MembershipRow>(connection)
                .map_err(MembershipRepositoryError::persistence)?;
            rows.into_iter().map(row_to_membership).collect()
        })
        .await
    }

    async fn list_for_user(&self, user_id: UserId) -> MembershipRepositoryResult<Vec<Membership>> {
        self.run_blocking(move |connection| {
            let rows = project_members::table
                .filter(project_members::user_id.eq(user_id.into_inner()))
                .order(project_members::joined_at.asc())
                .select(MembershipRow::as_select())
                .load::<MembershipRow>(connection)
                .map_err(MembershipRepositoryError::persistence)?;
            rows.into_iter().map(row_to_membership).collect()
        })
        .await
    }

    async fn remove_all_for_project(
        &self,
        project_id: ProjectId,
    ) -> MembershipRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            diesel::delete(
                project_members::table
                    .filter(project_members::project_id.eq(project_id.into_inner())),
            )
            .execute(connection)
            .map_err(MembershipRepositoryError::persistence)
        })
        .await
    }
}

/// `PostgreSQL`-backed role definition repository.
#[derive(Debug, Clone)]
pub struct PostgresRoleRepository {
    pool: ProjectPgPool,
}

impl PostgresRoleRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ProjectPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> RoleRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RoleRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(RoleRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(RoleRepositoryError::persistence)?
    }
}

fn role_to_new_row(role: &ProjectRole) -> NewRoleRow {
    let permissions = role.permissions();
    NewRoleRow {
        id: role.id().into_inner(),
        project_id: role.project_id().into_inner(),
        name: role.name().as_str().to_owned(),
        color: role.color().to_owned(),
        is_admin: permissions.is_admin,
        can_invite: permissions.can_invite,
        can_add_section: permissions.can_add_section,
        can_delete_member: permissions.can_delete_member,
        can_delete_task: permissions.can_delete_task,
        can_edit_roles: permissions.can_edit_roles,
        created_at: role.created_at(),
    }
}

fn row_to_role(row: RoleRow) -> RoleRepositoryResult<ProjectRole> {
    let name = RoleName::new(row.name).map_err(RoleRepositoryError::persistence)?;
    let permissions = RolePermissions {
        is_admin: row.is_admin,
        can_invite: row.can_invite,
        can_add_section: row.can_add_section,
        can_delete_member: row.can_delete_member,
        can_delete_task: row.can_delete_task,
        can_edit_roles: row.can_edit_roles,
    };
    Ok(ProjectRole::from_persisted(PersistedRoleData {
        id: RoleId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        name,
        color: row.color,
        permissions: permissions.with_admin_expanded(),
        created_at: row.created_at,
    }))
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn store(&self, role: &ProjectRole) -> RoleRepositoryResult<()> {
        let project_id = role.project_id();
        let name = role.name().clone();
        let new_row = role_to_new_row(role);

        self.run_blocking(move |connection| {
            diesel::insert_into(project_roles::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        RoleRepositoryError::DuplicateRole {
                            project_id,
                            name: name.clone(),
                        }
                    }
                    _ => RoleRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, role: &ProjectRole) -> RoleRepositoryResult<()> {
        let role_id = role.id();
        let permissions = role.permissions();

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                project_roles::table.filter(project_roles::id.eq(role_id.into_inner())),
            )
            .set((
                project_roles::is_admin.eq(permissions.is_admin),
                project_roles::can_invite.eq(permissions.can_invite),
                project_roles::can_add_section.eq(permissions.can_add_section),
                project_roles::can_delete_member.eq(permissions.can_delete_member),
                project_roles::can_delete_task.eq(permissions.can_delete_task),
                project_roles::can_edit_roles.eq(permissions.can_edit_roles),
            ))
            .execute(connection)
            .map_err(RoleRepositoryError::persistence)?;
            if updated == 0 {
                return Err(RoleRepositoryError::NotFound(role_id));
            }
            Ok(())
        })
        .await
    }

    async fn remove(&self, id: RoleId) -> RoleRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(
                project_roles::table.filter(project_roles::id.eq(id.into_inner())),
            )
            .execute(connection)
            .map_err(RoleRepositoryError::persistence)?;
            if removed == 0 {
                return Err(RoleRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: RoleId) -> RoleRepositoryResult<Option<ProjectRole>> {
        self.run_blocking(move |connection| {
            let row = project_roles::table
                .filter(project_roles::id.eq(id.into_inner()))
                .select(RoleRow::as_select())
                .first::<RoleRow>(connection)
                .optional()
                .map_err(RoleRepositoryError::persistence)?;
            row.map(row_to_role).transpose()
        })
        .await
    }

    async fn find_by_name(
        &self,
        project_id: ProjectId,
        name: &RoleName,
    ) -> RoleRepositoryResult<Option<ProjectRole>> {
        // Case-insensitive match is done in Rust; per-project role lists
        // stay small.
        let roles = self.list_for_project(project_id).await?;
        Ok(roles
            .into_iter()
            .find(|role| role.name().eq_ignore_case(name)))
    }

    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> RoleRepositoryResult<Vec<ProjectRole>> {
        self.run_blocking(move |connection| {
            let rows = project_roles::table
                .filter(project_roles::project_id.eq(project_id.into_inner()))
                .order(project_roles::created_at.asc())
                .select(RoleRow::as_select())
                .load::<RoleRow>(connection)
                .map_err(RoleRepositoryError::persistence)?;
            rows.into_iter().map(row_to_role).collect()
        })
        .await
    }

    async fn remove_all_for_project(&self, project_id: ProjectId) -> RoleRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            diesel::delete(
                project_roles::table
                    .filter(project_roles::project_id.eq(project_id.into_inner())),
            )
            .execute(connection)
            .map_err(RoleRepositoryError::persistence)
        })
        .await
    }
}
