//! `PostgreSQL` repository implementation for user account storage.

use super::{
    models::{NewUserRow, UserRow},
    schema::users,
};
use crate::identity::{
    domain::{DisplayName, EmailAddress, PersistedUserData, User, UserId, Username},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by identity adapters.
pub type IdentityPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: IdentityPgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: IdentityPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let email = user.email().clone();
        let username = user.username().clone();
        let new_row = to_new_row(user)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_constraint(info.as_ref(), "idx_users_email_unique") =>
                    {
                        UserRepositoryError::DuplicateEmail(email.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_constraint(info.as_ref(), "idx_users_username_unique") =>
                    {
                        UserRepositoryError::DuplicateUsername(username.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserRepositoryError::DuplicateUser(user_id)
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let streak = persisted_streak(user)?;
        let last_active = user.last_active();

        self.run_blocking(move |connection| {
            let updated = diesel::update(users::table.filter(users::id.eq(user_id.into_inner())))
                .set((
                    users::streak.eq(streak),
                    users::last_active.eq(last_active),
                ))
                .execute(connection)
                .map_err(UserRepositoryError::persistence)?;
            if updated == 0 {
                return Err(UserRepositoryError::NotFound(user_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let lookup = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::email.eq(lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_username(&self, username: &Username) -> UserRepositoryResult<Option<User>> {
        let lookup = username.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::username.eq(lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn list_all(&self) -> UserRepositoryResult<Vec<User>> {
        self.run_blocking(move |connection| {
            let rows = users::table
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }
}

fn is_constraint(info: &dyn DatabaseErrorInformation, name: &str) -> bool {
    info.constraint_name().is_some_and(|found| found == name)
}

fn persisted_streak(user: &User) -> UserRepositoryResult<i32> {
    i32::try_from(user.streak()).map_err(UserRepositoryError::persistence)
}

fn to_new_row(user: &User) -> UserRepositoryResult<NewUserRow> {
    Ok(NewUserRow {
        id: user.id().into_inner(),
        email: user.email().as_str().to_owned(),
        username: user.username().as_str().to_owned(),
        display_name: user.display_name().as_str().to_owned(),
        surname: user.surname().as_str().to_owned(),
        streak: persisted_streak(user)?,
        last_active: user.last_active(),
        created_at: user.created_at(),
    })
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let email = EmailAddress::new(row.email).map_err(UserRepositoryError::persistence)?;
    let username = Username::new(row.username).map_err(UserRepositoryError::persistence)?;
    let display_name = DisplayName::new(row.display_name).map_err(UserRepositoryError::persistence)?;
    let surname = DisplayName::new(row.surname).map_err(UserRepositoryError::persistence)?;
    let streak = u32::try_from(row.streak).map_err(UserRepositoryError::persistence)?;

    Ok(User::from_persisted(PersistedUserData {
        id: UserId::from_uuid(row.id),
        email,
        username,
        display_name,
        surname,
        streak,
        last_active: row.last_active,
        created_at: row.created_at,
    }))
}
