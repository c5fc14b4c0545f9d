//! `PostgreSQL` repository implementations for board storage.

use super::{
    models::{CommentRow, NewCommentRow, NewSectionRow, NewTaskRow, SectionRow, TaskRow},
    schema::{board_sections, board_tasks, task_comments},
};
use crate::board::{
    domain::{
        Comment, CommentBody, CommentId, HexColor, PersistedSectionData, PersistedTaskData,
        Section, SectionId, SectionName, Task, TaskId, TaskPriority, TaskStatus, TaskTitle,
    },
    ports::{
        CommentRepository, CommentRepositoryError, CommentRepositoryResult, SectionRepository,
        SectionRepositoryError, SectionRepositoryResult, TaskRepository, TaskRepositoryError,
        TaskRepositoryResult,
    },
};
use crate::identity::domain::UserId;
use crate::project::domain::{ProjectId, RoleName};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

fn status_to_str(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Active => "ACTIVE",
        TaskStatus::Done => "DONE",
        TaskStatus::Failed => "FAILED",
    }
}

fn str_to_status(value: &str) -> Result<TaskStatus, std::io::Error> {
    match value {
        "ACTIVE" => Ok(TaskStatus::Active),
        "DONE" => Ok(TaskStatus::Done),
        "FAILED" => Ok(TaskStatus::Failed),
        other => Err(std::io::Error::other(format!(
            "unknown task status: {other}"
        ))),
    }
}

fn priority_to_str(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::Low => "low",
        TaskPriority::Medium => "medium",
        TaskPriority::High => "high",
    }
}

fn str_to_priority(value: &str) -> Result<TaskPriority, std::io::Error> {
    match value {
        "low" => Ok(TaskPriority::Low),
        "medium" => Ok(TaskPriority::Medium),
        "high" => Ok(TaskPriority::High),
        other => Err(std::io::Error::other(format!(
            "unknown task priority: {other}"
        ))),
    }
}

/// `PostgreSQL`-backed section repository.
#[derive(Debug, Clone)]
pub struct PostgresSectionRepository {
    pool: BoardPgPool,
}

impl PostgresSectionRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> SectionRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> SectionRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(SectionRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(SectionRepositoryError::persistence)?
    }
}

fn section_to_new_row(section: &Section) -> SectionRepositoryResult<NewSectionRow> {
    let position =
        i32::try_from(section.position()).map_err(SectionRepositoryError::persistence)?;
    Ok(NewSectionRow {
        id: section.id().into_inner(),
        project_id: section.project_id().into_inner(),
        name: section.name().as_str().to_owned(),
        color: section.color().as_str().to_owned(),
        position,
        allowed_roles: section
            .allowed_roles()
            .iter()
            .map(|role| role.as_str().to_owned())
            .collect(),
        created_at: section.created_at(),
    })
}

fn row_to_section(row: SectionRow) -> SectionRepositoryResult<Section> {
    let name = SectionName::new(row.name).map_err(SectionRepositoryError::persistence)?;
    let color = HexColor::parse(row.color).map_err(SectionRepositoryError::persistence)?;
    let position = u32::try_from(row.position).map_err(SectionRepositoryError::persistence)?;
    let allowed_roles = row
        .allowed_roles
        .into_iter()
        .map(RoleName::new)
        .collect::<Result<Vec<_>, _>>()
        .map_err(SectionRepositoryError::persistence)?;
    Ok(Section::from_persisted(PersistedSectionData {
        id: SectionId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        name,
        color,
        position,
        allowed_roles,
        created_at: row.created_at,
    }))
}

#[async_trait]
impl SectionRepository for PostgresSectionRepository {
    async fn store(&self, section: &Section) -> SectionRepositoryResult<()> {
        let section_id = section.id();
        let new_row = section_to_new_row(section)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(board_sections::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        SectionRepositoryError::DuplicateSection(section_id)
                    }
                    _ => SectionRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, section: &Section) -> SectionRepositoryResult<()> {
        let section_id = section.id();
        let row = section_to_new_row(section)?;

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                board_sections::table.filter(board_sections::id.eq(section_id.into_inner())),
            )
            .set((
                board_sections::name.eq(row.name),
                board_sections::color.eq(row.color),
                board_sections::position.eq(row.position),
                board_sections::allowed_roles.eq(row.allowed_roles),
            ))
            .execute(connection)
            .map_err(SectionRepositoryError::persistence)?;
            if updated == 0 {
                return Err(SectionRepositoryError::NotFound(section_id));
            }
            Ok(())
        })
        .await
    }

    async fn remove(&self, id: SectionId) -> SectionRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(
                board_sections::table.filter(board_sections::id.eq(id.into_inner())),
            )
            .execute(connection)
            .map_err(SectionRepositoryError::persistence)?;
            if removed == 0 {
                return Err(SectionRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: SectionId) -> SectionRepositoryResult<Option<Section>> {
        self.run_blocking(move |connection| {
            let row = board_sections::table
                .filter(board_sections::id.eq(id.into_inner()))
                .select(SectionRow::as_select())
                .first::<SectionRow>(connection)
                .optional()
                .map_err(SectionRepositoryError::persistence)?;
            row.map(row_to_section).transpose()
        })
        .await
    }

    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> SectionRepositoryResult<Vec<Section>> {
        self.run_blocking(move |connection| {
            let rows = board_sections::table
                .filter(board_sections::project_id.eq(project_id.into_inner()))
                .order(board_sections::position.asc())
                .select(SectionRow::as_select())
                .load::<SectionRow>(connection)
                .map_err(SectionRepositoryError::persistence)?;
            rows.into_iter().map(row_to_section).collect()
        })
        .await
    }

    async fn remove_all_for_project(
        &self,
        project_id: ProjectId,
    ) -> SectionRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            diesel::delete(
                board_sections::table
                    .filter(board_sections::project_id.eq(project_id.into_inner())),
            )
            .execute(connection)
            .map_err(SectionRepositoryError::persistence)
        })
        .await
    }
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: BoardPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

fn task_to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        project_id: task.project_id().into_inner(),
        section_id: task.section_id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status: status_to_str(task.status()).to_owned(),
        priority: priority_to_str(task.priority()).to_owned(),
        deadline: task.deadline(),
        assignees: task.assignees().iter().map(|id| id.into_inner()).collect(),
        working: task.working().iter().map(|id| id.into_inner()).collect(),
        working_started: task.working_started(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let title = TaskTitle::new(row.title).map_err(TaskRepositoryError::persistence)?;
    let status = str_to_status(&row.status).map_err(TaskRepositoryError::persistence)?;
    let priority = str_to_priority(&row.priority).map_err(TaskRepositoryError::persistence)?;
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        section_id: SectionId::from_uuid(row.section_id),
        title,
        description: row.description,
        status,
        priority,
        deadline: row.deadline,
        assignees: row.assignees.into_iter().map(UserId::from_uuid).collect(),
        working: row.working.into_iter().map(UserId::from_uuid).collect(),
        working_started: row.working_started,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = task_to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(board_tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = task_to_new_row(task);

        self.run_blocking(move |connection| {
            let updated =
                diesel::update(board_tasks::table.filter(board_tasks::id.eq(task_id.into_inner())))
                    .set((
                        board_tasks::section_id.eq(row.section_id),
                        board_tasks::title.eq(row.title),
                        board_tasks::description.eq(row.description),
                        board_tasks::status.eq(row.status),
                        board_tasks::priority.eq(row.priority),
                        board_tasks::deadline.eq(row.deadline),
                        board_tasks::assignees.eq(row.assignees),
                        board_tasks::working.eq(row.working),
                        board_tasks::working_started.eq(row.working_started),
                        board_tasks::updated_at.eq(row.updated_at),
                    ))
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let removed =
                diesel::delete(board_tasks::table.filter(board_tasks::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
            if removed == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = board_tasks::table
                .filter(board_tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_for_section(&self, section_id: SectionId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = board_tasks::table
                .filter(board_tasks::section_id.eq(section_id.into_inner()))
                .order(board_tasks::created_at.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_for_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = board_tasks::table
                .filter(board_tasks::project_id.eq(project_id.into_inner()))
                .order(board_tasks::created_at.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn remove_all_for_section(
        &self,
        section_id: SectionId,
    ) -> TaskRepositoryResult<Vec<TaskId>> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(
                board_tasks::table.filter(board_tasks::section_id.eq(section_id.into_inner())),
            )
            .returning(board_tasks::id)
            .get_results::<uuid::Uuid>(connection)
            .map_err(TaskRepositoryError::persistence)?;
            Ok(removed.into_iter().map(TaskId::from_uuid).collect())
        })
        .await
    }

    async fn remove_all_for_project(
        &self,
        project_id: ProjectId,
    ) -> TaskRepositoryResult<Vec<TaskId>> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(
                board_tasks::table.filter(board_tasks::project_id.eq(project_id.into_inner())),
            )
            .returning(board_tasks::id)
            .get_results::<uuid::Uuid>(connection)
            .map_err(TaskRepositoryError::persistence)?;
            Ok(removed.into_iter().map(TaskId::from_uuid).collect())
        })
        .await
    }
}

/// `PostgreSQL`-backed comment repository.
#[derive(Debug, Clone)]
pub struct PostgresCommentRepository {
    pool: BoardPgPool,
}

impl PostgresCommentRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CommentRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CommentRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(CommentRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CommentRepositoryError::persistence)?
    }
}

fn row_to_comment(row: CommentRow) -> CommentRepositoryResult<Comment> {
    let body = CommentBody::new(row.body).map_err(CommentRepositoryError::persistence)?;
    Ok(Comment::from_persisted(
        CommentId::from_uuid(row.id),
        TaskId::from_uuid(row.task_id),
        UserId::from_uuid(row.author_id),
        row.author_name,
        body,
        row.posted_at,
    ))
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<bool> {
        let new_row = NewCommentRow {
            id: comment.id().into_inner(),
            task_id: comment.task_id().into_inner(),
            author_id: comment.author_id().into_inner(),
            author_name: comment.author_name().to_owned(),
            body: comment.body().as_str().to_owned(),
            posted_at: comment.posted_at(),
        };

        self.run_blocking(move |connection| {
            let inserted = diesel::insert_into(task_comments::table)
                .values(&new_row)
                .on_conflict_do_nothing()
                .execute(connection)
                .map_err(CommentRepositoryError::persistence)?;
            Ok(inserted == 1)
        })
        .await
    }

    async fn list_for_task(&self, task_id: TaskId) -> CommentRepositoryResult<Vec<Comment>> {
        self.run_blocking(move |connection| {
            let rows = task_comments::table
                .filter(task_comments::task_id.eq(task_id.into_inner()))
                .order(task_comments::posted_at.asc())
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)
                .map_err(CommentRepositoryError::persistence)?;
            rows.into_iter().map(row_to_comment).collect()
        })
        .await
    }

    async fn count_for_task(&self, task_id: TaskId) -> CommentRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            let count: i64 = task_comments::table
                .filter(task_comments::task_id.eq(task_id.into_inner()))
                .count()
                .get_result(connection)
                .map_err(CommentRepositoryError::persistence)?;
            usize::try_from(count).map_err(CommentRepositoryError::persistence)
        })
        .await
    }

    async fn remove_all_for_task(&self, task_id: TaskId) -> CommentRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            diesel::delete(
                task_comments::table.filter(task_comments::task_id.eq(task_id.into_inner())),
            )
            .execute(connection)
            .map_err(CommentRepositoryError::persistence)
        })
        .await
    }
}
