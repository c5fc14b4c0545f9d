//! `PostgreSQL` adapters for project persistence.

mod models;
mod repository;
mod schema;

pub use repository::{
    PostgresMembershipRepository, PostgresProjectRepository, PostgresRoleRepository, ProjectPgPool,
};
