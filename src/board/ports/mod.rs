//! Port contracts for sections, tasks, comments, and user lookups.

pub mod comments;
pub mod sections;
pub mod tasks;
pub mod users;

pub use comments::{CommentRepository, CommentRepositoryError, CommentRepositoryResult};
pub use sections::{SectionRepository, SectionRepositoryError, SectionRepositoryResult};
pub use tasks::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use users::{UserCard, UserDirectory, UserDirectoryError, UserDirectoryResult};
