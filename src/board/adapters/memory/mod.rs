//! In-memory board adapters for session-scoped use and tests.

mod comment;
mod section;
mod task;

pub use comment::InMemoryCommentRepository;
pub use section::InMemorySectionRepository;
pub use task::InMemoryTaskRepository;
