//! Domain model for sections, tasks, work tracking, and comments.
//!
//! Status transitions and work-tracking rules live on the [`Task`]
//! aggregate itself; services only orchestrate permission checks and
//! persistence around them.

mod color;
mod comment;
mod error;
mod ids;
mod section;
mod task;

pub use color::{FALLBACK_SECTION_COLOR, HexColor};
pub use comment::{Comment, CommentBody};
pub use error::BoardDomainError;
pub use ids::{CommentId, SectionId, TaskId};
pub use section::{PersistedSectionData, Section, SectionName};
pub use task::{NewTaskData, PersistedTaskData, Task, TaskPriority, TaskStatus, TaskTitle};
