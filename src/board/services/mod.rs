//! Application services for sections, tasks, work tracking, deadlines,
//! search, and comments.

mod comments;
mod deadlines;
mod search;
mod sections;
mod tasks;
mod work;

pub use comments::{CommentError, CommentResult, CommentService};
pub use deadlines::{DeadlineError, DeadlineResult, DeadlineService};
pub use search::{SearchError, SearchHit, SearchResult, SearchService};
pub use sections::{SectionError, SectionResult, SectionService};
pub use tasks::{
    CreateTaskRequest, TaskError, TaskResult, TaskService, TaskView, UpdateTaskRequest,
};
pub use work::{WorkError, WorkResult, WorkTrackingService};
