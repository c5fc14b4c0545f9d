//! In-memory integration tests over the full service stack.
//!
//! Tests are organized into modules by functionality:
//! - `project_lifecycle_tests`: invites, leaving, project deletion cascades
//! - `role_permission_tests`: role grants, allowlist stripping, member removal
//! - `board_flow_tests`: section allowlists and the task lifecycle
//! - `deadline_sweep_tests`: deadline sweeps and work tracking
//! - `search_tests`: project-wide task search
//! - `comment_feed_tests`: comments and the change feed

mod in_memory {
    pub mod helpers;

    mod board_flow_tests;
    mod comment_feed_tests;
    mod deadline_sweep_tests;
    mod project_lifecycle_tests;
    mod role_permission_tests;
    mod search_tests;
}
