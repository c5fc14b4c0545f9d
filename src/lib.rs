//! Crewboard: small-team task-board domain services.
//!
//! This crate provides the domain model and orchestration services for a
//! project-board application: projects with invite codes, named roles with
//! permission sets, ordered board sections gated by role allowlists, tasks
//! with deadline-driven failure and multi-assignee work tracking, and
//! append-only task comments with a broadcast change feed.
//!
//! # Architecture
//!
//! Crewboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`identity`]: User accounts, login streaks, and presence
//! - [`project`]: Projects, memberships, roles, and permission evaluation
//! - [`board`]: Sections, tasks, work tracking, deadlines, search, comments
//! - [`events`]: Change-notification broadcast shared by the services

pub mod board;
pub mod events;
pub mod identity;
pub mod project;
