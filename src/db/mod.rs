//! Database layer built on SQLite.
//!
//! The only entity is the task; the store exposes the single-row operations
//! the HTTP handlers need and nothing more.
//!
//! ```rust
//! use tasklist::db::tasks::Tasks;
//! use tasklist::libs::task::{NewTask, TaskFilter};
//!
//! let mut tasks = Tasks::in_memory()?;
//! let stored = tasks.insert(&NewTask::new("Review code", "Check PR #123", None))?;
//! assert_eq!(tasks.fetch(TaskFilter::All)?, vec![stored]);
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection management: opens the SQLite file and applies migrations.
pub mod db;

/// Versioned schema changes and their history.
pub mod migrations;

/// Create, fetch, update and delete operations on tasks.
pub mod tasks;
