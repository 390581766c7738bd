//! The task HTTP API: wire types, the server, and a client for it.
//!
//! ## Endpoints
//!
//! | Method | Path                | Body                    | Response                    |
//! |--------|---------------------|-------------------------|-----------------------------|
//! | GET    | `/`                 |                         | HTML task list              |
//! | GET    | `/api/all-tasks`    |                         | `{message, tasks}`          |
//! | GET    | `/api/sort-tasks`   |                         | `{message, tasks}`          |
//! | GET    | `/api/limit-tasks`  |                         | `{message, tasks}`          |
//! | POST   | `/api/create-task`  | task fields             | `{message, id, task}`       |
//! | POST   | `/api/update-task`  | `{id, ..partial}`       | `{message, task}`           |
//! | POST   | `/api/delete-task`  | `{id}`                  | `{message, task}`           |
//!
//! `tasks` and `task` are strings in the tagged value format
//! ([`crate::libs::tagged`]) so dates arrive as dates. Any other method on a
//! mutation endpoint gets `400 {"message": "Only POST requests allowed"}`.
//!
//! [`TaskApi`] is the seam the view models talk through; [`client::TaskClient`]
//! implements it over HTTP.

use crate::libs::task::{NewTask, Task, TaskPatch};
use anyhow::Result;
use serde::{Deserialize, Serialize};

pub mod client;
pub mod error;
pub mod page;
pub mod server;

pub use client::TaskClient;
pub use server::{router, AppState};

pub const ALL_TASKS_PATH: &str = "/api/all-tasks";
pub const SORT_TASKS_PATH: &str = "/api/sort-tasks";
pub const LIMIT_TASKS_PATH: &str = "/api/limit-tasks";
pub const CREATE_TASK_PATH: &str = "/api/create-task";
pub const UPDATE_TASK_PATH: &str = "/api/update-task";
pub const DELETE_TASK_PATH: &str = "/api/delete-task";

/// Operations the front-end needs from the task service.
#[allow(async_fn_in_trait)]
pub trait TaskApi {
    /// Every task, in store order.
    async fn all_tasks(&self) -> Result<Vec<Task>>;

    /// Every task, ascending by deadline.
    async fn sorted_tasks(&self) -> Result<Vec<Task>>;

    /// Tasks whose deadline falls before the end of the current day.
    async fn due_today(&self) -> Result<Vec<Task>>;

    /// Stores a new task and returns it as stored.
    async fn create_task(&self, task: &NewTask) -> Result<Task>;

    /// Applies a partial update; `None` when the id is unknown.
    async fn update_task(&self, patch: &TaskPatch) -> Result<Option<Task>>;

    /// Deletes a task; `None` when the id was already gone.
    async fn delete_task(&self, id: i64) -> Result<Option<Task>>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// List endpoints; `tasks` is a tagged `Vec<Task>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksResponse {
    pub message: String,
    pub tasks: String,
}

/// Create endpoint; `task` is a tagged `Task`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: i64,
    pub task: String,
}

/// Update and delete endpoints; `task` is a tagged `Option<Task>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResponse {
    pub message: String,
    pub task: String,
}
