//! HTTP handlers and the server loop.
//!
//! Each handler performs exactly one store call. The SQLite connection sits
//! behind a mutex and calls run on the blocking pool, so concurrent requests
//! reach the store one at a time.

use super::error::ApiError;
use super::page::render_index;
use super::{
    CreatedResponse, TaskResponse, TasksResponse, ALL_TASKS_PATH, CREATE_TASK_PATH, DELETE_TASK_PATH, LIMIT_TASKS_PATH,
    SORT_TASKS_PATH, UPDATE_TASK_PATH,
};
use crate::db::tasks::Tasks;
use crate::libs::config::ServerConfig;
use crate::libs::formatter::end_of_local_day;
use crate::libs::messages::Message;
use crate::libs::tagged;
use crate::libs::task::{NewTask, Task, TaskFilter, TaskId, TaskPatch};
use crate::{msg_error, msg_info};
use anyhow::Result;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    tasks: Arc<Mutex<Tasks>>,
}

impl AppState {
    pub fn new(tasks: Tasks) -> Self {
        AppState {
            tasks: Arc::new(Mutex::new(tasks)),
        }
    }

    /// Runs one store operation on the blocking pool.
    async fn run<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut Tasks) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let tasks = Arc::clone(&self.tasks);
        let result = tokio::task::spawn_blocking(move || op(&mut tasks.lock())).await?;
        Ok(result?)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route(ALL_TASKS_PATH, get(all_tasks))
        .route(SORT_TASKS_PATH, get(sort_tasks))
        .route(LIMIT_TASKS_PATH, get(limit_tasks))
        .route(CREATE_TASK_PATH, post(create_task).fallback(only_post))
        .route(UPDATE_TASK_PATH, post(update_task).fallback(only_post))
        .route(DELETE_TASK_PATH, post(delete_task).fallback(only_post))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Opens the configured database and serves until Ctrl+C.
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let tasks = Tasks::open(config.database_path()?)?;
    let address = config.address();

    msg_info!(Message::ServerStarting(address.clone()));
    let listener = TcpListener::bind(&address).await?;
    msg_info!(Message::ServerListening(listener.local_addr()?.to_string()));

    axum::serve(listener, router(AppState::new(tasks)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    msg_info!(Message::ServerStopped);
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => msg_info!(Message::ServerShuttingDown),
        Err(e) => {
            msg_error!(Message::ShutdownSignalFailed(e.to_string()));
            // Without a signal handler, keep serving.
            std::future::pending::<()>().await;
        }
    }
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let tasks = state.run(|tasks| tasks.fetch(TaskFilter::All)).await?;
    Ok(Html(render_index(&tasks, Utc::now())))
}

async fn all_tasks(State(state): State<AppState>) -> Result<Json<TasksResponse>, ApiError> {
    let tasks = state.run(|tasks| tasks.fetch(TaskFilter::All)).await?;
    list_response(Message::TasksFetched, tasks)
}

async fn sort_tasks(State(state): State<AppState>) -> Result<Json<TasksResponse>, ApiError> {
    let tasks = state.run(|tasks| tasks.fetch(TaskFilter::ByDeadline)).await?;
    list_response(Message::TasksSorted, tasks)
}

async fn limit_tasks(State(state): State<AppState>) -> Result<Json<TasksResponse>, ApiError> {
    let limit = end_of_local_day(Local::now());
    let tasks = state.run(move |tasks| tasks.fetch(TaskFilter::DueBefore(limit))).await?;
    list_response(Message::TasksLimited, tasks)
}

async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<NewTask>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let Json(new_task) = payload.map_err(|rejection| ApiError::invalid_body(rejection.body_text()))?;

    let task = state.run(move |tasks| tasks.insert(&new_task)).await?;
    tracing::info!(id = task.id, "task created");

    Ok(Json(CreatedResponse {
        message: Message::TaskCreated.to_string(),
        id: task.id,
        task: tagged::stringify(&task)?,
    }))
}

async fn update_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskPatch>, JsonRejection>,
) -> Result<Json<TaskResponse>, ApiError> {
    let Json(patch) = payload.map_err(|rejection| ApiError::invalid_body(rejection.body_text()))?;
    let id = patch.id;

    let task = state.run(move |tasks| tasks.update(&patch)).await?;
    tracing::info!(id, found = task.is_some(), "task updated");

    task_response(Message::TaskUpdated, task)
}

async fn delete_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskId>, JsonRejection>,
) -> Result<Json<TaskResponse>, ApiError> {
    let Json(TaskId { id }) = payload.map_err(|rejection| ApiError::invalid_body(rejection.body_text()))?;

    let task = state.run(move |tasks| tasks.delete(id)).await?;
    tracing::info!(id, found = task.is_some(), "task deleted");

    task_response(Message::TaskDeleted, task)
}

async fn only_post() -> ApiError {
    ApiError::MethodNotAllowed
}

fn list_response(message: Message, tasks: Vec<Task>) -> Result<Json<TasksResponse>, ApiError> {
    Ok(Json(TasksResponse {
        message: message.to_string(),
        tasks: tagged::stringify(&tasks)?,
    }))
}

fn task_response(message: Message, task: Option<Task>) -> Result<Json<TaskResponse>, ApiError> {
    Ok(Json(TaskResponse {
        message: message.to_string(),
        task: tagged::stringify(&task)?,
    }))
}
