use super::{
    CreatedResponse, MessageResponse, TaskApi, TaskResponse, TasksResponse, ALL_TASKS_PATH, CREATE_TASK_PATH,
    DELETE_TASK_PATH, LIMIT_TASKS_PATH, SORT_TASKS_PATH, UPDATE_TASK_PATH,
};
use crate::libs::messages::Message;
use crate::libs::tagged;
use crate::libs::task::{NewTask, Task, TaskId, TaskPatch};
use crate::msg_bail_anyhow;
use anyhow::Result;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

/// HTTP client for a running tasklist server.
#[derive(Debug, Clone)]
pub struct TaskClient {
    client: Client,
    base_url: String,
}

impl TaskClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn list(&self, path: &str) -> Result<Vec<Task>> {
        let response = self.client.get(self.url(path)).send().await?;
        let body: TasksResponse = Self::read(response).await?;
        Ok(tagged::parse(&body.tasks)?)
    }

    /// Decodes a success body, or turns the server's `{message}` into an error.
    async fn read<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<MessageResponse>().await {
                Ok(body) => body.message,
                Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
            };
            msg_bail_anyhow!(Message::RequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

impl TaskApi for TaskClient {
    async fn all_tasks(&self) -> Result<Vec<Task>> {
        self.list(ALL_TASKS_PATH).await
    }

    async fn sorted_tasks(&self) -> Result<Vec<Task>> {
        self.list(SORT_TASKS_PATH).await
    }

    async fn due_today(&self) -> Result<Vec<Task>> {
        self.list(LIMIT_TASKS_PATH).await
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task> {
        let response = self.client.post(self.url(CREATE_TASK_PATH)).json(task).send().await?;
        let body: CreatedResponse = Self::read(response).await?;
        Ok(tagged::parse(&body.task)?)
    }

    async fn update_task(&self, patch: &TaskPatch) -> Result<Option<Task>> {
        let response = self.client.post(self.url(UPDATE_TASK_PATH)).json(patch).send().await?;
        let body: TaskResponse = Self::read(response).await?;
        Ok(tagged::parse(&body.task)?)
    }

    async fn delete_task(&self, id: i64) -> Result<Option<Task>> {
        let response = self.client.post(self.url(DELETE_TASK_PATH)).json(&TaskId { id }).send().await?;
        let body: TaskResponse = Self::read(response).await?;
        Ok(tagged::parse(&body.task)?)
    }
}
