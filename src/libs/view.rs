//! Front-end state for the task list and for single tasks, plus table output.
//!
//! [`TaskListView`] and [`TaskItemView`] hold what a page session shows and
//! talk to the service through [`TaskApi`]. Mutations are optimistic: local
//! flags flip before the request goes out and are never rolled back. When the
//! service answers with a row, that row replaces the local copy.
//!
//! ```rust,no_run
//! use tasklist::api::TaskClient;
//! use tasklist::libs::view::TaskListView;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = TaskClient::new("http://127.0.0.1:3000");
//! let mut list = TaskListView::load(&client).await?;
//! list.open_form();
//! list.draft_mut().title = "Buy milk".into();
//! list.submit().await?;
//! list.sort().await?;
//! # Ok(())
//! # }
//! ```

use super::formatter::{format_deadline, format_timestamp};
use super::task::{NewTask, Task, TaskPatch};
use crate::api::TaskApi;
use anyhow::Result;
use chrono::{DateTime, Utc};
use prettytable::{row, Table};

/// The list of tasks shown in one session, with the add-task form.
pub struct TaskListView<'a, A: TaskApi> {
    api: &'a A,
    tasks: Vec<Task>,
    draft: NewTask,
    form_open: bool,
}

impl<'a, A: TaskApi> TaskListView<'a, A> {
    /// Starts from an already fetched list, as the server-rendered page does.
    pub fn new(api: &'a A, tasks: Vec<Task>) -> Self {
        TaskListView {
            api,
            tasks,
            draft: NewTask::blank(),
            form_open: false,
        }
    }

    /// Fetches every task once and starts from that.
    pub async fn load(api: &'a A) -> Result<Self> {
        let tasks = api.all_tasks().await?;
        Ok(Self::new(api, tasks))
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn draft(&self) -> &NewTask {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut NewTask {
        &mut self.draft
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn open_form(&mut self) {
        self.form_open = true;
    }

    pub fn close_form(&mut self) {
        self.form_open = false;
    }

    /// Creates the draft, appends the stored row, and resets the form.
    ///
    /// The form closes before the request is sent. On failure the draft is kept.
    pub async fn submit(&mut self) -> Result<&Task> {
        self.form_open = false;

        let created = self.api.create_task(&self.draft).await?;
        self.tasks.push(created);
        self.draft = NewTask::blank();

        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Replaces the list with every task ordered by deadline.
    pub async fn sort(&mut self) -> Result<()> {
        self.tasks = self.api.sorted_tasks().await?;
        Ok(())
    }

    /// Replaces the list with the tasks due before the end of today.
    pub async fn limit(&mut self) -> Result<()> {
        self.tasks = self.api.due_today().await?;
        Ok(())
    }

    /// Replaces the list with every task, refetched.
    pub async fn all(&mut self) -> Result<()> {
        self.tasks = self.api.all_tasks().await?;
        Ok(())
    }

    /// An item view over the listed task with `id`.
    pub fn item(&self, id: i64) -> Option<TaskItemView<'a, A>> {
        self.tasks.iter().find(|task| task.id == id).map(|task| TaskItemView::new(self.api, task.clone()))
    }
}

/// One task row with its edit modal.
pub struct TaskItemView<'a, A: TaskApi> {
    api: &'a A,
    task: Task,
    draft: Task,
    modal_open: bool,
    visible: bool,
}

impl<'a, A: TaskApi> TaskItemView<'a, A> {
    pub fn new(api: &'a A, task: Task) -> Self {
        TaskItemView {
            api,
            draft: task.clone(),
            task,
            modal_open: false,
            visible: true,
        }
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn draft(&self) -> &Task {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Task {
        &mut self.draft
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The deadline indicator: `true` once `now` is past the deadline.
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        self.task.is_overdue_at(now)
    }

    /// Flips `completed` locally, then sends only `{id, completed}`.
    ///
    /// The flip stays even if the request fails.
    pub async fn toggle_complete(&mut self) -> Result<()> {
        self.task.completed = !self.task.completed;

        let patch = TaskPatch::completed(self.task.id, self.task.completed);
        if let Some(stored) = self.api.update_task(&patch).await? {
            self.task = stored;
        }

        Ok(())
    }

    /// Copies the current task into the draft and opens the modal.
    pub fn open_modal(&mut self) {
        self.draft = self.task.clone();
        self.modal_open = true;
    }

    pub fn close_modal(&mut self) {
        self.modal_open = false;
    }

    /// Sends the whole draft and adopts the stored row.
    ///
    /// If the service no longer has the task, the draft becomes the snapshot.
    pub async fn save(&mut self) -> Result<()> {
        self.modal_open = false;

        let stored = self.api.update_task(&TaskPatch::from_task(&self.draft)).await?;
        self.task = stored.unwrap_or_else(|| self.draft.clone());

        Ok(())
    }

    /// Hides the row, then deletes the task. The row stays hidden on failure.
    pub async fn delete(&mut self) -> Result<()> {
        self.modal_open = false;
        self.visible = false;

        self.api.delete_task(self.draft.id).await?;
        Ok(())
    }
}

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task]) {
        Self::tasks_at(tasks, Utc::now()).printstd();
    }

    /// Builds the task table, flagging late tasks relative to `now`.
    pub fn tasks_at(tasks: &[Task], now: DateTime<Utc>) -> Table {
        let mut table = Table::new();

        table.add_row(row!["ID", "DONE", "TITLE", "DESCRIPTION", "DEADLINE", "CREATED"]);
        for task in tasks {
            let deadline = if task.is_late_at(now) {
                format!("{} (late)", format_deadline(task.completed_at))
            } else {
                format_deadline(task.completed_at)
            };
            table.add_row(row![
                task.id,
                if task.completed { "x" } else { "" },
                task.title,
                task.description,
                deadline,
                format_timestamp(&task.created_at)
            ]);
        }

        table
    }
}
