use super::db::Db;
use crate::libs::task::{NewTask, Task, TaskFilter, TaskPatch};
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use rusqlite::{params, params_from_iter, types::ToSql, Connection, OptionalExtension, Row};
use std::path::Path;

const INSERT_TASK: &str = "INSERT INTO tasks (title, description, created_at, completed_at, completed) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_TASKS: &str = "SELECT id, title, description, created_at, completed_at, completed FROM tasks";
// SQLite places NULL deadlines first in ascending order.
const ORDER_BY_DEADLINE: &str = "ORDER BY completed_at ASC, id ASC";
const WHERE_DUE_BEFORE: &str = "WHERE completed_at IS NOT NULL AND completed_at < ?1";
const WHERE_ID: &str = "WHERE id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";

/// Single-row operations on the `tasks` table.
pub struct Tasks {
    pub conn: Connection,
}

impl Tasks {
    pub fn new() -> Result<Tasks> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Tasks> {
        Ok(Self::from_db(Db::open(path)?))
    }

    pub fn in_memory() -> Result<Tasks> {
        Ok(Self::from_db(Db::in_memory()?))
    }

    pub fn from_db(db: Db) -> Tasks {
        Tasks { conn: db.conn }
    }

    /// Inserts a task and returns the stored row with its generated id.
    pub fn insert(&mut self, task: &NewTask) -> Result<Task> {
        self.conn.execute(
            INSERT_TASK,
            params![task.title, task.description, task.created_at, task.completed_at, task.completed],
        )?;

        let id = self.conn.last_insert_rowid();
        self.get_by_id(id)?
            .ok_or_else(|| msg_error_anyhow!(Message::TaskNotFoundWithId(id)))
    }

    pub fn fetch(&mut self, filter: TaskFilter) -> Result<Vec<Task>> {
        let (mut stmt, params): (_, Vec<Box<dyn ToSql>>) = match filter {
            TaskFilter::All => (self.conn.prepare(SELECT_TASKS)?, vec![]),
            TaskFilter::ByDeadline => (self.conn.prepare(&format!("{} {}", SELECT_TASKS, ORDER_BY_DEADLINE))?, vec![]),
            TaskFilter::DueBefore(limit) => (
                self.conn.prepare(&format!("{} {} {}", SELECT_TASKS, WHERE_DUE_BEFORE, ORDER_BY_DEADLINE))?,
                vec![Box::new(limit) as Box<dyn ToSql>],
            ),
        };

        let task_iter = stmt.query_map(params_from_iter(params.iter()), task_from_row)?;
        let mut tasks = Vec::new();
        for task_result in task_iter {
            tasks.push(task_result?);
        }

        Ok(tasks)
    }

    pub fn get_by_id(&mut self, id: i64) -> Result<Option<Task>> {
        let task = self
            .conn
            .query_row(&format!("{} {}", SELECT_TASKS, WHERE_ID), params![id], task_from_row)
            .optional()?;

        Ok(task)
    }

    /// Writes the fields present in `patch` and returns the row as stored.
    ///
    /// An unknown id is not an error: nothing is written and `None` comes back.
    pub fn update(&mut self, patch: &TaskPatch) -> Result<Option<Task>> {
        let mut columns: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(title) = &patch.title {
            columns.push("title");
            values.push(Box::new(title.clone()));
        }
        if let Some(description) = &patch.description {
            columns.push("description");
            values.push(Box::new(description.clone()));
        }
        if let Some(completed_at) = patch.completed_at {
            columns.push("completed_at");
            values.push(Box::new(completed_at));
        }
        if let Some(completed) = patch.completed {
            columns.push("completed");
            values.push(Box::new(completed));
        }

        if columns.is_empty() {
            return self.get_by_id(patch.id);
        }

        let assignments = columns
            .iter()
            .enumerate()
            .map(|(index, column)| format!("{} = ?{}", column, index + 2))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE tasks SET {} {}", assignments, WHERE_ID);

        let mut bound: Vec<Box<dyn ToSql>> = vec![Box::new(patch.id) as Box<dyn ToSql>];
        bound.extend(values);

        let affected = self.conn.execute(&sql, params_from_iter(bound.iter()))?;
        if affected == 0 {
            return Ok(None);
        }

        self.get_by_id(patch.id)
    }

    /// Removes a task, returning the row that was removed.
    ///
    /// Deleting an id that does not exist succeeds with `None`.
    pub fn delete(&mut self, id: i64) -> Result<Option<Task>> {
        let existing = self.get_by_id(id)?;
        self.conn.execute(DELETE_TASK, params![id])?;

        Ok(existing)
    }
}

fn task_from_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        created_at: row.get(3)?,
        completed_at: row.get(4)?,
        completed: row.get(5)?,
    })
}
