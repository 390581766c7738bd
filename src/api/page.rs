//! Server-rendered task list page.
//!
//! The page is read-only. Tasks are added, sorted, toggled, edited and deleted
//! from the command line (`tasklist add`, `list --sorted`, `toggle`, `edit`,
//! `delete`), which drives [`crate::libs::view`] over the JSON API.

use crate::libs::formatter::{format_deadline, format_timestamp};
use crate::libs::task::Task;
use chrono::{DateTime, Utc};
use std::fmt::Write;

const PAGE_TITLE: &str = "Task List";
const CLI_HINT: &str = "Manage tasks with <code>tasklist add</code>, <code>toggle</code>, <code>edit</code> and <code>delete</code>.";

const STYLE: &str = "body{font-family:sans-serif;margin:1rem}\
.task{display:flex;gap:1rem;margin:.5rem 0}\
.title{font-size:1.5rem;font-weight:bold}\
.late{color:#dc2626}.on-time{color:#16a34a}\
.description{background:#e5e7eb;padding:.25rem;padding-bottom:4rem;border-radius:.25rem;width:24rem}\
.created{font-size:.75rem}.hint{color:#6b7280}";

/// Renders the full page for `tasks`, marking overdue deadlines relative to `now`.
pub fn render_index(tasks: &[Task], now: DateTime<Utc>) -> String {
    let mut body = String::new();
    for task in tasks {
        render_task(&mut body, task, now);
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>{style}</style>\n</head>\n\
         <body>\n<main>\n<h1>{title}</h1>\n<div class=\"tasks\">\n{body}</div>\n<p class=\"hint\">{hint}</p>\n</main>\n</body>\n</html>\n",
        title = PAGE_TITLE,
        style = STYLE,
        body = body,
        hint = CLI_HINT,
    )
}

fn render_task(out: &mut String, task: &Task, now: DateTime<Utc>) {
    let status = if task.is_overdue_at(now) { "late" } else { "on-time" };
    let checkbox = if task.completed { "&#9745;" } else { "&#9744;" };

    // Writing into a String cannot fail.
    let _ = write!(
        out,
        "<div class=\"task\" data-id=\"{id}\">\n\
         <div class=\"toggle\">{checkbox}</div>\n\
         <div>\n\
         <div><span class=\"title\">{title}</span> <span class=\"{status}\">{deadline}</span></div>\n\
         <div class=\"description\"><p>{description}</p></div>\n\
         <p class=\"created\">Task created at {created}</p>\n\
         </div>\n\
         </div>\n",
        id = task.id,
        checkbox = checkbox,
        title = escape_html(&task.title),
        status = status,
        deadline = escape_html(&format_deadline(task.completed_at)),
        description = escape_html(&task.description),
        created = escape_html(&format_timestamp(&task.created_at)),
    );
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
