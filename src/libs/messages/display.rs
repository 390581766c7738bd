//! Display implementation for tasklist messages.
//!
//! All user-facing text lives here, including the `message` strings the HTTP
//! API returns, so a wording change never has to hunt through handlers.
//!
//! ```rust
//! use tasklist::libs::messages::Message;
//!
//! assert_eq!(Message::TaskCreated.to_string(), "Task successfully created.");
//! ```

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === API RESPONSE MESSAGES ===
            Message::TasksFetched => "Tasks successfully fetched.".to_string(),
            Message::TasksSorted => "Task successfully sorted.".to_string(),
            Message::TasksLimited => "Tasks due today successfully fetched.".to_string(),
            Message::TaskCreated => "Task successfully created.".to_string(),
            Message::TaskUpdated => "Task successfully updated.".to_string(),
            Message::TaskDeleted => "Task successfully deleted.".to_string(),
            Message::OnlyPostAllowed => "Only POST requests allowed".to_string(),
            Message::InvalidRequestBody(reason) => format!("Invalid request body: {}", reason),
            Message::InternalError => "An internal error occurred".to_string(),

            // === TASK MESSAGES ===
            Message::TaskCreatedWithId(id) => format!("Task {} created", id),
            Message::TaskUpdatedWithId(id) => format!("Task {} updated", id),
            Message::TaskDeletedWithId(id) => format!("Task {} deleted", id),
            Message::TaskToggled { id, completed } => {
                format!("Task {} marked as {}", id, if *completed { "complete" } else { "incomplete" })
            }
            Message::TaskNotFoundWithId(id) => format!("Task with ID {} not found", id),
            Message::TasksNotFound => "Tasks not found((".to_string(),
            Message::TasksHeader => "Tasks:".to_string(),
            Message::TasksSortedHeader => "Tasks by deadline:".to_string(),
            Message::TasksDueTodayHeader => "Tasks due today:".to_string(),
            Message::InvalidDueDate(input) => format!("Invalid due date '{}', expected YYYY-MM-DD HH:MM", input),
            Message::NoChangesRequested => "Nothing to change: pass at least one field to edit".to_string(),

            // === SERVER MESSAGES ===
            Message::ServerStarting(addr) => format!("Starting tasklist server on {}", addr),
            Message::ServerListening(addr) => format!("Listening on http://{}", addr),
            Message::ServerShuttingDown => "Shutting down server...".to_string(),
            Message::ServerStopped => "Server stopped".to_string(),
            Message::ShutdownSignalFailed(error) => format!("Failed to listen for shutdown signal: {}", error),
            Message::RequestFailed { status, message } => format!("Request failed with status {}: {}", status, message),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleServer => "Server settings".to_string(),
            Message::ConfigModuleClient => "Client settings".to_string(),
            Message::InvalidPort(value) => format!("Invalid port '{}'", value),

            // === DATABASE MESSAGES ===
            Message::DbOpened(path) => format!("Opened task database at {}", path),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("✓ Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("✗ Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
            Message::DatabaseVersion(version) => format!("Current database version: {}", version),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
            Message::DatabaseNeedsUpdate(latest) => {
                format!("Database needs migration to v{}; it runs on the next open", latest)
            }
            Message::MigrationHistory => "Migration history:".to_string(),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptServerHost => "Server host".to_string(),
            Message::PromptServerPort => "Server port".to_string(),
            Message::PromptServerDatabase => "Database file (empty for default location)".to_string(),
            Message::PromptClientUrl => "Server URL used by the CLI".to_string(),
        };

        write!(f, "{}", text)
    }
}
