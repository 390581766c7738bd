//! Versioned schema migrations for the task database.
//!
//! Every connection opened through [`crate::db::db::Db`] runs the pending
//! migrations before use. Applied versions are recorded in a `migrations`
//! table, so re-running is a no-op.
//!
//! ```rust
//! use tasklist::db::migrations::{get_db_version, init_with_migrations};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open_in_memory()?;
//! init_with_migrations(&mut conn)?;
//! assert!(get_db_version(&conn)? > 0);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error, msg_info, msg_success};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

/// Tracks which migrations have been applied and when.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

/// Registry of all schema migrations, in version order.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: the tasks table
        self.add_migration(1, "create_tasks", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS tasks (
        id INTEGER NOT NULL PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        created_at TIMESTAMP NOT NULL,
        completed_at TIMESTAMP,
        completed BOOLEAN NOT NULL DEFAULT FALSE
    )",
                [],
            )?;
            Ok(())
        });

        // Version 2: deadline ordering for the sort and due-today queries
        self.add_migration(2, "index_tasks_completed_at", |tx| {
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_completed_at ON tasks(completed_at)", [])?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies every migration newer than the recorded version in one transaction.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!(Message::DatabaseUpToDate);
            return Ok(());
        }

        msg_info!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;

        for migration in pending {
            msg_info!(Message::RunningMigration(migration.version, migration.name.to_string()));

            match (migration.up)(&tx) {
                Ok(()) => {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )?;
                    msg_success!(Message::MigrationCompleted(migration.version));
                }
                Err(e) => {
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    return Err(e);
                }
            }
        }

        tx.commit()?;
        msg_success!(Message::AllMigrationsCompleted);

        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        // A database that has never been migrated has no migrations table yet.
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0)).unwrap_or(Some(0));

        Ok(version.unwrap_or(0))
    }

    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }

    /// Applied migrations as `(version, name, applied_at)`.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        conn.execute(MIGRATIONS_TABLE, [])?;
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;

        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().run_migrations(conn)
}

pub fn get_db_version(conn: &Connection) -> Result<u32> {
    MigrationManager::new().get_current_version(conn)
}

pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    Ok(manager.get_current_version(conn)? < manager.latest_version())
}
