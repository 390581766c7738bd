use super::migrations::init_with_migrations;
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_debug;
use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE_NAME: &str = "tasklist.db";

/// An open, migrated SQLite connection.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database in the platform data directory.
    pub fn new() -> Result<Db> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        Self::open(db_file_path)
    }

    /// Opens (or creates) the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Db> {
        let mut conn = Connection::open(path.as_ref())?;
        init_with_migrations(&mut conn)?;
        msg_debug!(Message::DbOpened(path.as_ref().display().to_string()));

        Ok(Db { conn })
    }

    pub fn in_memory() -> Result<Db> {
        let mut conn = Connection::open_in_memory()?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    /// Opens the database at `path` without applying migrations, for inspection.
    pub fn open_without_migrations<P: AsRef<Path>>(path: P) -> Result<Connection> {
        Ok(Connection::open(path)?)
    }
}
