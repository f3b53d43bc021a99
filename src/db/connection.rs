use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::info;

use crate::error::TasklistError;

use super::migrations;

pub const DB_FILE: &str = "tasklist.db";

/// Get the path to the storage database inside a data directory.
pub fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DB_FILE)
}

/// Open (creating if needed) the storage database and bring its schema up
/// to date.
#[tracing::instrument]
pub fn open_db(data_dir: &Path) -> Result<Connection, TasklistError> {
    fs::create_dir_all(data_dir)?;
    let path = db_path(data_dir);
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    info!(path = %path.display(), "opened storage");
    Ok(conn)
}

#[cfg(test)]
pub fn open_in_memory() -> Result<Connection, TasklistError> {
    let conn = Connection::open_in_memory()?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

fn configure_connection(conn: &Connection) -> Result<(), TasklistError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;",
    )?;
    Ok(())
}
