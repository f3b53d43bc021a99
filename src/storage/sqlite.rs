use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::db::{self, kv_repo};
use crate::error::TasklistError;

use super::KeyValueStore;

/// Durable key-value storage backed by the `kv` table.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    path: PathBuf,
}

impl SqliteStore {
    pub fn open(data_dir: &Path) -> Result<Self, TasklistError> {
        let conn = db::open_db(data_dir)?;
        Ok(Self {
            conn,
            path: db::db_path(data_dir),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for SqliteStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, TasklistError> {
        kv_repo::get_item(&self.conn, key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), TasklistError> {
        kv_repo::set_item(&self.conn, key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<bool, TasklistError> {
        kv_repo::remove_item(&self.conn, key)
    }

    // IMMEDIATE takes the write lock up front, so another process cannot
    // slip a save in between our read and our write.
    fn begin_write(&mut self) -> Result<(), TasklistError> {
        self.conn.execute_batch("BEGIN IMMEDIATE")?;
        Ok(())
    }

    fn commit_write(&mut self) -> Result<(), TasklistError> {
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    fn rollback_write(&mut self) -> Result<(), TasklistError> {
        self.conn.execute_batch("ROLLBACK")?;
        Ok(())
    }
}
