use rusqlite::{params, Connection, OptionalExtension};

use crate::error::TasklistError;

pub fn get_item(conn: &Connection, key: &str) -> Result<Option<String>, TasklistError> {
    let value = conn
        .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(value)
}

/// Insert or overwrite the value stored under `key`.
pub fn set_item(conn: &Connection, key: &str, value: &str) -> Result<(), TasklistError> {
    conn.execute(
        "INSERT INTO kv (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

/// Returns whether a value was actually removed.
pub fn remove_item(conn: &Connection, key: &str) -> Result<bool, TasklistError> {
    let changed = conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
    Ok(changed > 0)
}
