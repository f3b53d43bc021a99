pub mod bridge;
pub mod memory;
pub mod snapshot;
pub mod sqlite;

pub use bridge::{PersistenceBridge, DEFAULT_STORAGE_KEY};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::TasklistError;

/// String key-value storage the task snapshot is mirrored into.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, TasklistError>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), TasklistError>;

    /// Returns whether a value was present.
    fn remove_item(&mut self, key: &str) -> Result<bool, TasklistError>;

    /// Start a read-modify-write cycle. Stores shared between processes must
    /// hold off every other writer until `commit_write` or `rollback_write`.
    fn begin_write(&mut self) -> Result<(), TasklistError> {
        Ok(())
    }

    fn commit_write(&mut self) -> Result<(), TasklistError> {
        Ok(())
    }

    fn rollback_write(&mut self) -> Result<(), TasklistError> {
        Ok(())
    }
}
