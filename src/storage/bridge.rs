use tracing::{debug, warn};

use crate::error::TasklistError;
use crate::models::Task;

use super::{snapshot, KeyValueStore};

pub const DEFAULT_STORAGE_KEY: &str = "tasks";

/// One-way mirror of the task list into a key-value store. The whole list is
/// written under a single key after every change.
#[derive(Debug)]
pub struct PersistenceBridge<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> PersistenceBridge<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Read the saved list. A missing, unreadable, or unparsable snapshot
    /// yields an empty list.
    pub fn load(&self) -> Vec<Task> {
        self.try_load().unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "could not read snapshot, starting empty");
            Vec::new()
        })
    }

    /// Like `load`, but a storage read failure is returned instead of being
    /// treated as an empty list. An unparsable snapshot still yields empty.
    #[tracing::instrument(skip(self), fields(key = %self.key))]
    pub fn try_load(&self) -> Result<Vec<Task>, TasklistError> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            debug!("no saved snapshot, starting empty");
            return Ok(Vec::new());
        };
        match snapshot::decode(&raw) {
            Ok(tasks) => {
                debug!(count = tasks.len(), "snapshot loaded");
                Ok(tasks)
            }
            Err(e) => {
                warn!(error = %e, "snapshot is not a valid task list, starting empty");
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite the stored snapshot with the full list.
    #[tracing::instrument(skip_all, fields(key = %self.key, count = tasks.len()))]
    pub fn save(&mut self, tasks: &[Task]) -> Result<(), TasklistError> {
        let text = snapshot::encode(tasks).map_err(|e| TasklistError::storage(e.to_string()))?;
        self.storage.set_item(&self.key, &text)?;
        debug!(bytes = text.len(), "snapshot saved");
        Ok(())
    }

    /// The stored snapshot exactly as written.
    pub fn raw(&self) -> Result<Option<String>, TasklistError> {
        self.storage.get_item(&self.key)
    }

    pub fn clear(&mut self) -> Result<bool, TasklistError> {
        self.storage.remove_item(&self.key)
    }
}
