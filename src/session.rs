use chrono::{DateTime, Local, Utc};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::TasklistError;
use crate::models::{Filter, Outcome, Task, TaskId};
use crate::storage::{KeyValueStore, PersistenceBridge, SqliteStore};
use crate::store::TaskStore;
use crate::view::{BoardView, Summary};

/// Owns the task list for the lifetime of one run: loads the snapshot when
/// opened and writes a fresh snapshot after every change. All surfaces
/// mutate tasks through here; nothing else holds the list.
///
/// Several sessions may share one durable store (the board plus one-shot
/// commands). Each mutation re-reads the stored list and saves inside a
/// single write transaction, so no session overwrites another's change.
#[derive(Debug)]
pub struct Session<S> {
    store: TaskStore,
    bridge: PersistenceBridge<S>,
    filter: Filter,
    draft: String,
}

impl Session<SqliteStore> {
    pub fn open_durable(config: &Config) -> Result<Self, TasklistError> {
        let storage = SqliteStore::open(&config.data_dir)?;
        Ok(Self::open(PersistenceBridge::new(
            storage,
            config.settings.storage_key.clone(),
        )))
    }
}

impl<S: KeyValueStore> Session<S> {
    pub fn open(bridge: PersistenceBridge<S>) -> Self {
        let store = TaskStore::from_tasks(bridge.load());
        Self {
            store,
            bridge,
            filter: Filter::default(),
            draft: String::new(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.store.get(id)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Text typed but not yet submitted.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut String {
        &mut self.draft
    }

    pub fn add(&mut self, text: &str) -> Result<Outcome, TasklistError> {
        self.add_at(text, Utc::now())
    }

    pub fn add_at(&mut self, text: &str, now: DateTime<Utc>) -> Result<Outcome, TasklistError> {
        self.mutate(|store| store.add(text, now))
    }

    /// Add the draft as a task. The draft is cleared only when a task was
    /// actually created.
    pub fn submit_draft(&mut self) -> Result<Outcome, TasklistError> {
        let text = self.draft.clone();
        let outcome = self.add(&text)?;
        if outcome.changed() {
            self.draft.clear();
        }
        Ok(outcome)
    }

    pub fn toggle(&mut self, id: TaskId) -> Result<Outcome, TasklistError> {
        self.mutate(|store| store.toggle(id))
    }

    pub fn delete(&mut self, id: TaskId) -> Result<Outcome, TasklistError> {
        self.mutate(|store| store.delete(id))
    }

    /// Pick up changes saved by other sessions. On a read failure the current
    /// list is kept.
    pub fn refresh(&mut self) -> Result<(), TasklistError> {
        let tasks = self.bridge.try_load()?;
        if tasks.as_slice() != self.store.tasks() {
            debug!(count = tasks.len(), "picked up external changes");
            self.store = TaskStore::from_tasks(tasks);
        }
        Ok(())
    }

    /// Drop every task and the stored snapshot.
    pub fn reset(&mut self) -> Result<bool, TasklistError> {
        let removed = self.bridge.clear()?;
        self.store = TaskStore::new();
        Ok(removed)
    }

    pub fn summary(&self) -> Summary {
        Summary::of(self.store.tasks())
    }

    pub fn view(&self, now: &DateTime<Local>) -> BoardView<'_> {
        BoardView::build(self.store.tasks(), self.filter, now)
    }

    pub fn bridge(&self) -> &PersistenceBridge<S> {
        &self.bridge
    }

    pub fn into_storage(self) -> S {
        self.bridge.into_storage()
    }

    /// Apply `change` to the freshly stored list and save it, all inside one
    /// write transaction. The in-memory list only moves forward once the
    /// transaction commits; on any error it is left as it was.
    fn mutate(
        &mut self,
        change: impl FnOnce(&mut TaskStore) -> Outcome,
    ) -> Result<Outcome, TasklistError> {
        self.bridge.storage_mut().begin_write()?;
        let result = self.apply_and_save(change).and_then(|applied| {
            self.bridge.storage_mut().commit_write()?;
            Ok(applied)
        });
        match result {
            Ok((store, outcome)) => {
                self.store = store;
                Ok(outcome)
            }
            Err(e) => {
                if let Err(rollback) = self.bridge.storage_mut().rollback_write() {
                    warn!(error = %rollback, "rollback failed");
                }
                Err(e)
            }
        }
    }

    fn apply_and_save(
        &mut self,
        change: impl FnOnce(&mut TaskStore) -> Outcome,
    ) -> Result<(TaskStore, Outcome), TasklistError> {
        let mut next = TaskStore::from_tasks(self.bridge.try_load()?);
        let outcome = change(&mut next);
        if outcome.changed() {
            self.bridge.save(next.tasks())?;
        }
        Ok((next, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::models::IgnoreReason;
    use crate::storage::{MemoryStore, DEFAULT_STORAGE_KEY};

    /// Memory storage whose writes can be switched to fail.
    #[derive(Debug, Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_writes: bool,
        rollbacks: usize,
    }

    impl KeyValueStore for FlakyStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, TasklistError> {
            self.inner.get_item(key)
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), TasklistError> {
            if self.fail_writes {
                return Err(TasklistError::storage("disk full"));
            }
            self.inner.set_item(key, value)
        }

        fn remove_item(&mut self, key: &str) -> Result<bool, TasklistError> {
            self.inner.remove_item(key)
        }

        fn rollback_write(&mut self) -> Result<(), TasklistError> {
            self.rollbacks += 1;
            Ok(())
        }
    }

    fn session() -> Session<MemoryStore> {
        Session::open(PersistenceBridge::new(MemoryStore::new(), DEFAULT_STORAGE_KEY))
    }

    fn reopen(s: Session<MemoryStore>) -> Session<MemoryStore> {
        Session::open(PersistenceBridge::new(s.into_storage(), DEFAULT_STORAGE_KEY))
    }

    #[test]
    fn add_toggle_delete_end_to_end() {
        let mut s = session();

        let Outcome::Added(task) = s.add("write report").unwrap() else {
            panic!("expected add");
        };
        assert_eq!(s.tasks().len(), 1);
        assert!(!s.tasks()[0].completed);

        assert_eq!(
            s.toggle(task.id).unwrap(),
            Outcome::Toggled { id: task.id, completed: true }
        );
        assert!(s.get(task.id).unwrap().completed);
        assert_eq!(s.summary().completed, 1);
        assert_eq!(s.summary().progress_percent(), Some(100));

        assert!(matches!(s.delete(task.id).unwrap(), Outcome::Deleted(_)));
        assert!(s.tasks().is_empty());
        assert_eq!(s.summary().progress_percent(), None);
    }

    #[test]
    fn every_mutation_is_visible_after_reopen() {
        let mut s = session();
        s.add("a").unwrap();
        s = reopen(s);
        assert_eq!(s.tasks().len(), 1);

        let id = s.tasks()[0].id;
        s.toggle(id).unwrap();
        s = reopen(s);
        assert!(s.tasks()[0].completed);

        s.add("b").unwrap();
        s.delete(id).unwrap();
        s = reopen(s);
        let texts: Vec<_> = s.tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["b"]);
    }

    #[test]
    fn ignored_outcomes_do_not_write() {
        let mut s = session();
        assert_eq!(
            s.add("   ").unwrap(),
            Outcome::Ignored(IgnoreReason::EmptyInput)
        );
        assert_eq!(
            s.toggle(7).unwrap(),
            Outcome::Ignored(IgnoreReason::NotFound(7))
        );
        assert!(s.bridge().raw().unwrap().is_none());
    }

    #[test]
    fn draft_clears_only_on_success() {
        let mut s = session();
        s.draft_mut().push_str("  ");
        assert!(!s.submit_draft().unwrap().changed());
        assert_eq!(s.draft(), "  ");

        s.draft_mut().clear();
        s.draft_mut().push_str("call mom");
        assert!(s.submit_draft().unwrap().changed());
        assert_eq!(s.draft(), "");
        assert_eq!(s.tasks()[0].text, "call mom");
    }

    #[test]
    fn corrupt_storage_opens_empty() {
        let storage = MemoryStore::with_item(DEFAULT_STORAGE_KEY, "[{broken");
        let mut s = Session::open(PersistenceBridge::new(storage, DEFAULT_STORAGE_KEY));
        assert!(s.tasks().is_empty());
        s.add("fresh start").unwrap();
        let s = reopen(s);
        assert_eq!(s.tasks().len(), 1);
    }

    #[test]
    fn reset_clears_list_and_snapshot() {
        let mut s = session();
        s.add("x").unwrap();
        assert!(s.reset().unwrap());
        assert!(s.tasks().is_empty());
        let s = reopen(s);
        assert!(s.tasks().is_empty());
    }

    #[test]
    fn filter_drives_the_view() {
        let mut s = session();
        s.add("a").unwrap();
        s.add("b").unwrap();
        let id = s.tasks()[1].id;
        s.toggle(id).unwrap();
        s.set_filter(Filter::Pending);
        let now = Local::now();
        let view = s.view(&now);
        assert_eq!(view.tasks.len(), 1);
        assert_eq!(view.tasks[0].text, "a");
        assert_eq!(view.progress, Some(50));
    }

    #[test]
    fn failed_save_is_a_storage_error_and_changes_nothing() {
        let bridge = PersistenceBridge::new(FlakyStore::default(), DEFAULT_STORAGE_KEY);
        let mut s = Session::open(bridge);
        s.add("a").unwrap();
        let id = s.tasks()[0].id;
        let saved = s.bridge().raw().unwrap();

        s.bridge.storage_mut().fail_writes = true;
        let err = s.toggle(id).unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(!s.get(id).unwrap().completed);

        let err = s.add("b").unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert_eq!(s.tasks().len(), 1);

        s.draft_mut().push_str("kept");
        assert!(s.submit_draft().is_err());
        assert_eq!(s.draft(), "kept");

        assert_eq!(s.bridge().raw().unwrap(), saved);
        assert_eq!(s.bridge().storage().rollbacks, 3);

        s.bridge.storage_mut().fail_writes = false;
        assert!(s.toggle(id).unwrap().changed());
        assert!(s.get(id).unwrap().completed);
    }

    #[test]
    fn refresh_picks_up_changes_from_storage() {
        let mut s = session();
        s.add("mine").unwrap();
        let theirs = r#"[{"id":1,"text":"theirs","completed":true,"createdAt":0}]"#;
        s.bridge.storage_mut().set_item(DEFAULT_STORAGE_KEY, theirs).unwrap();

        s.refresh().unwrap();
        assert_eq!(s.tasks().len(), 1);
        assert_eq!(s.tasks()[0].text, "theirs");
        assert_eq!(s.summary().progress_percent(), Some(100));
    }

    #[test]
    fn two_sessions_on_one_database_keep_each_others_changes() {
        let dir = tempfile::tempdir().unwrap();
        let open = || {
            Session::open(PersistenceBridge::new(
                SqliteStore::open(dir.path()).unwrap(),
                DEFAULT_STORAGE_KEY,
            ))
        };
        let mut board = open();
        let mut cli = open();

        board.add("seed").unwrap();
        cli.add("added from cli").unwrap();
        let seed = board.tasks()[0].id;
        board.toggle(seed).unwrap();
        assert_eq!(board.tasks().len(), 2);

        cli.delete(seed).unwrap();
        board.add("third").unwrap();

        let reloaded = open();
        let texts: Vec<_> = reloaded.tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["added from cli", "third"]);
        assert_eq!(board.tasks(), reloaded.tasks());

        let mut ids: Vec<_> = reloaded.tasks().iter().map(|t| t.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 2);
    }
}
