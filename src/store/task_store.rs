use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::models::{IgnoreReason, Outcome, Task, TaskId};

use super::IdGenerator;

/// Ordered, in-memory task list. Insertion order is the only order.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    ids: IdGenerator,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let ids = IdGenerator::seeded(&tasks);
        Self { tasks, ids }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn add(&mut self, text: &str, now: DateTime<Utc>) -> Outcome {
        let text = text.trim();
        if text.is_empty() {
            return Outcome::Ignored(IgnoreReason::EmptyInput);
        }
        let Some(id) = self.ids.next(now) else {
            warn!("no task ids left, refusing to add");
            return Outcome::Ignored(IgnoreReason::IdsExhausted);
        };
        let task = Task::new(id, text, now);
        debug!(id = task.id, text = %task.text, "task added");
        self.tasks.push(task.clone());
        Outcome::Added(task)
    }

    pub fn toggle(&mut self, id: TaskId) -> Outcome {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                debug!(id, completed = task.completed, "task toggled");
                Outcome::Toggled {
                    id,
                    completed: task.completed,
                }
            }
            None => Outcome::Ignored(IgnoreReason::NotFound(id)),
        }
    }

    pub fn delete(&mut self, id: TaskId) -> Outcome {
        match self.tasks.iter().position(|t| t.id == id) {
            Some(idx) => {
                let task = self.tasks.remove(idx);
                debug!(id, "task deleted");
                Outcome::Deleted(task)
            }
            None => Outcome::Ignored(IgnoreReason::NotFound(id)),
        }
    }
}
