//! Read-only derivations over the task list. Nothing here is stored; every
//! render recomputes it from the current list.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::models::{Filter, Task};

use super::ClockFace;

/// Tasks in `filter`'s bucket, in list order.
pub fn filtered_tasks(tasks: &[Task], filter: Filter) -> Vec<&Task> {
    tasks.iter().filter(|t| filter.matches(t)).collect()
}

/// Rounded completion percentage, `None` for an empty list.
pub fn progress_percent(completed: usize, total: usize) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let pct = (completed as f64 / total as f64 * 100.0).round();
    Some(pct.clamp(0.0, 100.0) as u8)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl Summary {
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            total: tasks.len(),
            completed,
            pending: tasks.len() - completed,
        }
    }

    pub fn bucket_count(&self, filter: Filter) -> usize {
        match filter {
            Filter::All => self.total,
            Filter::Pending => self.pending,
            Filter::Completed => self.completed,
        }
    }

    pub fn progress_percent(&self) -> Option<u8> {
        progress_percent(self.completed, self.total)
    }

    /// `"3 tasks • 1 completed"`
    pub fn headline(&self) -> String {
        format!("{} tasks • {} completed", self.total, self.completed)
    }

    /// `"Pending (2)"`
    pub fn bucket_label(&self, filter: Filter) -> String {
        format!("{} ({})", filter.label(), self.bucket_count(filter))
    }
}

/// Everything a board render needs, derived in one pass.
#[derive(Debug, Clone)]
pub struct BoardView<'a> {
    pub filter: Filter,
    pub tasks: Vec<&'a Task>,
    pub summary: Summary,
    pub progress: Option<u8>,
    pub clock: ClockFace,
}

impl<'a> BoardView<'a> {
    pub fn build(tasks: &'a [Task], filter: Filter, now: &DateTime<Local>) -> Self {
        let summary = Summary::of(tasks);
        Self {
            filter,
            tasks: filtered_tasks(tasks, filter),
            summary,
            progress: summary.progress_percent(),
            clock: ClockFace::at(now),
        }
    }

    pub fn bucket_labels(&self) -> Vec<String> {
        Filter::BUCKETS
            .iter()
            .map(|f| self.summary.bucket_label(*f))
            .collect()
    }
}
