use serde::{Deserialize, Serialize};

use super::Task;

/// Read-only view selector over the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Pending,
    Completed,
}

impl Filter {
    pub const BUCKETS: [Filter; 3] = [Self::All, Self::Pending, Self::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    /// Unknown names fall through to `All`.
    pub fn parse_lossy(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "completed" => Self::Completed,
            _ => Self::All,
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !task.completed,
            Self::Completed => task.completed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Self::All => "All Tasks",
            Self::Pending => "Pending Tasks",
            Self::Completed => "Completed Tasks",
        }
    }

    /// Title and hint shown when the bucket is empty.
    pub fn empty_state(&self) -> (&'static str, &'static str) {
        match self {
            Self::All => ("No tasks yet", "Add your first task above"),
            Self::Pending => ("All tasks completed!", "Great job staying on top of things!"),
            Self::Completed => ("No completed tasks yet", "Complete some tasks to see them here"),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::All => 0,
            Self::Pending => 1,
            Self::Completed => 2,
        }
    }

    pub fn next(&self) -> Self {
        Self::BUCKETS[(self.index() + 1) % Self::BUCKETS.len()]
    }

    pub fn prev(&self) -> Self {
        Self::BUCKETS[(self.index() + Self::BUCKETS.len() - 1) % Self::BUCKETS.len()]
    }
}
