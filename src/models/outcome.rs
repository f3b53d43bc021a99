use super::{Task, TaskId};

/// Result of a store mutation. Invalid input never errors; it is reported
/// as `Ignored` so callers can tell a no-op from a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added(Task),
    Toggled { id: TaskId, completed: bool },
    Deleted(Task),
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyInput,
    NotFound(TaskId),
    /// The id counter reached `TaskId::MAX`.
    IdsExhausted,
}

impl Outcome {
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Ignored(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added(_) => "added",
            Self::Toggled { .. } => "toggled",
            Self::Deleted(_) => "deleted",
            Self::Ignored(_) => "ignored",
        }
    }
}

impl IgnoreReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::NotFound(_) => "not_found",
            Self::IdsExhausted => "ids_exhausted",
        }
    }
}
