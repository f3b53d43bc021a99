use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    StorageError,
    ConfigError,
    TerminalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StorageError => "STORAGE_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::TerminalError => "TERMINAL_ERROR",
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct TasklistError {
    pub code: ErrorCode,
    pub message: String,
}

impl TasklistError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    pub fn terminal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TerminalError, message)
    }

    pub fn no_data_dir() -> Self {
        Self::config(
            "Could not determine a data directory. Pass --data-dir or set TASKLIST_DIR.",
        )
    }
}

impl From<rusqlite::Error> for TasklistError {
    fn from(e: rusqlite::Error) -> Self {
        Self::storage(e.to_string())
    }
}

impl From<std::io::Error> for TasklistError {
    fn from(e: std::io::Error) -> Self {
        Self::storage(e.to_string())
    }
}
