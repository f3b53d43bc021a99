use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::TasklistError;
use crate::storage::DEFAULT_STORAGE_KEY;

pub const DATA_DIR_ENV: &str = "TASKLIST_DIR";
pub const CONFIG_FILE: &str = "config.json";
pub const BOARD_LOG_FILE: &str = "board.log";

/// Optional `config.json` in the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Key the task snapshot is stored under.
    pub storage_key: String,
    /// Clock refresh interval for the board.
    pub tick_millis: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            tick_millis: 1000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub settings: Settings,
}

impl Config {
    /// Resolve the data directory (flag, then `TASKLIST_DIR`, then the
    /// platform data dir) and read `config.json` from it if present.
    pub fn resolve(flag: Option<&Path>) -> Result<Self, TasklistError> {
        let data_dir = resolve_data_dir(flag, env::var_os(DATA_DIR_ENV))?;
        Self::load(data_dir)
    }

    #[tracing::instrument]
    pub fn load(data_dir: PathBuf) -> Result<Self, TasklistError> {
        let path = data_dir.join(CONFIG_FILE);
        let settings = match fs::read_to_string(&path) {
            Ok(content) => {
                let mut settings: Settings = serde_json::from_str(&content).map_err(|e| {
                    TasklistError::config(format!("Invalid config {}: {e}", path.display()))
                })?;
                if settings.storage_key.trim().is_empty() {
                    settings.storage_key = DEFAULT_STORAGE_KEY.to_string();
                }
                info!(config = %path.display(), "loaded config");
                settings
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(config = %path.display(), "no config file, using defaults");
                Settings::default()
            }
            Err(e) => {
                return Err(TasklistError::config(format!(
                    "Cannot read config {}: {e}",
                    path.display()
                )))
            }
        };
        Ok(Self { data_dir, settings })
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.settings.tick_millis.max(1))
    }

    pub fn board_log_path(&self) -> PathBuf {
        self.data_dir.join(BOARD_LOG_FILE)
    }
}

pub fn resolve_data_dir(
    flag: Option<&Path>,
    env_value: Option<OsString>,
) -> Result<PathBuf, TasklistError> {
    if let Some(dir) = flag {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = env_value.filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::data_local_dir()
        .map(|d| d.join("tasklist"))
        .ok_or_else(TasklistError::no_data_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn flag_beats_env() {
        let dir = resolve_data_dir(Some(Path::new("/flag")), Some("/env".into())).unwrap();
        assert_eq!(dir, PathBuf::from("/flag"));
        let dir = resolve_data_dir(None, Some("/env".into())).unwrap();
        assert_eq!(dir, PathBuf::from("/env"));
    }

    #[test]
    fn empty_env_is_ignored() {
        let dir = resolve_data_dir(None, Some(OsString::new()));
        if let Ok(dir) = dir {
            assert!(dir.ends_with("tasklist"));
        }
    }

    #[test]
    fn missing_config_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::load(tmp.path().to_path_buf()).unwrap();
        assert_eq!(config.settings, Settings::default());
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert!(config.board_log_path().ends_with("board.log"));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), r#"{"tick_millis": 250}"#).unwrap();
        let config = Config::load(tmp.path().to_path_buf()).unwrap();
        assert_eq!(config.settings.storage_key, "tasks");
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
    }

    #[test]
    fn blank_storage_key_falls_back() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), r#"{"storage_key": "  "}"#).unwrap();
        let config = Config::load(tmp.path().to_path_buf()).unwrap();
        assert_eq!(config.settings.storage_key, "tasks");
    }

    #[test]
    fn malformed_config_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "{ nope").unwrap();
        let err = Config::load(tmp.path().to_path_buf()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);
    }
}
