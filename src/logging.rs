use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "TASKLIST_LOG";

pub fn default_level(verbose: u8, quiet: u8) -> &'static str {
    if quiet >= 2 {
        "off"
    } else if quiet == 1 {
        "error"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    }
}

/// Install the global subscriber. Logs go to stderr, or append to
/// `log_file` when given (the board owns the terminal).
pub fn init(verbose: u8, quiet: u8, log_file: Option<&Path>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level(verbose, quiet)))
        .map_err(|e| anyhow!("invalid {LOG_ENV} filter: {e}"))?;

    let init_result = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_ansi(std::io::stderr().is_terminal())
            .with_writer(std::io::stderr)
            .try_init(),
    };

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(default_level(0, 0), "warn");
        assert_eq!(default_level(1, 0), "info");
        assert_eq!(default_level(2, 0), "debug");
        assert_eq!(default_level(5, 0), "trace");
        assert_eq!(default_level(0, 1), "error");
        assert_eq!(default_level(3, 2), "off");
    }
}
