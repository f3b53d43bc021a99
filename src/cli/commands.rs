use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::models::TaskId;

const VERSION: &str = env!("TASKLIST_VERSION");

#[derive(Parser)]
#[command(
    name = "tasklist",
    version = VERSION,
    about = "Single-list task manager with a live terminal board",
    after_help = "\
STORAGE:
  Tasks live in <data-dir>/tasklist.db as one JSON snapshot under the key `tasks`.
  <data-dir> is --data-dir, else $TASKLIST_DIR, else the platform data dir + /tasklist.
  The whole list is rewritten after every add/toggle/delete.
  An unreadable snapshot is treated as an empty list.

EXIT CODES:
  0  Success (including ignored no-ops: empty text, unknown id)
  1  Error (storage, config, terminal)

LOGGING:
  -v/-q adjust the level; $TASKLIST_LOG overrides it (EnvFilter syntax).
  `board` logs to <data-dir>/board.log instead of stderr."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding the task database and config.json
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// More log output (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Less log output (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the data directory and storage (idempotent)
    Init,

    /// Add a task; words are joined with spaces
    Add {
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Flip a task between pending and completed
    Toggle {
        id: TaskId,
    },

    /// Remove a task
    Delete {
        id: TaskId,
    },

    /// List tasks in a filter bucket
    List {
        /// all | pending | completed (anything else means all)
        #[arg(long, short, default_value = "all")]
        filter: String,
    },

    /// Show counts, clock and progress
    Status,

    /// Print the stored snapshot as-is
    Export,

    /// Remove the stored snapshot
    Reset,

    /// Interactive board with live clock
    #[command(after_help = "\
KEYS:
  a / i        edit the new-task input (Enter adds, Esc leaves the input)
  j k / ↓ ↑    move selection
  space / x    toggle selected task
  d / Delete   delete selected task
  1 2 3 / Tab  filter: all, pending, completed
  q / Ctrl-C   quit")]
    Board,
}
