pub mod board;
pub mod commands;
pub mod init;
pub mod snapshot;
pub mod status;
pub mod task;

pub use commands::*;

use crate::error::TasklistError;
use crate::output;

/// Map a command result to an exit code, reporting errors on the way.
pub fn finish(result: Result<i32, TasklistError>, json_output: bool) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            output::report_error(&e, json_output);
            1
        }
    }
}
