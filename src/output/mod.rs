pub mod json;
pub mod text;

use crate::error::TasklistError;

pub fn report_error(err: &TasklistError, json_output: bool) {
    if json_output {
        json::print(&json::error(err));
    } else {
        eprintln!("Error: {}", err.message);
    }
}
