use crate::config::Config;
use crate::output;
use crate::tui;

pub fn run(config: &Config, json_output: bool) -> i32 {
    match tui::run(config) {
        Ok(()) => 0,
        Err(e) => {
            output::report_error(&e, json_output);
            1
        }
    }
}
