use chrono::Local;
use serde_json::json;

use crate::config::Config;
use crate::error::TasklistError;
use crate::output;
use crate::session::Session;
use crate::view::ClockFace;

use super::finish;

pub fn run(config: &Config, json_output: bool) -> i32 {
    finish(run_inner(config, json_output), json_output)
}

fn run_inner(config: &Config, json_output: bool) -> Result<i32, TasklistError> {
    let session = Session::open_durable(config)?;
    let summary = session.summary();
    let clock = ClockFace::at(&Local::now());

    if json_output {
        output::json::print(&output::json::success(json!({
            "headline": summary.headline(),
            "total": summary.total,
            "completed": summary.completed,
            "pending": summary.pending,
            "counts": output::json::counts_json(&summary),
            "progress": output::json::progress_json(&summary),
            "clock": output::json::clock_json(&clock),
        })));
    } else {
        output::text::print_header(&summary, &clock);
        println!();
        println!("{}", output::text::bucket_line(&summary, session.filter()));
        output::text::print_progress(&summary);
    }
    Ok(0)
}
