use serde_json::json;

use crate::config::Config;
use crate::error::TasklistError;
use crate::models::{Filter, Outcome, TaskId};
use crate::output;
use crate::session::Session;
use crate::storage::SqliteStore;
use crate::view::filtered_tasks;

use super::finish;

pub fn run_add(config: &Config, words: &[String], json_output: bool) -> i32 {
    let text = words.join(" ");
    finish(mutate(config, json_output, |s| s.add(&text)), json_output)
}

pub fn run_toggle(config: &Config, id: TaskId, json_output: bool) -> i32 {
    finish(mutate(config, json_output, |s| s.toggle(id)), json_output)
}

pub fn run_delete(config: &Config, id: TaskId, json_output: bool) -> i32 {
    finish(mutate(config, json_output, |s| s.delete(id)), json_output)
}

pub fn run_list(config: &Config, filter: &str, json_output: bool) -> i32 {
    finish(list_inner(config, filter, json_output), json_output)
}

fn mutate<F>(config: &Config, json_output: bool, op: F) -> Result<i32, TasklistError>
where
    F: FnOnce(&mut Session<SqliteStore>) -> Result<Outcome, TasklistError>,
{
    let mut session = Session::open_durable(config)?;
    let outcome = op(&mut session)?;

    if json_output {
        let current = match &outcome {
            Outcome::Toggled { id, .. } => session.get(*id),
            _ => None,
        };
        let mut data = output::json::outcome_json(&outcome, current);
        let summary = session.summary();
        data["counts"] = output::json::counts_json(&summary);
        data["progress"] = output::json::progress_json(&summary);
        output::json::print(&output::json::success(data));
    } else {
        output::text::print_outcome(&outcome);
    }
    Ok(0)
}

fn list_inner(config: &Config, filter: &str, json_output: bool) -> Result<i32, TasklistError> {
    let session = Session::open_durable(config)?;
    let filter = Filter::parse_lossy(filter);
    let tasks = filtered_tasks(session.tasks(), filter);
    let summary = session.summary();

    if json_output {
        let tasks_json: Vec<_> = tasks.iter().map(|t| output::json::task_json(t)).collect();
        output::json::print(&output::json::success(json!({
            "filter": filter.as_str(),
            "tasks": tasks_json,
            "counts": output::json::counts_json(&summary),
            "progress": output::json::progress_json(&summary),
        })));
    } else {
        output::text::print_task_list(filter, &tasks);
        println!();
        println!("{}", output::text::bucket_line(&summary, filter));
        output::text::print_progress(&summary);
    }
    Ok(0)
}
