use serde_json::{json, Value};

use crate::config::Config;
use crate::error::TasklistError;
use crate::output;
use crate::session::Session;

use super::finish;

pub fn run_export(config: &Config, json_output: bool) -> i32 {
    finish(export_inner(config, json_output), json_output)
}

pub fn run_reset(config: &Config, json_output: bool) -> i32 {
    finish(reset_inner(config, json_output), json_output)
}

fn export_inner(config: &Config, json_output: bool) -> Result<i32, TasklistError> {
    let session = Session::open_durable(config)?;
    let raw = session.bridge().raw()?;

    if json_output {
        // Embed the snapshot as a value when it parses, raw text otherwise.
        let snapshot = raw
            .as_deref()
            .map(|r| serde_json::from_str::<Value>(r).unwrap_or_else(|_| json!(r)))
            .unwrap_or(Value::Null);
        output::json::print(&output::json::success(json!({
            "key": session.bridge().key(),
            "snapshot": snapshot,
        })));
    } else {
        match raw {
            Some(raw) => println!("{raw}"),
            None => eprintln!("No snapshot stored under '{}'", session.bridge().key()),
        }
    }
    Ok(0)
}

fn reset_inner(config: &Config, json_output: bool) -> Result<i32, TasklistError> {
    let mut session = Session::open_durable(config)?;
    let removed = session.reset()?;

    if json_output {
        output::json::print(&output::json::success(json!({ "removed": removed })));
    } else if removed {
        println!("Removed stored tasks");
    } else {
        println!("Nothing stored");
    }
    Ok(0)
}
