use serde_json::json;

use crate::config::Config;
use crate::error::TasklistError;
use crate::output;
use crate::storage::SqliteStore;

use super::finish;

pub fn run(config: &Config, json_output: bool) -> i32 {
    finish(run_inner(config, json_output), json_output)
}

fn run_inner(config: &Config, json_output: bool) -> Result<i32, TasklistError> {
    let storage = SqliteStore::open(&config.data_dir)?;
    let path = storage.path().to_string_lossy().into_owned();

    if json_output {
        output::json::print(&output::json::success(json!({
            "path": path,
            "data_dir": config.data_dir.to_string_lossy(),
            "storage_key": config.settings.storage_key,
        })));
    } else {
        println!("Initialized tasklist at {path}");
    }
    Ok(0)
}
