use serde_json::{json, Value};

use crate::error::TasklistError;
use crate::models::{Filter, IgnoreReason, Outcome, Task};
use crate::view::{ClockFace, Summary};

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &TasklistError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

pub fn print(v: &Value) {
    let text = serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string());
    println!("{text}");
}

pub fn task_json(t: &Task) -> Value {
    serde_json::to_value(t).unwrap_or(Value::Null)
}

pub fn outcome_json(outcome: &Outcome, current: Option<&Task>) -> Value {
    let mut v = json!({ "outcome": outcome.as_str() });
    match outcome {
        Outcome::Added(task) | Outcome::Deleted(task) => {
            v["task"] = task_json(task);
        }
        Outcome::Toggled { id, completed } => {
            v["id"] = json!(id);
            v["completed"] = json!(completed);
            if let Some(task) = current {
                v["task"] = task_json(task);
            }
        }
        Outcome::Ignored(reason) => {
            v["reason"] = json!(reason.as_str());
            if let IgnoreReason::NotFound(id) = reason {
                v["id"] = json!(id);
            }
        }
    }
    v
}

pub fn counts_json(s: &Summary) -> Value {
    let mut v = json!({});
    for f in Filter::BUCKETS {
        v[f.as_str()] = json!(s.bucket_count(f));
    }
    v
}

pub fn progress_json(s: &Summary) -> Value {
    match s.progress_percent() {
        Some(pct) => json!(pct),
        None => Value::Null,
    }
}

pub fn clock_json(c: &ClockFace) -> Value {
    json!({
        "time": c.time,
        "date": c.date
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::{TimeZone, Utc};

    #[test]
    fn error_envelope() {
        let e = TasklistError::new(ErrorCode::StorageError, "disk full");
        let v = error(&e);
        assert_eq!(v["success"], false);
        assert_eq!(v["error"]["code"], "STORAGE_ERROR");
        assert_eq!(v["error"]["message"], "disk full");
    }

    #[test]
    fn ignored_outcomes_carry_reason() {
        let v = outcome_json(&Outcome::Ignored(IgnoreReason::NotFound(9)), None);
        assert_eq!(v["outcome"], "ignored");
        assert_eq!(v["reason"], "not_found");
        assert_eq!(v["id"], 9);

        let v = outcome_json(&Outcome::Ignored(IgnoreReason::EmptyInput), None);
        assert_eq!(v["reason"], "empty_input");
        assert!(v.get("id").is_none());
    }

    #[test]
    fn added_outcome_embeds_task() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let task = Task::new(3, "x", t0);
        let v = outcome_json(&Outcome::Added(task), None);
        assert_eq!(v["task"]["id"], 3);
        assert_eq!(v["task"]["createdAt"], "2024-05-01T09:00:00.000Z");
    }

    #[test]
    fn counts_and_progress() {
        let s = Summary { total: 4, completed: 1, pending: 3 };
        assert_eq!(counts_json(&s), json!({"all": 4, "pending": 3, "completed": 1}));
        assert_eq!(progress_json(&s), json!(25));
        assert_eq!(progress_json(&Summary::default()), Value::Null);
    }
}
