//! Text form of the task list: a JSON array of task records.

use crate::models::Task;

pub fn encode(tasks: &[Task]) -> serde_json::Result<String> {
    serde_json::to_string(tasks)
}

pub fn decode(text: &str) -> serde_json::Result<Vec<Task>> {
    serde_json::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn single_task_round_trip() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let tasks = vec![Task::new(1, "buy milk", t0)];

        let text = encode(&tasks).unwrap();
        let back = decode(&text).unwrap();

        assert_eq!(back, tasks);
        assert_eq!(back[0].id, 1);
        assert_eq!(back[0].text, "buy milk");
        assert!(!back[0].completed);
        assert_eq!(back[0].created_at, t0);
        assert_eq!(back[0].category, "general");
    }

    #[test]
    fn order_and_flags_survive() {
        let t0 = Utc.timestamp_millis_opt(1_714_566_896_789).unwrap();
        let mut done = Task::new(2, "b", t0);
        done.completed = true;
        let tasks = vec![Task::new(3, "c", t0), done, Task::new(1, "a", t0)];

        assert_eq!(decode(&encode(&tasks).unwrap()).unwrap(), tasks);
    }

    #[test]
    fn reads_snapshots_written_by_other_clients() {
        let text = r#"[{"id":1714566896789,"text":"write report","completed":false,
            "createdAt":"2024-05-01T12:34:56.789Z","category":"general"}]"#;
        let tasks = decode(text).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].created_at.timestamp_millis(), 1_714_566_896_789);
    }

    #[test]
    fn rejects_non_array() {
        assert!(decode(r#"{"id":1}"#).is_err());
        assert!(decode("not json").is_err());
    }
}
