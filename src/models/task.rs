use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type TaskId = i64;

/// Every task lands in this category; nothing assigns another one.
pub const DEFAULT_CATEGORY: &str = "general";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_category")]
    pub category: String,
}

impl Task {
    /// Build a fresh, pending task. `created_at` is cut to millisecond
    /// precision so it survives the snapshot format unchanged.
    pub fn new(id: TaskId, text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            created_at: truncate_to_millis(created_at),
            category: default_category(),
        }
    }
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

pub fn truncate_to_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(ts.timestamp_millis()).unwrap_or(ts)
}

/// `createdAt` is written as RFC 3339 with milliseconds. Older snapshots may
/// carry raw epoch milliseconds instead, so both are accepted on read.
mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Millis(i64),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        match Raw::deserialize(d)? {
            Raw::Text(s) => DateTime::parse_from_rfc3339(&s)
                .map(|t| t.with_timezone(&Utc))
                .map_err(D::Error::custom),
            Raw::Millis(ms) => DateTime::<Utc>::from_timestamp_millis(ms)
                .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {ms}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_task_is_pending_and_general() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let task = Task::new(1, "buy milk", t0);
        assert!(!task.completed);
        assert_eq!(task.category, "general");
        assert_eq!(task.created_at, t0);
    }

    #[test]
    fn serializes_with_exact_field_names() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 34, 56).unwrap();
        let task = Task::new(1, "buy milk", t0);
        let v = serde_json::to_value(&task).unwrap();
        let obj = v.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["category", "completed", "createdAt", "id", "text"]);
        assert_eq!(v["createdAt"], "2024-05-01T12:34:56.000Z");
    }

    #[test]
    fn accepts_epoch_millis_and_missing_category() {
        let raw = r#"{"id":7,"text":"x","completed":true,"createdAt":1714566896789}"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.created_at.timestamp_millis(), 1_714_566_896_789);
        assert_eq!(task.category, "general");
        assert!(task.completed);
    }

    #[test]
    fn sub_millisecond_precision_is_dropped() {
        let t = Utc.timestamp_nanos(1_714_566_896_789_123_456);
        let task = Task::new(1, "x", t);
        assert_eq!(task.created_at.timestamp_subsec_nanos(), 789_000_000);
    }
}
