use chrono::{DateTime, Utc};

use crate::models::{Task, TaskId};

/// Hands out timestamp-derived ids (epoch milliseconds) that never repeat:
/// when the clock has not advanced past the last id, the next id is bumped
/// to `last + 1`.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: TaskId,
}

impl IdGenerator {
    /// Seed from an existing list so restored ids are never reissued.
    pub fn seeded(tasks: &[Task]) -> Self {
        Self {
            last: tasks.iter().map(|t| t.id).max().unwrap_or(0),
        }
    }

    /// `None` once the id space is used up; the last id is never reissued.
    pub fn next(&mut self, now: DateTime<Utc>) -> Option<TaskId> {
        let id = now.timestamp_millis().max(self.last.checked_add(1)?);
        self.last = id;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn follows_the_clock_when_it_advances() {
        let mut ids = IdGenerator::default();
        let t0 = Utc.timestamp_millis_opt(1_000).unwrap();
        let t1 = Utc.timestamp_millis_opt(5_000).unwrap();
        assert_eq!(ids.next(t0), Some(1_000));
        assert_eq!(ids.next(t1), Some(5_000));
    }

    #[test]
    fn same_millisecond_does_not_collide() {
        let mut ids = IdGenerator::default();
        let t0 = Utc.timestamp_millis_opt(1_000).unwrap();
        let a = ids.next(t0);
        let b = ids.next(t0);
        let c = ids.next(t0);
        assert_eq!((a, b, c), (Some(1_000), Some(1_001), Some(1_002)));
    }

    #[test]
    fn clock_going_backwards_still_increases() {
        let mut ids = IdGenerator::default();
        let later = Utc.timestamp_millis_opt(9_000).unwrap();
        let earlier = Utc.timestamp_millis_opt(2_000).unwrap();
        assert_eq!(ids.next(later), Some(9_000));
        assert_eq!(ids.next(earlier), Some(9_001));
    }

    #[test]
    fn seeded_from_restored_tasks() {
        let t = Utc.timestamp_millis_opt(10).unwrap();
        let tasks = vec![Task::new(50_000, "a", t), Task::new(40_000, "b", t)];
        let mut ids = IdGenerator::seeded(&tasks);
        assert_eq!(ids.next(t), Some(50_001));
    }

    #[test]
    fn exhausted_after_the_largest_id() {
        let t = Utc.timestamp_millis_opt(10).unwrap();
        let mut ids = IdGenerator::seeded(&[Task::new(TaskId::MAX - 1, "a", t)]);
        assert_eq!(ids.next(t), Some(TaskId::MAX));
        assert_eq!(ids.next(t), None);
        assert_eq!(ids.next(t), None);
    }
}
