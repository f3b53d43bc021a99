use crate::models::{Filter, IgnoreReason, Outcome, Task};
use crate::view::clock::created_label;
use crate::view::{ClockFace, Summary};

const BAR_WIDTH: usize = 20;

pub fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Added(t) => println!("Added task: {} ({})", t.text, t.id),
        Outcome::Toggled { id, completed } => {
            let state = if *completed { "completed" } else { "pending" };
            println!("Task {id} → {state}");
        }
        Outcome::Deleted(t) => println!("Deleted task: {} ({})", t.text, t.id),
        Outcome::Ignored(IgnoreReason::EmptyInput) => {
            println!("Nothing to add: task text is empty");
        }
        Outcome::Ignored(IgnoreReason::NotFound(id)) => println!("No task with id {id}"),
        Outcome::Ignored(IgnoreReason::IdsExhausted) => {
            println!("Nothing added: no task ids left");
        }
    }
}

pub fn task_line(t: &Task) -> String {
    let mark = if t.completed { "x" } else { " " };
    format!("  [{mark}] {} ({})  {}", t.text, t.id, created_label(t))
}

pub fn print_task_list(filter: Filter, tasks: &[&Task]) {
    println!("{}", filter.heading());
    if tasks.is_empty() {
        let (title, hint) = filter.empty_state();
        println!("  {title}");
        println!("  {hint}");
        return;
    }
    for t in tasks {
        println!("{}", task_line(t));
    }
}

pub fn bucket_line(summary: &Summary, active: Filter) -> String {
    Filter::BUCKETS
        .iter()
        .map(|f| {
            let label = summary.bucket_label(*f);
            if *f == active {
                format!("*{label}")
            } else {
                label
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// `[#####---------------] 25%`
pub fn progress_bar(pct: u8) -> String {
    let filled = (usize::from(pct) * BAR_WIDTH + 50) / 100;
    format!(
        "[{}{}] {pct}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}

pub fn print_progress(summary: &Summary) {
    if let Some(pct) = summary.progress_percent() {
        println!("Overall Progress {}", progress_bar(pct));
    }
}

pub fn print_header(summary: &Summary, clock: &ClockFace) {
    println!("Task Manager  {}  {}", clock.time, clock.date);
    println!("  {}", summary.headline());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_scales() {
        assert_eq!(progress_bar(0), "[--------------------] 0%");
        assert_eq!(progress_bar(25), "[#####---------------] 25%");
        assert_eq!(progress_bar(100), "[####################] 100%");
    }

    #[test]
    fn bucket_line_marks_active() {
        let s = Summary { total: 3, completed: 1, pending: 2 };
        assert_eq!(
            bucket_line(&s, Filter::Pending),
            "All (3) | *Pending (2) | Completed (1)"
        );
    }
}
