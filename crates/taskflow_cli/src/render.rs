//! Text rendering for projections and notifications.
//!
//! # Responsibility
//! - Turn a `Projection` into terminal output.
//! - Own user-facing notification and confirmation wording.

use chrono::{NaiveDate, TimeZone};
use std::fmt::{Display, Write};
use taskflow_core::{Projection, Task, TaskCounters};

const EMPTY_STATE: &str = "No tasks found.";

/// Long date heading, e.g. `Friday, October 16, 2026`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Creation time as `HH:MM AM/PM` in `tz`.
pub fn format_time<Tz>(epoch_ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match tz.timestamp_millis_opt(epoch_ms).single() {
        Some(at) => at.format("%I:%M %p").to_string(),
        None => "--:--".to_string(),
    }
}

/// Renders the full list view: date heading, visible tasks, and footer.
pub fn render_list<Tz>(projection: &Projection, today: NaiveDate, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    let _ = writeln!(out, "{}", format_date(today));
    let _ = writeln!(out);

    if projection.is_empty {
        let _ = writeln!(out, "{EMPTY_STATE}");
    } else {
        for task in &projection.tasks {
            let _ = writeln!(out, "{}", render_task(task, tz));
        }
    }

    let _ = writeln!(out);
    let _ = write!(out, "{}", render_stats(&projection.counters));
    out
}

pub fn render_task<Tz>(task: &Task, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mark = if task.completed { "x" } else { " " };
    format!(
        "[{mark}] {}  {}  [{}] [{}] {}",
        task.id,
        task.text,
        task.priority,
        task.category,
        format_time(task.created_at, tz)
    )
}

pub fn render_stats(counters: &TaskCounters) -> String {
    format!(
        "total={} pending={} completed={}  ({})\n",
        counters.total,
        counters.pending,
        counters.completed,
        counters.items_left_label()
    )
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

pub fn clear_completed_prompt(count: usize) -> String {
    format!("Clear {count} completed task{}?", plural(count))
}

pub fn clear_all_prompt() -> &'static str {
    "Delete all tasks?"
}

pub fn cleared_notice(count: usize) -> String {
    format!("Cleared {count} task{}", plural(count))
}
