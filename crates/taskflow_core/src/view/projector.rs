//! Derived task view: filter, search, sort and counters.
//!
//! # Responsibility
//! - Project a read-only task snapshot into the ordered list to display.
//! - Compute aggregate counters over the whole collection.
//!
//! # Invariants
//! - Projection is pure; the input slice is never mutated.
//! - Ordering is incomplete before completed, then priority rank, then the
//!   input's relative order (stable sort).
//! - Counters ignore filter and search.

use crate::model::task::{Task, TaskFilter};
use std::cmp::Ordering;

/// Transient selection owned by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub filter: TaskFilter,
    /// Case-insensitive substring matched against task text. Empty matches all.
    pub search_query: String,
}

impl ViewState {
    pub fn new(filter: TaskFilter, search_query: impl Into<String>) -> Self {
        Self {
            filter,
            search_query: search_query.into(),
        }
    }
}

/// Aggregate counts over the unfiltered collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounters {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
}

impl TaskCounters {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            total: tasks.len(),
            pending: tasks.len() - completed,
            completed,
        }
    }

    /// Footer label such as `1 item left` or `3 items left`.
    pub fn items_left_label(&self) -> String {
        let suffix = if self.pending == 1 { "" } else { "s" };
        format!("{} item{suffix} left", self.pending)
    }
}

/// Render-ready projection result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub tasks: Vec<Task>,
    pub counters: TaskCounters,
    /// Whether `tasks` is empty, so the caller can show an empty state.
    pub is_empty: bool,
}

/// Projects `tasks` through `view` into the ordered visible list.
pub fn project(tasks: &[Task], view: &ViewState) -> Projection {
    let needle = view.search_query.to_lowercase();
    let mut visible: Vec<Task> = tasks
        .iter()
        .filter(|task| view.filter.matches(task))
        .filter(|task| needle.is_empty() || task.text.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    // `sort_by` is stable, which keeps insertion order for ties.
    visible.sort_by(display_order);

    Projection {
        is_empty: visible.is_empty(),
        tasks: visible,
        counters: TaskCounters::from_tasks(tasks),
    }
}

fn display_order(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| a.priority.rank().cmp(&b.priority.rank()))
}

#[cfg(test)]
mod tests {
    use super::TaskCounters;
    use crate::model::task::{Priority, Task};

    #[test]
    fn items_left_label_pluralizes() {
        let mut task = Task::new("x", Priority::Low, "personal", 0).unwrap();
        assert_eq!(
            TaskCounters::from_tasks(std::slice::from_ref(&task)).items_left_label(),
            "1 item left"
        );

        task.completed = true;
        assert_eq!(
            TaskCounters::from_tasks(&[task]).items_left_label(),
            "0 items left"
        );
        assert_eq!(TaskCounters::default().items_left_label(), "0 items left");
    }
}
