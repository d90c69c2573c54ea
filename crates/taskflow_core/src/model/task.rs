//! Task domain model.
//!
//! # Responsibility
//! - Define the single persisted entity and its closed value sets.
//! - Normalize user-supplied text before it reaches the store.
//!
//! # Invariants
//! - `id` is assigned once at creation and never changes.
//! - `text` is trimmed and never empty once stored.
//! - `created_at` is set once at creation and is display-only.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Opaque, stable task identifier.
///
/// Stored as a plain string so collections written by earlier clients with
/// non-UUID ids still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a fresh unique identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed task priority set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    #[default]
    Low,
}

impl Priority {
    /// Sort rank: `high(0) < medium(1) < low(2)`.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParseError::UnknownPriority(value.to_string())),
        }
    }
}

/// Coarse completedness selection applied before display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TaskFilter {
    /// Returns whether `task` passes this filter.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl Display for TaskFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskFilter {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseError::UnknownFilter(value.to_string())),
        }
    }
}

/// Error for parsing closed value sets from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnknownPriority(String),
    UnknownFilter(String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownPriority(value) => {
                write!(f, "unknown priority `{value}`; expected high|medium|low")
            }
            Self::UnknownFilter(value) => {
                write!(f, "unknown filter `{value}`; expected all|active|completed")
            }
        }
    }
}

impl Error for ParseError {}

/// A single user-created to-do item.
///
/// Field names are serialized in camelCase to keep the stored shape
/// (`id, text, priority, category, completed, createdAt`) stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub priority: Priority,
    /// Opaque label chosen by the presentation layer.
    pub category: String,
    pub completed: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Task {
    /// Creates an incomplete task with a generated id.
    ///
    /// Returns `None` when `text` is empty after trimming.
    pub fn new(
        text: &str,
        priority: Priority,
        category: impl Into<String>,
        created_at: i64,
    ) -> Option<Self> {
        let text = normalize_task_text(text)?;
        Some(Self {
            id: TaskId::generate(),
            text,
            priority,
            category: category.into(),
            completed: false,
            created_at,
        })
    }
}

/// Trims task text, returning `None` for empty or whitespace-only input.
pub fn normalize_task_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_task_text, Priority, Task, TaskFilter, TaskId};

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(TaskId::generate(), TaskId::generate());
    }

    #[test]
    fn new_task_trims_text_and_starts_incomplete() {
        let task = Task::new("  write report  ", Priority::High, "work", 42).unwrap();
        assert_eq!(task.text, "write report");
        assert!(!task.completed);
        assert_eq!(task.created_at, 42);
    }

    #[test]
    fn new_task_rejects_blank_text() {
        assert!(Task::new("   ", Priority::Low, "personal", 0).is_none());
        assert_eq!(normalize_task_text("\t\n"), None);
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!(" HIGH ".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }

    #[test]
    fn filter_matches_completedness() {
        let mut task = Task::new("x", Priority::Low, "personal", 0).unwrap();
        assert!(TaskFilter::Active.matches(&task));
        assert!(!TaskFilter::Completed.matches(&task));
        task.completed = true;
        assert!(TaskFilter::Completed.matches(&task));
        assert!(TaskFilter::All.matches(&task));
        assert_eq!("Active".parse::<TaskFilter>().unwrap(), TaskFilter::Active);
    }

    #[test]
    fn task_serializes_with_camel_case_fields() {
        let task = Task {
            id: TaskId::from("abc"),
            text: "Buy milk".to_string(),
            priority: Priority::Medium,
            category: "shopping".to_string(),
            completed: false,
            created_at: 1_700_000_000_000,
        };
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(
            json,
            r#"{"id":"abc","text":"Buy milk","priority":"medium","category":"shopping","completed":false,"createdAt":1700000000000}"#
        );
    }
}
