//! Core domain logic for TaskFlow.
//! This crate is the single source of truth for task invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{normalize_task_text, ParseError, Priority, Task, TaskFilter, TaskId};
pub use repo::kv_repo::{
    KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult, SqliteKeyValueStore,
    TASKS_STORAGE_KEY,
};
pub use repo::task_codec::{decode_tasks, encode_tasks};
pub use service::task_store::{Clock, ClearOutcome, StoreError, StoreResult, TaskStore};
pub use view::projector::{project, Projection, TaskCounters, ViewState};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
