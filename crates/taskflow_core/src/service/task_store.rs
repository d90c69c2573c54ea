//! Task store use-case service.
//!
//! # Responsibility
//! - Own the authoritative ordered task collection.
//! - Apply add/toggle/edit/delete/clear mutations and write the whole
//!   collection through the key-value store after each change.
//!
//! # Invariants
//! - Task ids are unique within the collection.
//! - New tasks are inserted at the front; no operation reorders survivors.
//! - Rejected input and lookup misses leave memory and storage untouched.
//! - A failed write is returned to the caller after the in-memory mutation
//!   has been applied; it is never swallowed.

use crate::model::task::{normalize_task_text, Priority, Task, TaskId};
use crate::repo::kv_repo::{KeyValueStore, RepoError, TASKS_STORAGE_KEY};
use crate::repo::task_codec::{decode_tasks, encode_tasks};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Clock used to stamp `created_at`, in epoch milliseconds.
pub type Clock = fn() -> i64;

/// Service error for task store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Reading or decoding the persisted collection failed.
    Load(RepoError),
    /// Writing the collection failed; the in-memory mutation still applies.
    Persist(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(err) => write!(f, "failed to load tasks: {err}"),
            Self::Persist(err) => write!(f, "failed to save tasks: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Load(err) | Self::Persist(err) => Some(err),
        }
    }
}

/// Result of a confirmed clear request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// There was nothing to remove; confirmation was not requested.
    NothingToClear,
    /// The caller declined the confirmation.
    Declined,
    /// This many tasks were removed.
    Cleared(usize),
}

/// Task collection with write-through persistence.
pub struct TaskStore<S: KeyValueStore> {
    storage: S,
    tasks: Vec<Task>,
    clock: Clock,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Loads the persisted collection, or starts empty when nothing is stored.
    ///
    /// # Errors
    /// - `StoreError::Load` when the read fails or the stored value has an
    ///   unexpected shape.
    pub fn load(storage: S) -> StoreResult<Self> {
        let tasks = match storage.read(TASKS_STORAGE_KEY).map_err(StoreError::Load)? {
            Some(raw) => decode_tasks(&raw).map_err(|err| {
                error!("event=tasks_load module=service status=error error={err}");
                StoreError::Load(err)
            })?,
            None => Vec::new(),
        };
        info!(
            "event=tasks_load module=service status=ok count={}",
            tasks.len()
        );

        Ok(Self {
            storage,
            tasks,
            clock: now_epoch_ms,
        })
    }

    /// Replaces the timestamp source used by [`TaskStore::add`].
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Current collection, most recently added first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    /// Creates a task at the front of the collection.
    ///
    /// Returns `Ok(None)` without touching storage when `text` is blank.
    pub fn add(
        &mut self,
        text: &str,
        priority: Priority,
        category: &str,
    ) -> StoreResult<Option<Task>> {
        let Some(mut task) = Task::new(text, priority, category, (self.clock)()) else {
            info!("event=task_add module=service status=rejected reason=empty_text");
            return Ok(None);
        };
        while self.get(&task.id).is_some() {
            task.id = TaskId::generate();
        }

        self.tasks.insert(0, task.clone());
        info!(
            "event=task_add module=service status=ok task_id={} priority={} total={}",
            task.id,
            task.priority,
            self.tasks.len()
        );
        self.persist()?;
        Ok(Some(task))
    }

    /// Flips `completed` and returns the updated task.
    pub fn toggle(&mut self, id: &TaskId) -> StoreResult<Option<Task>> {
        let Some(task) = self.tasks.iter_mut().find(|task| &task.id == id) else {
            info!("event=task_toggle module=service status=not_found task_id={id}");
            return Ok(None);
        };
        task.completed = !task.completed;
        let updated = task.clone();

        info!(
            "event=task_toggle module=service status=ok task_id={id} completed={}",
            updated.completed
        );
        self.persist()?;
        Ok(Some(updated))
    }

    /// Replaces task text with the trimmed `new_text`.
    ///
    /// Returns `Ok(None)` and keeps the original text when `new_text` is
    /// blank or the id is unknown.
    pub fn edit(&mut self, id: &TaskId, new_text: &str) -> StoreResult<Option<Task>> {
        let Some(text) = normalize_task_text(new_text) else {
            info!("event=task_edit module=service status=rejected reason=empty_text task_id={id}");
            return Ok(None);
        };
        let Some(task) = self.tasks.iter_mut().find(|task| &task.id == id) else {
            info!("event=task_edit module=service status=not_found task_id={id}");
            return Ok(None);
        };
        task.text = text;
        let updated = task.clone();

        info!("event=task_edit module=service status=ok task_id={id}");
        self.persist()?;
        Ok(Some(updated))
    }

    /// Removes one task and returns it.
    pub fn delete(&mut self, id: &TaskId) -> StoreResult<Option<Task>> {
        let Some(index) = self.tasks.iter().position(|task| &task.id == id) else {
            info!("event=task_delete module=service status=not_found task_id={id}");
            return Ok(None);
        };
        let removed = self.tasks.remove(index);

        info!(
            "event=task_delete module=service status=ok task_id={id} total={}",
            self.tasks.len()
        );
        self.persist()?;
        Ok(Some(removed))
    }

    /// Removes every completed task and returns how many were removed.
    ///
    /// Storage is only written when the count is non-zero.
    pub fn clear_completed(&mut self) -> StoreResult<usize> {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.completed);
        let removed = before - self.tasks.len();
        if removed == 0 {
            return Ok(0);
        }

        info!("event=tasks_clear module=service status=ok scope=completed removed={removed}");
        self.persist()?;
        Ok(removed)
    }

    /// Removes every task and returns how many were removed.
    pub fn clear_all(&mut self) -> StoreResult<usize> {
        let removed = self.tasks.len();
        if removed == 0 {
            return Ok(0);
        }
        self.tasks.clear();

        info!("event=tasks_clear module=service status=ok scope=all removed={removed}");
        self.persist()?;
        Ok(removed)
    }

    /// Asks `confirm` with the pending count, then clears completed tasks.
    ///
    /// `confirm` is not called when no task is completed.
    pub fn clear_completed_confirmed(
        &mut self,
        confirm: impl FnOnce(usize) -> bool,
    ) -> StoreResult<ClearOutcome> {
        let pending = self.completed_count();
        if pending == 0 {
            return Ok(ClearOutcome::NothingToClear);
        }
        if !confirm(pending) {
            return Ok(ClearOutcome::Declined);
        }
        self.clear_completed().map(ClearOutcome::Cleared)
    }

    /// Asks `confirm` with the collection size, then clears everything.
    ///
    /// `confirm` is not called when the collection is already empty.
    pub fn clear_all_confirmed(
        &mut self,
        confirm: impl FnOnce(usize) -> bool,
    ) -> StoreResult<ClearOutcome> {
        let pending = self.tasks.len();
        if pending == 0 {
            return Ok(ClearOutcome::NothingToClear);
        }
        if !confirm(pending) {
            return Ok(ClearOutcome::Declined);
        }
        self.clear_all().map(ClearOutcome::Cleared)
    }

    fn persist(&self) -> StoreResult<()> {
        let encoded = encode_tasks(&self.tasks).map_err(StoreError::Persist)?;
        self.storage
            .write(TASKS_STORAGE_KEY, &encoded)
            .map_err(|err| {
                error!(
                    "event=tasks_persist module=service status=error count={} error={err}",
                    self.tasks.len()
                );
                StoreError::Persist(err)
            })
    }
}

fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
