//! Task domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by the store and projector.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Removal is permanent; there are no tombstones.

pub mod task;
