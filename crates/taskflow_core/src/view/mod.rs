//! Read-only projections over the task collection.
//!
//! # Responsibility
//! - Turn a task snapshot plus transient view state into render-ready data.
//! - Stay free of storage and presentation concerns.

pub mod projector;
