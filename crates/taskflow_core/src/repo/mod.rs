//! Persistence collaborator abstractions and implementations.
//!
//! # Responsibility
//! - Define the key-value slot contract used by the task store.
//! - Own the serialized shape of the task collection.
//!
//! # Invariants
//! - The whole collection lives under one fixed key.
//! - Read paths reject malformed persisted state instead of masking it.

pub mod kv_repo;
pub mod task_codec;
