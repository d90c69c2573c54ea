//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate task mutations over the persistence collaborator.
//! - Keep presentation layers decoupled from storage details.

pub mod task_store;
