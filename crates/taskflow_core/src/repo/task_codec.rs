//! JSON codec for the persisted task collection.
//!
//! # Invariants
//! - The stored shape is a JSON array of objects with fields
//!   `id, text, priority, category, completed, createdAt`.
//! - Decoding never repairs or partially salvages malformed input.

use crate::model::task::Task;
use crate::repo::kv_repo::{RepoError, RepoResult};

/// Serializes the full collection in its current order.
pub fn encode_tasks(tasks: &[Task]) -> RepoResult<String> {
    serde_json::to_string(tasks)
        .map_err(|err| RepoError::InvalidData(format!("failed to encode tasks: {err}")))
}

/// Deserializes a collection previously written by [`encode_tasks`].
///
/// A JSON `null` is treated like an absent slot and yields an empty list.
pub fn decode_tasks(raw: &str) -> RepoResult<Vec<Task>> {
    let decoded: Option<Vec<Task>> = serde_json::from_str(raw)
        .map_err(|err| RepoError::InvalidData(format!("failed to decode tasks: {err}")))?;
    Ok(decoded.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::{decode_tasks, encode_tasks};
    use crate::model::task::{Priority, Task};
    use crate::repo::kv_repo::RepoError;

    #[test]
    fn roundtrip_preserves_fields_and_order() {
        let mut first = Task::new("first", Priority::High, "work", 1).unwrap();
        first.completed = true;
        let second = Task::new("second", Priority::Low, "personal", 2).unwrap();
        let tasks = vec![first, second];

        let decoded = decode_tasks(&encode_tasks(&tasks).unwrap()).unwrap();
        assert_eq!(decoded, tasks);
    }

    #[test]
    fn decodes_collection_written_by_other_clients() {
        let raw = r#"[{"id":"lq3k9x2abc","text":"Call mom","priority":"high","category":"personal","completed":false,"createdAt":1700000000000}]"#;
        let tasks = decode_tasks(raw).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id.as_str(), "lq3k9x2abc");
        assert_eq!(tasks[0].priority, Priority::High);
    }

    #[test]
    fn null_payload_decodes_as_empty() {
        assert!(decode_tasks("null").unwrap().is_empty());
    }

    #[test]
    fn shape_mismatch_is_invalid_data() {
        let err = decode_tasks(r#"[{"id":"x","text":"t","priority":"urgent"}]"#).unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(_)));

        let err = decode_tasks("{\"tasks\":[]}").unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(_)));
    }
}
