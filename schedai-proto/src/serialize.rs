//! Outbound serialization: canonical requests to backend field names.
//!
//! The inverse direction of [`crate::normalize`]. Serialization never
//! fails: a deadline that does not parse is passed through verbatim under
//! the combined `deadline` key and left for the backend to reject.

use chrono::NaiveDateTime;
use serde_json::{Map, Value, json};

use crate::task::{TaskDraft, UserId};

/// Serializes a task-creation draft into the record shape the backend
/// expects.
///
/// - `user_id` and `name` pass through; `category` is emitted explicitly,
///   `null` when absent (the backend treats the key as optional-but-known).
/// - A duration emits `mode: "duration"` plus `duration_minutes`.
/// - A parsable deadline is split into `deadline_day` (`YYYY-MM-DD`) and
///   `deadline_time` (`HH:MM:00`); an unparsable one is emitted verbatim
///   under `deadline` instead of the split fields.
/// - Unset draft fields are omitted entirely — no null placeholders beyond
///   `category`.
#[must_use]
pub fn serialize_task_create(user_id: UserId, draft: &TaskDraft) -> Value {
    let mut out = Map::new();
    out.insert("user_id".to_string(), json!(user_id.get()));
    out.insert("name".to_string(), json!(draft.name));
    out.insert(
        "category".to_string(),
        draft.category.as_ref().map_or(Value::Null, |c| json!(c)),
    );

    if let Some(minutes) = draft.duration_minutes {
        out.insert("mode".to_string(), json!("duration"));
        out.insert("duration_minutes".to_string(), json!(minutes));
    }

    if let Some(deadline) = &draft.deadline {
        match parse_deadline(deadline) {
            Some(dt) => {
                out.insert(
                    "deadline_day".to_string(),
                    json!(dt.format("%Y-%m-%d").to_string()),
                );
                out.insert(
                    "deadline_time".to_string(),
                    json!(dt.format("%H:%M:00").to_string()),
                );
            }
            None => {
                out.insert("deadline".to_string(), json!(deadline));
            }
        }
    }

    Value::Object(out)
}

/// Builds the constraint-creation payload for a new category.
///
/// The backend's task-constraint endpoint accepts
/// `{user_id, type, value, priority}`; categories travel as a
/// `{name: ...}` value object at the default priority.
#[must_use]
pub fn constraint_create(user_id: UserId, name: &str) -> Value {
    json!({
        "user_id": user_id.get(),
        "type": "category",
        "value": {"name": name},
        "priority": 1,
    })
}

/// Parses a `datetime-local`-style deadline, with or without seconds.
#[must_use]
pub fn parse_deadline(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
}
