//! Canonical task and identifier types for `SchedAI`.
//!
//! These are the stable value types the rest of the client depends on,
//! independent of whatever field names the backend happened to use on the
//! wire. Conversion from backend records lives in [`crate::normalize`];
//! conversion back lives in [`crate::serialize`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque task identifier, assigned by the backend.
///
/// The backend sends ids as JSON numbers (auto-increment) or strings
/// depending on the deployment; both normalize to the decimal string form
/// so equality and URL interpolation behave the same everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a task id from its string representation.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Extracts a task id from a JSON value (string or integer).
    ///
    /// Returns `None` for anything else, including the empty string.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }

    /// Returns the string representation of this task id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the active user, as assigned by the backend at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Creates a user id from its numeric value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Extracts a user id from a JSON value (integer or numeric string).
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_u64().map(Self),
            Value::String(s) => s.parse().ok().map(Self),
            _ => None,
        }
    }

    /// Returns the numeric value of this user id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A scheduled task in canonical form.
///
/// Every field except `id` and `name` is optional; the backend supports
/// deadline-only tasks, duration-only tasks, and uncategorized tasks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    /// Unique identifier, assigned by the backend.
    pub id: TaskId,
    /// Non-empty display name.
    pub name: String,
    /// Primary category tag.
    pub category: Option<String>,
    /// Secondary category tag.
    pub category2: Option<String>,
    /// Estimated duration in minutes (positive when present).
    pub duration_minutes: Option<u32>,
    /// Combined deadline as an ISO-8601-like string with a seconds
    /// component (`YYYY-MM-DDTHH:MM:SS`). Stays a string because the
    /// backend may hand us a value we cannot parse, and the outbound
    /// path passes such values through verbatim.
    pub deadline: Option<String>,
    /// The original backend record, kept for diagnostics only.
    /// Downstream logic never reads this.
    pub raw: Value,
}

impl Task {
    /// Re-expresses this task as a creation draft (id and raw dropped).
    #[must_use]
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            name: self.name.clone(),
            duration_minutes: self.duration_minutes,
            deadline: self.deadline.clone(),
            category: self.category.clone(),
        }
    }
}

/// Canonical input for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Display name for the new task.
    pub name: String,
    /// Estimated duration in minutes.
    pub duration_minutes: Option<u32>,
    /// Deadline in `datetime-local` form (`YYYY-MM-DDTHH:MM[:SS]`).
    pub deadline: Option<String>,
    /// Category tag.
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn task_id_from_number_renders_decimal() {
        let id = TaskId::from_value(&json!(42)).unwrap();
        assert_eq!(id.as_str(), "42");
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn task_id_from_string_passes_through() {
        let id = TaskId::from_value(&json!("a1b2")).unwrap();
        assert_eq!(id.as_str(), "a1b2");
    }

    #[test]
    fn task_id_rejects_empty_and_non_scalar() {
        assert!(TaskId::from_value(&json!("")).is_none());
        assert!(TaskId::from_value(&json!(null)).is_none());
        assert!(TaskId::from_value(&json!({"id": 1})).is_none());
    }

    #[test]
    fn task_id_equality_across_sources() {
        assert_eq!(
            TaskId::from_value(&json!(7)).unwrap(),
            TaskId::from_value(&json!("7")).unwrap()
        );
    }

    #[test]
    fn user_id_from_number_and_string() {
        assert_eq!(UserId::from_value(&json!(3)), Some(UserId::new(3)));
        assert_eq!(UserId::from_value(&json!("3")), Some(UserId::new(3)));
        assert_eq!(UserId::from_value(&json!(-1)), None);
        assert_eq!(UserId::from_value(&json!("abc")), None);
    }

    #[test]
    fn to_draft_keeps_creation_fields() {
        let task = Task {
            id: TaskId::new("5"),
            name: "Essay".to_string(),
            category: Some("Kuliah".to_string()),
            category2: None,
            duration_minutes: Some(90),
            deadline: Some("2025-11-30T14:00:00".to_string()),
            raw: json!({}),
        };
        let draft = task.to_draft();
        assert_eq!(draft.name, "Essay");
        assert_eq!(draft.duration_minutes, Some(90));
        assert_eq!(draft.deadline.as_deref(), Some("2025-11-30T14:00:00"));
        assert_eq!(draft.category.as_deref(), Some("Kuliah"));
    }
}
