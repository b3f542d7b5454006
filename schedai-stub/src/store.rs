//! In-memory task and constraint store for the stub backend.
//!
//! Rows follow the real backend's SQLAlchemy models: tasks keep their
//! deadline split into `deadline_day`/`deadline_time`, and constraint
//! values are stored JSON-encoded as strings. Record dicts include `null`
//! for unset columns, like the real backend's serialization does.

use chrono::Utc;
use parking_lot::Mutex;
use serde_json::{Value, json};

/// Time assumed when a deadline day arrives without a time.
const DEFAULT_DEADLINE_TIME: &str = "23:59";

#[derive(Debug, Clone)]
struct TaskRow {
    id: u64,
    user_id: u64,
    name: String,
    mode: Option<String>,
    duration_minutes: Option<u64>,
    deadline_day: Option<String>,
    deadline_time: Option<String>,
    category: Option<String>,
    created_at: String,
}

impl TaskRow {
    fn to_record(&self) -> Value {
        json!({
            "id": self.id,
            "user_id": self.user_id,
            "name": self.name,
            "mode": self.mode,
            "duration_minutes": self.duration_minutes,
            "deadline_day": self.deadline_day,
            "deadline_time": self.deadline_time,
            "category": self.category,
            "created_at": self.created_at,
        })
    }
}

#[derive(Debug, Clone)]
struct ConstraintRow {
    id: u64,
    user_id: u64,
    ctype: String,
    /// JSON-encoded value, stored as the string the database column holds.
    value: String,
    priority: u64,
}

impl ConstraintRow {
    fn to_record(&self) -> Value {
        json!({
            "id": self.id,
            "user_id": self.user_id,
            "type": self.ctype,
            "value": self.value,
            "priority": self.priority,
        })
    }
}

struct State {
    tasks: Vec<TaskRow>,
    constraints: Vec<ConstraintRow>,
    next_task_id: u64,
    next_constraint_id: u64,
}

/// In-memory store behind a mutex, shared by the route handlers.
pub struct StubStore {
    state: Mutex<State>,
}

impl Default for StubStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StubStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                tasks: Vec::new(),
                constraints: Vec::new(),
                next_task_id: 1,
                next_constraint_id: 1,
            }),
        }
    }

    /// Returns all task records for a user, newest first.
    #[must_use]
    pub fn tasks_for(&self, user_id: u64) -> Vec<Value> {
        let state = self.state.lock();
        state
            .tasks
            .iter()
            .filter(|row| row.user_id == user_id)
            .map(TaskRow::to_record)
            .collect()
    }

    /// Creates a task from an incoming creation record and returns the
    /// stored record.
    ///
    /// Mirrors the real backend's defaulting: a `deadline_day` without a
    /// `deadline_time` gets `23:59`.
    pub fn create_task(&self, data: &Value) -> Value {
        let mut state = self.state.lock();
        let id = state.next_task_id;
        state.next_task_id += 1;

        let deadline_day = string_field(data, "deadline_day");
        let deadline_time = match (&deadline_day, string_field(data, "deadline_time")) {
            (Some(_), None) => Some(DEFAULT_DEADLINE_TIME.to_string()),
            (_, time) => time,
        };

        let row = TaskRow {
            id,
            user_id: data.get("user_id").and_then(Value::as_u64).unwrap_or(0),
            name: string_field(data, "name").unwrap_or_default(),
            mode: string_field(data, "mode"),
            duration_minutes: data.get("duration_minutes").and_then(Value::as_u64),
            deadline_day,
            deadline_time,
            category: string_field(data, "category"),
            created_at: Utc::now().to_rfc3339(),
        };
        let record = row.to_record();
        state.tasks.insert(0, row);
        record
    }

    /// Deletes a task by id. Returns whether anything was removed.
    pub fn delete_task(&self, id: u64) -> bool {
        let mut state = self.state.lock();
        let before = state.tasks.len();
        state.tasks.retain(|row| row.id != id);
        state.tasks.len() != before
    }

    /// Returns all constraint records for a user.
    #[must_use]
    pub fn constraints_for(&self, user_id: u64) -> Vec<Value> {
        let state = self.state.lock();
        state
            .constraints
            .iter()
            .filter(|row| row.user_id == user_id)
            .map(ConstraintRow::to_record)
            .collect()
    }

    /// Creates a constraint from a `{user_id, type, value, priority}`
    /// payload and returns the stored record.
    ///
    /// The `value` is serialized to a string on the way in, so clients see
    /// `{"value": "{\"name\":...}"}` records on the way out.
    pub fn create_constraint(&self, data: &Value) -> Value {
        let mut state = self.state.lock();
        let id = state.next_constraint_id;
        state.next_constraint_id += 1;

        let value = data.get("value").cloned().unwrap_or(Value::Null);
        let row = ConstraintRow {
            id,
            user_id: data.get("user_id").and_then(Value::as_u64).unwrap_or(0),
            ctype: string_field(data, "type").unwrap_or_else(|| "category".to_string()),
            value: value.to_string(),
            priority: data.get("priority").and_then(Value::as_u64).unwrap_or(3),
        };
        let record = row.to_record();
        state.constraints.push(row);
        record
    }
}

fn string_field(data: &Value, key: &str) -> Option<String> {
    data.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}
