//! In-memory transport for offline mode and testing.
//!
//! A self-contained fake backend holding its task list behind a mutex on
//! the transport instance — lifecycle owned by whoever constructs it, not
//! by module state. Responses use the same JSON shapes the real backend
//! produces, so the full reconciliation path is exercised unchanged.

use parking_lot::Mutex;
use serde_json::{Value, json};

use schedai_proto::task::{TaskId, UserId};

use super::{Transport, TransportError};

/// Starter categories served even when no task has used them yet.
const DEFAULT_CATEGORIES: [&str; 3] = ["Tugas", "Olahraga", "Kuliah"];

/// Canned assistant acknowledgment.
const ASSISTANT_REPLY: &str = "Okay, noted. I will work that into your schedule.";

#[derive(Default)]
struct MemoryState {
    tasks: Vec<Value>,
    extra_categories: Vec<String>,
    next_id: u64,
}

/// In-process fake backend implementing [`Transport`].
///
/// Tasks are stored newest-first, ids are assigned from a per-instance
/// counter, and the category list is derived from the stored tasks plus
/// the fixed default set — the offline analog of the real constraint
/// endpoint.
pub struct MemoryTransport {
    state: Mutex<MemoryState>,
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTransport {
    /// Creates an empty fake backend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                tasks: Vec::new(),
                extra_categories: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Creates a fake backend preloaded with a small demo task list.
    #[must_use]
    pub fn seeded() -> Self {
        let tasks = vec![
            json!({
                "id": 1,
                "name": "Morning run",
                "category": "Olahraga",
                "duration_minutes": 30,
            }),
            json!({
                "id": 2,
                "name": "Algorithms homework",
                "category": "Kuliah",
                "deadline_day": "2025-11-30",
                "deadline_time": "14:00",
            }),
        ];
        let next_id = tasks.len() as u64 + 1;
        Self {
            state: Mutex::new(MemoryState {
                tasks,
                extra_categories: Vec::new(),
                next_id,
            }),
        }
    }

    /// Derives the constraint records: defaults, locally created
    /// categories, then distinct categories observed on stored tasks.
    fn constraint_list(state: &MemoryState) -> Vec<Value> {
        let mut names: Vec<String> = DEFAULT_CATEGORIES
            .iter()
            .map(ToString::to_string)
            .collect();
        for extra in &state.extra_categories {
            if !names.contains(extra) {
                names.push(extra.clone());
            }
        }
        for task in &state.tasks {
            if let Some(category) = task.get("category").and_then(Value::as_str)
                && !category.is_empty()
                && !names.iter().any(|n| n == category)
            {
                names.push(category.to_string());
            }
        }
        names.into_iter().map(Value::String).collect()
    }
}

impl Transport for MemoryTransport {
    async fn fetch_tasks(&self, _user_id: UserId) -> Result<Value, TransportError> {
        Ok(Value::Array(self.state.lock().tasks.clone()))
    }

    async fn create_task(&self, record: &Value) -> Result<Value, TransportError> {
        let mut state = self.state.lock();
        let mut created = record.clone();
        if let Some(obj) = created.as_object_mut() {
            obj.insert("id".to_string(), json!(state.next_id));
        }
        state.next_id += 1;
        state.tasks.insert(0, created.clone());
        Ok(created)
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), TransportError> {
        // Filter semantics: deleting an unknown id succeeds silently.
        let mut state = self.state.lock();
        state.tasks.retain(|task| {
            task.get("id")
                .and_then(TaskId::from_value)
                .is_none_or(|task_id| task_id != *id)
        });
        Ok(())
    }

    async fn fetch_constraints(&self, _user_id: UserId) -> Result<Value, TransportError> {
        let state = self.state.lock();
        Ok(Value::Array(Self::constraint_list(&state)))
    }

    async fn create_constraint(&self, payload: &Value) -> Result<Value, TransportError> {
        if let Some(name) = payload
            .get("value")
            .and_then(|v| v.get("name"))
            .and_then(Value::as_str)
        {
            let mut state = self.state.lock();
            if !state.extra_categories.iter().any(|c| c == name) {
                state.extra_categories.push(name.to_string());
            }
        }
        Ok(payload.clone())
    }

    async fn login(&self, email: &str, _password: &str) -> Result<Value, TransportError> {
        Ok(json!({
            "token": "offline-token",
            "user_id": 1,
            "name": "Offline",
            "email": email,
        }))
    }

    async fn register(&self, payload: &Value) -> Result<Value, TransportError> {
        Ok(json!({"message": "Register success", "user": payload}))
    }

    async fn assistant_prompt(&self, _prompt: &str) -> Result<Value, TransportError> {
        Ok(json!({"reply": ASSISTANT_REPLY}))
    }
}
