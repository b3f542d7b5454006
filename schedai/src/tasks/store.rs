//! The reconciled in-memory task and category store.
//!
//! `TaskStore` sits between the transport and the UI: every backend
//! response passes through the normalizer before touching state, and every
//! mutation intent passes through the serializer on its way out. State
//! lives behind a synchronous mutex that is never held across an await;
//! each operation performs one atomic replace-or-splice once its data is
//! ready, so partial writes are never visible.
//!
//! Overlapping `load()` calls are not deduplicated or sequenced: both run
//! to completion and both apply their result, last-to-resolve wins. This
//! is a race, not last-requested-wins; see the unit test
//! `overlapping_loads_last_resolve_wins`.

use parking_lot::Mutex;

use schedai_proto::normalize::{
    constraint_records, created_task_record, normalize_category_name, normalize_task, task_records,
};
use schedai_proto::serialize::{constraint_create, serialize_task_create};
use schedai_proto::task::{Task, TaskDraft, TaskId, UserId};

use crate::transport::Transport;

use super::StoreError;
use super::categories::{add_category, merge_category_names};

#[derive(Default)]
struct StoreState {
    /// Newest-first task list.
    tasks: Vec<Task>,
    categories: Vec<String>,
}

/// A point-in-time copy of the store contents, for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Tasks, newest first.
    pub tasks: Vec<Task>,
    /// Category names, defaults first, then observation order.
    pub categories: Vec<String>,
}

/// Reconciled store over a [`Transport`] implementation.
///
/// The only shared mutable resource in the client; mutated exclusively by
/// [`load`](Self::load), [`add_task`](Self::add_task),
/// [`delete_task`](Self::delete_task), and
/// [`add_category`](Self::add_category).
pub struct TaskStore<T> {
    transport: T,
    user_id: UserId,
    default_categories: Vec<String>,
    state: Mutex<StoreState>,
}

impl<T: Transport> TaskStore<T> {
    /// Creates an empty store for the given user.
    ///
    /// `default_categories` always appear in the category list, even when
    /// never observed in a constraint record (empty in the full product
    /// variant).
    pub fn new(transport: T, user_id: UserId, default_categories: Vec<String>) -> Self {
        Self {
            transport,
            user_id,
            default_categories,
            state: Mutex::new(StoreState::default()),
        }
    }

    /// Returns a copy of the current task list, newest first.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.state.lock().tasks.clone()
    }

    /// Returns a copy of the current category list.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.state.lock().categories.clone()
    }

    /// Returns a copy of both lists.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let state = self.state.lock();
        Snapshot {
            tasks: state.tasks.clone(),
            categories: state.categories.clone(),
        }
    }

    /// Reloads tasks and categories from the backend, replacing both lists
    /// wholesale.
    ///
    /// Records that cannot become canonical tasks are skipped with a
    /// warning rather than failing the load. A constraint-fetch failure
    /// keeps the previous category list; only the task fetch can fail the
    /// call, in which case the store keeps its last-known-good state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Transport`] if the task fetch fails.
    pub async fn load(&self) -> Result<Snapshot, StoreError> {
        let body = self.transport.fetch_tasks(self.user_id).await?;
        let tasks: Vec<Task> = task_records(&body)
            .iter()
            .filter_map(|record| match normalize_task(record) {
                Ok(task) => Some(task),
                Err(error) => {
                    tracing::warn!(%error, "skipping unusable task record");
                    None
                }
            })
            .collect();
        self.state.lock().tasks = tasks;

        self.refresh_categories().await;
        Ok(self.snapshot())
    }

    /// Creates a task and applies the backend's post-creation record.
    ///
    /// No optimistic insertion happens before confirmation: on failure the
    /// task list is untouched. On success the normalized created task is
    /// prepended (newest-first) and a best-effort category refresh runs.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Transport`] if the create request fails, or
    /// [`StoreError::Shape`] if the backend's record lacks `id`/`name`.
    pub async fn add_task(&self, draft: &TaskDraft) -> Result<Task, StoreError> {
        let record = serialize_task_create(self.user_id, draft);
        let body = self.transport.create_task(&record).await?;
        let created = created_task_record(body);
        let task = normalize_task(&created)?;

        self.state.lock().tasks.insert(0, task.clone());
        self.refresh_categories().await;
        Ok(task)
    }

    /// Deletes a task and removes it from the list immediately.
    ///
    /// The removal is a filter, not a mark: exactly the task with the
    /// matching id disappears. On failure the list is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Transport`] if the delete request fails.
    pub async fn delete_task(&self, id: &TaskId) -> Result<(), StoreError> {
        self.transport.delete_task(id).await?;
        self.state.lock().tasks.retain(|task| task.id != *id);
        self.refresh_categories().await;
        Ok(())
    }

    /// Persists a new category and inserts it locally.
    ///
    /// The created record is classified through the usual chain to pick up
    /// whatever name the backend actually stored, falling back to the
    /// requested name. The local insertion is speculative until the next
    /// authoritative merge from a reload.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Transport`] if the constraint request fails;
    /// the local list is untouched in that case.
    pub async fn add_category(&self, name: &str) -> Result<String, StoreError> {
        let payload = constraint_create(self.user_id, name);
        let body = self.transport.create_constraint(&payload).await?;
        let created = normalize_category_name(&body).unwrap_or_else(|| name.to_string());

        let mut state = self.state.lock();
        let updated = add_category(&created, &state.categories);
        state.categories = updated;
        Ok(created)
    }

    /// Recomputes the category list from the backend, best-effort.
    ///
    /// A failure here never rolls back the task mutation that triggered
    /// it; the category list keeps its previous value and the failure is
    /// only logged.
    async fn refresh_categories(&self) {
        match self.transport.fetch_constraints(self.user_id).await {
            Ok(body) => {
                let names =
                    merge_category_names(&constraint_records(&body), &self.default_categories);
                self.state.lock().categories = names;
            }
            Err(error) => {
                tracing::warn!(%error, "category refresh failed; keeping previous set");
            }
        }
    }
}
