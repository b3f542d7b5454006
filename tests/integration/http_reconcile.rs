//! End-to-end reconciliation tests over HTTP against the stub backend.
//!
//! The stub answers in the wrapped shapes (`{tasks}`, `{task}`,
//! `{constraints}` with JSON-encoded `value` strings), so these tests
//! exercise the full inbound/outbound shape absorption through a real
//! HTTP round trip.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use schedai::assistant::AssistantChat;
use schedai::session::session_from_login;
use schedai::tasks::{StoreError, TaskStore};
use schedai::transport::Transport;
use schedai::transport::http::HttpTransport;
use schedai_proto::task::{TaskDraft, TaskId, UserId};
use schedai_stub::routes::start_server;
use schedai_stub::store::StubStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Boots a stub backend on an ephemeral port and returns its root URL.
async fn start_stub() -> String {
    let store = Arc::new(StubStore::new());
    let (addr, _handle) = start_server("127.0.0.1:0", store).await.unwrap();
    format!("http://{addr}")
}

fn transport(base_url: &str) -> HttpTransport {
    HttpTransport::new(base_url, Duration::from_secs(5)).unwrap()
}

fn store(base_url: &str) -> TaskStore<HttpTransport> {
    TaskStore::new(transport(base_url), UserId::new(1), Vec::new())
}

fn draft(name: &str) -> TaskDraft {
    TaskDraft {
        name: name.to_string(),
        ..TaskDraft::default()
    }
}

// ---------------------------------------------------------------------------
// Load / add / delete flows
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fresh_backend_loads_empty_lists() {
    let base = start_stub().await;
    let snapshot = store(&base).load().await.unwrap();
    assert!(snapshot.tasks.is_empty());
    assert!(snapshot.categories.is_empty());
}

#[tokio::test]
async fn add_task_normalizes_the_wrapped_created_record() {
    let base = start_stub().await;
    let store = store(&base);

    let mut d = draft("Essay draft");
    d.duration_minutes = Some(90);
    d.deadline = Some("2025-11-30T14:00".to_string());
    d.category = Some("Kuliah".to_string());

    let created = store.add_task(&d).await.unwrap();

    // The serializer split the deadline; the stub stored day + time; the
    // normalizer put them back together with seconds.
    assert_eq!(created.deadline.as_deref(), Some("2025-11-30T14:00:00"));
    assert_eq!(created.duration_minutes, Some(90));
    assert_eq!(created.category.as_deref(), Some("Kuliah"));
    assert_eq!(store.tasks().len(), 1);
}

#[tokio::test]
async fn created_tasks_survive_an_authoritative_reload() {
    let base = start_stub().await;
    let store = store(&base);

    store.add_task(&draft("first")).await.unwrap();
    store.add_task(&draft("second")).await.unwrap();

    let snapshot = store.load().await.unwrap();
    let names: Vec<&str> = snapshot.tasks.iter().map(|t| t.name.as_str()).collect();
    // Newest first, both locally and from the backend.
    assert_eq!(names, vec!["second", "first"]);
}

#[tokio::test]
async fn delete_removes_the_task_everywhere() {
    let base = start_stub().await;
    let store = store(&base);

    let kept = store.add_task(&draft("keep")).await.unwrap();
    let doomed = store.add_task(&draft("doomed")).await.unwrap();

    store.delete_task(&doomed.id).await.unwrap();
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].id, kept.id);

    let snapshot = store.load().await.unwrap();
    assert_eq!(snapshot.tasks.len(), 1);
}

#[tokio::test]
async fn delete_of_unknown_id_surfaces_a_status_error() {
    let base = start_stub().await;
    let store = store(&base);
    store.add_task(&draft("only")).await.unwrap();

    let result = store.delete_task(&TaskId::new("999")).await;
    assert!(matches!(result, Err(StoreError::Transport(_))));
    // Last-known-good state is untouched.
    assert_eq!(store.tasks().len(), 1);
}

#[tokio::test]
async fn deadline_day_without_time_gets_the_backend_default() {
    let base = start_stub().await;
    let transport = transport(&base);

    // Bypass the serializer: a raw record with only a deadline day, as
    // another client might send it.
    transport
        .create_task(&json!({"user_id": 1, "name": "t", "deadline_day": "2025-11-30"}))
        .await
        .unwrap();

    let snapshot = store(&base).load().await.unwrap();
    // Stub defaulted the time to 23:59; the normalizer padded the seconds.
    assert_eq!(
        snapshot.tasks[0].deadline.as_deref(),
        Some("2025-11-30T23:59:00")
    );
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[tokio::test]
async fn added_category_survives_the_authoritative_reload() {
    let base = start_stub().await;
    let store = store(&base);
    store.load().await.unwrap();

    let created = store.add_category("Proyek").await.unwrap();
    assert_eq!(created, "Proyek");
    // Speculative local insertion is visible immediately.
    assert_eq!(store.categories(), vec!["Proyek".to_string()]);

    // The constraint was persisted (as a JSON-encoded value string), so
    // the next authoritative merge still carries it.
    let snapshot = store.load().await.unwrap();
    assert_eq!(snapshot.categories, vec!["Proyek".to_string()]);
}

#[tokio::test]
async fn default_categories_front_the_merged_list() {
    let base = start_stub().await;
    let store = TaskStore::new(
        transport(&base),
        UserId::new(1),
        vec!["Tugas".to_string(), "Olahraga".to_string()],
    );

    store.add_category("Proyek").await.unwrap();
    let snapshot = store.load().await.unwrap();
    assert_eq!(
        snapshot.categories,
        vec![
            "Tugas".to_string(),
            "Olahraga".to_string(),
            "Proyek".to_string()
        ]
    );
}

#[tokio::test]
async fn category_refresh_runs_after_each_mutation() {
    let base = start_stub().await;
    let store = store(&base);

    // Seed a constraint through a second client of the same backend.
    let other = TaskStore::new(transport(&base), UserId::new(1), Vec::new());
    other.add_category("Shared").await.unwrap();

    // A task mutation on this store triggers the refresh that discovers it.
    store.add_task(&draft("anything")).await.unwrap();
    assert_eq!(store.categories(), vec!["Shared".to_string()]);
}

// ---------------------------------------------------------------------------
// Auth and assistant
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_yields_a_usable_session_record() {
    let base = start_stub().await;
    let record = transport(&base)
        .login("ana@example.com", "secret")
        .await
        .unwrap();

    let session = session_from_login(&record).unwrap();
    assert!(session.token.starts_with("tok-"));
    assert_eq!(session.user_id, UserId::new(1));
    assert_eq!(session.email, "ana@example.com");
}

#[tokio::test]
async fn assistant_prompt_passes_through() {
    let base = start_stub().await;
    let mut chat = AssistantChat::new(transport(&base));

    let line = chat.send("plan my thesis week").await.unwrap();
    assert!(!line.text.is_empty());
    // Transcript: greeting, prompt, reply.
    assert_eq!(chat.lines().len(), 3);
}
