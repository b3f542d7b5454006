//! Offline-mode tests: the reconciled store over the in-memory transport.
//!
//! Exercises the same flows as the HTTP tests but against the fake
//! backend, which answers with bare lists and bare records — the other
//! half of the shape matrix.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use schedai::assistant::AssistantChat;
use schedai::tasks::TaskStore;
use schedai::transport::memory::MemoryTransport;
use schedai_proto::task::{TaskDraft, TaskId, UserId};

fn seeded_store() -> TaskStore<MemoryTransport> {
    TaskStore::new(MemoryTransport::seeded(), UserId::new(1), Vec::new())
}

fn draft(name: &str) -> TaskDraft {
    TaskDraft {
        name: name.to_string(),
        ..TaskDraft::default()
    }
}

#[tokio::test]
async fn seeded_backend_loads_demo_tasks_and_default_categories() {
    let store = seeded_store();
    let snapshot = store.load().await.unwrap();

    assert_eq!(snapshot.tasks.len(), 2);
    assert_eq!(snapshot.tasks[0].name, "Morning run");
    assert_eq!(snapshot.tasks[0].duration_minutes, Some(30));
    assert_eq!(
        snapshot.tasks[1].deadline.as_deref(),
        Some("2025-11-30T14:00:00")
    );
    // The fake backend serves the fixed starter set.
    assert_eq!(
        snapshot.categories,
        vec![
            "Tugas".to_string(),
            "Olahraga".to_string(),
            "Kuliah".to_string()
        ]
    );
}

#[tokio::test]
async fn add_and_delete_round_trip() {
    let store = seeded_store();
    store.load().await.unwrap();

    let mut d = draft("New thing");
    d.category = Some("Tugas".to_string());
    let created = store.add_task(&d).await.unwrap();

    assert_eq!(created.id, TaskId::new("3"));
    assert_eq!(store.tasks().len(), 3);
    assert_eq!(store.tasks()[0].name, "New thing");

    store.delete_task(&created.id).await.unwrap();
    assert_eq!(store.tasks().len(), 2);

    // Reload agrees with the local view.
    let snapshot = store.load().await.unwrap();
    assert_eq!(snapshot.tasks.len(), 2);
}

#[tokio::test]
async fn speculative_category_is_reordered_by_the_authoritative_merge() {
    let store = seeded_store();
    store.load().await.unwrap();

    store.add_category("Proyek").await.unwrap();
    // Speculative insertion puts the new name first.
    assert_eq!(store.categories()[0], "Proyek");

    // The next authoritative merge supersedes the local ordering: the
    // backend lists defaults first.
    let snapshot = store.load().await.unwrap();
    assert_eq!(
        snapshot.categories,
        vec![
            "Tugas".to_string(),
            "Olahraga".to_string(),
            "Kuliah".to_string(),
            "Proyek".to_string()
        ]
    );
}

#[tokio::test]
async fn task_category_feeds_the_derived_category_set() {
    let store = TaskStore::new(MemoryTransport::new(), UserId::new(1), Vec::new());
    store.load().await.unwrap();

    let mut d = draft("Band practice");
    d.category = Some("Musik".to_string());
    store.add_task(&d).await.unwrap();

    // The post-mutation refresh observed the new task's category.
    assert!(store.categories().contains(&"Musik".to_string()));
}

#[tokio::test]
async fn assistant_works_offline() {
    let mut chat = AssistantChat::new(MemoryTransport::new());
    let line = chat.send("fit a run before lunch").await.unwrap();
    assert!(!line.text.is_empty());
}
