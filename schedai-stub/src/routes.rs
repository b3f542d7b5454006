//! REST routes for the stub backend.
//!
//! The route set mirrors the real backend's Flask blueprints: task and
//! constraint endpoints under `/api`, auth and the assistant at the root.
//! Response envelopes are intentionally the wrapped variants (`{tasks}`,
//! `{task}`, `{constraints}`) so clients cannot get away with assuming
//! bare records.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::store::StubStore;

/// Builds the stub router over a shared store.
pub fn router(store: Arc<StubStore>) -> Router {
    Router::new()
        .route("/api/tasks/", post(create_task))
        .route("/api/tasks/{id}", get(get_tasks).delete(delete_task))
        .route("/api/constraints/user/{user_id}", get(get_constraints))
        .route("/api/constraints/task", post(create_constraint))
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/assistant", post(assistant))
        .with_state(store)
}

/// Starts the stub server on the given address.
///
/// Returns the bound address (useful with port 0) and a join handle for
/// the serve task.
///
/// # Errors
///
/// Returns an error if the listener cannot bind.
pub async fn start_server(
    addr: &str,
    store: Arc<StubStore>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(store);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "stub server error");
        }
    });

    Ok((bound_addr, handle))
}

async fn get_tasks(State(store): State<Arc<StubStore>>, Path(user_id): Path<u64>) -> Json<Value> {
    Json(json!({"tasks": store.tasks_for(user_id)}))
}

async fn create_task(
    State(store): State<Arc<StubStore>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if body.get("user_id").and_then(Value::as_u64).is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "user_id is required"})),
        );
    }
    let created = store.create_task(&body);
    tracing::debug!(id = %created["id"], "task created");
    (StatusCode::CREATED, Json(json!({"task": created})))
}

async fn delete_task(
    State(store): State<Arc<StubStore>>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    if store.delete_task(id) {
        (StatusCode::OK, Json(json!({"message": "Task deleted"})))
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Task not found"})),
        )
    }
}

async fn get_constraints(
    State(store): State<Arc<StubStore>>,
    Path(user_id): Path<u64>,
) -> Json<Value> {
    Json(json!({"constraints": store.constraints_for(user_id)}))
}

async fn create_constraint(
    State(store): State<Arc<StubStore>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if body.get("user_id").and_then(Value::as_u64).is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "user_id is required"})),
        );
    }
    (StatusCode::CREATED, Json(store.create_constraint(&body)))
}

async fn login(Json(body): Json<Value>) -> Json<Value> {
    let email = body
        .get("email")
        .and_then(Value::as_str)
        .unwrap_or("user@example.com");
    let name = email.split('@').next().unwrap_or("user");
    Json(json!({
        "token": format!("tok-{}", Uuid::new_v4()),
        "user_id": 1,
        "name": name,
        "email": email,
    }))
}

async fn register(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({"message": "Register success", "user": body}))
}

async fn assistant(Json(body): Json<Value>) -> Json<Value> {
    let prompt = body.get("prompt").and_then(Value::as_str).unwrap_or("");
    tracing::debug!(prompt, "assistant prompt received");
    Json(json!({"reply": "Okay, noted. I will work that into your schedule."}))
}
