//! Transport layer abstraction for the `SchedAI` client.
//!
//! Defines the [`Transport`] trait that all backend implementations must
//! satisfy. Concrete implementations:
//! - [`http::HttpTransport`] — the real REST backend over HTTP
//! - [`memory::MemoryTransport`] — in-process fake backend for offline
//!   mode and testing

pub mod http;
pub mod memory;

use serde_json::Value;

use schedai_proto::task::{TaskId, UserId};

/// Errors that can occur during transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The HTTP request could not be completed (connect, timeout, or
    /// body-decode failure).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned status {status} for {path}")]
    Status {
        /// Request path that was attempted.
        path: String,
        /// HTTP status code.
        status: u16,
    },

    /// The configured base URL (or a path joined onto it) is invalid.
    #[error("invalid backend url: {0}")]
    BadUrl(#[from] url::ParseError),
}

/// Async request/response seam to the backend.
///
/// The transport is a black box: it moves JSON bodies and never interprets
/// their shape. All shape absorption happens above it, in
/// [`schedai_proto::normalize`]. Suspension points in the client exist only
/// at these calls.
pub trait Transport: Send + Sync {
    /// Fetch all tasks for a user. Body: bare list or `{tasks: [...]}`.
    fn fetch_tasks(
        &self,
        user_id: UserId,
    ) -> impl std::future::Future<Output = Result<Value, TransportError>> + Send;

    /// Create a task from a serialized record. Returns the created record,
    /// bare or `{task: {...}}`-wrapped.
    fn create_task(
        &self,
        record: &Value,
    ) -> impl std::future::Future<Output = Result<Value, TransportError>> + Send;

    /// Delete a task by id. Success is signaled by status alone.
    fn delete_task(
        &self,
        id: &TaskId,
    ) -> impl std::future::Future<Output = Result<(), TransportError>> + Send;

    /// Fetch the user's constraint records, in whatever wrapper the
    /// backend favors today.
    fn fetch_constraints(
        &self,
        user_id: UserId,
    ) -> impl std::future::Future<Output = Result<Value, TransportError>> + Send;

    /// Create a constraint from a `{user_id, type, value, priority}`
    /// payload. Returns the created record.
    fn create_constraint(
        &self,
        payload: &Value,
    ) -> impl std::future::Future<Output = Result<Value, TransportError>> + Send;

    /// Authenticate, returning the backend's auth record
    /// (`{token, user_id, name, email}`).
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<Value, TransportError>> + Send;

    /// Register a new account.
    fn register(
        &self,
        payload: &Value,
    ) -> impl std::future::Future<Output = Result<Value, TransportError>> + Send;

    /// Send a free-form prompt to the assistant endpoint. Body: `{reply}`.
    fn assistant_prompt(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<Value, TransportError>> + Send;
}
