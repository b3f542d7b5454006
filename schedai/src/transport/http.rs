//! HTTP transport speaking the Schedule.ai REST contract.
//!
//! Paths mirror the backend's Flask blueprints: task and constraint
//! routes live under `/api`, auth and the assistant sit at the root.
//! The transport owns the request timeout; no retry policy lives here.

use std::time::Duration;

use serde_json::{Value, json};
use url::Url;

use schedai_proto::task::{TaskId, UserId};

use super::{Transport, TransportError};

/// REST transport backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base: Url,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport for the given backend root URL
    /// (e.g. `http://127.0.0.1:5000`).
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::BadUrl`] for an unparsable base URL, or
    /// [`TransportError::Http`] if the underlying client cannot be built.
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, TransportError> {
        let base = Url::parse(base_url)?;
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self { base, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        Ok(self.base.join(path)?)
    }

    async fn get_json(&self, path: &str) -> Result<Value, TransportError> {
        let response = self.client.get(self.endpoint(path)?).send().await?;
        Self::check_status(path, &response)?;
        Ok(response.json().await?)
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        let response = self
            .client
            .post(self.endpoint(path)?)
            .json(body)
            .send()
            .await?;
        Self::check_status(path, &response)?;
        Ok(response.json().await?)
    }

    fn check_status(path: &str, response: &reqwest::Response) -> Result<(), TransportError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(TransportError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            })
        }
    }
}

impl Transport for HttpTransport {
    async fn fetch_tasks(&self, user_id: UserId) -> Result<Value, TransportError> {
        self.get_json(&format!("/api/tasks/{user_id}")).await
    }

    async fn create_task(&self, record: &Value) -> Result<Value, TransportError> {
        self.post_json("/api/tasks/", record).await
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), TransportError> {
        let path = format!("/api/tasks/{id}");
        let response = self.client.delete(self.endpoint(&path)?).send().await?;
        Self::check_status(&path, &response)
    }

    async fn fetch_constraints(&self, user_id: UserId) -> Result<Value, TransportError> {
        self.get_json(&format!("/api/constraints/user/{user_id}"))
            .await
    }

    async fn create_constraint(&self, payload: &Value) -> Result<Value, TransportError> {
        self.post_json("/api/constraints/task", payload).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<Value, TransportError> {
        self.post_json("/auth/login", &json!({"email": email, "password": password}))
            .await
    }

    async fn register(&self, payload: &Value) -> Result<Value, TransportError> {
        self.post_json("/auth/register", payload).await
    }

    async fn assistant_prompt(&self, prompt: &str) -> Result<Value, TransportError> {
        self.post_json("/assistant", &json!({"prompt": prompt}))
            .await
    }
}
