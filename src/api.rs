use serde::Deserialize;

use crate::model::{Task, TaskDraft, TaskPatch};

/// Error type for calls against the remote task service.
///
/// The UI collapses every variant into one "operation failed" surface;
/// the variants exist so the CLI can print something useful to stderr.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(reqwest::StatusCode),
}

/// Response of the backend's health probe.
#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub timestamp: String,
}

/// Async client for the todo resource. Cheap to clone; every spawned
/// request owns its own handle.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// `GET /todos` — the full collection, in server order.
    pub async fn fetch_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let resp = self.http.get(self.url("todos")).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(resp.json().await?)
    }

    /// `POST /todos` — returns the authoritative record with the
    /// server-assigned id and creation timestamp.
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task, ApiError> {
        let resp = self.http.post(self.url("todos")).json(draft).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(resp.json().await?)
    }

    /// `PUT /todos/{id}` — partial update. Only the status is relied upon;
    /// the local copy is patched from what was sent.
    pub async fn update_task(&self, id: i64, patch: &TaskPatch) -> Result<(), ApiError> {
        let resp = self
            .http
            .put(self.url(&format!("todos/{id}")))
            .json(patch)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(())
    }

    /// `DELETE /todos/{id}` — status only.
    pub async fn delete_task(&self, id: i64) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(self.url(&format!("todos/{id}")))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(())
    }

    /// `GET /health` — backend liveness probe.
    pub async fn health(&self) -> Result<Health, ApiError> {
        let resp = self.http.get(self.url("health")).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(resp.json().await?)
    }
}
