/// Remote REST backend
///
/// Implements the [`Backend`] contract against the Corkboard API. Every
/// call reads the bearer token from the session manager; an HTTP 404
/// maps to [`BackendError::NotFound`] so the facade behaves identically
/// over both backends.
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::backend::{
    Backend, BackendError, BackendResult, ColumnDraft, ColumnPatch, ColumnRecord, TaskDraft,
    TaskPatch, TaskRecord,
};
use crate::session::Session;

/// REST implementation of the backend contract
pub struct RemoteBackend {
    http: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
}

impl RemoteBackend {
    /// Creates a remote backend for the API at `base_url`
    ///
    /// The base URL carries no trailing slash, e.g.
    /// `http://localhost:3000`.
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, session: Arc<Session>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn bearer(&self) -> BackendResult<String> {
        self.session
            .access_token()
            .await
            .ok_or(BackendError::Unauthenticated)
    }

    /// Sends a request and decodes the JSON body
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> BackendResult<T> {
        let response = self.check(request).await?;
        response
            .json()
            .await
            .map_err(|e| BackendError::Http(format!("decode response: {}", e)))
    }

    /// Sends a request, mapping error statuses onto the backend contract
    async fn check(&self, request: reqwest::RequestBuilder) -> BackendResult<reqwest::Response> {
        let token = self.bearer().await?;
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| BackendError::Http(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => {
                Err(BackendError::NotFound("server reported 404".to_string()))
            }
            StatusCode::UNAUTHORIZED => Err(BackendError::Unauthenticated),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(BackendError::Http(format!("{}: {}", status, body)))
            }
        }
    }
}

#[async_trait]
impl Backend for RemoteBackend {
    fn name(&self) -> &str {
        "remote"
    }

    async fn list_tasks(&self) -> BackendResult<Vec<TaskRecord>> {
        self.send_json(self.http.get(self.url("/api/tasks"))).await
    }

    async fn create_task(&self, draft: TaskDraft) -> BackendResult<TaskRecord> {
        let body = serde_json::json!({
            "title": draft.title,
            "description": draft.description,
            "columnId": draft.column_id,
            "completed": draft.completed,
        });
        self.send_json(self.http.post(self.url("/api/tasks")).json(&body))
            .await
    }

    async fn update_task(&self, id: &str, patch: TaskPatch) -> BackendResult<TaskRecord> {
        let body = serde_json::json!({
            "title": patch.title,
            "description": patch.description,
            "completed": patch.completed,
            "position": patch.position,
            "columnId": patch.column_id,
        });
        self.send_json(
            self.http
                .put(self.url(&format!("/api/tasks/{}", id)))
                .json(&body),
        )
        .await
    }

    async fn delete_task(&self, id: &str) -> BackendResult<()> {
        self.check(self.http.delete(self.url(&format!("/api/tasks/{}", id))))
            .await?;
        Ok(())
    }

    async fn list_columns(&self) -> BackendResult<Vec<ColumnRecord>> {
        self.send_json(self.http.get(self.url("/api/columns"))).await
    }

    async fn create_column(&self, draft: ColumnDraft) -> BackendResult<ColumnRecord> {
        let body = serde_json::json!({
            "title": draft.title,
            "position": draft.position,
        });
        self.send_json(self.http.post(self.url("/api/columns")).json(&body))
            .await
    }

    async fn update_column(&self, id: &str, patch: ColumnPatch) -> BackendResult<ColumnRecord> {
        let body = serde_json::json!({
            "title": patch.title,
            "position": patch.position,
        });
        self.send_json(
            self.http
                .put(self.url(&format!("/api/columns/{}", id)))
                .json(&body),
        )
        .await
    }

    async fn delete_column(&self, id: &str) -> BackendResult<()> {
        self.check(self.http.delete(self.url(&format!("/api/columns/{}", id))))
            .await?;
        Ok(())
    }
}
