//! Typed HTTP client for the Devlink REST API
//!
//! Thin request/response wrappers over reqwest. Every non-2xx response is
//! decoded from the server's error envelope into [`ClientError::Api`]. No
//! retries anywhere.

use devlink_core::entities::{TaskPriority, TaskStatus};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{ClientError, ClientResult};
use crate::session::{Session, SessionStore};

/// User summary as embedded in API responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummaryDto {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Task as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDto {
    pub id: String,
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(default)]
    pub assignee: Option<UserSummaryDto>,
    #[serde(default)]
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
}

/// Flat task list plus the server-computed lane grouping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskBoardDto {
    pub tasks: Vec<TaskDto>,
}

/// Project with members and tasks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub owner: UserSummaryDto,
    pub tasks: Vec<TaskDto>,
}

/// Auth response subset the client needs
#[derive(Debug, Deserialize)]
struct AuthDto {
    access_token: String,
    refresh_token: String,
    user: AuthUserDto,
}

#[derive(Debug, Deserialize)]
struct AuthUserDto {
    id: String,
    username: String,
}

/// Server error envelope: `{"error": {"code", "message"}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Typed API client
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    /// Create a client against the given base URL (e.g. `http://localhost:3000`)
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            session,
        }
    }

    /// The session store backing this client
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url.trim_end_matches('/'), path)
    }

    fn bearer(&self) -> ClientResult<String> {
        self.session
            .access_token()
            .ok_or(ClientError::NotAuthenticated)
    }

    /// Decode a response, converting error envelopes into `ClientError::Api`
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ClientError::Decode(e.to_string()));
        }

        let envelope = response.json::<ErrorEnvelope>().await.ok();
        let (code, message) = envelope
            .map(|e| (e.error.code, e.error.message))
            .unwrap_or_default();

        Err(ClientError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }

    /// Drain a response where the body is irrelevant (204s)
    async fn expect_ok(response: reqwest::Response) -> ClientResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let envelope = response.json::<ErrorEnvelope>().await.ok();
        let (code, message) = envelope
            .map(|e| (e.error.code, e.error.message))
            .unwrap_or_default();

        Err(ClientError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }

    // ========================================================================
    // Auth
    // ========================================================================

    /// Login and persist the session
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Session> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let auth: AuthDto = Self::decode(response).await?;

        let session = Session {
            user_id: auth.user.id,
            username: auth.user.username,
            access_token: auth.access_token,
            refresh_token: auth.refresh_token,
        };
        self.session.save(session.clone())?;

        Ok(session)
    }

    /// Logout: revoke the refresh token and tear the session down
    pub async fn logout(&self) -> ClientResult<()> {
        if let Some(session) = self.session.current() {
            let response = self
                .http
                .post(self.url("/auth/logout"))
                .bearer_auth(&session.access_token)
                .json(&json!({ "refresh_token": session.refresh_token }))
                .send()
                .await?;
            Self::expect_ok(response).await?;
        }

        self.session.clear()
    }

    // ========================================================================
    // Projects and tasks
    // ========================================================================

    /// Fetch a full project (members, tasks)
    pub async fn get_project(&self, project_id: &str) -> ClientResult<ProjectDto> {
        let response = self
            .http
            .get(self.url(&format!("/projects/{project_id}")))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Fetch the flat task list for a project
    pub async fn get_project_tasks(&self, project_id: &str) -> ClientResult<TaskBoardDto> {
        let response = self
            .http
            .get(self.url(&format!("/projects/{project_id}/tasks")))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Move a task to another status lane
    pub async fn update_task_status(
        &self,
        project_id: &str,
        task_id: &str,
        status: TaskStatus,
    ) -> ClientResult<TaskDto> {
        let response = self
            .http
            .patch(self.url(&format!("/projects/{project_id}/tasks/{task_id}")))
            .bearer_auth(self.bearer()?)
            .json(&json!({ "status": status }))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Assign (or unassign) a task
    pub async fn assign_task(
        &self,
        project_id: &str,
        task_id: &str,
        assignee_id: Option<&str>,
    ) -> ClientResult<TaskDto> {
        let response = self
            .http
            .patch(self.url(&format!("/projects/{project_id}/tasks/{task_id}")))
            .bearer_auth(self.bearer()?)
            .json(&json!({ "assignee_id": assignee_id }))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Edit a task's title or description
    pub async fn edit_task(
        &self,
        project_id: &str,
        task_id: &str,
        title: Option<&str>,
        description: Option<&str>,
    ) -> ClientResult<TaskDto> {
        let mut body = serde_json::Map::new();
        if let Some(title) = title {
            body.insert("title".to_string(), json!(title));
        }
        if let Some(description) = description {
            body.insert("description".to_string(), json!(description));
        }

        let response = self
            .http
            .patch(self.url(&format!("/projects/{project_id}/tasks/{task_id}")))
            .bearer_auth(self.bearer()?)
            .json(&serde_json::Value::Object(body))
            .send()
            .await?;

        Self::decode(response).await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_dto_decodes_server_shape() {
        let raw = r#"{
            "id": "1",
            "project_id": "2",
            "title": "ship it",
            "status": "IN_PROGRESS",
            "priority": "HIGH",
            "assignee": { "id": "3", "username": "alice" }
        }"#;

        let task: TaskDto = serde_json::from_str(raw).unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.assignee.as_ref().unwrap().username, "alice");
        assert!(task.due_date.is_none());
    }

    #[test]
    fn test_error_envelope_decodes() {
        let raw = r#"{"error": {"code": "NOT_FOUND", "message": "Project not found or access denied"}}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.error.code, "NOT_FOUND");
    }
}
