//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; those carrying free-form input
//! also implement `Validate` so the API layer rejects malformed payloads
//! before any service runs.

use devlink_core::entities::{
    ConnectionStatus, ConversationKind, DeveloperRole, InvitationStatus, MemberRole, PostKind,
    SkillLevel, TaskPriority, TaskStatus,
};
use devlink_core::Snowflake;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Logout request (optional refresh token to revoke)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
    /// Revoke every session for the user, not just this one
    #[serde(default)]
    pub all_sessions: bool,
}

// ============================================================================
// User Requests
// ============================================================================

/// Update profile request; every field is optional
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: Option<String>,

    #[validate(length(max = 1000, message = "Bio must be at most 1000 characters"))]
    pub bio: Option<String>,

    #[validate(url(message = "Invalid avatar URL"))]
    pub avatar_url: Option<String>,

    #[validate(length(max = 100, message = "Headline must be at most 100 characters"))]
    pub role: Option<String>,

    #[validate(length(max = 100, message = "Location must be at most 100 characters"))]
    pub location: Option<String>,

    #[validate(url(message = "Invalid website URL"))]
    pub website_url: Option<String>,

    #[validate(url(message = "Invalid GitHub URL"))]
    pub github_url: Option<String>,

    #[validate(url(message = "Invalid Twitter URL"))]
    pub twitter_url: Option<String>,
}

/// Add skill request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddSkillRequest {
    #[validate(length(min = 1, max = 50, message = "Skill name must be 1-50 characters"))]
    pub name: String,

    pub level: SkillLevel,
}

/// Update skill request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSkillRequest {
    #[validate(length(min = 1, max = 50, message = "Skill name must be 1-50 characters"))]
    pub name: Option<String>,

    pub level: Option<SkillLevel>,
}

// ============================================================================
// Post Requests
// ============================================================================

/// Create post request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    pub kind: PostKind,

    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    pub content: String,

    #[validate(length(max = 10000, message = "Code snippet must be at most 10000 characters"))]
    pub code_snippet: Option<String>,

    #[validate(length(max = 50, message = "Language must be at most 50 characters"))]
    pub language: Option<String>,

    #[serde(default)]
    pub media_urls: Vec<String>,
}

/// Update post request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    pub content: Option<String>,

    #[validate(length(max = 10000, message = "Code snippet must be at most 10000 characters"))]
    pub code_snippet: Option<String>,

    #[validate(length(max = 50, message = "Language must be at most 50 characters"))]
    pub language: Option<String>,

    pub media_urls: Option<Vec<String>>,
}

/// Create comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub content: String,

    /// Parent comment for nested replies
    pub parent_id: Option<Snowflake>,
}

// ============================================================================
// Connection Requests
// ============================================================================

/// Send connection request
#[derive(Debug, Clone, Deserialize)]
pub struct SendConnectionRequest {
    pub receiver_id: Snowflake,
}

/// Respond to a connection request (accept or reject)
#[derive(Debug, Clone, Deserialize)]
pub struct RespondConnectionRequest {
    pub status: ConnectionStatus,
}

// ============================================================================
// Project Requests
// ============================================================================

/// Create project request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 100, message = "Project name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(url(message = "Invalid GitHub URL"))]
    pub github_url: Option<String>,
}

/// Update project request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 100, message = "Project name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(url(message = "Invalid GitHub URL"))]
    pub github_url: Option<String>,
}

/// Add a member directly (owner/admin action)
#[derive(Debug, Clone, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: Snowflake,

    /// Defaults to MEMBER; ADMIN requires the owner
    pub role: Option<MemberRole>,
}

/// Change a member's role
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMemberRoleRequest {
    pub role: MemberRole,
}

/// Invite a developer to a project
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInvitationRequest {
    pub developer_id: Snowflake,

    pub role: DeveloperRole,

    #[validate(length(max = 500, message = "Message must be at most 500 characters"))]
    pub message: Option<String>,
}

/// Accept or decline an invitation
#[derive(Debug, Clone, Deserialize)]
pub struct RespondInvitationRequest {
    pub status: InvitationStatus,
}

// ============================================================================
// Task Requests
// ============================================================================

/// Create task request
///
/// Status is deliberately NOT a field: new tasks always start at TODO.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    pub priority: TaskPriority,

    pub assignee_id: Option<Snowflake>,

    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
}

/// Update task request; any field may change, including status
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    /// Any of the three statuses; there is no transition table
    pub status: Option<TaskStatus>,

    pub priority: Option<TaskPriority>,

    /// Some(None) clears the assignee
    #[serde(default, with = "double_option")]
    pub assignee_id: Option<Option<Snowflake>>,

    #[serde(default, with = "double_option")]
    pub due_date: Option<Option<chrono::DateTime<chrono::Utc>>>,
}

/// Distinguishes "field absent" from "field set to null" for PATCH bodies
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

// ============================================================================
// Messaging Requests
// ============================================================================

/// Create conversation request
///
/// DIRECT needs `peer_id`; GROUP needs `title` and `member_ids`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateConversationRequest {
    pub kind: ConversationKind,

    pub peer_id: Option<Snowflake>,

    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: Option<String>,

    #[serde(default)]
    pub member_ids: Vec<Snowflake>,
}

/// Send message request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 4000, message = "Message must be 1-4000 characters"))]
    pub content: String,
}

/// Update per-member conversation flags
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateConversationRequest {
    pub is_pinned: Option<bool>,
    pub is_archived: Option<bool>,
}

// ============================================================================
// Analytics Requests
// ============================================================================

/// Record an analytics event
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordEventRequest {
    #[validate(length(min = 1, max = 100, message = "Kind must be 1-100 characters"))]
    pub kind: String,

    pub project_id: Option<Snowflake>,

    #[serde(default)]
    pub data: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_create_task_request_has_no_status_field() {
        // A payload smuggling a status must still deserialize (unknown fields
        // are ignored) and the parsed request carries no status at all.
        let request: CreateTaskRequest = serde_json::from_str(
            r#"{"title": "ship", "priority": "HIGH", "status": "DONE"}"#,
        )
        .unwrap();
        assert_eq!(request.title, "ship");
        assert_eq!(request.priority, TaskPriority::High);
    }

    #[test]
    fn test_update_task_distinguishes_absent_from_null() {
        let request: UpdateTaskRequest =
            serde_json::from_str(r#"{"assignee_id": null}"#).unwrap();
        assert_eq!(request.assignee_id, Some(None));
        assert_eq!(request.due_date, None);
    }

    #[test]
    fn test_register_request_validation() {
        let request = RegisterRequest {
            username: "a".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }
}
