//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, NaiveDate, Utc};
use devlink_core::entities::{
    ConnectionStatus, ConversationKind, DeveloperRole, InvitationStatus, MemberRole, PostKind,
    SkillLevel, TaskPriority, TaskStatus,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Common Response Types
// ============================================================================

/// Paginated response with page/limit pagination
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, page: i64, limit: i64, total: Option<i64>) -> Self {
        let has_more = match total {
            Some(total) => page * limit < total,
            None => data.len() as i64 == limit,
        };
        Self {
            data,
            pagination: PaginationMeta {
                page,
                limit,
                total,
                has_more,
            },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// 1-based page number
    pub page: i64,
    /// Page size used
    pub limit: i64,
    /// Total row count when the query computes it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    /// Whether more results exist
    pub has_more: bool,
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: CurrentUserResponse,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Public user summary (embedded in posts, members, connections, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Current authenticated user response (includes email)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Full public profile with skills
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_url: Option<String>,
    pub skills: Vec<SkillResponse>,
    pub created_at: DateTime<Utc>,
}

/// Skill response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillResponse {
    pub id: String,
    pub name: String,
    pub level: SkillLevel,
}

// ============================================================================
// Post Responses
// ============================================================================

/// Post with author summary and engagement counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub author: UserResponse,
    pub kind: PostKind,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub media_urls: Vec<String>,
    pub is_edited: bool,
    pub like_count: i64,
    pub comment_count: i64,
    /// Whether the requesting user has liked this post
    pub liked_by_me: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author: UserResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Result of a like toggle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeStateResponse {
    pub post_id: String,
    /// True when the toggle resulted in a like, false when it removed one
    pub liked: bool,
    pub like_count: i64,
}

// ============================================================================
// Connection Responses
// ============================================================================

/// Connection with the peer's summary from the caller's point of view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionResponse {
    pub id: String,
    pub peer: UserResponse,
    pub status: ConnectionStatus,
    /// True when the requesting user initiated this connection
    pub requested_by_me: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Project Responses
// ============================================================================

/// Project with owner, member previews, and the full task list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    pub owner: UserResponse,
    /// Up to 5 members in list views; all members in detail views
    pub members: Vec<MemberResponse>,
    pub member_count: i64,
    pub tasks: Vec<TaskResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Project member with user summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberResponse {
    pub user: UserResponse,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

/// Project invitation with a project summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationResponse {
    pub id: String,
    pub project_id: String,
    pub project_name: String,
    pub inviter: UserResponse,
    pub role: DeveloperRole,
    pub status: InvitationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Task Responses
// ============================================================================

/// Task response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: String,
    pub project_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<UserResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Flat task list plus the derived board grouping
///
/// The grouping is a view over `tasks`, recomputed on every read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskBoardResponse {
    pub tasks: Vec<TaskResponse>,
    pub board: BoardLanes,
}

/// Tasks grouped into the three Kanban lanes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardLanes {
    pub todo: Vec<TaskResponse>,
    pub in_progress: Vec<TaskResponse>,
    pub done: Vec<TaskResponse>,
}

// ============================================================================
// Messaging Responses
// ============================================================================

/// Conversation with the caller's member flags and unread state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationResponse {
    pub id: String,
    pub kind: ConversationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub members: Vec<UserResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message: Option<MessageResponse>,
    pub unread_count: i64,
    pub is_pinned: bool,
    pub is_archived: bool,
    pub updated_at: DateTime<Utc>,
}

/// Message response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Notification Responses
// ============================================================================

/// Notification response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub data: serde_json::Value,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Notification page with the total unread count
#[derive(Debug, Serialize, Deserialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationResponse>,
    pub unread_count: i64,
}

// ============================================================================
// Search Responses
// ============================================================================

/// Search results; only the requested kinds are populated
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<UserResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<Vec<PostResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<ProjectSummaryResponse>>,
}

/// Lightweight project summary for search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummaryResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner: UserResponse,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Analytics Responses
// ============================================================================

/// Analytics summary computed on read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSummaryResponse {
    /// Window size in days
    pub days: i64,
    pub total_events: i64,
    pub by_kind: Vec<KindCountResponse>,
    pub daily: Vec<DailyCountResponse>,
    pub weekly: Vec<WeeklyCountResponse>,
}

/// Event count per kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KindCountResponse {
    pub kind: String,
    pub count: i64,
}

/// Event count per day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyCountResponse {
    pub day: NaiveDate,
    pub count: i64,
}

/// Event count per ISO week, rolled up from the daily buckets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyCountResponse {
    /// Monday of the ISO week
    pub week_start: NaiveDate,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginated_has_more_with_total() {
        let response = PaginatedResponse::new(vec![1, 2, 3], 1, 3, Some(7));
        assert!(response.pagination.has_more);

        let response = PaginatedResponse::new(vec![7], 3, 3, Some(7));
        assert!(!response.pagination.has_more);
    }

    #[test]
    fn test_paginated_has_more_without_total() {
        // A full page suggests more rows; a short page means the end
        let response = PaginatedResponse::new(vec![1, 2, 3], 1, 3, None);
        assert!(response.pagination.has_more);

        let response = PaginatedResponse::new(vec![1], 1, 3, None);
        assert!(!response.pagination.has_more);
    }
}
