//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::entities::{
    AnalyticsEvent, Comment, Connection, ConnectionStatus, Conversation, ConversationMember, Like,
    MemberRole, Message, Notification, Post, Project, ProjectInvitation, ProjectMember, Skill,
    Task, User,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Offset pagination window
///
/// `page` is 1-based at the API boundary; repositories receive the resolved
/// limit/offset pair.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Build a window from a 1-based page number and page size
    pub fn new(page: i64, limit: i64) -> Self {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);
        Self {
            limit,
            offset: (page - 1) * limit,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1, 20)
    }
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Check if username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update an existing user's profile fields
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// List all skills for a user
    async fn skills(&self, user_id: Snowflake) -> RepoResult<Vec<Skill>>;

    /// Find a skill by case-insensitive name for the uniqueness check
    async fn find_skill_by_name(&self, user_id: Snowflake, name: &str) -> RepoResult<Option<Skill>>;

    /// Find a skill by ID
    async fn find_skill(&self, id: Snowflake) -> RepoResult<Option<Skill>>;

    /// Add a skill to a user
    async fn add_skill(&self, skill: &Skill) -> RepoResult<()>;

    /// Update an existing skill
    async fn update_skill(&self, skill: &Skill) -> RepoResult<()>;

    /// Remove a skill
    async fn delete_skill(&self, id: Snowflake) -> RepoResult<()>;

    /// Search users by username, bio, or headline
    async fn search(&self, query: &str, page: Page) -> RepoResult<Vec<User>>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>>;

    /// List recent posts across all authors, newest first
    async fn feed(&self, page: Page) -> RepoResult<Vec<Post>>;

    /// List posts by one author, newest first
    async fn find_by_author(&self, author_id: Snowflake, page: Page) -> RepoResult<Vec<Post>>;

    /// Create a new post
    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// Update post content fields
    async fn update(&self, post: &Post) -> RepoResult<()>;

    /// Delete a post (cascades to comments and likes)
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Find a comment by ID
    async fn find_comment(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// List comments on a post, oldest first
    async fn comments_for_post(&self, post_id: Snowflake) -> RepoResult<Vec<Comment>>;

    /// Create a comment
    async fn create_comment(&self, comment: &Comment) -> RepoResult<()>;

    /// Delete a comment
    async fn delete_comment(&self, id: Snowflake) -> RepoResult<()>;

    /// Number of comments on a post
    async fn comment_count(&self, post_id: Snowflake) -> RepoResult<i64>;

    /// Find a like by (post, user) pair
    async fn find_like(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Like>>;

    /// Create a like
    async fn create_like(&self, like: &Like) -> RepoResult<()>;

    /// Delete a like
    async fn delete_like(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<()>;

    /// Number of likes on a post
    async fn like_count(&self, post_id: Snowflake) -> RepoResult<i64>;

    /// Search posts by content
    async fn search(&self, query: &str, page: Page) -> RepoResult<Vec<Post>>;
}

// ============================================================================
// Project Repository
// ============================================================================

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Find project by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Project>>;

    /// List projects where the user is owner or member, most recently updated first
    async fn find_for_user(&self, user_id: Snowflake, page: Page) -> RepoResult<Vec<Project>>;

    /// Count projects where the user is owner or member
    async fn count_for_user(&self, user_id: Snowflake) -> RepoResult<i64>;

    /// Create a new project
    async fn create(&self, project: &Project) -> RepoResult<()>;

    /// Update project fields
    async fn update(&self, project: &Project) -> RepoResult<()>;

    /// Delete a project (cascades to members, invitations, tasks)
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Bump the project's updated_at so recency ordering reflects activity
    async fn touch(&self, id: Snowflake) -> RepoResult<()>;

    /// Find a member row
    async fn find_member(
        &self,
        project_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<ProjectMember>>;

    /// List members of a project, oldest first, up to `limit` (all when None)
    async fn members_of(
        &self,
        project_id: Snowflake,
        limit: Option<i64>,
    ) -> RepoResult<Vec<ProjectMember>>;

    /// Number of members (excluding the owner, who has no member row)
    async fn member_count(&self, project_id: Snowflake) -> RepoResult<i64>;

    /// Add a member
    async fn add_member(&self, member: &ProjectMember) -> RepoResult<()>;

    /// Change a member's role
    async fn update_member_role(
        &self,
        project_id: Snowflake,
        user_id: Snowflake,
        role: MemberRole,
    ) -> RepoResult<()>;

    /// Remove a member
    async fn remove_member(&self, project_id: Snowflake, user_id: Snowflake) -> RepoResult<()>;

    /// Create an invitation
    async fn create_invitation(&self, invitation: &ProjectInvitation) -> RepoResult<()>;

    /// Find an invitation by ID
    async fn find_invitation(&self, id: Snowflake) -> RepoResult<Option<ProjectInvitation>>;

    /// List invitations addressed to a developer, newest first
    async fn invitations_for_user(
        &self,
        developer_id: Snowflake,
    ) -> RepoResult<Vec<ProjectInvitation>>;

    /// Check for an existing pending invitation to the same developer
    async fn pending_invitation_exists(
        &self,
        project_id: Snowflake,
        developer_id: Snowflake,
    ) -> RepoResult<bool>;

    /// Update an invitation's status
    async fn update_invitation(&self, invitation: &ProjectInvitation) -> RepoResult<()>;

    /// Search projects by name or description
    async fn search(&self, query: &str, page: Page) -> RepoResult<Vec<Project>>;
}

// ============================================================================
// Task Repository
// ============================================================================

#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Find task by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Task>>;

    /// List all tasks of a project (no pagination; the board groups client-side)
    async fn find_by_project(&self, project_id: Snowflake) -> RepoResult<Vec<Task>>;

    /// Create a new task
    async fn create(&self, task: &Task) -> RepoResult<()>;

    /// Update task fields
    async fn update(&self, task: &Task) -> RepoResult<()>;

    /// Delete a task
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Connection Repository
// ============================================================================

#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// Find connection by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Connection>>;

    /// Find the exact ordered (requester, receiver) pair, any status
    async fn find_pair(
        &self,
        requester_id: Snowflake,
        receiver_id: Snowflake,
    ) -> RepoResult<Option<Connection>>;

    /// List accepted connections involving the user
    async fn accepted_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<Connection>>;

    /// List incoming pending requests for the user
    async fn pending_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<Connection>>;

    /// Create a connection request
    async fn create(&self, connection: &Connection) -> RepoResult<()>;

    /// Update a connection's status
    async fn update_status(&self, id: Snowflake, status: ConnectionStatus) -> RepoResult<()>;

    /// Delete a connection
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Conversation Repository
// ============================================================================

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Find conversation by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Conversation>>;

    /// Find an existing DIRECT conversation between two users
    async fn find_direct_between(
        &self,
        user_a: Snowflake,
        user_b: Snowflake,
    ) -> RepoResult<Option<Conversation>>;

    /// List conversations the user belongs to, most recent activity first
    async fn list_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<Conversation>>;

    /// Create a conversation with its initial members
    async fn create(
        &self,
        conversation: &Conversation,
        members: &[ConversationMember],
    ) -> RepoResult<()>;

    /// Bump the conversation's updated_at
    async fn touch(&self, id: Snowflake) -> RepoResult<()>;

    /// List members of a conversation
    async fn members_of(&self, conversation_id: Snowflake) -> RepoResult<Vec<ConversationMember>>;

    /// Find a member row
    async fn find_member(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<ConversationMember>>;

    /// Update a member's pin/archive flags
    async fn update_member_flags(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
        is_pinned: bool,
        is_archived: bool,
    ) -> RepoResult<()>;

    /// Create a message
    async fn create_message(&self, message: &Message) -> RepoResult<()>;

    /// List messages, newest first
    async fn messages_for(&self, conversation_id: Snowflake, page: Page) -> RepoResult<Vec<Message>>;

    /// Most recent message in a conversation
    async fn last_message(&self, conversation_id: Snowflake) -> RepoResult<Option<Message>>;

    /// Messages from other senders not yet read by this user
    async fn unread_count(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<i64>;

    /// Read-receipt pass: mark others' messages read and stamp last_read_at.
    /// Returns the number of messages flipped.
    async fn mark_read(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
        read_at: DateTime<Utc>,
    ) -> RepoResult<u64>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Find notification by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>>;

    /// Create a notification
    async fn create(&self, notification: &Notification) -> RepoResult<()>;

    /// List notifications for a user, newest first
    async fn list_for_user(&self, user_id: Snowflake, page: Page) -> RepoResult<Vec<Notification>>;

    /// Number of unread notifications
    async fn unread_count(&self, user_id: Snowflake) -> RepoResult<i64>;

    /// Mark one notification read
    async fn mark_read(&self, id: Snowflake) -> RepoResult<()>;

    /// Mark all of a user's notifications read; returns the number flipped
    async fn mark_all_read(&self, user_id: Snowflake) -> RepoResult<u64>;
}

// ============================================================================
// Analytics Repository
// ============================================================================

/// Event count per kind tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindCount {
    pub kind: String,
    pub count: i64,
}

/// Event count per calendar day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCount {
    pub day: NaiveDate,
    pub count: i64,
}

#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Append an event row
    async fn create(&self, event: &AnalyticsEvent) -> RepoResult<()>;

    /// Total events for a user since the given instant
    async fn count_since(&self, user_id: Snowflake, since: DateTime<Utc>) -> RepoResult<i64>;

    /// Event counts grouped by kind since the given instant
    async fn counts_by_kind(
        &self,
        user_id: Snowflake,
        since: DateTime<Utc>,
    ) -> RepoResult<Vec<KindCount>>;

    /// Event counts grouped by day since the given instant
    async fn daily_counts(
        &self,
        user_id: Snowflake,
        since: DateTime<Utc>,
    ) -> RepoResult<Vec<DailyCount>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_from_one_based() {
        let page = Page::new(1, 20);
        assert_eq!(page.limit, 20);
        assert_eq!(page.offset, 0);

        let page = Page::new(3, 10);
        assert_eq!(page.offset, 20);
    }

    #[test]
    fn test_page_clamps_inputs() {
        let page = Page::new(0, 500);
        assert_eq!(page.limit, 100);
        assert_eq!(page.offset, 0);

        let page = Page::new(-2, 0);
        assert_eq!(page.limit, 1);
        assert_eq!(page.offset, 0);
    }
}
