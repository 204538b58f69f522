//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Post not found: {0}")]
    PostNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("Project not found: {0}")]
    ProjectNotFound(Snowflake),

    #[error("Task not found: {0}")]
    TaskNotFound(Snowflake),

    #[error("Connection not found: {0}")]
    ConnectionNotFound(Snowflake),

    #[error("Conversation not found: {0}")]
    ConversationNotFound(Snowflake),

    #[error("Invitation not found: {0}")]
    InvitationNotFound(Snowflake),

    #[error("Notification not found: {0}")]
    NotificationNotFound(Snowflake),

    #[error("Member not found in project")]
    MemberNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Cannot send a connection request to yourself")]
    SelfConnection,

    #[error("Project owner cannot be removed or demoted")]
    OwnerImmutable,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not project owner")]
    NotProjectOwner,

    #[error("Not the author of this content")]
    NotAuthor,

    #[error("Missing required role: {0}")]
    MissingRole(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Username already in use")]
    UsernameAlreadyExists,

    #[error("Skill already exists: {0}")]
    DuplicateSkill(String),

    #[error("Connection request already exists")]
    ConnectionAlreadyExists,

    #[error("A connection request from this user already exists")]
    ReverseConnectionExists,

    #[error("Already a member of this project")]
    AlreadyMember,

    #[error("A pending invitation for this developer already exists")]
    DuplicateInvitation,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::ProjectNotFound(_) => "UNKNOWN_PROJECT",
            Self::TaskNotFound(_) => "UNKNOWN_TASK",
            Self::ConnectionNotFound(_) => "UNKNOWN_CONNECTION",
            Self::ConversationNotFound(_) => "UNKNOWN_CONVERSATION",
            Self::InvitationNotFound(_) => "UNKNOWN_INVITATION",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",
            Self::MemberNotFound => "UNKNOWN_MEMBER",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::SelfConnection => "SELF_CONNECTION",
            Self::OwnerImmutable => "OWNER_IMMUTABLE",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Authorization
            Self::NotProjectOwner => "NOT_PROJECT_OWNER",
            Self::NotAuthor => "NOT_AUTHOR",
            Self::MissingRole(_) => "MISSING_ROLE",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::DuplicateSkill(_) => "DUPLICATE_SKILL",
            Self::ConnectionAlreadyExists => "CONNECTION_ALREADY_EXISTS",
            Self::ReverseConnectionExists => "REVERSE_CONNECTION_EXISTS",
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::DuplicateInvitation => "DUPLICATE_INVITATION",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::PostNotFound(_)
                | Self::CommentNotFound(_)
                | Self::ProjectNotFound(_)
                | Self::TaskNotFound(_)
                | Self::ConnectionNotFound(_)
                | Self::ConversationNotFound(_)
                | Self::InvitationNotFound(_)
                | Self::NotificationNotFound(_)
                | Self::MemberNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::SelfConnection
                | Self::OwnerImmutable
                | Self::ContentTooLong { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotProjectOwner | Self::NotAuthor | Self::MissingRole(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::UsernameAlreadyExists
                | Self::DuplicateSkill(_)
                | Self::ConnectionAlreadyExists
                | Self::ReverseConnectionExists
                | Self::AlreadyMember
                | Self::DuplicateInvitation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::UserNotFound(Snowflake::new(1));
        assert_eq!(err.code(), "UNKNOWN_USER");

        let err = DomainError::DuplicateSkill("React".to_string());
        assert_eq!(err.code(), "DUPLICATE_SKILL");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::ProjectNotFound(Snowflake::new(1)).is_not_found());
        assert!(DomainError::TaskNotFound(Snowflake::new(1)).is_not_found());
        assert!(!DomainError::EmailAlreadyExists.is_not_found());
    }

    #[test]
    fn test_is_authorization() {
        assert!(DomainError::NotProjectOwner.is_authorization());
        assert!(DomainError::NotAuthor.is_authorization());
        assert!(!DomainError::UserNotFound(Snowflake::new(1)).is_authorization());
    }

    #[test]
    fn test_connection_conflicts_are_distinct() {
        let forward = DomainError::ConnectionAlreadyExists;
        let reverse = DomainError::ReverseConnectionExists;
        assert!(forward.is_conflict());
        assert!(reverse.is_conflict());
        assert_ne!(forward.code(), reverse.code());
    }

    #[test]
    fn test_owner_immutable_is_validation() {
        assert!(DomainError::OwnerImmutable.is_validation());
        assert!(!DomainError::OwnerImmutable.is_authorization());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::UserNotFound(Snowflake::new(123));
        assert_eq!(err.to_string(), "User not found: 123");

        let err = DomainError::ContentTooLong { max: 5000 };
        assert_eq!(err.to_string(), "Content too long: max 5000 characters");
    }
}
