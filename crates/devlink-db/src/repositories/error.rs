//! Error handling utilities for repositories

use devlink_core::error::DomainError;
use devlink_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "user not found" error
pub fn user_not_found(id: Snowflake) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Create a "post not found" error
pub fn post_not_found(id: Snowflake) -> DomainError {
    DomainError::PostNotFound(id)
}

/// Create a "comment not found" error
pub fn comment_not_found(id: Snowflake) -> DomainError {
    DomainError::CommentNotFound(id)
}

/// Create a "project not found" error
pub fn project_not_found(id: Snowflake) -> DomainError {
    DomainError::ProjectNotFound(id)
}

/// Create a "task not found" error
pub fn task_not_found(id: Snowflake) -> DomainError {
    DomainError::TaskNotFound(id)
}

/// Create a "connection not found" error
pub fn connection_not_found(id: Snowflake) -> DomainError {
    DomainError::ConnectionNotFound(id)
}

/// Create an "invitation not found" error
pub fn invitation_not_found(id: Snowflake) -> DomainError {
    DomainError::InvitationNotFound(id)
}

/// Create a "notification not found" error
pub fn notification_not_found(id: Snowflake) -> DomainError {
    DomainError::NotificationNotFound(id)
}

/// Create a "member not found" error
pub fn member_not_found() -> DomainError {
    DomainError::MemberNotFound
}
