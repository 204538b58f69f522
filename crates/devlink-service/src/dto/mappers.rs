//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.
//! Responses that join several entities (posts with authors, tasks with
//! assignees) are assembled in the services instead.

use devlink_core::entities::{
    Comment, Message, Notification, Project, Skill, Task, User,
};

use super::responses::{
    CommentResponse, CurrentUserResponse, MessageResponse, NotificationResponse, ProfileResponse,
    SkillResponse, TaskResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            avatar_url: user.avatar_url.clone(),
            role: user.role.clone(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            bio: user.bio.clone(),
            avatar_url: user.avatar_url.clone(),
            role: user.role.clone(),
            location: user.location.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

/// Build a full profile response from a user and their skills
pub fn profile_response(user: &User, skills: &[Skill]) -> ProfileResponse {
    ProfileResponse {
        id: user.id.to_string(),
        username: user.username.clone(),
        bio: user.bio.clone(),
        avatar_url: user.avatar_url.clone(),
        role: user.role.clone(),
        location: user.location.clone(),
        website_url: user.website_url.clone(),
        github_url: user.github_url.clone(),
        twitter_url: user.twitter_url.clone(),
        skills: skills.iter().map(SkillResponse::from).collect(),
        created_at: user.created_at,
    }
}

impl From<&Skill> for SkillResponse {
    fn from(skill: &Skill) -> Self {
        Self {
            id: skill.id.to_string(),
            name: skill.name.clone(),
            level: skill.level,
        }
    }
}

// ============================================================================
// Post Mappers
// ============================================================================

/// Build a comment response with its author summary
pub fn comment_response(comment: &Comment, author: &User) -> CommentResponse {
    CommentResponse {
        id: comment.id.to_string(),
        post_id: comment.post_id.to_string(),
        author: UserResponse::from(author),
        parent_id: comment.parent_id.map(|id| id.to_string()),
        content: comment.content.clone(),
        created_at: comment.created_at,
    }
}

// ============================================================================
// Task Mappers
// ============================================================================

/// Build a task response, resolving the assignee summary when present
pub fn task_response(task: &Task, assignee: Option<&User>) -> TaskResponse {
    TaskResponse {
        id: task.id.to_string(),
        project_id: task.project_id.to_string(),
        title: task.title.clone(),
        description: task.description.clone(),
        status: task.status,
        priority: task.priority,
        assignee: assignee.map(UserResponse::from),
        due_date: task.due_date,
        created_at: task.created_at,
        updated_at: task.updated_at,
    }
}

// ============================================================================
// Messaging Mappers
// ============================================================================

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.to_string(),
            conversation_id: message.conversation_id.to_string(),
            sender_id: message.sender_id.to_string(),
            content: message.content.clone(),
            is_read: message.is_read,
            created_at: message.created_at,
        }
    }
}

// ============================================================================
// Notification Mappers
// ============================================================================

impl From<&Notification> for NotificationResponse {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id.to_string(),
            kind: notification.kind.as_str().to_string(),
            title: notification.title.clone(),
            body: notification.body.clone(),
            data: notification.data.clone(),
            is_read: notification.is_read,
            created_at: notification.created_at,
        }
    }
}

// ============================================================================
// Project Summary Mapper
// ============================================================================

/// Build a lightweight project summary for search results
pub fn project_summary(project: &Project, owner: &User) -> super::responses::ProjectSummaryResponse {
    super::responses::ProjectSummaryResponse {
        id: project.id.to_string(),
        name: project.name.clone(),
        description: project.description.clone(),
        owner: UserResponse::from(owner),
        updated_at: project.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devlink_core::entities::{SkillLevel, TaskPriority};
    use devlink_core::Snowflake;

    fn test_user(id: i64, username: &str) -> User {
        User::new(Snowflake::new(id), username.to_string(), format!("{username}@example.com"))
    }

    #[test]
    fn test_user_response_hides_email() {
        let user = test_user(1, "alice");
        let response = UserResponse::from(&user);
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("@example.com"));
    }

    #[test]
    fn test_current_user_response_includes_email() {
        let user = test_user(1, "alice");
        let response = CurrentUserResponse::from(&user);
        assert_eq!(response.email, "alice@example.com");
    }

    #[test]
    fn test_profile_response_carries_skills() {
        let user = test_user(1, "alice");
        let skills = vec![Skill::new(
            Snowflake::new(10),
            user.id,
            "Rust".to_string(),
            SkillLevel::Primary,
        )];
        let profile = profile_response(&user, &skills);
        assert_eq!(profile.skills.len(), 1);
        assert_eq!(profile.skills[0].name, "Rust");
    }

    #[test]
    fn test_task_response_ids_are_strings() {
        let task = Task::new(
            Snowflake::new(5),
            Snowflake::new(7),
            "ship".to_string(),
            TaskPriority::Low,
        );
        let response = task_response(&task, None);
        assert_eq!(response.id, "5");
        assert_eq!(response.project_id, "7");
        assert!(response.assignee.is_none());
    }
}
