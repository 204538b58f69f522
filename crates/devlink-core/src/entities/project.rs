//! Project entity - a collaboration space with members, invitations, and tasks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Project owned by one user
///
/// The owner is tracked on the project row and is never a `ProjectMember`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: Snowflake,
    pub owner_id: Snowflake,
    pub name: String,
    pub description: Option<String>,
    pub github_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a new Project
    pub fn new(id: Snowflake, owner_id: Snowflake, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner_id,
            name,
            description: None,
            github_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if a user is the project owner
    #[inline]
    pub fn is_owner(&self, user_id: Snowflake) -> bool {
        self.owner_id == user_id
    }
}

/// Role of a project member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    Admin,
    Member,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Member => "MEMBER",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ADMIN" => Some(Self::Admin),
            "MEMBER" => Some(Self::Member),
            _ => None,
        }
    }
}

/// Project membership (junction between User and Project)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMember {
    pub project_id: Snowflake,
    pub user_id: Snowflake,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

impl ProjectMember {
    pub fn new(project_id: Snowflake, user_id: Snowflake, role: MemberRole) -> Self {
        Self {
            project_id,
            user_id,
            role,
            joined_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == MemberRole::Admin
    }
}

/// Developer specialization requested by an invitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeveloperRole {
    Frontend,
    Backend,
    Fullstack,
    Designer,
    Devops,
    Mobile,
    Tester,
}

impl DeveloperRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Frontend => "FRONTEND",
            Self::Backend => "BACKEND",
            Self::Fullstack => "FULLSTACK",
            Self::Designer => "DESIGNER",
            Self::Devops => "DEVOPS",
            Self::Mobile => "MOBILE",
            Self::Tester => "TESTER",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "FRONTEND" => Some(Self::Frontend),
            "BACKEND" => Some(Self::Backend),
            "FULLSTACK" => Some(Self::Fullstack),
            "DESIGNER" => Some(Self::Designer),
            "DEVOPS" => Some(Self::Devops),
            "MOBILE" => Some(Self::Mobile),
            "TESTER" => Some(Self::Tester),
            _ => None,
        }
    }
}

/// Lifecycle state of an invitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Declined => "DECLINED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Self::Pending),
            "ACCEPTED" => Some(Self::Accepted),
            "DECLINED" => Some(Self::Declined),
            _ => None,
        }
    }
}

/// Invitation for a developer to join a project
///
/// Accepting creates a MEMBER-role `ProjectMember` row as a side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInvitation {
    pub id: Snowflake,
    pub project_id: Snowflake,
    pub inviter_id: Snowflake,
    pub developer_id: Snowflake,
    pub role: DeveloperRole,
    pub status: InvitationStatus,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectInvitation {
    pub fn new(
        id: Snowflake,
        project_id: Snowflake,
        inviter_id: Snowflake,
        developer_id: Snowflake,
        role: DeveloperRole,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            project_id,
            inviter_id,
            developer_id,
            role,
            status: InvitationStatus::Pending,
            message: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_message(mut self, message: String) -> Self {
        self.message = Some(message);
        self
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == InvitationStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_ownership() {
        let project = Project::new(Snowflake::new(1), Snowflake::new(100), "api".to_string());
        assert!(project.is_owner(Snowflake::new(100)));
        assert!(!project.is_owner(Snowflake::new(200)));
    }

    #[test]
    fn test_member_role_roundtrip() {
        assert_eq!(MemberRole::parse("ADMIN"), Some(MemberRole::Admin));
        assert_eq!(MemberRole::parse("MEMBER"), Some(MemberRole::Member));
        assert_eq!(MemberRole::parse("OWNER"), None);
    }

    #[test]
    fn test_developer_role_roundtrip() {
        for role in [
            DeveloperRole::Frontend,
            DeveloperRole::Backend,
            DeveloperRole::Fullstack,
            DeveloperRole::Designer,
            DeveloperRole::Devops,
            DeveloperRole::Mobile,
            DeveloperRole::Tester,
        ] {
            assert_eq!(DeveloperRole::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_invitation_starts_pending() {
        let invitation = ProjectInvitation::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(100),
            Snowflake::new(200),
            DeveloperRole::Backend,
        );
        assert!(invitation.is_pending());
        assert!(invitation.message.is_none());
    }
}
