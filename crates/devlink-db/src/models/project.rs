//! Project, member, and invitation database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the projects table
#[derive(Debug, Clone, FromRow)]
pub struct ProjectModel {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub github_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for the project_members table
#[derive(Debug, Clone, FromRow)]
pub struct ProjectMemberModel {
    pub project_id: i64,
    pub user_id: i64,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

/// Database model for the project_invitations table
#[derive(Debug, Clone, FromRow)]
pub struct ProjectInvitationModel {
    pub id: i64,
    pub project_id: i64,
    pub inviter_id: i64,
    pub developer_id: i64,
    pub role: String,
    pub status: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
