//! User and skill database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub website_url: Option<String>,
    pub github_url: Option<String>,
    pub twitter_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for the skills table
#[derive(Debug, Clone, FromRow)]
pub struct SkillModel {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub level: String,
    pub created_at: DateTime<Utc>,
}
