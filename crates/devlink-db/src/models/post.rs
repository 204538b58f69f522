//! Post, comment, and like database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the posts table
///
/// `media_urls` is stored as a JSONB array of strings.
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub author_id: i64,
    pub kind: String,
    pub content: String,
    pub code_snippet: Option<String>,
    pub language: Option<String>,
    pub media_urls: serde_json::Value,
    pub is_edited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for the comments table
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub parent_id: Option<i64>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for the likes table
#[derive(Debug, Clone, FromRow)]
pub struct LikeModel {
    pub post_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}
