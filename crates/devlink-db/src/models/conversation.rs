//! Conversation, member, and message database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the conversations table
#[derive(Debug, Clone, FromRow)]
pub struct ConversationModel {
    pub id: i64,
    pub kind: String,
    pub title: Option<String>,
    pub creator_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for the conversation_members table
#[derive(Debug, Clone, FromRow)]
pub struct ConversationMemberModel {
    pub conversation_id: i64,
    pub user_id: i64,
    pub is_pinned: bool,
    pub is_archived: bool,
    pub last_read_at: Option<DateTime<Utc>>,
    pub joined_at: DateTime<Utc>,
}

/// Database model for the messages table
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub conversation_id: i64,
    pub sender_id: i64,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
