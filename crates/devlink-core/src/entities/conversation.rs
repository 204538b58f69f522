//! Conversation entities - direct and group messaging

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Kind of conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversationKind {
    Direct,
    Group,
}

impl ConversationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "DIRECT",
            Self::Group => "GROUP",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DIRECT" => Some(Self::Direct),
            "GROUP" => Some(Self::Group),
            _ => None,
        }
    }
}

/// Conversation between two (DIRECT) or more (GROUP) users
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: Snowflake,
    pub kind: ConversationKind,
    /// Only meaningful for GROUP conversations
    pub title: Option<String>,
    pub creator_id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn direct(id: Snowflake, creator_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            kind: ConversationKind::Direct,
            title: None,
            creator_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn group(id: Snowflake, creator_id: Snowflake, title: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            kind: ConversationKind::Group,
            title: Some(title),
            creator_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Per-user conversation state (pin, archive, read cursor)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationMember {
    pub conversation_id: Snowflake,
    pub user_id: Snowflake,
    pub is_pinned: bool,
    pub is_archived: bool,
    pub last_read_at: Option<DateTime<Utc>>,
    pub joined_at: DateTime<Utc>,
}

impl ConversationMember {
    pub fn new(conversation_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            conversation_id,
            user_id,
            is_pinned: false,
            is_archived: false,
            last_read_at: None,
            joined_at: Utc::now(),
        }
    }
}

/// Message within a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub conversation_id: Snowflake,
    pub sender_id: Snowflake,
    pub content: String,
    /// Flipped by the read-receipt pass of another member
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Message {
    pub fn new(id: Snowflake, conversation_id: Snowflake, sender_id: Snowflake, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            conversation_id,
            sender_id,
            content,
            is_read: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_conversation_has_no_title() {
        let conv = Conversation::direct(Snowflake::new(1), Snowflake::new(10));
        assert_eq!(conv.kind, ConversationKind::Direct);
        assert!(conv.title.is_none());
    }

    #[test]
    fn test_group_conversation_carries_title() {
        let conv = Conversation::group(Snowflake::new(1), Snowflake::new(10), "team".to_string());
        assert_eq!(conv.kind, ConversationKind::Group);
        assert_eq!(conv.title.as_deref(), Some("team"));
    }

    #[test]
    fn test_new_member_defaults() {
        let member = ConversationMember::new(Snowflake::new(1), Snowflake::new(10));
        assert!(!member.is_pinned);
        assert!(!member.is_archived);
        assert!(member.last_read_at.is_none());
    }

    #[test]
    fn test_new_message_is_unread() {
        let msg = Message::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(10),
            "hi".to_string(),
        );
        assert!(!msg.is_read);
    }
}
