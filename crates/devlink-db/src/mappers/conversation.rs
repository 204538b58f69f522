//! Conversation, member, and message model mappers

use devlink_core::entities::{Conversation, ConversationKind, ConversationMember, Message};
use devlink_core::Snowflake;

use crate::models::{ConversationMemberModel, ConversationModel, MessageModel};

impl From<ConversationModel> for Conversation {
    fn from(model: ConversationModel) -> Self {
        Conversation {
            id: Snowflake::new(model.id),
            kind: ConversationKind::parse(&model.kind).unwrap_or(ConversationKind::Direct),
            title: model.title,
            creator_id: Snowflake::new(model.creator_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ConversationMemberModel> for ConversationMember {
    fn from(model: ConversationMemberModel) -> Self {
        ConversationMember {
            conversation_id: Snowflake::new(model.conversation_id),
            user_id: Snowflake::new(model.user_id),
            is_pinned: model.is_pinned,
            is_archived: model.is_archived,
            last_read_at: model.last_read_at,
            joined_at: model.joined_at,
        }
    }
}

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: Snowflake::new(model.id),
            conversation_id: Snowflake::new(model.conversation_id),
            sender_id: Snowflake::new(model.sender_id),
            content: model.content,
            is_read: model.is_read,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
