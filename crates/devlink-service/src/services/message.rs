//! Message service
//!
//! Direct and group conversations, messages, read receipts, and per-member
//! pin/archive flags.

use chrono::Utc;
use devlink_core::entities::{Conversation, ConversationKind, ConversationMember, Message};
use devlink_core::traits::Page;
use devlink_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::requests::{
    CreateConversationRequest, SendMessageRequest, UpdateConversationRequest,
};
use crate::dto::responses::{
    ConversationResponse, MessageResponse, PaginatedResponse, UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a conversation.
    ///
    /// DIRECT conversations are deduplicated: if one already exists between
    /// the two users it is returned instead of creating a second.
    #[instrument(skip(self, request))]
    pub async fn create_conversation(
        &self,
        creator_id: Snowflake,
        request: CreateConversationRequest,
    ) -> ServiceResult<ConversationResponse> {
        match request.kind {
            ConversationKind::Direct => {
                let peer_id = request.peer_id.ok_or_else(|| {
                    ServiceError::validation("Direct conversations require a peer_id")
                })?;
                self.create_direct(creator_id, peer_id).await
            }
            ConversationKind::Group => {
                let title = request.title.ok_or_else(|| {
                    ServiceError::validation("Group conversations require a title")
                })?;
                self.create_group(creator_id, title, request.member_ids).await
            }
        }
    }

    async fn create_direct(
        &self,
        creator_id: Snowflake,
        peer_id: Snowflake,
    ) -> ServiceResult<ConversationResponse> {
        if creator_id == peer_id {
            return Err(ServiceError::validation(
                "Cannot start a conversation with yourself",
            ));
        }

        // Peer must exist
        self.ctx
            .user_repo()
            .find_by_id(peer_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", peer_id.to_string()))?;

        // Reuse the existing direct conversation when present
        if let Some(existing) = self
            .ctx
            .conversation_repo()
            .find_direct_between(creator_id, peer_id)
            .await?
        {
            return self.to_response(&existing, creator_id).await;
        }

        let conversation = Conversation::direct(self.ctx.generate_id(), creator_id);
        let members = vec![
            ConversationMember::new(conversation.id, creator_id),
            ConversationMember::new(conversation.id, peer_id),
        ];

        self.ctx
            .conversation_repo()
            .create(&conversation, &members)
            .await?;

        info!(conversation_id = %conversation.id, "Direct conversation created");

        self.to_response(&conversation, creator_id).await
    }

    async fn create_group(
        &self,
        creator_id: Snowflake,
        title: String,
        member_ids: Vec<Snowflake>,
    ) -> ServiceResult<ConversationResponse> {
        if member_ids.is_empty() {
            return Err(ServiceError::validation(
                "Group conversations require at least one other member",
            ));
        }

        for member_id in &member_ids {
            self.ctx
                .user_repo()
                .find_by_id(*member_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("User", member_id.to_string()))?;
        }

        let conversation = Conversation::group(self.ctx.generate_id(), creator_id, title);

        let mut members = vec![ConversationMember::new(conversation.id, creator_id)];
        for member_id in member_ids {
            if member_id != creator_id {
                members.push(ConversationMember::new(conversation.id, member_id));
            }
        }

        self.ctx
            .conversation_repo()
            .create(&conversation, &members)
            .await?;

        info!(
            conversation_id = %conversation.id,
            member_count = members.len(),
            "Group conversation created"
        );

        self.to_response(&conversation, creator_id).await
    }

    /// List the caller's conversations, most recent activity first
    #[instrument(skip(self))]
    pub async fn list_conversations(
        &self,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<ConversationResponse>> {
        let conversations = self.ctx.conversation_repo().list_for_user(user_id).await?;

        let mut responses = Vec::with_capacity(conversations.len());
        for conversation in &conversations {
            responses.push(self.to_response(conversation, user_id).await?);
        }

        Ok(responses)
    }

    /// Send a message; member-gated
    #[instrument(skip(self, request))]
    pub async fn send_message(
        &self,
        conversation_id: Snowflake,
        sender_id: Snowflake,
        request: SendMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        self.require_member(conversation_id, sender_id).await?;

        let message = Message::new(
            self.ctx.generate_id(),
            conversation_id,
            sender_id,
            request.content,
        );

        self.ctx.conversation_repo().create_message(&message).await?;
        // Bump recency so the conversation surfaces at the top of lists
        self.ctx.conversation_repo().touch(conversation_id).await?;

        info!(message_id = %message.id, conversation_id = %conversation_id, "Message sent");

        Ok(MessageResponse::from(&message))
    }

    /// List messages, newest first; member-gated
    #[instrument(skip(self))]
    pub async fn get_messages(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
        page: i64,
        limit: i64,
    ) -> ServiceResult<PaginatedResponse<MessageResponse>> {
        self.require_member(conversation_id, user_id).await?;

        let window = Page::new(page, limit);
        let messages = self
            .ctx
            .conversation_repo()
            .messages_for(conversation_id, window)
            .await?;

        let responses: Vec<MessageResponse> =
            messages.iter().map(MessageResponse::from).collect();

        Ok(PaginatedResponse::new(responses, page.max(1), window.limit, None))
    }

    /// Read-receipt pass: flip `is_read` on other senders' messages and stamp
    /// the caller's last_read_at. Returns the number of messages flipped.
    #[instrument(skip(self))]
    pub async fn mark_read(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<u64> {
        self.require_member(conversation_id, user_id).await?;

        let flipped = self
            .ctx
            .conversation_repo()
            .mark_read(conversation_id, user_id, Utc::now())
            .await?;

        info!(conversation_id = %conversation_id, flipped, "Conversation marked read");

        Ok(flipped)
    }

    /// Update the caller's pin/archive flags on a conversation
    #[instrument(skip(self, request))]
    pub async fn update_flags(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
        request: UpdateConversationRequest,
    ) -> ServiceResult<ConversationResponse> {
        let member = self.require_member(conversation_id, user_id).await?;

        let is_pinned = request.is_pinned.unwrap_or(member.is_pinned);
        let is_archived = request.is_archived.unwrap_or(member.is_archived);

        self.ctx
            .conversation_repo()
            .update_member_flags(conversation_id, user_id, is_pinned, is_archived)
            .await?;

        let conversation = self
            .ctx
            .conversation_repo()
            .find_by_id(conversation_id)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found("Conversation", conversation_id.to_string())
            })?;

        self.to_response(&conversation, user_id).await
    }

    /// Load the caller's member row, hiding foreign conversations behind the
    /// not-found condition
    async fn require_member(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<ConversationMember> {
        self.ctx
            .conversation_repo()
            .find_member(conversation_id, user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Conversation", conversation_id.to_string()))
    }

    /// Assemble a conversation response from the caller's point of view
    async fn to_response(
        &self,
        conversation: &Conversation,
        user_id: Snowflake,
    ) -> ServiceResult<ConversationResponse> {
        let members = self
            .ctx
            .conversation_repo()
            .members_of(conversation.id)
            .await?;

        let own = members
            .iter()
            .find(|m| m.user_id == user_id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("Conversation", conversation.id.to_string()))?;

        let mut member_summaries = Vec::with_capacity(members.len());
        for member in &members {
            let user = self
                .ctx
                .user_repo()
                .find_by_id(member.user_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("User", member.user_id.to_string()))?;
            member_summaries.push(UserResponse::from(&user));
        }

        let last_message = self
            .ctx
            .conversation_repo()
            .last_message(conversation.id)
            .await?;
        let unread_count = self
            .ctx
            .conversation_repo()
            .unread_count(conversation.id, user_id)
            .await?;

        Ok(ConversationResponse {
            id: conversation.id.to_string(),
            kind: conversation.kind,
            title: conversation.title.clone(),
            members: member_summaries,
            last_message: last_message.as_ref().map(MessageResponse::from),
            unread_count,
            is_pinned: own.is_pinned,
            is_archived: own.is_archived,
            updated_at: conversation.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    // Conversation flows (direct dedup, group creation, read receipts) are
    // covered end-to-end by the integration tests.
}
