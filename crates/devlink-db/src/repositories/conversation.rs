//! PostgreSQL implementation of ConversationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use devlink_core::entities::{Conversation, ConversationMember, Message};
use devlink_core::traits::{ConversationRepository, Page, RepoResult};
use devlink_core::value_objects::Snowflake;

use crate::models::{ConversationMemberModel, ConversationModel, MessageModel};

use super::error::map_db_error;

const CONVERSATION_COLUMNS: &str = "id, kind, title, creator_id, created_at, updated_at";
const MESSAGE_COLUMNS: &str = "id, conversation_id, sender_id, content, is_read, created_at, updated_at";

/// PostgreSQL implementation of ConversationRepository
#[derive(Clone)]
pub struct PgConversationRepository {
    pool: PgPool,
}

impl PgConversationRepository {
    /// Create a new PgConversationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationRepository for PgConversationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Conversation>> {
        let result = sqlx::query_as::<_, ConversationModel>(&format!(
            "SELECT {CONVERSATION_COLUMNS} FROM conversations WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Conversation::from))
    }

    #[instrument(skip(self))]
    async fn find_direct_between(
        &self,
        user_a: Snowflake,
        user_b: Snowflake,
    ) -> RepoResult<Option<Conversation>> {
        let result = sqlx::query_as::<_, ConversationModel>(
            r"
            SELECT c.id, c.kind, c.title, c.creator_id, c.created_at, c.updated_at
            FROM conversations c
            JOIN conversation_members ma ON ma.conversation_id = c.id AND ma.user_id = $1
            JOIN conversation_members mb ON mb.conversation_id = c.id AND mb.user_id = $2
            WHERE c.kind = 'DIRECT'
            LIMIT 1
            ",
        )
        .bind(user_a.into_inner())
        .bind(user_b.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Conversation::from))
    }

    #[instrument(skip(self))]
    async fn list_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<Conversation>> {
        let results = sqlx::query_as::<_, ConversationModel>(
            r"
            SELECT c.id, c.kind, c.title, c.creator_id, c.created_at, c.updated_at
            FROM conversations c
            JOIN conversation_members cm ON cm.conversation_id = c.id
            WHERE cm.user_id = $1
            ORDER BY c.updated_at DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Conversation::from).collect())
    }

    #[instrument(skip(self, members))]
    async fn create(
        &self,
        conversation: &Conversation,
        members: &[ConversationMember],
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO conversations (id, kind, title, creator_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(conversation.id.into_inner())
        .bind(conversation.kind.as_str())
        .bind(&conversation.title)
        .bind(conversation.creator_id.into_inner())
        .bind(conversation.created_at)
        .bind(conversation.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        for member in members {
            sqlx::query(
                r"
                INSERT INTO conversation_members (conversation_id, user_id, is_pinned,
                                                  is_archived, last_read_at, joined_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                ",
            )
            .bind(member.conversation_id.into_inner())
            .bind(member.user_id.into_inner())
            .bind(member.is_pinned)
            .bind(member.is_archived)
            .bind(member.last_read_at)
            .bind(member.joined_at)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn touch(&self, id: Snowflake) -> RepoResult<()> {
        sqlx::query("UPDATE conversations SET updated_at = NOW() WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn members_of(&self, conversation_id: Snowflake) -> RepoResult<Vec<ConversationMember>> {
        let results = sqlx::query_as::<_, ConversationMemberModel>(
            r"
            SELECT conversation_id, user_id, is_pinned, is_archived, last_read_at, joined_at
            FROM conversation_members
            WHERE conversation_id = $1
            ORDER BY joined_at ASC
            ",
        )
        .bind(conversation_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ConversationMember::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_member(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<ConversationMember>> {
        let result = sqlx::query_as::<_, ConversationMemberModel>(
            r"
            SELECT conversation_id, user_id, is_pinned, is_archived, last_read_at, joined_at
            FROM conversation_members
            WHERE conversation_id = $1 AND user_id = $2
            ",
        )
        .bind(conversation_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ConversationMember::from))
    }

    #[instrument(skip(self))]
    async fn update_member_flags(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
        is_pinned: bool,
        is_archived: bool,
    ) -> RepoResult<()> {
        sqlx::query(
            r"
            UPDATE conversation_members
            SET is_pinned = $3, is_archived = $4
            WHERE conversation_id = $1 AND user_id = $2
            ",
        )
        .bind(conversation_id.into_inner())
        .bind(user_id.into_inner())
        .bind(is_pinned)
        .bind(is_archived)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, message))]
    async fn create_message(&self, message: &Message) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO messages (id, conversation_id, sender_id, content, is_read, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(message.id.into_inner())
        .bind(message.conversation_id.into_inner())
        .bind(message.sender_id.into_inner())
        .bind(&message.content)
        .bind(message.is_read)
        .bind(message.created_at)
        .bind(message.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn messages_for(
        &self,
        conversation_id: Snowflake,
        page: Page,
    ) -> RepoResult<Vec<Message>> {
        let results = sqlx::query_as::<_, MessageModel>(&format!(
            r"
            SELECT {MESSAGE_COLUMNS}
            FROM messages
            WHERE conversation_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "
        ))
        .bind(conversation_id.into_inner())
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self))]
    async fn last_message(&self, conversation_id: Snowflake) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(&format!(
            r"
            SELECT {MESSAGE_COLUMNS}
            FROM messages
            WHERE conversation_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "
        ))
        .bind(conversation_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self))]
    async fn unread_count(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM messages
            WHERE conversation_id = $1 AND sender_id != $2 AND is_read = FALSE
            ",
        )
        .bind(conversation_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn mark_read(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
        read_at: DateTime<Utc>,
    ) -> RepoResult<u64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE messages
            SET is_read = TRUE, updated_at = NOW()
            WHERE conversation_id = $1 AND sender_id != $2 AND is_read = FALSE
            ",
        )
        .bind(conversation_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r"
            UPDATE conversation_members
            SET last_read_at = $3
            WHERE conversation_id = $1 AND user_id = $2
            ",
        )
        .bind(conversation_id.into_inner())
        .bind(user_id.into_inner())
        .bind(read_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgConversationRepository>();
    }
}
