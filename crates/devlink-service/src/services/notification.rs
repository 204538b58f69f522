//! Notification service
//!
//! Notifications are rows created as side effects of other writes. The only
//! mutation ever applied afterwards is `is_read` toggling; there is no push
//! transport.

use devlink_core::entities::{Notification, NotificationKind};
use devlink_core::traits::Page;
use devlink_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::responses::{NotificationListResponse, NotificationResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a notification row (called by other services as a side effect)
    #[instrument(skip(self, title, body, data))]
    pub async fn notify(
        &self,
        user_id: Snowflake,
        kind: NotificationKind,
        title: &str,
        body: &str,
        data: serde_json::Value,
    ) -> ServiceResult<()> {
        let notification = Notification::new(
            self.ctx.generate_id(),
            user_id,
            kind,
            title.to_string(),
            body.to_string(),
            data,
        );

        self.ctx.notification_repo().create(&notification).await?;

        info!(
            notification_id = %notification.id,
            user_id = %user_id,
            kind = %kind.as_str(),
            "Notification created"
        );

        Ok(())
    }

    /// List the caller's notifications, newest first, with the unread count
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        user_id: Snowflake,
        page: i64,
        limit: i64,
    ) -> ServiceResult<NotificationListResponse> {
        let window = Page::new(page, limit);

        let notifications = self
            .ctx
            .notification_repo()
            .list_for_user(user_id, window)
            .await?;
        let unread_count = self.ctx.notification_repo().unread_count(user_id).await?;

        Ok(NotificationListResponse {
            notifications: notifications.iter().map(NotificationResponse::from).collect(),
            unread_count,
        })
    }

    /// Mark one notification read; addressee only
    #[instrument(skip(self))]
    pub async fn mark_read(
        &self,
        notification_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        // Someone else's notification looks exactly like a missing one
        self.ctx
            .notification_repo()
            .find_by_id(notification_id)
            .await?
            .filter(|n| n.user_id == user_id)
            .ok_or_else(|| {
                ServiceError::not_found("Notification", notification_id.to_string())
            })?;

        self.ctx.notification_repo().mark_read(notification_id).await?;

        Ok(())
    }

    /// Mark every notification read; returns the number flipped
    #[instrument(skip(self))]
    pub async fn mark_all_read(&self, user_id: Snowflake) -> ServiceResult<u64> {
        let flipped = self.ctx.notification_repo().mark_all_read(user_id).await?;

        info!(user_id = %user_id, flipped, "All notifications marked read");

        Ok(flipped)
    }
}

#[cfg(test)]
mod tests {
    // Notification side effects are exercised through the connection and
    // invitation flows in the integration tests.
}
