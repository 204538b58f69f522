//! Notification model mapper

use devlink_core::entities::{Notification, NotificationKind};
use devlink_core::Snowflake;

use crate::models::NotificationModel;

impl From<NotificationModel> for Notification {
    fn from(model: NotificationModel) -> Self {
        Notification {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            kind: NotificationKind::parse(&model.kind)
                .unwrap_or(NotificationKind::ConnectionRequest),
            title: model.title,
            body: model.body,
            data: model.data,
            is_read: model.is_read,
            created_at: model.created_at,
        }
    }
}
