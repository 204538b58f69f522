//! Notification entity - rows created as side effects of other writes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Kind of notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    ConnectionRequest,
    ConnectionAccepted,
    ProjectInvitation,
    InvitationAccepted,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConnectionRequest => "connection_request",
            Self::ConnectionAccepted => "connection_accepted",
            Self::ProjectInvitation => "project_invitation",
            Self::InvitationAccepted => "invitation_accepted",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "connection_request" => Some(Self::ConnectionRequest),
            "connection_accepted" => Some(Self::ConnectionAccepted),
            "project_invitation" => Some(Self::ProjectInvitation),
            "invitation_accepted" => Some(Self::InvitationAccepted),
            _ => None,
        }
    }
}

/// Notification row
///
/// Never mutated after creation except for `is_read` toggling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    /// Structured payload for the client (ids of related entities)
    pub data: serde_json::Value,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        kind: NotificationKind,
        title: String,
        body: String,
        data: serde_json::Value,
    ) -> Self {
        Self {
            id,
            user_id,
            kind,
            title,
            body,
            data,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_roundtrip() {
        for kind in [
            NotificationKind::ConnectionRequest,
            NotificationKind::ConnectionAccepted,
            NotificationKind::ProjectInvitation,
            NotificationKind::InvitationAccepted,
        ] {
            assert_eq!(NotificationKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_new_notification_is_unread() {
        let notification = Notification::new(
            Snowflake::new(1),
            Snowflake::new(10),
            NotificationKind::ConnectionRequest,
            "New connection request".to_string(),
            "alice wants to connect".to_string(),
            json!({ "connection_id": "42" }),
        );
        assert!(!notification.is_read);
    }
}
