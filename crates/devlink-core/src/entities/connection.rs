//! Connection entity - a directed link request between two developers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Lifecycle state of a connection request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Self::Pending),
            "ACCEPTED" => Some(Self::Accepted),
            "REJECTED" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// Directed connection between two users
///
/// The ordered (requester, receiver) pair is unique, and the reverse pair is
/// also checked on creation so the same two users never hold two requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: Snowflake,
    pub requester_id: Snowflake,
    pub receiver_id: Snowflake,
    pub status: ConnectionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Connection {
    pub fn new(id: Snowflake, requester_id: Snowflake, receiver_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            requester_id,
            receiver_id,
            status: ConnectionStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the user is one of the two parties
    #[inline]
    pub fn involves(&self, user_id: Snowflake) -> bool {
        self.requester_id == user_id || self.receiver_id == user_id
    }

    /// The other party, from the given user's point of view
    pub fn peer_of(&self, user_id: Snowflake) -> Option<Snowflake> {
        if self.requester_id == user_id {
            Some(self.receiver_id)
        } else if self.receiver_id == user_id {
            Some(self.requester_id)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == ConnectionStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_starts_pending() {
        let conn = Connection::new(Snowflake::new(1), Snowflake::new(10), Snowflake::new(20));
        assert!(conn.is_pending());
    }

    #[test]
    fn test_involves_both_parties() {
        let conn = Connection::new(Snowflake::new(1), Snowflake::new(10), Snowflake::new(20));
        assert!(conn.involves(Snowflake::new(10)));
        assert!(conn.involves(Snowflake::new(20)));
        assert!(!conn.involves(Snowflake::new(30)));
    }

    #[test]
    fn test_peer_of() {
        let conn = Connection::new(Snowflake::new(1), Snowflake::new(10), Snowflake::new(20));
        assert_eq!(conn.peer_of(Snowflake::new(10)), Some(Snowflake::new(20)));
        assert_eq!(conn.peer_of(Snowflake::new(20)), Some(Snowflake::new(10)));
        assert_eq!(conn.peer_of(Snowflake::new(30)), None);
    }

    #[test]
    fn test_status_roundtrip() {
        for status in [
            ConnectionStatus::Pending,
            ConnectionStatus::Accepted,
            ConnectionStatus::Rejected,
        ] {
            assert_eq!(ConnectionStatus::parse(status.as_str()), Some(status));
        }
    }
}
