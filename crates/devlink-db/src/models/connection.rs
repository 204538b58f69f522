//! Connection database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the connections table
///
/// The ordered (requester_id, receiver_id) pair carries a unique index.
#[derive(Debug, Clone, FromRow)]
pub struct ConnectionModel {
    pub id: i64,
    pub requester_id: i64,
    pub receiver_id: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
