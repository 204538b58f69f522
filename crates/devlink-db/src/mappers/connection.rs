//! Connection model mapper

use devlink_core::entities::{Connection, ConnectionStatus};
use devlink_core::Snowflake;

use crate::models::ConnectionModel;

impl From<ConnectionModel> for Connection {
    fn from(model: ConnectionModel) -> Self {
        Connection {
            id: Snowflake::new(model.id),
            requester_id: Snowflake::new(model.requester_id),
            receiver_id: Snowflake::new(model.receiver_id),
            status: ConnectionStatus::parse(&model.status).unwrap_or(ConnectionStatus::Pending),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
