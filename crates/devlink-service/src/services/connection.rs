//! Connection service
//!
//! Directed connection requests between developers. Creation checks both the
//! forward and the reverse ordered pair, rejecting each case with its own
//! conflict variant.

use devlink_cache::keys;
use devlink_core::entities::{Connection, ConnectionStatus, NotificationKind};
use devlink_core::{DomainError, Snowflake};
use serde_json::json;
use tracing::{info, instrument};

use crate::dto::requests::{RespondConnectionRequest, SendConnectionRequest};
use crate::dto::responses::{ConnectionResponse, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::NotificationService;

/// Connection service
pub struct ConnectionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ConnectionService<'a> {
    /// Create a new ConnectionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Send a connection request
    #[instrument(skip(self, request))]
    pub async fn send_request(
        &self,
        requester_id: Snowflake,
        request: SendConnectionRequest,
    ) -> ServiceResult<ConnectionResponse> {
        let receiver_id = request.receiver_id;

        if requester_id == receiver_id {
            return Err(ServiceError::from(DomainError::SelfConnection));
        }

        let receiver = self
            .ctx
            .user_repo()
            .find_by_id(receiver_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", receiver_id.to_string()))?;

        // Forward pair: this exact request already exists (any status)
        if self
            .ctx
            .connection_repo()
            .find_pair(requester_id, receiver_id)
            .await?
            .is_some()
        {
            return Err(ServiceError::from(DomainError::ConnectionAlreadyExists));
        }

        // Reverse pair: the other user already holds a request in the other
        // direction (any status); a second row would duplicate the edge
        if self
            .ctx
            .connection_repo()
            .find_pair(receiver_id, requester_id)
            .await?
            .is_some()
        {
            return Err(ServiceError::from(DomainError::ReverseConnectionExists));
        }

        let connection = Connection::new(self.ctx.generate_id(), requester_id, receiver_id);
        self.ctx.connection_repo().create(&connection).await?;

        info!(
            connection_id = %connection.id,
            requester_id = %requester_id,
            receiver_id = %receiver_id,
            "Connection request sent"
        );

        let requester = self
            .ctx
            .user_repo()
            .find_by_id(requester_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", requester_id.to_string()))?;

        // Side effect: notify the receiver
        let notifications = NotificationService::new(self.ctx);
        notifications
            .notify(
                receiver_id,
                NotificationKind::ConnectionRequest,
                "New connection request",
                &format!("{} wants to connect", requester.username),
                json!({ "connection_id": connection.id.to_string() }),
            )
            .await?;

        self.ctx
            .invalidation()
            .connection_changed(requester_id, receiver_id)
            .await;

        Ok(ConnectionResponse {
            id: connection.id.to_string(),
            peer: UserResponse::from(&receiver),
            status: connection.status,
            requested_by_me: true,
            created_at: connection.created_at,
        })
    }

    /// Accept or reject an incoming request; receiver only
    #[instrument(skip(self, request))]
    pub async fn respond(
        &self,
        connection_id: Snowflake,
        user_id: Snowflake,
        request: RespondConnectionRequest,
    ) -> ServiceResult<ConnectionResponse> {
        let connection = self
            .ctx
            .connection_repo()
            .find_by_id(connection_id)
            .await?
            // Requests addressed to someone else look exactly like missing ones
            .filter(|c| c.receiver_id == user_id)
            .ok_or_else(|| ServiceError::not_found("Connection", connection_id.to_string()))?;

        if !connection.is_pending() {
            return Err(ServiceError::conflict("Connection request already resolved"));
        }

        let status = match request.status {
            ConnectionStatus::Accepted => ConnectionStatus::Accepted,
            ConnectionStatus::Rejected => ConnectionStatus::Rejected,
            ConnectionStatus::Pending => {
                return Err(ServiceError::validation(
                    "Response must be ACCEPTED or REJECTED",
                ));
            }
        };

        self.ctx
            .connection_repo()
            .update_status(connection_id, status)
            .await?;

        info!(connection_id = %connection_id, status = %status.as_str(), "Connection request resolved");

        if status == ConnectionStatus::Accepted {
            let receiver = self
                .ctx
                .user_repo()
                .find_by_id(user_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

            let notifications = NotificationService::new(self.ctx);
            notifications
                .notify(
                    connection.requester_id,
                    NotificationKind::ConnectionAccepted,
                    "Connection accepted",
                    &format!("{} accepted your connection request", receiver.username),
                    json!({ "connection_id": connection_id.to_string() }),
                )
                .await?;
        }

        self.ctx
            .invalidation()
            .connection_changed(connection.requester_id, connection.receiver_id)
            .await;

        let requester = self
            .ctx
            .user_repo()
            .find_by_id(connection.requester_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", connection.requester_id.to_string()))?;

        Ok(ConnectionResponse {
            id: connection.id.to_string(),
            peer: UserResponse::from(&requester),
            status,
            requested_by_me: false,
            created_at: connection.created_at,
        })
    }

    /// Accepted connections for the caller (read-through cached)
    #[instrument(skip(self))]
    pub async fn list_connections(
        &self,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<ConnectionResponse>> {
        let ctx = self.ctx;
        ctx.cache()
            .get_or_set(
                &keys::user_connections(user_id),
                keys::USER_CONNECTIONS_TTL,
                || async move {
                    let connections = ctx.connection_repo().accepted_for_user(user_id).await?;

                    let mut responses = Vec::with_capacity(connections.len());
                    for connection in &connections {
                        let peer_id = connection
                            .peer_of(user_id)
                            .ok_or_else(|| ServiceError::internal("Connection without caller"))?;
                        let peer = ctx
                            .user_repo()
                            .find_by_id(peer_id)
                            .await?
                            .ok_or_else(|| ServiceError::not_found("User", peer_id.to_string()))?;

                        responses.push(ConnectionResponse {
                            id: connection.id.to_string(),
                            peer: UserResponse::from(&peer),
                            status: connection.status,
                            requested_by_me: connection.requester_id == user_id,
                            created_at: connection.created_at,
                        });
                    }

                    Ok::<_, ServiceError>(responses)
                },
            )
            .await
    }

    /// Incoming pending requests for the caller
    #[instrument(skip(self))]
    pub async fn list_pending(&self, user_id: Snowflake) -> ServiceResult<Vec<ConnectionResponse>> {
        let connections = self.ctx.connection_repo().pending_for_user(user_id).await?;

        let mut responses = Vec::with_capacity(connections.len());
        for connection in &connections {
            let requester = self
                .ctx
                .user_repo()
                .find_by_id(connection.requester_id)
                .await?
                .ok_or_else(|| {
                    ServiceError::not_found("User", connection.requester_id.to_string())
                })?;

            responses.push(ConnectionResponse {
                id: connection.id.to_string(),
                peer: UserResponse::from(&requester),
                status: connection.status,
                requested_by_me: false,
                created_at: connection.created_at,
            });
        }

        Ok(responses)
    }

    /// Remove a connection (either party), or cancel one's own pending request
    #[instrument(skip(self))]
    pub async fn remove(&self, connection_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let connection = self
            .ctx
            .connection_repo()
            .find_by_id(connection_id)
            .await?
            .filter(|c| c.involves(user_id))
            .ok_or_else(|| ServiceError::not_found("Connection", connection_id.to_string()))?;

        // Only the requester can withdraw a still-pending request
        if connection.is_pending() && connection.requester_id != user_id {
            return Err(ServiceError::not_found(
                "Connection",
                connection_id.to_string(),
            ));
        }

        self.ctx.connection_repo().delete(connection_id).await?;

        info!(connection_id = %connection_id, "Connection removed");

        self.ctx
            .invalidation()
            .connection_changed(connection.requester_id, connection.receiver_id)
            .await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    // The forward/reverse duplicate checks and the respond flow are covered
    // end-to-end by the integration tests.
}
