//! Connection handlers

use axum::{
    extract::{Path, State},
    Json,
};
use devlink_service::{
    ConnectionResponse, ConnectionService, RespondConnectionRequest, SendConnectionRequest,
};

use crate::extractors::AuthUser;
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

use super::parse_id;

/// Accepted connections for the caller
///
/// GET /connections
pub async fn list_connections(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ConnectionResponse>>> {
    let service = ConnectionService::new(state.service_context());
    let response = service.list_connections(auth.user_id).await?;
    Ok(Json(response))
}

/// Incoming pending requests for the caller
///
/// GET /connections/pending
pub async fn list_pending(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ConnectionResponse>>> {
    let service = ConnectionService::new(state.service_context());
    let response = service.list_pending(auth.user_id).await?;
    Ok(Json(response))
}

/// Send a connection request
///
/// POST /connections
pub async fn send_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<SendConnectionRequest>,
) -> ApiResult<Created<Json<ConnectionResponse>>> {
    let service = ConnectionService::new(state.service_context());
    let response = service.send_request(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Accept or reject an incoming request
///
/// PATCH /connections/{connection_id}
pub async fn respond(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(connection_id): Path<String>,
    Json(request): Json<RespondConnectionRequest>,
) -> ApiResult<Json<ConnectionResponse>> {
    let connection_id = parse_id(&connection_id, "connection_id")?;

    let service = ConnectionService::new(state.service_context());
    let response = service.respond(connection_id, auth.user_id, request).await?;
    Ok(Json(response))
}

/// Remove a connection, or withdraw one's own pending request
///
/// DELETE /connections/{connection_id}
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(connection_id): Path<String>,
) -> ApiResult<NoContent> {
    let connection_id = parse_id(&connection_id, "connection_id")?;

    let service = ConnectionService::new(state.service_context());
    service.remove(connection_id, auth.user_id).await?;
    Ok(NoContent)
}
