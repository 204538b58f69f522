//! Conversation and message handlers

use axum::{
    extract::{Path, State},
    Json,
};
use devlink_service::{
    ConversationResponse, CreateConversationRequest, MessageResponse, MessageService,
    PaginatedResponse, SendMessageRequest, UpdateConversationRequest,
};
use serde::Serialize;

use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

use super::parse_id;

/// List the caller's conversations, most recent activity first
///
/// GET /conversations
pub async fn list_conversations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ConversationResponse>>> {
    let service = MessageService::new(state.service_context());
    let response = service.list_conversations(auth.user_id).await?;
    Ok(Json(response))
}

/// Create a conversation (DIRECT conversations are deduplicated)
///
/// POST /conversations
pub async fn create_conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateConversationRequest>,
) -> ApiResult<Created<Json<ConversationResponse>>> {
    let service = MessageService::new(state.service_context());
    let response = service.create_conversation(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Update the caller's pin/archive flags
///
/// PATCH /conversations/{conversation_id}
pub async fn update_conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(conversation_id): Path<String>,
    Json(request): Json<UpdateConversationRequest>,
) -> ApiResult<Json<ConversationResponse>> {
    let conversation_id = parse_id(&conversation_id, "conversation_id")?;

    let service = MessageService::new(state.service_context());
    let response = service
        .update_flags(conversation_id, auth.user_id, request)
        .await?;
    Ok(Json(response))
}

/// List messages, newest first
///
/// GET /conversations/{conversation_id}/messages
pub async fn get_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(conversation_id): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<MessageResponse>>> {
    let conversation_id = parse_id(&conversation_id, "conversation_id")?;

    let service = MessageService::new(state.service_context());
    let response = service
        .get_messages(conversation_id, auth.user_id, pagination.page, pagination.limit)
        .await?;
    Ok(Json(response))
}

/// Send a message
///
/// POST /conversations/{conversation_id}/messages
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(conversation_id): Path<String>,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let conversation_id = parse_id(&conversation_id, "conversation_id")?;

    let service = MessageService::new(state.service_context());
    let response = service
        .send_message(conversation_id, auth.user_id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// Read-receipt response
#[derive(Debug, Serialize)]
pub struct MarkReadResponse {
    pub marked_read: u64,
}

/// Read-receipt pass over the conversation
///
/// POST /conversations/{conversation_id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(conversation_id): Path<String>,
) -> ApiResult<Json<MarkReadResponse>> {
    let conversation_id = parse_id(&conversation_id, "conversation_id")?;

    let service = MessageService::new(state.service_context());
    let marked_read = service.mark_read(conversation_id, auth.user_id).await?;
    Ok(Json(MarkReadResponse { marked_read }))
}
