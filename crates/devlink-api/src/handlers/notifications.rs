//! Notification handlers

use axum::{
    extract::{Path, State},
    Json,
};
use devlink_service::{NotificationListResponse, NotificationService};
use serde::Serialize;

use crate::extractors::{AuthUser, Pagination};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

use super::parse_id;

/// List notifications, newest first, with the unread count
///
/// GET /notifications
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<NotificationListResponse>> {
    let service = NotificationService::new(state.service_context());
    let response = service
        .list(auth.user_id, pagination.page, pagination.limit)
        .await?;
    Ok(Json(response))
}

/// Mark one notification read
///
/// POST /notifications/{notification_id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(notification_id): Path<String>,
) -> ApiResult<NoContent> {
    let notification_id = parse_id(&notification_id, "notification_id")?;

    let service = NotificationService::new(state.service_context());
    service.mark_read(notification_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Mark-all-read response
#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub marked_read: u64,
}

/// Mark every notification read
///
/// POST /notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MarkAllReadResponse>> {
    let service = NotificationService::new(state.service_context());
    let marked_read = service.mark_all_read(auth.user_id).await?;
    Ok(Json(MarkAllReadResponse { marked_read }))
}
