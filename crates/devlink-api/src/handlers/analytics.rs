//! Analytics handlers

use axum::{
    extract::{Query, State},
    Json,
};
use devlink_service::{AnalyticsService, AnalyticsSummaryResponse, RecordEventRequest};
use serde::Deserialize;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Summary query parameters
#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    /// Window size in days (default 30, max 365)
    pub days: Option<i64>,
}

/// Append an analytics event
///
/// POST /analytics/events
pub async fn record_event(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<RecordEventRequest>,
) -> ApiResult<Created<()>> {
    let service = AnalyticsService::new(state.service_context());
    service.record(auth.user_id, request).await?;
    Ok(Created(()))
}

/// Summary over the requested window, computed on read
///
/// GET /analytics/summary?days=30
pub async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<SummaryParams>,
) -> ApiResult<Json<AnalyticsSummaryResponse>> {
    let service = AnalyticsService::new(state.service_context());
    let response = service.summary(auth.user_id, params.days).await?;
    Ok(Json(response))
}
