//! Search handler

use axum::{
    extract::{Query, State},
    Json,
};
use devlink_service::{SearchKind, SearchResponse, SearchService};
use serde::Deserialize;

use crate::extractors::{AuthUser, Pagination};
use crate::response::ApiResult;
use crate::state::AppState;

/// Search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// The search text
    pub q: String,
    /// users | posts | projects | all (default)
    pub kind: Option<String>,
}

/// Search users, posts, and projects
///
/// GET /search?q=...&kind=...
pub async fn search(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<SearchParams>,
    pagination: Pagination,
) -> ApiResult<Json<SearchResponse>> {
    let kind = SearchKind::parse(params.kind.as_deref());

    let service = SearchService::new(state.service_context());
    let response = service
        .search(&params.q, kind, pagination.page, pagination.limit)
        .await?;
    Ok(Json(response))
}
