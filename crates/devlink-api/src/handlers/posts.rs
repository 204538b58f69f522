//! Post, comment, and like handlers

use axum::{
    extract::{Path, State},
    Json,
};
use devlink_service::{
    CommentResponse, CreateCommentRequest, CreatePostRequest, LikeStateResponse,
    PaginatedResponse, PostResponse, PostService, UpdatePostRequest,
};

use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

use super::parse_id;

/// Recent posts across all authors, newest first
///
/// GET /posts
pub async fn feed(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let response = service
        .feed(auth.user_id, pagination.page, pagination.limit)
        .await?;
    Ok(Json(response))
}

/// Create a post
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let response = service.create_post(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Get one post
///
/// GET /posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<String>,
) -> ApiResult<Json<PostResponse>> {
    let post_id = parse_id(&post_id, "post_id")?;

    let service = PostService::new(state.service_context());
    let response = service.get_post(post_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Edit a post (author only; sets is_edited)
///
/// PATCH /posts/{post_id}
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> ApiResult<Json<PostResponse>> {
    let post_id = parse_id(&post_id, "post_id")?;

    let service = PostService::new(state.service_context());
    let response = service.update_post(post_id, auth.user_id, request).await?;
    Ok(Json(response))
}

/// Delete a post (author only)
///
/// DELETE /posts/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<String>,
) -> ApiResult<NoContent> {
    let post_id = parse_id(&post_id, "post_id")?;

    let service = PostService::new(state.service_context());
    service.delete_post(post_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Toggle a like on a post
///
/// POST /posts/{post_id}/like
pub async fn toggle_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<String>,
) -> ApiResult<Json<LikeStateResponse>> {
    let post_id = parse_id(&post_id, "post_id")?;

    let service = PostService::new(state.service_context());
    let response = service.toggle_like(post_id, auth.user_id).await?;
    Ok(Json(response))
}

/// List comments on a post, oldest first
///
/// GET /posts/{post_id}/comments
pub async fn get_comments(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(post_id): Path<String>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let post_id = parse_id(&post_id, "post_id")?;

    let service = PostService::new(state.service_context());
    let response = service.comments(post_id).await?;
    Ok(Json(response))
}

/// Add a comment (optionally a nested reply)
///
/// POST /posts/{post_id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let post_id = parse_id(&post_id, "post_id")?;

    let service = PostService::new(state.service_context());
    let response = service.add_comment(post_id, auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Delete a comment (author only)
///
/// DELETE /posts/{post_id}/comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> ApiResult<NoContent> {
    let post_id = parse_id(&post_id, "post_id")?;
    let comment_id = parse_id(&comment_id, "comment_id")?;

    let service = PostService::new(state.service_context());
    service
        .delete_comment(post_id, comment_id, auth.user_id)
        .await?;
    Ok(NoContent)
}
