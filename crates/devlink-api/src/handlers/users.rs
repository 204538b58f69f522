//! User and skill handlers

use axum::{
    extract::{Path, State},
    Json,
};
use devlink_service::{
    AddSkillRequest, CurrentUserResponse, ProfileResponse, SkillResponse, UpdateProfileRequest,
    UpdateSkillRequest, UserService,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

use super::parse_id;

/// Get the authenticated user
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_current(auth.user_id).await?;
    Ok(Json(response))
}

/// Update the authenticated user's profile
///
/// PATCH /users/@me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_profile(auth.user_id, request).await?;
    Ok(Json(response))
}

/// Get a user's public profile with skills
///
/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<String>,
) -> ApiResult<Json<ProfileResponse>> {
    let user_id = parse_id(&user_id, "user_id")?;

    let service = UserService::new(state.service_context());
    let response = service.get_profile(user_id).await?;
    Ok(Json(response))
}

/// Add a skill to the authenticated user
///
/// POST /users/@me/skills
pub async fn add_skill(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<AddSkillRequest>,
) -> ApiResult<Created<Json<SkillResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service.add_skill(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Update a skill
///
/// PATCH /users/@me/skills/{skill_id}
pub async fn update_skill(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(skill_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateSkillRequest>,
) -> ApiResult<Json<SkillResponse>> {
    let skill_id = parse_id(&skill_id, "skill_id")?;

    let service = UserService::new(state.service_context());
    let response = service.update_skill(auth.user_id, skill_id, request).await?;
    Ok(Json(response))
}

/// Remove a skill
///
/// DELETE /users/@me/skills/{skill_id}
pub async fn remove_skill(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(skill_id): Path<String>,
) -> ApiResult<NoContent> {
    let skill_id = parse_id(&skill_id, "skill_id")?;

    let service = UserService::new(state.service_context());
    service.remove_skill(auth.user_id, skill_id).await?;
    Ok(NoContent)
}
