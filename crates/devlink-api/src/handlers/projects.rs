//! Project, member, and invitation handlers

use axum::{
    extract::{Path, State},
    Json,
};
use devlink_service::{
    AddMemberRequest, CreateInvitationRequest, CreateProjectRequest, InvitationResponse,
    MemberResponse, PaginatedResponse, ProjectResponse, ProjectService, RespondInvitationRequest,
    UpdateMemberRoleRequest, UpdateProjectRequest,
};

use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

use super::parse_id;

/// Projects where the caller is owner or member, most recently updated first
///
/// GET /projects
pub async fn get_projects(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<ProjectResponse>>> {
    let service = ProjectService::new(state.service_context());
    let response = service
        .get_projects(auth.user_id, pagination.page, pagination.limit)
        .await?;
    Ok(Json(response))
}

/// Create a project
///
/// POST /projects
pub async fn create_project(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateProjectRequest>,
) -> ApiResult<Created<Json<ProjectResponse>>> {
    let service = ProjectService::new(state.service_context());
    let response = service.create_project(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Get one project; relationship-gated
///
/// GET /projects/{project_id}
pub async fn get_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<String>,
) -> ApiResult<Json<ProjectResponse>> {
    let project_id = parse_id(&project_id, "project_id")?;

    let service = ProjectService::new(state.service_context());
    let response = service.get_project(project_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Update a project; owner or admin
///
/// PATCH /projects/{project_id}
pub async fn update_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateProjectRequest>,
) -> ApiResult<Json<ProjectResponse>> {
    let project_id = parse_id(&project_id, "project_id")?;

    let service = ProjectService::new(state.service_context());
    let response = service
        .update_project(project_id, auth.user_id, request)
        .await?;
    Ok(Json(response))
}

/// Delete a project; owner only
///
/// DELETE /projects/{project_id}
pub async fn delete_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<String>,
) -> ApiResult<NoContent> {
    let project_id = parse_id(&project_id, "project_id")?;

    let service = ProjectService::new(state.service_context());
    service.delete_project(project_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Add a member directly
///
/// POST /projects/{project_id}/members
pub async fn add_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<String>,
    Json(request): Json<AddMemberRequest>,
) -> ApiResult<Created<Json<MemberResponse>>> {
    let project_id = parse_id(&project_id, "project_id")?;

    let service = ProjectService::new(state.service_context());
    let response = service.add_member(project_id, auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Change a member's role
///
/// PATCH /projects/{project_id}/members/{user_id}
pub async fn update_member_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, user_id)): Path<(String, String)>,
    Json(request): Json<UpdateMemberRoleRequest>,
) -> ApiResult<Json<MemberResponse>> {
    let project_id = parse_id(&project_id, "project_id")?;
    let member_id = parse_id(&user_id, "user_id")?;

    let service = ProjectService::new(state.service_context());
    let response = service
        .update_member_role(project_id, auth.user_id, member_id, request)
        .await?;
    Ok(Json(response))
}

/// Remove a member (or leave the project)
///
/// DELETE /projects/{project_id}/members/{user_id}
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, user_id)): Path<(String, String)>,
) -> ApiResult<NoContent> {
    let project_id = parse_id(&project_id, "project_id")?;
    let member_id = parse_id(&user_id, "user_id")?;

    let service = ProjectService::new(state.service_context());
    service
        .remove_member(project_id, auth.user_id, member_id)
        .await?;
    Ok(NoContent)
}

/// Invite a developer to a project
///
/// POST /projects/{project_id}/invitations
pub async fn invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateInvitationRequest>,
) -> ApiResult<Created<Json<InvitationResponse>>> {
    let project_id = parse_id(&project_id, "project_id")?;

    let service = ProjectService::new(state.service_context());
    let response = service.invite(project_id, auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// List the caller's invitations
///
/// GET /invitations
pub async fn list_invitations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<InvitationResponse>>> {
    let service = ProjectService::new(state.service_context());
    let response = service.list_invitations(auth.user_id).await?;
    Ok(Json(response))
}

/// Accept or decline an invitation
///
/// PATCH /invitations/{invitation_id}
pub async fn respond_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(invitation_id): Path<String>,
    Json(request): Json<RespondInvitationRequest>,
) -> ApiResult<Json<InvitationResponse>> {
    let invitation_id = parse_id(&invitation_id, "invitation_id")?;

    let service = ProjectService::new(state.service_context());
    let response = service
        .respond_invitation(invitation_id, auth.user_id, request)
        .await?;
    Ok(Json(response))
}
