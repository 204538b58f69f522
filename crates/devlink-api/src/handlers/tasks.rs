//! Task handlers
//!
//! The board endpoint returns the flat list plus the derived lane grouping;
//! status updates land on the same PATCH as every other field.

use axum::{
    extract::{Path, State},
    Json,
};
use devlink_service::{
    CreateTaskRequest, TaskBoardResponse, TaskResponse, TaskService, UpdateTaskRequest,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

use super::parse_id;

/// Flat task list plus the derived Kanban grouping
///
/// GET /projects/{project_id}/tasks
pub async fn get_project_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<String>,
) -> ApiResult<Json<TaskBoardResponse>> {
    let project_id = parse_id(&project_id, "project_id")?;

    let service = TaskService::new(state.service_context());
    let response = service.get_project_tasks(project_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Create a task (always starts at TODO)
///
/// POST /projects/{project_id}/tasks
pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateTaskRequest>,
) -> ApiResult<Created<Json<TaskResponse>>> {
    let project_id = parse_id(&project_id, "project_id")?;

    let service = TaskService::new(state.service_context());
    let response = service.create_task(project_id, auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Update any task field, including status
///
/// PATCH /projects/{project_id}/tasks/{task_id}
pub async fn update_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, task_id)): Path<(String, String)>,
    ValidatedJson(request): ValidatedJson<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let project_id = parse_id(&project_id, "project_id")?;
    let task_id = parse_id(&task_id, "task_id")?;

    let service = TaskService::new(state.service_context());
    let response = service
        .update_task(project_id, task_id, auth.user_id, request)
        .await?;
    Ok(Json(response))
}

/// Delete a task
///
/// DELETE /projects/{project_id}/tasks/{task_id}
pub async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, task_id)): Path<(String, String)>,
) -> ApiResult<NoContent> {
    let project_id = parse_id(&project_id, "project_id")?;
    let task_id = parse_id(&task_id, "task_id")?;

    let service = TaskService::new(state.service_context());
    service
        .delete_task(project_id, task_id, auth.user_id)
        .await?;
    Ok(NoContent)
}
