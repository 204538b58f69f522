//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{
    analytics, auth, connections, health, messages, notifications, posts, projects, search, tasks,
    users,
};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(post_routes())
        .merge(connection_routes())
        .merge(project_routes())
        .merge(message_routes())
        .merge(notification_routes())
        .merge(search_routes())
        .merge(analytics_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
}

/// User and skill routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me", get(users::get_current_user))
        .route("/users/@me", patch(users::update_current_user))
        .route("/users/@me/skills", post(users::add_skill))
        .route("/users/@me/skills/:skill_id", patch(users::update_skill))
        .route("/users/@me/skills/:skill_id", delete(users::remove_skill))
        .route("/users/:user_id", get(users::get_user))
}

/// Post, comment, and like routes
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(posts::feed))
        .route("/posts", post(posts::create_post))
        .route("/posts/:post_id", get(posts::get_post))
        .route("/posts/:post_id", patch(posts::update_post))
        .route("/posts/:post_id", delete(posts::delete_post))
        .route("/posts/:post_id/like", post(posts::toggle_like))
        .route("/posts/:post_id/comments", get(posts::get_comments))
        .route("/posts/:post_id/comments", post(posts::add_comment))
        .route(
            "/posts/:post_id/comments/:comment_id",
            delete(posts::delete_comment),
        )
}

/// Connection routes
fn connection_routes() -> Router<AppState> {
    Router::new()
        .route("/connections", get(connections::list_connections))
        .route("/connections", post(connections::send_request))
        .route("/connections/pending", get(connections::list_pending))
        .route("/connections/:connection_id", patch(connections::respond))
        .route("/connections/:connection_id", delete(connections::remove))
}

/// Project, member, invitation, and task routes
fn project_routes() -> Router<AppState> {
    Router::new()
        // Project CRUD
        .route("/projects", get(projects::get_projects))
        .route("/projects", post(projects::create_project))
        .route("/projects/:project_id", get(projects::get_project))
        .route("/projects/:project_id", patch(projects::update_project))
        .route("/projects/:project_id", delete(projects::delete_project))
        // Project members
        .route("/projects/:project_id/members", post(projects::add_member))
        .route(
            "/projects/:project_id/members/:user_id",
            patch(projects::update_member_role),
        )
        .route(
            "/projects/:project_id/members/:user_id",
            delete(projects::remove_member),
        )
        // Project invitations
        .route("/projects/:project_id/invitations", post(projects::invite))
        .route("/invitations", get(projects::list_invitations))
        .route(
            "/invitations/:invitation_id",
            patch(projects::respond_invitation),
        )
        // Project tasks (the Kanban board)
        .route("/projects/:project_id/tasks", get(tasks::get_project_tasks))
        .route("/projects/:project_id/tasks", post(tasks::create_task))
        .route(
            "/projects/:project_id/tasks/:task_id",
            patch(tasks::update_task),
        )
        .route(
            "/projects/:project_id/tasks/:task_id",
            delete(tasks::delete_task),
        )
}

/// Conversation and message routes
fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/conversations", get(messages::list_conversations))
        .route("/conversations", post(messages::create_conversation))
        .route(
            "/conversations/:conversation_id",
            patch(messages::update_conversation),
        )
        .route(
            "/conversations/:conversation_id/messages",
            get(messages::get_messages),
        )
        .route(
            "/conversations/:conversation_id/messages",
            post(messages::send_message),
        )
        .route(
            "/conversations/:conversation_id/read",
            post(messages::mark_read),
        )
}

/// Notification routes
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(notifications::list))
        .route(
            "/notifications/:notification_id/read",
            post(notifications::mark_read),
        )
        .route("/notifications/read-all", post(notifications::mark_all_read))
}

/// Search routes
fn search_routes() -> Router<AppState> {
    Router::new().route("/search", get(search::search))
}

/// Analytics routes
fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/analytics/events", post(analytics::record_event))
        .route("/analytics/summary", get(analytics::summary))
}
