//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL, JWT_SECRET, API_PORT
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;
use serde_json::json;

/// Register a fresh user and return their auth tokens
async fn register_user(server: &TestServer) -> AuthResponse {
    let request = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

/// Create a project owned by the given user
async fn create_project(server: &TestServer, token: &str, name: &str) -> ProjectResponse {
    let response = server
        .post_auth("/api/v1/projects", token, &json!({ "name": name }))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_and_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.user.username, request.username);
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());

    // Same credentials log in
    let login = LoginRequest::from_register(&request);
    let response = server.post("/api/v1/auth/login", &login).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.email, request.email);
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/users/@me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Skill Tests
// ============================================================================

#[tokio::test]
async fn test_skill_names_collide_case_insensitively() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_user(&server).await;

    let response = server
        .post_auth(
            "/api/v1/users/@me/skills",
            &auth.access_token,
            &json!({ "name": "React", "level": "PRIMARY" }),
        )
        .await
        .unwrap();
    let skill: SkillResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(skill.name, "React");
    assert_eq!(skill.level, "PRIMARY");

    // "react" is the same skill, even at a different level
    let response = server
        .post_auth(
            "/api/v1/users/@me/skills",
            &auth.access_token,
            &json!({ "name": "react", "level": "SECONDARY" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

// ============================================================================
// Post and Like Tests
// ============================================================================

#[tokio::test]
async fn test_like_double_toggle_is_net_noop() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = register_user(&server).await;
    let liker = register_user(&server).await;

    // Author posts
    let response = server
        .post_auth(
            "/api/v1/posts",
            &author.access_token,
            &json!({ "kind": "TEXT", "content": "hello world" }),
        )
        .await
        .unwrap();
    let post: serde_json::Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    let post_id = post["id"].as_str().unwrap().to_string();

    // First toggle likes
    let response = server
        .post_auth_empty(&format!("/api/v1/posts/{post_id}/like"), &liker.access_token)
        .await
        .unwrap();
    let state: LikeStateResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(state.liked);
    assert_eq!(state.like_count, 1);

    // Second toggle unlikes, returning to the original state
    let response = server
        .post_auth_empty(&format!("/api/v1/posts/{post_id}/like"), &liker.access_token)
        .await
        .unwrap();
    let state: LikeStateResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!state.liked);
    assert_eq!(state.like_count, 0);
}

#[tokio::test]
async fn test_only_author_edits_post() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = register_user(&server).await;
    let other = register_user(&server).await;

    let response = server
        .post_auth(
            "/api/v1/posts",
            &author.access_token,
            &json!({ "kind": "TEXT", "content": "original" }),
        )
        .await
        .unwrap();
    let post: serde_json::Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    let post_id = post["id"].as_str().unwrap();

    let response = server
        .patch_auth(
            &format!("/api/v1/posts/{post_id}"),
            &other.access_token,
            &json!({ "content": "hijacked" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // The author's edit succeeds and flips is_edited
    let response = server
        .patch_auth(
            &format!("/api/v1/posts/{post_id}"),
            &author.access_token,
            &json!({ "content": "edited" }),
        )
        .await
        .unwrap();
    let updated: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated["is_edited"], json!(true));
}

// ============================================================================
// Connection Tests
// ============================================================================

#[tokio::test]
async fn test_connection_duplicate_checks() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = register_user(&server).await;
    let bob = register_user(&server).await;

    // A -> B succeeds
    let response = server
        .post_auth(
            "/api/v1/connections",
            &alice.access_token,
            &json!({ "receiver_id": bob.user.id }),
        )
        .await
        .unwrap();
    let connection: ConnectionResponse =
        assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(connection.status, "PENDING");

    // A -> B again: forward-pair conflict
    let response = server
        .post_auth(
            "/api/v1/connections",
            &alice.access_token,
            &json!({ "receiver_id": bob.user.id }),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let envelope: ErrorEnvelope = response.json().await.unwrap();
    assert_eq!(envelope.error.code, "CONNECTION_ALREADY_EXISTS");

    // B -> A: reverse-pair conflict, distinct variant
    let response = server
        .post_auth(
            "/api/v1/connections",
            &bob.access_token,
            &json!({ "receiver_id": alice.user.id }),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let envelope: ErrorEnvelope = response.json().await.unwrap();
    assert_eq!(envelope.error.code, "REVERSE_CONNECTION_EXISTS");
}

#[tokio::test]
async fn test_self_connection_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = register_user(&server).await;

    let response = server
        .post_auth(
            "/api/v1/connections",
            &alice.access_token,
            &json!({ "receiver_id": alice.user.id }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_accepting_connection_notifies_requester() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = register_user(&server).await;
    let bob = register_user(&server).await;

    let response = server
        .post_auth(
            "/api/v1/connections",
            &alice.access_token,
            &json!({ "receiver_id": bob.user.id }),
        )
        .await
        .unwrap();
    let connection: ConnectionResponse =
        assert_json(response, StatusCode::CREATED).await.unwrap();

    // Bob accepts
    let response = server
        .patch_auth(
            &format!("/api/v1/connections/{}", connection.id),
            &bob.access_token,
            &json!({ "status": "ACCEPTED" }),
        )
        .await
        .unwrap();
    let connection: ConnectionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(connection.status, "ACCEPTED");

    // Alice got a connection_accepted notification
    let response = server
        .get_auth("/api/v1/notifications", &alice.access_token)
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    let kinds: Vec<&str> = body["notifications"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|n| n["kind"].as_str())
        .collect();
    assert!(kinds.contains(&"connection_accepted"));
}

// ============================================================================
// Project Tests
// ============================================================================

#[tokio::test]
async fn test_get_projects_only_returns_related() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register_user(&server).await;
    let outsider = register_user(&server).await;

    let project = create_project(&server, &owner.access_token, "secret-api").await;

    // The outsider's project list never includes it
    let response = server
        .get_auth("/api/v1/projects", &outsider.access_token)
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["id"].as_str())
        .collect();
    assert!(!ids.contains(&project.id.as_str()));

    // Direct lookup by the outsider yields the not-found condition,
    // indistinguishable from a project that does not exist
    let response = server
        .get_auth(&format!("/api/v1/projects/{}", project.id), &outsider.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_only_owner_deletes_project() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register_user(&server).await;
    let member = register_user(&server).await;

    let project = create_project(&server, &owner.access_token, "team-api").await;

    // Add the second user as a plain member
    let response = server
        .post_auth(
            &format!("/api/v1/projects/{}/members", project.id),
            &owner.access_token,
            &json!({ "user_id": member.user.id }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    // A member sees the project but cannot delete it
    let response = server
        .delete_auth(&format!("/api/v1/projects/{}", project.id), &member.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // The owner can
    let response = server
        .delete_auth(&format!("/api/v1/projects/{}", project.id), &owner.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

#[tokio::test]
async fn test_owner_cannot_be_removed_or_demoted() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register_user(&server).await;

    let project = create_project(&server, &owner.access_token, "immutable-owner").await;

    // Removing the owner always fails, even for the owner themselves
    let response = server
        .delete_auth(
            &format!("/api/v1/projects/{}/members/{}", project.id, owner.user.id),
            &owner.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // So does changing the owner's role
    let response = server
        .patch_auth(
            &format!("/api/v1/projects/{}/members/{}", project.id, owner.user.id),
            &owner.access_token,
            &json!({ "role": "MEMBER" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_invitation_accept_creates_membership() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register_user(&server).await;
    let developer = register_user(&server).await;

    let project = create_project(&server, &owner.access_token, "hiring").await;

    // Invite the developer
    let response = server
        .post_auth(
            &format!("/api/v1/projects/{}/invitations", project.id),
            &owner.access_token,
            &json!({ "developer_id": developer.user.id, "role": "BACKEND" }),
        )
        .await
        .unwrap();
    let invitation: serde_json::Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    let invitation_id = invitation["id"].as_str().unwrap();

    // The developer sees it and got a notification
    let response = server
        .get_auth("/api/v1/invitations", &developer.access_token)
        .await
        .unwrap();
    let invitations: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!invitations.as_array().unwrap().is_empty());

    // Accepting creates the MEMBER row
    let response = server
        .patch_auth(
            &format!("/api/v1/invitations/{invitation_id}"),
            &developer.access_token,
            &json!({ "status": "ACCEPTED" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/projects/{}", project.id), &developer.access_token)
        .await
        .unwrap();
    let project: ProjectResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let member = project
        .members
        .iter()
        .find(|m| m.user.id == developer.user.id)
        .expect("developer should be a member after accepting");
    assert_eq!(member.role, "MEMBER");
}

// ============================================================================
// Task / Kanban Tests
// ============================================================================

#[tokio::test]
async fn test_new_task_starts_todo_even_if_payload_says_otherwise() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register_user(&server).await;
    let project = create_project(&server, &owner.access_token, "board").await;

    // The payload smuggles a status; the server must ignore it
    let response = server
        .post_auth(
            &format!("/api/v1/projects/{}/tasks", project.id),
            &owner.access_token,
            &json!({ "title": "ship it", "priority": "HIGH", "status": "DONE" }),
        )
        .await
        .unwrap();
    let task: TaskResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(task.status, "TODO");
    assert_eq!(task.priority, "HIGH");
}

#[tokio::test]
async fn test_task_status_transitions_are_unrestricted() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register_user(&server).await;
    let project = create_project(&server, &owner.access_token, "transitions").await;

    let response = server
        .post_auth(
            &format!("/api/v1/projects/{}/tasks", project.id),
            &owner.access_token,
            &json!({ "title": "bounce", "priority": "LOW" }),
        )
        .await
        .unwrap();
    let task: TaskResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let task_path = format!("/api/v1/projects/{}/tasks/{}", project.id, task.id);

    // TODO -> DONE skips IN_PROGRESS entirely
    let response = server
        .patch_auth(&task_path, &owner.access_token, &json!({ "status": "DONE" }))
        .await
        .unwrap();
    let task: TaskResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(task.status, "DONE");

    // DONE -> TODO reopens it; there is no terminal state
    let response = server
        .patch_auth(&task_path, &owner.access_token, &json!({ "status": "TODO" }))
        .await
        .unwrap();
    let task: TaskResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(task.status, "TODO");
}

#[tokio::test]
async fn test_board_grouping_reflects_flat_list() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register_user(&server).await;
    let project = create_project(&server, &owner.access_token, "grouping").await;

    for title in ["one", "two", "three"] {
        let response = server
            .post_auth(
                &format!("/api/v1/projects/{}/tasks", project.id),
                &owner.access_token,
                &json!({ "title": title, "priority": "MEDIUM" }),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server
        .get_auth(&format!("/api/v1/projects/{}/tasks", project.id), &owner.access_token)
        .await
        .unwrap();
    let board: TaskBoardResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(board.tasks.len(), 3);
    assert_eq!(board.board.todo.len(), 3);
    assert!(board.board.in_progress.is_empty());
    assert!(board.board.done.is_empty());
}

// ============================================================================
// Messaging Tests
// ============================================================================

#[tokio::test]
async fn test_direct_conversations_are_deduplicated() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = register_user(&server).await;
    let bob = register_user(&server).await;

    let body = json!({ "kind": "DIRECT", "peer_id": bob.user.id });
    let response = server
        .post_auth("/api/v1/conversations", &alice.access_token, &body)
        .await
        .unwrap();
    let first: serde_json::Value = assert_json(response, StatusCode::CREATED).await.unwrap();

    // A second create call returns the same conversation
    let response = server
        .post_auth("/api/v1/conversations", &alice.access_token, &body)
        .await
        .unwrap();
    let second: serde_json::Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(first["id"], second["id"]);
}

#[tokio::test]
async fn test_read_receipt_pass() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = register_user(&server).await;
    let bob = register_user(&server).await;

    let response = server
        .post_auth(
            "/api/v1/conversations",
            &alice.access_token,
            &json!({ "kind": "DIRECT", "peer_id": bob.user.id }),
        )
        .await
        .unwrap();
    let conversation: serde_json::Value =
        assert_json(response, StatusCode::CREATED).await.unwrap();
    let conversation_id = conversation["id"].as_str().unwrap();

    // Alice sends two messages
    for content in ["hi", "are you there?"] {
        let response = server
            .post_auth(
                &format!("/api/v1/conversations/{conversation_id}/messages"),
                &alice.access_token,
                &json!({ "content": content }),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    // Bob's read pass flips both
    let response = server
        .post_auth_empty(
            &format!("/api/v1/conversations/{conversation_id}/read"),
            &bob.access_token,
        )
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["marked_read"], json!(2));

    // A second pass finds nothing unread
    let response = server
        .post_auth_empty(
            &format!("/api/v1/conversations/{conversation_id}/read"),
            &bob.access_token,
        )
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["marked_read"], json!(0));
}

// ============================================================================
// Analytics Tests
// ============================================================================

#[tokio::test]
async fn test_analytics_summary_counts_events() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = register_user(&server).await;

    for _ in 0..3 {
        let response = server
            .post_auth(
                "/api/v1/analytics/events",
                &user.access_token,
                &json!({ "kind": "task_completed", "data": {} }),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server
        .get_auth("/api/v1/analytics/summary?days=7", &user.access_token)
        .await
        .unwrap();
    let summary: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(summary["total_events"], json!(3));
    assert_eq!(summary["by_kind"][0]["kind"], json!("task_completed"));
    assert_eq!(summary["by_kind"][0]["count"], json!(3));
}
