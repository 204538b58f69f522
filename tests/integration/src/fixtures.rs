//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    // Combine with the pid so parallel test binaries never collide
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    u64::from(std::process::id()) * 1_000_000 + n
}

/// Registration request
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("testuser{suffix}"),
            email: format!("test{suffix}@example.com"),
            password: "TestPass123!".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: AuthUser,
}

/// Authenticated user in the auth response
#[derive(Debug, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// Project response subset used by tests
#[derive(Debug, Deserialize)]
pub struct ProjectResponse {
    pub id: String,
    pub name: String,
    pub owner: UserSummary,
    pub members: Vec<MemberResponse>,
    pub tasks: Vec<TaskResponse>,
}

/// Member response subset
#[derive(Debug, Deserialize)]
pub struct MemberResponse {
    pub user: UserSummary,
    pub role: String,
}

/// User summary subset
#[derive(Debug, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
}

/// Task response subset
#[derive(Debug, Deserialize)]
pub struct TaskResponse {
    pub id: String,
    pub title: String,
    pub status: String,
    pub priority: String,
}

/// Task board response subset
#[derive(Debug, Deserialize)]
pub struct TaskBoardResponse {
    pub tasks: Vec<TaskResponse>,
    pub board: BoardLanes,
}

/// Board lanes subset
#[derive(Debug, Deserialize)]
pub struct BoardLanes {
    pub todo: Vec<TaskResponse>,
    pub in_progress: Vec<TaskResponse>,
    pub done: Vec<TaskResponse>,
}

/// Like toggle response
#[derive(Debug, Deserialize)]
pub struct LikeStateResponse {
    pub liked: bool,
    pub like_count: i64,
}

/// Skill response subset
#[derive(Debug, Deserialize)]
pub struct SkillResponse {
    pub id: String,
    pub name: String,
    pub level: String,
}

/// Connection response subset
#[derive(Debug, Deserialize)]
pub struct ConnectionResponse {
    pub id: String,
    pub status: String,
}

/// Error envelope returned by the API
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

/// Error detail in the envelope
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
