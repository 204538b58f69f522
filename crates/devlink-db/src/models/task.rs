//! Task database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the tasks table
#[derive(Debug, Clone, FromRow)]
pub struct TaskModel {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub assignee_id: Option<i64>,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
