//! Analytics database models

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for the analytics_events table
#[derive(Debug, Clone, FromRow)]
pub struct AnalyticsEventModel {
    pub id: i64,
    pub user_id: i64,
    pub project_id: Option<i64>,
    pub kind: String,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Aggregation row: events per kind
#[derive(Debug, Clone, FromRow)]
pub struct KindCountRow {
    pub kind: String,
    pub count: i64,
}

/// Aggregation row: events per calendar day
#[derive(Debug, Clone, FromRow)]
pub struct DailyCountRow {
    pub day: NaiveDate,
    pub count: i64,
}
