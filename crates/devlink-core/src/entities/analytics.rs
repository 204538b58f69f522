//! Analytics entity - append-only event log rows
//!
//! Rollups (daily/weekly) are computed on read, never maintained
//! incrementally.

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Open-ended analytics event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsEvent {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub project_id: Option<Snowflake>,
    /// Free-form event tag, e.g. "task_completed"
    pub kind: String,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl AnalyticsEvent {
    pub fn new(id: Snowflake, user_id: Snowflake, kind: String, data: serde_json::Value) -> Self {
        Self {
            id,
            user_id,
            project_id: None,
            kind,
            data,
            created_at: Utc::now(),
        }
    }

    pub fn with_project(mut self, project_id: Snowflake) -> Self {
        self.project_id = Some(project_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_creation() {
        let event = AnalyticsEvent::new(
            Snowflake::new(1),
            Snowflake::new(10),
            "task_completed".to_string(),
            json!({ "task_id": "5" }),
        )
        .with_project(Snowflake::new(7));

        assert_eq!(event.kind, "task_completed");
        assert_eq!(event.project_id, Some(Snowflake::new(7)));
    }
}
