//! Task model mapper

use devlink_core::entities::{Task, TaskPriority, TaskStatus};
use devlink_core::Snowflake;

use crate::models::TaskModel;

impl From<TaskModel> for Task {
    fn from(model: TaskModel) -> Self {
        Task {
            id: Snowflake::new(model.id),
            project_id: Snowflake::new(model.project_id),
            title: model.title,
            description: model.description,
            status: TaskStatus::parse(&model.status).unwrap_or(TaskStatus::Todo),
            priority: TaskPriority::parse(&model.priority).unwrap_or(TaskPriority::Medium),
            assignee_id: model.assignee_id.map(Snowflake::new),
            due_date: model.due_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
