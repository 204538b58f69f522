//! PostgreSQL implementation of TaskRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use devlink_core::entities::Task;
use devlink_core::traits::{RepoResult, TaskRepository};
use devlink_core::value_objects::Snowflake;

use crate::models::TaskModel;

use super::error::{map_db_error, task_not_found};

const TASK_COLUMNS: &str =
    "id, project_id, title, description, status, priority, assignee_id, due_date, created_at, updated_at";

/// PostgreSQL implementation of TaskRepository
#[derive(Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    /// Create a new PgTaskRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Task>> {
        let result = sqlx::query_as::<_, TaskModel>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Task::from))
    }

    #[instrument(skip(self))]
    async fn find_by_project(&self, project_id: Snowflake) -> RepoResult<Vec<Task>> {
        let results = sqlx::query_as::<_, TaskModel>(&format!(
            r"
            SELECT {TASK_COLUMNS}
            FROM tasks
            WHERE project_id = $1
            ORDER BY created_at ASC
            "
        ))
        .bind(project_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Task::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, task: &Task) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO tasks (id, project_id, title, description, status, priority,
                               assignee_id, due_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(task.id.into_inner())
        .bind(task.project_id.into_inner())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.priority.as_str())
        .bind(task.assignee_id.map(Snowflake::into_inner))
        .bind(task.due_date)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update(&self, task: &Task) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE tasks
            SET title = $2, description = $3, status = $4, priority = $5,
                assignee_id = $6, due_date = $7, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(task.id.into_inner())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.priority.as_str())
        .bind(task.assignee_id.map(Snowflake::into_inner))
        .bind(task.due_date)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(task_not_found(task.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(task_not_found(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgTaskRepository>();
    }
}
