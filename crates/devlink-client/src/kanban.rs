//! Kanban controller
//!
//! Wires the board state to the API client: optimistic drops with rollback
//! on failure, and the refetch-after-mutate rule for operations that touch
//! denormalized fields (assignee display names).

use devlink_core::entities::TaskStatus;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::board::{BoardState, DropOutcome};
use crate::error::{ClientError, ClientResult};

/// Drives one project's board against the server
pub struct KanbanController {
    client: ApiClient,
    project_id: String,
    board: BoardState,
}

impl KanbanController {
    /// Create a controller for one project
    pub fn new(client: ApiClient, project_id: impl Into<String>) -> Self {
        Self {
            client,
            project_id: project_id.into(),
            board: BoardState::new(),
        }
    }

    /// The current board state
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Fetch the task list and rebuild the lanes by full replace
    pub async fn refresh(&mut self) -> ClientResult<()> {
        let dto = self.client.get_project_tasks(&self.project_id).await?;
        self.board.rebuild(&dto.tasks);
        Ok(())
    }

    /// Drag-start
    pub fn begin_drag(&mut self, task_id: &str) -> bool {
        self.board.begin_drag(task_id)
    }

    /// Drag-end: optimistic lane move, then the status update.
    ///
    /// On a server error the board is rolled back to the pre-move snapshot
    /// and the error is returned so the UI can surface its message.
    pub async fn drop_on(&mut self, target: &str) -> ClientResult<DropOutcome> {
        let outcome = self.board.drop_on(target);

        let DropOutcome::Moved {
            task_id,
            from,
            to,
            snapshot,
        } = outcome
        else {
            return Ok(outcome);
        };

        match self
            .client
            .update_task_status(&self.project_id, &task_id, to)
            .await
        {
            Ok(_) => {
                info!(task_id = %task_id, from = %from.as_str(), to = %to.as_str(), "Task moved");
                Ok(DropOutcome::Moved {
                    task_id,
                    from,
                    to,
                    snapshot,
                })
            }
            Err(e) => {
                warn!(task_id = %task_id, error = %e, "Move rejected, rolling back");
                self.board.rollback(snapshot);
                Err(e)
            }
        }
    }

    /// Assign a task, then refetch the whole board.
    ///
    /// Assignment changes denormalized fields (the assignee summary), so
    /// local state is never patched: a successful write is always followed by
    /// a full refetch.
    pub async fn assign_task(
        &mut self,
        task_id: &str,
        assignee_id: Option<&str>,
    ) -> ClientResult<()> {
        self.client
            .assign_task(&self.project_id, task_id, assignee_id)
            .await?;
        self.refresh().await
    }

    /// Edit a task's title/description, then refetch the whole board
    pub async fn edit_task(
        &mut self,
        task_id: &str,
        title: Option<&str>,
        description: Option<&str>,
    ) -> ClientResult<()> {
        self.client
            .edit_task(&self.project_id, task_id, title, description)
            .await?;
        self.refresh().await
    }

    /// Move a task without a drag gesture (keyboard shortcut path)
    pub async fn move_task(&mut self, task_id: &str, to: TaskStatus) -> ClientResult<DropOutcome> {
        if !self.board.begin_drag(task_id) {
            return Err(ClientError::Decode(format!("Unknown task: {task_id}")));
        }
        self.drop_on(to.as_str()).await
    }
}

impl std::fmt::Debug for KanbanController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KanbanController")
            .field("project_id", &self.project_id)
            .field("tasks", &self.board.len())
            .finish()
    }
}
