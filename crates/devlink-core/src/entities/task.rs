//! Task entity - the unit of work displayed on the Kanban board

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Task status, one Kanban lane per value
///
/// Every directed transition between the three states is legal; the board
/// imposes no workflow constraints. New tasks always start at `Todo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// All statuses in board order
    pub const ALL: [TaskStatus; 3] = [Self::Todo, Self::InProgress, Self::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "TODO" => Some(Self::Todo),
            "IN_PROGRESS" => Some(Self::InProgress),
            "DONE" => Some(Self::Done),
            _ => None,
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "LOW" => Some(Self::Low),
            "MEDIUM" => Some(Self::Medium),
            "HIGH" => Some(Self::High),
            _ => None,
        }
    }
}

/// Task belonging to a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: Snowflake,
    pub project_id: Snowflake,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assignee_id: Option<Snowflake>,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new Task; status is always `Todo` at creation
    pub fn new(id: Snowflake, project_id: Snowflake, title: String, priority: TaskPriority) -> Self {
        let now = Utc::now();
        Self {
            id,
            project_id,
            title,
            description: None,
            status: TaskStatus::Todo,
            priority,
            assignee_id: None,
            due_date: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Derived Kanban grouping over a flat task list
///
/// This is a view computed on read, never persisted state.
#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    pub todo: Vec<Task>,
    pub in_progress: Vec<Task>,
    pub done: Vec<Task>,
}

impl TaskBoard {
    /// Group a flat task list into lanes by current status
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut board = Self::default();
        for task in tasks {
            match task.status {
                TaskStatus::Todo => board.todo.push(task.clone()),
                TaskStatus::InProgress => board.in_progress.push(task.clone()),
                TaskStatus::Done => board.done.push(task.clone()),
            }
        }
        board
    }

    /// Total number of tasks across all lanes
    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_with_status(id: i64, status: TaskStatus) -> Task {
        let mut task = Task::new(
            Snowflake::new(id),
            Snowflake::new(1),
            format!("task-{id}"),
            TaskPriority::Medium,
        );
        task.status = status;
        task
    }

    #[test]
    fn test_new_task_starts_todo() {
        let task = Task::new(
            Snowflake::new(1),
            Snowflake::new(2),
            "ship it".to_string(),
            TaskPriority::High,
        );
        assert_eq!(task.status, TaskStatus::Todo);
    }

    #[test]
    fn test_status_roundtrip() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TaskStatus::parse("BLOCKED"), None);
    }

    #[test]
    fn test_priority_roundtrip() {
        for priority in [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High] {
            assert_eq!(TaskPriority::parse(priority.as_str()), Some(priority));
        }
    }

    #[test]
    fn test_board_grouping_is_a_view() {
        let tasks = vec![
            task_with_status(1, TaskStatus::Todo),
            task_with_status(2, TaskStatus::Done),
            task_with_status(3, TaskStatus::InProgress),
            task_with_status(4, TaskStatus::Todo),
        ];

        let board = TaskBoard::from_tasks(&tasks);
        assert_eq!(board.todo.len(), 2);
        assert_eq!(board.in_progress.len(), 1);
        assert_eq!(board.done.len(), 1);
        assert_eq!(board.len(), tasks.len());
    }

    #[test]
    fn test_board_preserves_input_order_within_lane() {
        let tasks = vec![
            task_with_status(3, TaskStatus::Todo),
            task_with_status(1, TaskStatus::Todo),
            task_with_status(2, TaskStatus::Todo),
        ];

        let board = TaskBoard::from_tasks(&tasks);
        let ids: Vec<i64> = board.todo.iter().map(|t| t.id.into_inner()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_empty_board() {
        let board = TaskBoard::from_tasks(&[]);
        assert!(board.is_empty());
    }
}
