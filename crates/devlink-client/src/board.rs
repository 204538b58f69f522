//! Kanban board state
//!
//! Pure local state for the three lanes: a map from status to an ordered
//! task list, rebuilt by full replace from the flat server list on every
//! refetch. Drag-and-drop applies an optimistic move after capturing a
//! snapshot; the snapshot restores the board when the server rejects the
//! update.

use devlink_core::entities::TaskStatus;

use crate::api::TaskDto;

/// A point-in-time copy of all three lanes, captured before an optimistic
/// mutation so it can be rolled back
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot {
    lanes: [Vec<TaskDto>; 3],
}

/// Result of a drop
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// The drop target was not one of the three lanes; nothing changed
    InvalidTarget,
    /// The task was dropped on the lane it already lives in; nothing changed
    Unchanged,
    /// The lane move was applied optimistically; the caller must now issue
    /// the status update and roll back on failure
    Moved {
        task_id: String,
        from: TaskStatus,
        to: TaskStatus,
        snapshot: BoardSnapshot,
    },
}

/// The three Kanban lanes plus drag state
#[derive(Debug, Default)]
pub struct BoardState {
    todo: Vec<TaskDto>,
    in_progress: Vec<TaskDto>,
    done: Vec<TaskDto>,
    /// The task picked up by the current drag, if any
    dragging: Option<String>,
}

impl BoardState {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild every lane from the flat server list (full replace)
    pub fn rebuild(&mut self, tasks: &[TaskDto]) {
        self.todo.clear();
        self.in_progress.clear();
        self.done.clear();
        self.dragging = None;

        for task in tasks {
            self.lane_mut(task.status).push(task.clone());
        }
    }

    /// Tasks in one lane, in display order
    pub fn lane(&self, status: TaskStatus) -> &[TaskDto] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    fn lane_mut(&mut self, status: TaskStatus) -> &mut Vec<TaskDto> {
        match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
        }
    }

    /// Total number of tasks on the board
    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find a task and its current lane
    pub fn find(&self, task_id: &str) -> Option<(&TaskDto, TaskStatus)> {
        for status in TaskStatus::ALL {
            if let Some(task) = self.lane(status).iter().find(|t| t.id == task_id) {
                return Some((task, status));
            }
        }
        None
    }

    /// Drag-start: capture the dragged task by id
    pub fn begin_drag(&mut self, task_id: &str) -> bool {
        if self.find(task_id).is_some() {
            self.dragging = Some(task_id.to_string());
            true
        } else {
            false
        }
    }

    /// Abandon the current drag without changes
    pub fn cancel_drag(&mut self) {
        self.dragging = None;
    }

    /// Drag-end: validate the drop target and apply the optimistic move.
    ///
    /// `target` is the raw drop-zone identifier and must be one of the three
    /// status literals; anything else is a no-op. Dropping on the current
    /// lane is a no-op. Otherwise the task is removed from its source lane
    /// and appended to the target lane BEFORE any network call, and the
    /// pre-move snapshot is returned for rollback.
    pub fn drop_on(&mut self, target: &str) -> DropOutcome {
        let Some(task_id) = self.dragging.take() else {
            return DropOutcome::InvalidTarget;
        };

        let Some(to) = TaskStatus::parse(target) else {
            return DropOutcome::InvalidTarget;
        };

        let Some((_, from)) = self.find(&task_id) else {
            return DropOutcome::InvalidTarget;
        };

        if from == to {
            return DropOutcome::Unchanged;
        }

        let snapshot = self.snapshot();

        // Optimistic move: remove from source lane, append to target lane
        let source = self.lane_mut(from);
        let position = source.iter().position(|t| t.id == task_id);
        let Some(position) = position else {
            return DropOutcome::InvalidTarget;
        };
        let mut task = source.remove(position);
        task.status = to;
        self.lane_mut(to).push(task);

        DropOutcome::Moved {
            task_id,
            from,
            to,
            snapshot,
        }
    }

    /// Capture all three lanes for later rollback
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            lanes: [
                self.todo.clone(),
                self.in_progress.clone(),
                self.done.clone(),
            ],
        }
    }

    /// Restore the board to a snapshot (invoked when the server rejects an
    /// optimistic move)
    pub fn rollback(&mut self, snapshot: BoardSnapshot) {
        let [todo, in_progress, done] = snapshot.lanes;
        self.todo = todo;
        self.in_progress = in_progress;
        self.done = done;
        self.dragging = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devlink_core::entities::TaskPriority;

    fn task(id: &str, status: TaskStatus) -> TaskDto {
        TaskDto {
            id: id.to_string(),
            project_id: "1".to_string(),
            title: format!("task {id}"),
            description: None,
            status,
            priority: TaskPriority::Medium,
            assignee: None,
            due_date: None,
        }
    }

    fn board() -> BoardState {
        let mut board = BoardState::new();
        board.rebuild(&[
            task("a", TaskStatus::Todo),
            task("b", TaskStatus::Todo),
            task("c", TaskStatus::InProgress),
            task("d", TaskStatus::Done),
        ]);
        board
    }

    #[test]
    fn test_rebuild_is_full_replace() {
        let mut board = board();
        assert_eq!(board.lane(TaskStatus::Todo).len(), 2);

        // A refetch with fewer tasks replaces everything, leaving no remnants
        board.rebuild(&[task("z", TaskStatus::Done)]);
        assert_eq!(board.len(), 1);
        assert!(board.lane(TaskStatus::Todo).is_empty());
        assert_eq!(board.lane(TaskStatus::Done)[0].id, "z");
    }

    #[test]
    fn test_drop_moves_between_lanes() {
        let mut board = board();
        assert!(board.begin_drag("a"));

        let outcome = board.drop_on("IN_PROGRESS");
        match outcome {
            DropOutcome::Moved { task_id, from, to, .. } => {
                assert_eq!(task_id, "a");
                assert_eq!(from, TaskStatus::Todo);
                assert_eq!(to, TaskStatus::InProgress);
            }
            other => panic!("expected Moved, got {other:?}"),
        }

        // Removed from source, appended to target
        assert_eq!(board.lane(TaskStatus::Todo).len(), 1);
        let in_progress: Vec<&str> = board
            .lane(TaskStatus::InProgress)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(in_progress, vec!["c", "a"]);
        // The moved copy reflects its new status
        assert_eq!(board.find("a").unwrap().1, TaskStatus::InProgress);
    }

    #[test]
    fn test_drop_on_same_lane_is_noop() {
        let mut board = board();
        board.begin_drag("a");
        assert_eq!(board.drop_on("TODO"), DropOutcome::Unchanged);
        assert_eq!(board.lane(TaskStatus::Todo).len(), 2);
    }

    #[test]
    fn test_drop_on_unknown_target_is_noop() {
        let mut board = board();
        board.begin_drag("a");
        assert_eq!(board.drop_on("ARCHIVE"), DropOutcome::InvalidTarget);
        assert_eq!(board.lane(TaskStatus::Todo).len(), 2);
    }

    #[test]
    fn test_drop_without_drag_is_noop() {
        let mut board = board();
        assert_eq!(board.drop_on("DONE"), DropOutcome::InvalidTarget);
    }

    #[test]
    fn test_rollback_restores_pre_move_state() {
        let mut board = board();
        board.begin_drag("d");

        let outcome = board.drop_on("TODO");
        let DropOutcome::Moved { snapshot, .. } = outcome else {
            panic!("expected Moved");
        };

        // Board shows the optimistic state
        assert_eq!(board.lane(TaskStatus::Todo).len(), 3);
        assert!(board.lane(TaskStatus::Done).is_empty());

        // Server rejected the update: restore the snapshot
        board.rollback(snapshot);
        assert_eq!(board.lane(TaskStatus::Todo).len(), 2);
        assert_eq!(board.lane(TaskStatus::Done).len(), 1);
        assert_eq!(board.find("d").unwrap().1, TaskStatus::Done);
    }

    #[test]
    fn test_all_six_transitions_are_legal_locally() {
        for from in TaskStatus::ALL {
            for to in TaskStatus::ALL {
                if from == to {
                    continue;
                }
                let mut board = BoardState::new();
                board.rebuild(&[task("x", from)]);
                board.begin_drag("x");
                match board.drop_on(to.as_str()) {
                    DropOutcome::Moved { .. } => {}
                    other => panic!("{from:?} -> {to:?} should move, got {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_drag_unknown_task_fails() {
        let mut board = board();
        assert!(!board.begin_drag("nope"));
        assert_eq!(board.drop_on("DONE"), DropOutcome::InvalidTarget);
    }
}
