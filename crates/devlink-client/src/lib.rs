//! # devlink-client
//!
//! Headless client for the Devlink REST API: a typed HTTP client, a
//! file-persisted session store, and the Kanban board state machine with
//! optimistic drag-and-drop moves.
//!
//! ## State discipline
//!
//! - Board lanes are rebuilt by full replace from the flat server task list
//!   on every refetch, never incrementally patched.
//! - A drop applies the lane move optimistically after capturing a snapshot;
//!   a failed status update rolls the board back to the snapshot.
//! - Assignment and edit operations refetch the whole project after a
//!   successful write instead of patching local state, so denormalized
//!   fields (assignee names, member lists) never drift.
//! - There is no retry logic anywhere in the client.

pub mod api;
pub mod board;
pub mod error;
pub mod kanban;
pub mod session;

pub use api::{ApiClient, ProjectDto, TaskBoardDto, TaskDto, UserSummaryDto};
pub use board::{BoardSnapshot, BoardState, DropOutcome};
pub use error::{ClientError, ClientResult};
pub use kanban::KanbanController;
pub use session::{Session, SessionStore};
