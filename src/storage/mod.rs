use crate::{
    domain::{
        Board, BoardPatch, Column, ColumnPatch, Comment, Goal, GoalPatch, MoveGoal, NewBoard,
        NewColumn, NewComment, NewGoal,
    },
    error::Result,
};
use async_trait::async_trait;

pub mod collections;
pub mod memory_storage;

#[cfg(feature = "file-storage")]
pub mod file_storage;

pub use collections::Collections;
#[cfg(feature = "file-storage")]
pub use file_storage::FileStorage;
pub use memory_storage::MemStorage;

/// Storage trait for boards, columns, goals and comments.
///
/// Lookups of a missing entity fail with the matching `*NotFound` error.
/// Listing the children of a missing parent returns an empty list.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Checks whether the backend already holds initialized state
    async fn is_initialized(&self) -> bool;

    /// Lists boards, oldest first
    async fn list_boards(&self) -> Result<Vec<Board>>;

    async fn get_board(&self, id: &str) -> Result<Board>;

    /// Creates a board together with its "To Do", "Doing" and "Done" columns
    async fn create_board(&self, board: NewBoard) -> Result<Board>;

    async fn update_board(&self, id: &str, patch: BoardPatch) -> Result<Board>;

    /// Deletes a board, its columns, its goals and their comments
    async fn delete_board(&self, id: &str) -> Result<()>;

    /// Lists a board's columns in position order
    async fn list_columns(&self, board_id: &str) -> Result<Vec<Column>>;

    async fn create_column(&self, column: NewColumn) -> Result<Column>;

    async fn update_column(&self, id: &str, patch: ColumnPatch) -> Result<Column>;

    /// Deletes a column, its goals and their comments
    async fn delete_column(&self, id: &str) -> Result<()>;

    /// Lists a board's goals that are not wins, in position order
    async fn list_goals_by_board(&self, board_id: &str) -> Result<Vec<Goal>>;

    /// Lists a column's goals in position order
    async fn list_goals_by_column(&self, column_id: &str) -> Result<Vec<Goal>>;

    /// Lists a board's wins, most recently completed first
    async fn list_wins(&self, board_id: &str) -> Result<Vec<Goal>>;

    async fn get_goal(&self, id: &str) -> Result<Goal>;

    async fn create_goal(&self, goal: NewGoal) -> Result<Goal>;

    async fn update_goal(&self, id: &str, patch: GoalPatch) -> Result<Goal>;

    /// Relocates a goal and renumbers the lanes it left and entered
    async fn move_goal(&self, mv: MoveGoal) -> Result<Goal>;

    /// Deletes a goal and its comments
    async fn delete_goal(&self, id: &str) -> Result<()>;

    /// Lists a goal's comments, oldest first
    async fn list_comments(&self, goal_id: &str) -> Result<Vec<Comment>>;

    async fn create_comment(&self, comment: NewComment) -> Result<Comment>;

    async fn delete_comment(&self, id: &str) -> Result<()>;
}
