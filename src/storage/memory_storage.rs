use crate::{
    domain::{
        Board, BoardPatch, Column, ColumnPatch, Comment, Goal, GoalPatch, MoveGoal, NewBoard,
        NewColumn, NewComment, NewGoal,
    },
    error::Result,
    storage::{Collections, Storage},
};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

/// Non-durable storage; everything is lost when the process exits.
///
/// Each operation runs under a single lock, so multi-entity writes such as
/// cascading deletes and renumbering are applied atomically.
pub struct MemStorage {
    state: RwLock<Collections>,
}

impl MemStorage {
    /// Creates an empty store
    pub fn new() -> Self {
        Self {
            state: RwLock::new(Collections::new()),
        }
    }

    /// Creates a store holding the sample board
    pub fn seeded() -> Self {
        Self {
            state: RwLock::new(Collections::seeded()),
        }
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    async fn is_initialized(&self) -> bool {
        true
    }

    async fn list_boards(&self) -> Result<Vec<Board>> {
        Ok(self.state.read().await.boards())
    }

    async fn get_board(&self, id: &str) -> Result<Board> {
        self.state.read().await.board(id).cloned()
    }

    async fn create_board(&self, board: NewBoard) -> Result<Board> {
        self.state.write().await.create_board(board)
    }

    async fn update_board(&self, id: &str, patch: BoardPatch) -> Result<Board> {
        self.state.write().await.update_board(id, patch)
    }

    async fn delete_board(&self, id: &str) -> Result<()> {
        self.state.write().await.delete_board(id)
    }

    async fn list_columns(&self, board_id: &str) -> Result<Vec<Column>> {
        Ok(self.state.read().await.columns_of(board_id))
    }

    async fn create_column(&self, column: NewColumn) -> Result<Column> {
        self.state.write().await.create_column(column)
    }

    async fn update_column(&self, id: &str, patch: ColumnPatch) -> Result<Column> {
        self.state.write().await.update_column(id, patch)
    }

    async fn delete_column(&self, id: &str) -> Result<()> {
        self.state.write().await.delete_column(id)
    }

    async fn list_goals_by_board(&self, board_id: &str) -> Result<Vec<Goal>> {
        Ok(self.state.read().await.goals_of(board_id))
    }

    async fn list_goals_by_column(&self, column_id: &str) -> Result<Vec<Goal>> {
        Ok(self.state.read().await.goals_in(column_id))
    }

    async fn list_wins(&self, board_id: &str) -> Result<Vec<Goal>> {
        Ok(self.state.read().await.wins_of(board_id))
    }

    async fn get_goal(&self, id: &str) -> Result<Goal> {
        self.state.read().await.goal(id).cloned()
    }

    async fn create_goal(&self, goal: NewGoal) -> Result<Goal> {
        self.state.write().await.create_goal(goal)
    }

    async fn update_goal(&self, id: &str, patch: GoalPatch) -> Result<Goal> {
        self.state.write().await.update_goal(id, patch, Utc::now())
    }

    async fn move_goal(&self, mv: MoveGoal) -> Result<Goal> {
        self.state.write().await.move_goal(&mv, Utc::now())
    }

    async fn delete_goal(&self, id: &str) -> Result<()> {
        self.state.write().await.delete_goal(id)
    }

    async fn list_comments(&self, goal_id: &str) -> Result<Vec<Comment>> {
        Ok(self.state.read().await.comments_on(goal_id))
    }

    async fn create_comment(&self, comment: NewComment) -> Result<Comment> {
        self.state.write().await.create_comment(comment)
    }

    async fn delete_comment(&self, id: &str) -> Result<()> {
        self.state.write().await.delete_comment(id)
    }
}
